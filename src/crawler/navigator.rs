//! Retry-with-restart page loading
//!
//! [`ResilientNavigator`] is the only owner of the renderer session. Every
//! failed attempt that will be retried tears the session down and launches a
//! fresh one before trying again: the renderer can end up in a corrupted
//! state that a plain re-navigate does not clear.

use crate::config::{CrawlConfig, RendererConfig};
use crate::renderer::{Document, RenderError, RenderResult, RenderSession, SessionLauncher};
use crate::state::AttemptState;
use crate::{HarvestError, NavigationError};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Timing and attempt budget for a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause between navigation and the readiness wait
    pub settle_delay: Duration,
    /// Upper bound on the readiness wait
    pub ready_timeout: Duration,
    pub backoff_min: Duration,
    pub backoff_max: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            settle_delay: config.settle_delay(),
            ready_timeout: config.ready_timeout(),
            backoff_min: Duration::from_millis(config.backoff_min_ms),
            backoff_max: Duration::from_millis(config.backoff_max_ms),
        }
    }

    /// A policy with no pauses at all
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            settle_delay: Duration::ZERO,
            ready_timeout: Duration::from_secs(1),
            backoff_min: Duration::ZERO,
            backoff_max: Duration::ZERO,
        }
    }

    /// Samples the pause taken after a restart, uniform in `[backoff_min, backoff_max]`
    pub fn backoff_delay(&self) -> Duration {
        let min = self.backoff_min.as_millis() as u64;
        let max = self.backoff_max.as_millis() as u64;
        if max <= min {
            return self.backoff_min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&CrawlConfig::default())
    }
}

/// Loads URLs through a renderer session, restarting it on failure
pub struct ResilientNavigator<L: SessionLauncher> {
    launcher: L,
    renderer_config: RendererConfig,
    policy: RetryPolicy,
    session: Option<L::Session>,
    restarts: u32,
}

impl<L: SessionLauncher> ResilientNavigator<L> {
    /// Launches the first session
    ///
    /// # Returns
    ///
    /// * `Ok(ResilientNavigator)` - A live session is ready
    /// * `Err(HarvestError::StartupFailure)` - The renderer could not be started at all
    pub async fn launch(
        launcher: L,
        renderer_config: RendererConfig,
        policy: RetryPolicy,
    ) -> Result<Self, HarvestError> {
        let session = launcher
            .launch(&renderer_config)
            .await
            .map_err(HarvestError::StartupFailure)?;

        Ok(Self {
            launcher,
            renderer_config,
            policy,
            session: Some(session),
            restarts: 0,
        })
    }

    /// Loads `url` and waits for `ready_selector`, retrying up to the policy's budget
    ///
    /// # Attempt Flow
    ///
    /// 1. Navigate to `url`
    /// 2. Sleep the settle delay
    /// 3. Wait for an element matching `ready_selector`
    /// 4. Return the document
    ///
    /// Any failure in 1–4 ends the attempt. If attempts remain, the session is
    /// restarted and a randomized backoff is slept before the next one. No
    /// restart follows the final attempt.
    pub async fn load(
        &mut self,
        url: &str,
        ready_selector: &str,
    ) -> Result<Document, NavigationError> {
        let mut state = AttemptState::start();
        let mut last_cause = RenderError::NoSession;

        while let AttemptState::Attempting(attempt) = state {
            match self.try_load(url, ready_selector).await {
                Ok(document) => {
                    state = state.succeed();
                    tracing::info!("Page loaded: {} (attempt {})", url, state.attempt());
                    return Ok(document);
                }
                Err(cause) => {
                    tracing::warn!("Attempt {} failed for URL {}: {}", attempt, url, cause);
                    last_cause = cause;
                    state = state.fail(self.policy.max_attempts);

                    if !state.is_terminal() {
                        if let Err(e) = self.restart().await {
                            tracing::warn!("Relaunch failed, next attempt will retry it: {}", e);
                        }
                        sleep(self.policy.backoff_delay()).await;
                    }
                }
            }
        }

        tracing::error!(
            "Giving up on {} after {} attempts.",
            url,
            state.attempt()
        );
        Err(NavigationError {
            url: url.to_string(),
            attempts: state.attempt(),
            last_cause,
        })
    }

    async fn try_load(&mut self, url: &str, ready_selector: &str) -> RenderResult<Document> {
        let session = self.session.as_mut().ok_or(RenderError::NoSession)?;

        session.navigate(url).await?;
        sleep(self.policy.settle_delay).await;
        session
            .wait_for(ready_selector, self.policy.ready_timeout)
            .await?;
        session.current_document().await
    }

    /// Tears down the current session (errors ignored) and launches a new one
    ///
    /// If the relaunch fails the navigator is left without a session; the next
    /// load attempt fails immediately and restarts again.
    pub async fn restart(&mut self) -> RenderResult<()> {
        tracing::info!("Restarting browser...");
        self.restarts += 1;

        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.teardown().await {
                tracing::debug!("Teardown of old session failed: {}", e);
            }
        }

        let session = self.launcher.launch(&self.renderer_config).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Closes the live session, if any
    pub async fn shutdown(mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.teardown().await {
                tracing::warn!("Failed to close renderer cleanly: {}", e);
            }
        }
    }

    /// Number of restarts performed so far
    pub fn restart_count(&self) -> u32 {
        self.restarts
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

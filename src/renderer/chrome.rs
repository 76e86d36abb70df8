//! Headless Chrome renderer
//!
//! Drives a Chrome process over the DevTools protocol with `chromiumoxide`.
//! Each session owns one browser process and one tab; teardown closes the
//! browser and stops its event handler task, so a relaunch starts from a
//! clean process rather than a reused tab.

use crate::config::RendererConfig;
use crate::renderer::{Document, RenderError, RenderResult, RenderSession, SessionLauncher};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};

/// Interval between readiness probes
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How long a closed browser gets to exit before it is killed
const PROCESS_EXIT_TIMEOUT: Duration = Duration::from_secs(10);

/// The parts of a browser process that teardown drives
#[async_trait]
trait BrowserProcess: Send {
    /// Asks the browser to close over CDP
    async fn request_close(&mut self) -> Result<(), String>;

    /// Waits for the process to exit
    async fn wait_exit(&mut self);

    /// Kills the process outright
    async fn force_kill(&mut self);
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> Result<(), String> {
        self.close().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn wait_exit(&mut self) {
        if let Err(e) = self.wait().await {
            tracing::debug!("Waiting for browser exit failed: {}", e);
        }
    }

    async fn force_kill(&mut self) {
        if let Some(Err(e)) = self.kill().await {
            tracing::debug!("Killing browser failed: {}", e);
        }
    }
}

/// Closes a browser process with every step bounded
///
/// A failed or timed-out close means the CDP connection is gone and the
/// process will not exit by itself, so it is killed before waiting. A process
/// that still has not exited after `exit_timeout` is killed as well.
async fn shutdown_process<P: BrowserProcess + ?Sized>(
    process: &mut P,
    close_timeout: Duration,
    exit_timeout: Duration,
) -> RenderResult<()> {
    let closed = match timeout(close_timeout, process.request_close()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(RenderError::Disconnected(e)),
        Err(_) => Err(RenderError::Timeout {
            operation: "Browser close",
            after: close_timeout,
        }),
    };

    if closed.is_err() {
        process.force_kill().await;
    }

    if timeout(exit_timeout, process.wait_exit()).await.is_err() {
        tracing::warn!("Browser did not exit within {:?}, killing it", exit_timeout);
        process.force_kill().await;
    }

    closed
}

/// Launches [`ChromeSession`]s
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher;

impl ChromeLauncher {
    pub fn new() -> Self {
        Self
    }
}

/// Builds Chrome launch arguments from the renderer settings
///
/// # Arguments
///
/// * `config` - Window size, headless mode, user agent and fingerprint flags
///
/// # Returns
///
/// * `Ok(BrowserConfig)` - Ready to pass to `Browser::launch`
/// * `Err(RenderError::Launch)` - The settings could not be turned into a launch config
pub fn build_browser_config(config: &RendererConfig) -> RenderResult<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .window_size(config.window_width, config.window_height)
        .request_timeout(config.page_load_timeout())
        .arg("--disable-dev-shm-usage")
        .arg(format!("--user-agent={}", config.user_agent));

    if !config.headless {
        builder = builder.with_head();
    }

    if config.no_sandbox {
        builder = builder.no_sandbox();
    }

    if config.suppress_automation {
        builder = builder.arg("--disable-blink-features=AutomationControlled");
    }

    if let Some(executable) = &config.executable {
        builder = builder.chrome_executable(executable);
    }

    builder.build().map_err(RenderError::Launch)
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self, config: &RendererConfig) -> RenderResult<ChromeSession> {
        tracing::info!("Launching browser...");
        let browser_config = build_browser_config(config)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // The CDP connection only makes progress while its handler is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(RenderError::Launch(e.to_string()));
            }
        };

        Ok(ChromeSession {
            browser,
            handler,
            page,
            page_load_timeout: config.page_load_timeout(),
            script_timeout: config.script_timeout(),
            current_url: None,
        })
    }
}

/// One Chrome process with a single tab
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    page_load_timeout: Duration,
    script_timeout: Duration,
    current_url: Option<String>,
}

impl ChromeSession {
    fn check_alive(&self) -> RenderResult<()> {
        if self.handler.is_finished() {
            return Err(RenderError::Disconnected(
                "browser event handler has exited".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RenderSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> RenderResult<()> {
        self.check_alive()?;
        self.current_url = None;

        match timeout(self.page_load_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {
                self.current_url = Some(url.to_string());
                Ok(())
            }
            Ok(Err(e)) => Err(RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(RenderError::Timeout {
                operation: "Page load",
                after: self.page_load_timeout,
            }),
        }
    }

    async fn wait_for(&mut self, selector: &str, wait: Duration) -> RenderResult<()> {
        let deadline = Instant::now() + wait;
        let probe_timeout = self.script_timeout.min(wait.max(POLL_INTERVAL));

        loop {
            self.check_alive()?;

            if let Ok(Ok(_)) = timeout(probe_timeout, self.page.find_element(selector)).await {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(RenderError::ElementNotFound {
                    selector: selector.to_string(),
                    waited: wait,
                });
            }

            sleep(POLL_INTERVAL).await;
        }
    }

    async fn current_document(&mut self) -> RenderResult<Document> {
        self.check_alive()?;
        let url = self.current_url.clone().ok_or(RenderError::NoDocument)?;

        match timeout(self.script_timeout, self.page.content()).await {
            Ok(Ok(html)) => Ok(Document::new(url, html)),
            Ok(Err(e)) => Err(RenderError::Disconnected(e.to_string())),
            Err(_) => Err(RenderError::Timeout {
                operation: "Reading page source",
                after: self.script_timeout,
            }),
        }
    }

    async fn teardown(&mut self) -> RenderResult<()> {
        tracing::info!("Closing browser...");
        let closed =
            shutdown_process(&mut self.browser, self.script_timeout, PROCESS_EXIT_TIMEOUT).await;
        self.handler.abort();
        self.current_url = None;
        closed
    }
}

//! In-memory renderer driven by a script, for exercising retry and extraction paths

use crate::config::RendererConfig;
use crate::renderer::{html_has_match, Document, RenderError, RenderResult, RenderSession, SessionLauncher};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Script {
    pages: HashMap<String, String>,
    pending_failures: HashMap<String, u32>,
    always_fail: HashSet<String>,
    fail_launch: bool,
    failing_launch_calls: HashSet<u32>,
    launch_calls: u32,
    launches: u32,
    teardowns: u32,
    navigations: Vec<String>,
}

/// Launcher whose sessions serve canned pages and fail on cue
///
/// Clones share the same script and counters.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLauncher {
    script: Arc<Mutex<Script>>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), html.to_string());
        self
    }

    /// The next `times` navigations to `url` fail before it starts serving
    pub fn fail_times(self, url: &str, times: u32) -> Self {
        self.script
            .lock()
            .unwrap()
            .pending_failures
            .insert(url.to_string(), times);
        self
    }

    pub fn always_fail(self, url: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .always_fail
            .insert(url.to_string());
        self
    }

    pub fn fail_launch(self) -> Self {
        self.script.lock().unwrap().fail_launch = true;
        self
    }

    /// The `call`-th call to `launch` (one-based, counting the first launch) fails
    pub fn fail_launch_call(self, call: u32) -> Self {
        self.script
            .lock()
            .unwrap()
            .failing_launch_calls
            .insert(call);
        self
    }

    /// Calls to `launch`, failed ones included
    pub fn launch_calls(&self) -> u32 {
        self.script.lock().unwrap().launch_calls
    }

    /// Successful launches
    pub fn launches(&self) -> u32 {
        self.script.lock().unwrap().launches
    }

    pub fn teardowns(&self) -> u32 {
        self.script.lock().unwrap().teardowns
    }

    pub fn navigations_to(&self, url: &str) -> usize {
        self.script
            .lock()
            .unwrap()
            .navigations
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    pub fn total_navigations(&self) -> usize {
        self.script.lock().unwrap().navigations.len()
    }
}

#[async_trait]
impl SessionLauncher for ScriptedLauncher {
    type Session = ScriptedSession;

    async fn launch(&self, _config: &RendererConfig) -> RenderResult<ScriptedSession> {
        let mut script = self.script.lock().unwrap();
        script.launch_calls += 1;
        let call = script.launch_calls;
        if script.fail_launch || script.failing_launch_calls.contains(&call) {
            return Err(RenderError::Launch("driver binary not found".to_string()));
        }
        script.launches += 1;
        Ok(ScriptedSession {
            script: Arc::clone(&self.script),
            current: None,
        })
    }
}

pub struct ScriptedSession {
    script: Arc<Mutex<Script>>,
    current: Option<Document>,
}

#[async_trait]
impl RenderSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> RenderResult<()> {
        let mut script = self.script.lock().unwrap();
        script.navigations.push(url.to_string());
        self.current = None;

        if script.always_fail.contains(url) {
            return Err(RenderError::Timeout {
                operation: "Page load",
                after: Duration::from_secs(120),
            });
        }

        if let Some(remaining) = script.pending_failures.get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(RenderError::Disconnected("tab crashed".to_string()));
            }
        }

        match script.pages.get(url) {
            Some(html) => {
                self.current = Some(Document::new(url, html.clone()));
                Ok(())
            }
            None => Err(RenderError::Http {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> RenderResult<()> {
        let document = self.current.as_ref().ok_or(RenderError::NoDocument)?;
        if html_has_match(document.html(), selector)? {
            Ok(())
        } else {
            Err(RenderError::ElementNotFound {
                selector: selector.to_string(),
                waited: timeout,
            })
        }
    }

    async fn current_document(&mut self) -> RenderResult<Document> {
        self.current.clone().ok_or(RenderError::NoDocument)
    }

    async fn teardown(&mut self) -> RenderResult<()> {
        self.script.lock().unwrap().teardowns += 1;
        self.current = None;
        Ok(())
    }
}

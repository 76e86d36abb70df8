//! Renderer abstraction
//!
//! The crawl logic only ever talks to a [`RenderSession`] obtained from a
//! [`SessionLauncher`]. A session is one live renderer instance; the launcher
//! can produce a fresh one at any time, which is how the navigator recovers
//! from a session whose state has gone bad.
//!
//! Two backends are provided:
//! - [`ChromeLauncher`]: headless Chrome over the DevTools protocol
//! - [`HttpLauncher`]: plain HTTP fetches, no script execution

mod chrome;
mod http;
#[cfg(test)]
pub(crate) mod scripted;

pub use chrome::{ChromeLauncher, ChromeSession};
pub use http::{HttpLauncher, HttpSession};

use crate::config::RendererConfig;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a renderer session
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch renderer: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("No element matching '{selector}' within {waited:?}")]
    ElementNotFound { selector: String, waited: Duration },

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("Renderer disconnected: {0}")]
    Disconnected(String),

    #[error("No live renderer session")]
    NoSession,

    #[error("No document loaded")]
    NoDocument,
}

/// Result type alias for renderer operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// A rendered page snapshot
///
/// Holds the serialized DOM rather than a parsed tree so it can move freely
/// between tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: String,
    html: String,
}

impl Document {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// The URL the document was loaded from
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Checks whether any element in `html` matches a CSS selector
pub fn html_has_match(html: &str, selector: &str) -> RenderResult<bool> {
    let selector =
        Selector::parse(selector).map_err(|_| RenderError::InvalidSelector(selector.to_string()))?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}

/// One live renderer instance
#[async_trait]
pub trait RenderSession: Send {
    /// Starts loading `url` in the session
    async fn navigate(&mut self, url: &str) -> RenderResult<()>;

    /// Waits until an element matches `selector`, or fails after `timeout`
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> RenderResult<()>;

    /// Snapshot of the currently loaded document
    async fn current_document(&mut self) -> RenderResult<Document>;

    /// Shuts the instance down; the session is unusable afterwards
    async fn teardown(&mut self) -> RenderResult<()>;
}

/// Creates renderer sessions
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: RenderSession;

    async fn launch(&self, config: &RendererConfig) -> RenderResult<Self::Session>;
}

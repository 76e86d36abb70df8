//! Plain-HTTP renderer
//!
//! Fetches pages with `reqwest` and treats the response body as the rendered
//! document. No script runs, so the readiness wait is a single check against
//! the static markup: if the selector is not there now it never will be.
//! Useful for sites that render server-side and for exercising the crawl
//! pipeline against a mock server.

use crate::config::RendererConfig;
use crate::renderer::{html_has_match, Document, RenderError, RenderResult, RenderSession, SessionLauncher};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Launches [`HttpSession`]s
#[derive(Debug, Clone, Default)]
pub struct HttpLauncher;

impl HttpLauncher {
    pub fn new() -> Self {
        Self
    }
}

/// Builds an HTTP client from the renderer settings
///
/// A new client per session means a restart also drops pooled connections.
pub fn build_http_client(config: &RendererConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.page_load_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[async_trait]
impl SessionLauncher for HttpLauncher {
    type Session = HttpSession;

    async fn launch(&self, config: &RendererConfig) -> RenderResult<HttpSession> {
        let client =
            build_http_client(config).map_err(|e| RenderError::Launch(e.to_string()))?;
        tracing::debug!("HTTP renderer ready (user agent: {})", config.user_agent);
        Ok(HttpSession {
            client: Some(client),
            page_load_timeout: config.page_load_timeout(),
            current: None,
        })
    }
}

/// A session backed by a `reqwest` client
pub struct HttpSession {
    client: Option<Client>,
    page_load_timeout: Duration,
    current: Option<Document>,
}

#[async_trait]
impl RenderSession for HttpSession {
    async fn navigate(&mut self, url: &str) -> RenderResult<()> {
        let client = self.client.as_ref().ok_or(RenderError::NoSession)?;
        self.current = None;

        let response = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RenderError::Timeout {
                    operation: "Page load",
                    after: self.page_load_timeout,
                }
            } else if e.is_connect() {
                RenderError::Disconnected(e.to_string())
            } else {
                RenderError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| RenderError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        self.current = Some(Document::new(final_url, body));
        Ok(())
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
        self.client = None;
        self.current = None;
        Ok(())
    }
}

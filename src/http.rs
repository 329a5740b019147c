//! Blocking HTTP access used for both the release API and binary downloads

use std::io::Read;
use std::time::Duration;

use thiserror::Error;

const USER_AGENT: &str = concat!("MagiskHluda/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: u32 = 10;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, for diagnostics
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The request never produced an HTTP status (DNS, TLS, connection reset...)
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Minimal GET-only client.
///
/// Error statuses come back as responses; only transport problems are `Err`.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

// ============================================================================
// ureq Client
// ============================================================================

pub struct UreqClient {
    agent: ureq::Agent,
    api_base: String,
    token: Option<String>,
}

impl UreqClient {
    /// `token` is attached only to requests whose URL starts with `api_base`,
    /// never to the redirected asset downloads.
    pub fn new(api_base: &str, token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(USER_AGENT)
            .redirects(MAX_REDIRECTS)
            .timeout_connect(Duration::from_secs(30))
            .build();

        Self {
            agent,
            api_base: api_base.to_string(),
            token,
        }
    }
}

impl HttpClient for UreqClient {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.get(url);
        if url.starts_with(&self.api_base) {
            request = request.set("Accept", "application/vnd.github+json");
            if let Some(token) = &self.token {
                request = request.set("Authorization", &format!("Bearer {}", token));
            }
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => return Err(TransportError(e.to_string())),
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| TransportError(format!("failed reading response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Test Double
// ============================================================================

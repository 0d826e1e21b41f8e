use crate::error::TransportError;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` string of a JSON body, when there is a non-empty one.
    pub fn server_message(&self) -> Option<String> {
        let json: serde_json::Value = serde_json::from_str(self.body.as_str()).ok()?;
        json.get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|message| !message.is_empty())
            .map(ToOwned::to_owned)
    }
}

/// The remote API as seen by the submit pipeline.
///
/// Any response that arrives is `Ok`, whatever its status; `Err` means no
/// response was obtained.
pub trait Transport: Send + Sync {
    fn post_json(&self, path: &str, body: &serde_json::Value)
    -> Result<HttpResponse, TransportError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for UreqTransport {
    fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(path);
        let payload = serde_json::to_string(body)?;
        debug!(%url, bytes = payload.len(), "POST");

        let response = match self
            .agent
            .post(url.as_str())
            .set("Content-Type", "application/json")
            .send_string(payload.as_str())
        {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(TransportError::Unreachable {
                    url,
                    reason: transport.to_string(),
                });
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|source| TransportError::Body {
                url: url.clone(),
                source,
            })?;
        debug!(%url, status, "response");
        Ok(HttpResponse::new(status, body))
    }
}

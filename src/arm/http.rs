//! HTTP utilities for Azure Resource Manager REST calls

use super::client::ClientOptions;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const ASYNC_OPERATION_HEADER: &str = "azure-asyncoperation";
const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

/// Sanitize response body for logging
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Status code and parsed JSON body of a completed call
#[derive(Debug, Clone)]
pub struct ArmResponse {
    pub status: u16,
    pub body: Value,
    poll_target: Option<PollTarget>,
}

impl ArmResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            poll_target: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Delete outcome: 200 once done, or 202 when the service queued it without a poll header
    pub fn is_delete_accepted(&self) -> bool {
        matches!(self.status, 200 | 202)
    }
}

/// Where to poll a long-running operation
#[derive(Debug, Clone, PartialEq, Eq)]
enum PollTarget {
    AsyncOperation(String),
    Location(String),
}

impl PollTarget {
    fn from_response(status: u16, headers: &HeaderMap) -> Option<Self> {
        if status != 201 && status != 202 {
            return None;
        }
        let header = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        header(ASYNC_OPERATION_HEADER)
            .map(PollTarget::AsyncOperation)
            .or_else(|| {
                // A bare Location on 201 is the created resource, not a monitor
                if status == 202 {
                    header(LOCATION.as_str()).map(PollTarget::Location)
                } else {
                    None
                }
            })
    }
}

/// HTTP client wrapper for ARM calls
#[derive(Clone)]
pub struct ArmHttpClient {
    client: Client,
    initial_delay: Duration,
    retry_delay: Duration,
    max_polls: u32,
}

impl ArmHttpClient {
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("azrm/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(options.request_timeout_secs))
            .build()
            .map_err(Error::transport)?;

        Ok(Self {
            client,
            initial_delay: Duration::from_millis(options.long_running_initial_delay_ms),
            retry_delay: Duration::from_millis(options.long_running_retry_delay_ms),
            max_polls: options.long_running_max_polls,
        })
    }

    /// Send one request and wait for any long-running operation it starts
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<ArmResponse> {
        let response = self.send(method.clone(), url, token, body).await?;

        match response.poll_target.clone() {
            None => Ok(response),
            Some(target) => {
                tracing::info!("{} {} started a long-running operation", method, url);
                self.wait_for_completion(&method, url, token, target).await
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<ArmResponse> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!("{} {} [{}]", method, url, request_id);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header(CLIENT_REQUEST_ID_HEADER, &request_id);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::transport)?;

        let status = response.status();
        let poll_target = PollTarget::from_response(status.as_u16(), response.headers());
        let text = response.text().await.map_err(Error::transport)?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&text));
            return Err(error_from_body(Some(status.as_u16()), &text));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ArmResponse {
            status: status.as_u16(),
            body,
            poll_target,
        })
    }

    async fn wait_for_completion(
        &self,
        method: &Method,
        url: &str,
        token: &str,
        target: PollTarget,
    ) -> Result<ArmResponse> {
        tokio::time::sleep(self.initial_delay).await;

        for attempt in 1..=self.max_polls {
            match &target {
                PollTarget::AsyncOperation(monitor) => {
                    let poll = self.send(Method::GET, monitor, token, None).await?;
                    let state = poll
                        .body
                        .get("status")
                        .and_then(Value::as_str)
                        .unwrap_or("InProgress");
                    tracing::debug!("Operation poll {}: {}", attempt, state);

                    match state {
                        "Succeeded" => {
                            if *method == Method::PUT || *method == Method::PATCH {
                                return self.send(Method::GET, url, token, None).await;
                            }
                            return Ok(ArmResponse::new(200, Value::Null));
                        }
                        "Failed" | "Canceled" => {
                            return Err(error_from_value(None, &poll.body, state));
                        }
                        _ => {}
                    }
                }
                PollTarget::Location(location) => {
                    let poll = self.send(Method::GET, location, token, None).await?;
                    tracing::debug!("Operation poll {}: {}", attempt, poll.status);
                    if poll.status != 202 {
                        return Ok(ArmResponse::new(
                            if poll.status == 204 { 200 } else { poll.status },
                            poll.body,
                        ));
                    }
                }
            }

            tokio::time::sleep(self.retry_delay).await;
        }

        Err(Error::RemoteCall {
            status: None,
            code: Some("OperationTimedOut".to_string()),
            message: format!(
                "long-running operation did not finish after {} polls",
                self.max_polls
            ),
        })
    }
}

fn error_from_body(status: Option<u16>, text: &str) -> Error {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => error_from_value(status, &value, "request failed"),
        Err(_) => Error::RemoteCall {
            status,
            code: None,
            message: sanitize_for_log(text),
        },
    }
}

/// Build a remote error from an ARM `{"error": {"code", "message"}}` payload
fn error_from_value(status: Option<u16>, value: &Value, fallback: &str) -> Error {
    let detail = value.get("error").unwrap_or(value);
    let code = detail
        .get("code")
        .and_then(Value::as_str)
        .map(str::to_string);
    let message = detail
        .get("message")
        .and_then(Value::as_str)
        .map(sanitize_for_log)
        .unwrap_or_else(|| fallback.to_string());

    Error::RemoteCall {
        status,
        code,
        message,
    }
}

/// Format an ARM error for display
/// Security: Sanitizes error messages to avoid leaking sensitive API details
pub fn format_arm_error(error: &anyhow::Error) -> String {
    if let Some(err) = error.downcast_ref::<Error>() {
        match err.status() {
            Some(401) => {
                return "Authentication failed. Run 'az login' or set AZURE_ACCESS_TOKEN.".to_string()
            }
            Some(403) => {
                return "Permission denied. Check your Azure role assignments.".to_string()
            }
            Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
            Some(500) | Some(503) => {
                return "Azure service temporarily unavailable. Please try again.".to_string()
            }
            _ => {}
        }
    }

    let error_str = format!("{:#}", error);
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(240)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_delete_outcomes() {
        assert!(ArmResponse::new(200, Value::Null).is_delete_accepted());
        assert!(ArmResponse::new(202, Value::Null).is_delete_accepted());
        assert!(!ArmResponse::new(204, Value::Null).is_delete_accepted());
        assert!(!ArmResponse::new(202, Value::Null).is_ok());
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let out = sanitize_for_log(&body);
        assert!(out.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(out.contains("500 bytes total"));
    }

    #[test]
    fn test_error_from_arm_payload() {
        let err = error_from_body(
            Some(404),
            r#"{"error": {"code": "ResourceNotFound", "message": "The Resource 'x' was not found."}}"#,
        );
        match err {
            Error::RemoteCall {
                status,
                code,
                message,
            } => {
                assert_eq!(status, Some(404));
                assert_eq!(code.as_deref(), Some("ResourceNotFound"));
                assert!(message.contains("was not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_poll_target_selection() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("https://loc"));
        assert_eq!(PollTarget::from_response(200, &headers), None);
        assert_eq!(PollTarget::from_response(201, &headers), None);
        assert_eq!(
            PollTarget::from_response(202, &headers),
            Some(PollTarget::Location("https://loc".to_string()))
        );

        headers.insert(
            ASYNC_OPERATION_HEADER,
            HeaderValue::from_static("https://op"),
        );
        assert_eq!(
            PollTarget::from_response(201, &headers),
            Some(PollTarget::AsyncOperation("https://op".to_string()))
        );
    }

    #[test]
    fn test_format_arm_error_maps_status() {
        let err = anyhow::Error::new(Error::RemoteCall {
            status: Some(403),
            code: None,
            message: "denied".to_string(),
        });
        assert!(format_arm_error(&err).contains("Permission denied"));
    }
}

//! HTTP transport for the agent directory client.
//!
//! Handles HTTP communication with the directory service: session cookie
//! forwarding, retry with backoff for idempotent reads, and error parsing.

use std::time::Duration;

use rand::thread_rng;
use rand::Rng;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, Error, ALREADY_LIKED_CODE, ALREADY_LIKED_MESSAGE};

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

impl RetryConfig {
    /// A configuration that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// HTTP transport layer.
///
/// Reads (`GET`) are retried with exponential backoff and jitter. Toggle
/// mutations (`POST`) are sent exactly once: repeating one would flip the
/// relation back on the server.
pub struct HttpTransport {
    base_url: String,
    endpoint: Url,
    session: Option<String>,
    client: Client,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for API requests (e.g. "<https://backend.example/api>")
    /// * `session` - Session cookie sent with every request, if any
    /// * `timeout` - Request timeout
    /// * `retry_config` - Configuration for retry behavior
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if `base_url` is not an absolute
    /// hierarchical URL, or an error if the HTTP client cannot be created.
    pub fn new(
        base_url: &str,
        session: Option<&str>,
        timeout: Duration,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let endpoint = Url::parse(&base_url)
            .map_err(|e| Error::Configuration(format!("Invalid base URL {base_url:?}: {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "Base URL {base_url:?} cannot carry a path"
            )));
        }

        Ok(Self {
            base_url,
            endpoint,
            session: session.filter(|s| !s.is_empty()).map(String::from),
            client,
            retry_config: retry_config.unwrap_or_default(),
        })
    }

    /// Issue a `GET` with automatic retry and decode the JSON body.
    ///
    /// `segments` are appended to the base URL one path segment each.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on API errors, `Error::Http` on transport failures.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments)?;
        self.execute_with_retry(|| async {
            debug!(path = url.path(), "GET");
            self.authorize(self.client.get(url.clone()))
                .send()
                .await
                .map_err(|e| Error::Http(e.to_string()))
        })
        .await
    }

    /// Issue a single `POST` with an empty JSON body.
    ///
    /// Returns the success status code together with the decoded body, since
    /// toggle endpoints use the status code to tell "added" from "removed".
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on API errors, `Error::Http` on transport failures.
    pub async fn post<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<(StatusCode, T), Error> {
        let url = self.url(segments)?;
        debug!(path = url.path(), "POST");
        let response = self
            .authorize(self.client.post(url))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.parse_error_response(response).await);
        }

        let body = decode_body(response).await?;
        Ok((status, body))
    }

    /// Execute a request with automatic retry on retryable errors.
    async fn execute_with_retry<F, Fut, T>(&self, request_fn: F) -> Result<T, Error>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<Response, Error>>,
        T: DeserializeOwned,
    {
        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.retry_config.max_retries {
            match request_fn().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return decode_body(response).await;
                    }

                    let error = self.parse_error_response(response).await;

                    if !self.should_retry(status.as_u16(), attempt) {
                        return Err(error);
                    }

                    let retry_after = error.api().and_then(ApiError::retry_after);
                    let wait_time = self.get_backoff_time(attempt, retry_after);
                    warn!(
                        status = status.as_u16(),
                        attempt,
                        wait_secs = wait_time,
                        "Retrying directory request"
                    );
                    last_error = Some(error);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt >= self.retry_config.max_retries {
                        return Err(e);
                    }

                    let wait_time = self.get_backoff_time(attempt, None);
                    warn!(
                        attempt,
                        wait_secs = wait_time,
                        error = %e,
                        "Retrying after network error"
                    );
                    last_error = Some(e);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Api(ApiError::Server {
                code: "MAX_RETRIES_EXCEEDED".to_string(),
                message: "Request failed after maximum retries".to_string(),
                request_id: None,
            })
        }))
    }

    /// Determine if a request should be retried.
    fn should_retry(&self, status_code: u16, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        self.retry_config.retry_on.contains(&status_code)
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After header
    /// if present.
    fn get_backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra).min(self.retry_config.max_backoff);
            }
        }

        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let base_wait = self.retry_config.backoff_factor.powi(exponent);

        let jitter_range = base_wait * self.retry_config.jitter;
        let wait_time = if jitter_range > 0.0 {
            base_wait + thread_rng().gen_range(-jitter_range..jitter_range)
        } else {
            base_wait
        };

        wait_time.clamp(0.0, self.retry_config.max_backoff)
    }

    /// Parse an error response into a typed error.
    async fn parse_error_response(&self, response: Response) -> Error {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let data: Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({}));

        Error::Api(classify_error(status, retry_after, &data))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(cookie) => request.header(header::COOKIE, cookie),
            None => request,
        }
    }

    /// Build a request URL. Each segment is percent-encoded on its own, so
    /// `/`, `?` and `#` inside an agent id stay part of that segment.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::Configuration(format!("Base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session cookie is attached to requests.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    response
        .json()
        .await
        .map_err(|e| Error::Http(format!("Failed to parse response: {e}")))
}

/// Map an error status and body to an [`ApiError`].
///
/// Accepts both the enveloped `{"error": {"code", "message"}, "meta": {"requestId"}}`
/// shape and the flat `{"message": ...}` shape.
pub(crate) fn classify_error(
    status: StatusCode,
    retry_after: Option<u32>,
    data: &Value,
) -> ApiError {
    let error = data.get("error").filter(|e| e.is_object()).unwrap_or(data);

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    let code = error
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN_ERROR")
        .to_string();
    let request_id = data
        .get("meta")
        .and_then(|m| m.get("requestId"))
        .and_then(Value::as_str)
        .map(String::from);

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Authentication {
            code,
            message,
            request_id,
        },
        StatusCode::FORBIDDEN => ApiError::Authorization {
            code,
            message,
            request_id,
        },
        StatusCode::NOT_FOUND => ApiError::NotFound {
            code,
            message,
            request_id,
        },
        StatusCode::CONFLICT => ApiError::Conflict {
            code,
            message,
            request_id,
        },
        StatusCode::BAD_REQUEST
            if code == ALREADY_LIKED_CODE || message == ALREADY_LIKED_MESSAGE =>
        {
            ApiError::Conflict {
                code: ALREADY_LIKED_CODE.to_string(),
                message,
                request_id,
            }
        }
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            code,
            message,
            retry_after: retry_after.unwrap_or(60),
            request_id,
        },
        s if s.is_server_error() => ApiError::Server {
            code,
            message,
            request_id,
        },
        _ => ApiError::Validation {
            code,
            message,
            request_id,
        },
    }
}

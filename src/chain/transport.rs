//! HTTP access to the remote chain, with transparent retry of transient failures

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::chain::error::TransportError;
use crate::config::HttpConfig;

/// Raw answer of a GET. The body is fully read; nothing is left open.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// GET-only transport the bridge client talks through. Implementations own
/// their retry budget and only report the final outcome.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Exponential backoff before retry number `retry` (1-based), capped
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

impl From<&HttpConfig> for RetryPolicy {
    fn from(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    !(err.is_builder() || err.is_redirect() || err.is_decode())
}

/// `reqwest` client that retries connection failures, timeouts, 5xx and 429
pub struct RetryingHttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl RetryingHttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TransportError::Build)?;

        Ok(Self {
            client,
            policy: RetryPolicy::from(config),
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl HttpTransport for RetryingHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let retries_left = attempt <= self.policy.max_retries;

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if retries_left && is_retryable_status(status) {
                        log::debug!("GET {} returned {}, retry {} of {}", url, status, attempt, self.policy.max_retries);
                        drop(response);
                        tokio::time::sleep(self.policy.delay_for(attempt)).await;
                        continue;
                    }

                    let body = response
                        .bytes()
                        .await
                        .map_err(|source| TransportError::Body {
                            url: url.to_string(),
                            source,
                        })?;
                    return Ok(HttpResponse {
                        status,
                        body: body.to_vec(),
                    });
                }
                Err(e) if retries_left && is_retryable_error(&e) => {
                    log::debug!("GET {} failed: {}, retry {} of {}", url, e, attempt, self.policy.max_retries);
                    tokio::time::sleep(self.policy.delay_for(attempt)).await;
                }
                Err(source) => {
                    return Err(TransportError::Request {
                        url: url.to_string(),
                        attempts: attempt,
                        source,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_calculation() {
        let policy = RetryPolicy {
            max_retries: 6,
            initial_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_millis(30000),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(4), Duration::from_millis(8000));
        assert_eq!(policy.delay_for(5), Duration::from_millis(16000));
        assert_eq!(policy.delay_for(6), Duration::from_millis(30000)); // Capped at max
        assert_eq!(policy.delay_for(64), Duration::from_millis(30000));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::NOT_IMPLEMENTED));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::OK));
    }

    #[test]
    fn test_policy_from_config() {
        let config = HttpConfig {
            max_retries: 2,
            initial_backoff_ms: 10,
            max_backoff_ms: 50,
            timeout_secs: 1,
        };
        let client = RetryingHttpClient::new(&config).unwrap();
        assert_eq!(client.policy().max_retries, 2);
        assert_eq!(client.policy().delay_for(3), Duration::from_millis(40));
        assert_eq!(client.policy().delay_for(4), Duration::from_millis(50));
    }
}

//! Retrying HTTP requests.
//!
//! Requests run through [`seatbelt`] retry and timeout middleware. Transient
//! failures (connection errors, timeouts, 5xx, 429) are retried with
//! exponential backoff; anything else is returned to the caller as is.

use core::time::Duration;
use layered::{Execute, Service, Stack};
use ohno::app_err;
use seatbelt::retry::{Backoff, Retry};
use seatbelt::timeout::Timeout;
use seatbelt::{RecoveryInfo, ResilienceContext};
use tick::Clock;

const LOG_TARGET: &str = "      http";

/// Timeout for API calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for release archive downloads.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_mins(10);

/// Retry attempts on top of the original request.
const MAX_RETRY_ATTEMPTS: u32 = 3;

const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Delay used for 429 responses lacking a usable `Retry-After`.
const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(5);

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn should_retry_response(result: &crate::Result<reqwest::Response>) -> RecoveryInfo {
    match result {
        Err(_) => RecoveryInfo::retry(),
        Ok(resp) if resp.status().is_server_error() => RecoveryInfo::retry(),
        Ok(resp) if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS => {
            RecoveryInfo::retry().delay(parse_retry_after(resp.headers()).unwrap_or(DEFAULT_RATE_LIMIT_DELAY))
        }
        Ok(_) => RecoveryInfo::never(),
    }
}

/// Sends a GET request, retrying transient failures.
pub async fn resilient_get(client: &reqwest::Client, url: &str) -> crate::Result<reqwest::Response> {
    let clock = Clock::new_tokio();
    let context = ResilienceContext::new(&clock).name("registry_get");

    let client = client.clone();
    let service = (
        Retry::layer("retry", &context)
            .clone_input()
            .recovery_with(|result: &crate::Result<reqwest::Response>, _| should_retry_response(result))
            .max_retry_attempts(MAX_RETRY_ATTEMPTS)
            .base_delay(RETRY_BASE_DELAY)
            .backoff(Backoff::Exponential)
            .on_retry(|_output, args| {
                log::debug!(
                    target: LOG_TARGET,
                    "Retrying GET (attempt {}, delay {}ms)",
                    args.attempt().index() + 1,
                    args.retry_delay().as_millis(),
                );
            }),
        Timeout::layer("timeout", &context)
            .timeout_error(|args| app_err!("HTTP request timed out after {}s", args.timeout().as_secs()))
            .timeout(DEFAULT_REQUEST_TIMEOUT),
        Execute::new(move |url: String| {
            let client = client.clone();
            async move { client.get(&url).send().await.map_err(ohno::AppError::from) }
        }),
    )
        .into_service();

    service.execute(url.to_string()).await
}

/// Runs a whole download (connect and body) with retry and timeout.
///
/// Any error restarts the download from scratch; `download_fn` is called with a
/// clone of `input` on each attempt. Outcomes that should not be retried must be
/// expressed in `Out` rather than as an error.
pub async fn resilient_download<In, Out, Fut, F>(
    name: &'static str,
    input: In,
    timeout: Option<Duration>,
    download_fn: F,
) -> crate::Result<Out>
where
    In: Clone + Send + Sync + 'static,
    Out: Send + 'static,
    Fut: Future<Output = crate::Result<Out>> + Send,
    F: Fn(In) -> Fut + Send + Sync + Clone + 'static,
{
    let clock = Clock::new_tokio();
    let context = ResilienceContext::new(&clock).name(name);
    let timeout = timeout.unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT);

    let service = (
        Retry::layer("retry", &context)
            .clone_input()
            .recovery_with(|result: &crate::Result<Out>, _| match result {
                Err(_) => RecoveryInfo::retry(),
                Ok(_) => RecoveryInfo::never(),
            })
            .max_retry_attempts(MAX_RETRY_ATTEMPTS)
            .base_delay(RETRY_BASE_DELAY)
            .backoff(Backoff::Exponential)
            .on_retry(move |_output, args| {
                log::debug!(
                    target: LOG_TARGET,
                    "Retrying {name} (attempt {}, delay {}ms)",
                    args.attempt().index() + 1,
                    args.retry_delay().as_millis(),
                );
            }),
        Timeout::layer("timeout", &context)
            .timeout_error(move |args| app_err!("{name} timed out after {}s", args.timeout().as_secs()))
            .timeout(timeout),
        Execute::new(move |input: In| {
            let f = download_fn.clone();
            async move { f(input).await }
        }),
    )
        .into_service();

    service.execute(input).await
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn returns_success_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let resp = resilient_get(&client, &format!("{}/ok", server.uri())).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn client_errors_are_final() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let resp = resilient_get(&client, &format!("{}/missing", server.uri())).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn rate_limited_request_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/busy"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/busy"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let resp = resilient_get(&client, &format!("{}/busy", server.uri())).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support network operations")]
    async fn server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let resp = resilient_get(&client, &format!("{}/flaky", server.uri())).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn transport_errors_are_retryable() {
        let err: crate::Result<reqwest::Response> = Err(app_err!("connection reset"));
        assert_eq!(should_retry_response(&err), RecoveryInfo::retry());
    }

    #[test]
    fn retry_after_is_read_in_seconds() {
        let mut headers = reqwest::header::HeaderMap::new();
        let _ = headers.insert(reqwest::header::RETRY_AFTER, reqwest::header::HeaderValue::from_static(" 7 "));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(7)));

        let _ = headers.insert(
            reqwest::header::RETRY_AFTER,
            reqwest::header::HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[tokio::test]
    async fn download_restarts_after_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let out = resilient_download("test download", 21_u32, None, move |n: u32| {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(app_err!("stream cut short"))
                } else {
                    Ok(n * 2)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(out, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn download_gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let err = resilient_download("test download", (), Some(Duration::from_secs(5)), move |()| {
            let counter = Arc::clone(&counter);
            async move {
                let _ = counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(app_err!("still broken"))
            }
        })
        .await
        .unwrap_err();

        assert!(err.to_string().contains("still broken"), "{err}");
        assert_eq!(calls.load(Ordering::SeqCst), MAX_RETRY_ATTEMPTS + 1);
    }
}

//! Shared infrastructure for contact provider adapters.
//!
//! - `FetchClient` — HTTP client with retry / backoff / error classification
//! - `resolve_api_key` — flag > env > error
//!
//! # Retry policy
//!
//! - 429 and 5xx are retried up to [`MAX_RETRIES`] times with exponential
//!   backoff. A numeric `Retry-After` header on 429 replaces the backoff.
//! - Network errors (connect, timeout, TLS) are retried the same way.
//! - Any other 4xx fails immediately.
//! - Exhausted 429 becomes `SourceError::RateLimited`, exhausted 5xx keeps
//!   its status so the Status column shows `Search Error (503)`.

use std::thread;
use std::time::Duration;

use rolescout_ranker::SourceError;

use crate::exit_codes;
use crate::CliError;

// ── Constants ───────────────────────────────────────────────────────

pub(super) const MAX_RETRIES: u32 = 3;
pub(super) const USER_AGENT: &str = concat!("rolescout/", env!("CARGO_PKG_VERSION"));
pub(super) const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

// ── FetchClient ─────────────────────────────────────────────────────

/// Shared HTTP client that handles retry, backoff, and error classification.
///
/// Adapters own their API key, base URL, and auth header. They pass a
/// request-building closure to [`FetchClient::request_with_retry`], which
/// runs the retry loop and maps failures to [`SourceError`].
pub(super) struct FetchClient {
    pub(super) http: reqwest::blocking::Client,
    source_name: String,
    error_extractor: fn(&serde_json::Value, u16) -> String,
    initial_backoff: Duration,
}

impl FetchClient {
    pub(super) fn new(
        source_name: &str,
        error_extractor: fn(&serde_json::Value, u16) -> String,
    ) -> Result<Self, SourceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            source_name: source_name.to_string(),
            error_extractor,
            initial_backoff: INITIAL_BACKOFF,
        })
    }

    /// Override the first backoff step (doubles on each retry).
    #[cfg(test)]
    pub(super) fn with_backoff(mut self, initial: Duration) -> Self {
        self.initial_backoff = initial;
        self
    }

    /// Send a request with retry + exponential backoff and parse the JSON body.
    ///
    /// `build_request` is called once per attempt. It receives the
    /// underlying `reqwest::blocking::Client` and must return a fully
    /// configured `RequestBuilder` (URL, auth, headers, body).
    pub(super) fn request_with_retry(
        &self,
        build_request: impl Fn(&reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder,
    ) -> Result<serde_json::Value, SourceError> {
        let mut backoff = self.initial_backoff;

        for attempt in 0..=MAX_RETRIES {
            let req = build_request(&self.http);

            match req.send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    // Non-retryable 4xx: fail immediately
                    if (400..500).contains(&status) && status != 429 {
                        let body: serde_json::Value =
                            resp.json().unwrap_or(serde_json::Value::Null);
                        let message = (self.error_extractor)(&body, status);
                        log::info!("{} rejected request ({status}): {message}", self.source_name);
                        return Err(SourceError::Http { status, message });
                    }

                    // Retryable: 429, 5xx
                    if status == 429 || status >= 500 {
                        if attempt == MAX_RETRIES {
                            log::warn!(
                                "{} gave up after {} retries (HTTP {status})",
                                self.source_name,
                                MAX_RETRIES,
                            );
                            if status == 429 {
                                return Err(SourceError::RateLimited);
                            }
                            let body: serde_json::Value =
                                resp.json().unwrap_or(serde_json::Value::Null);
                            let message = (self.error_extractor)(&body, status);
                            return Err(SourceError::Http { status, message });
                        }

                        // Respect Retry-After header for 429
                        let wait = if status == 429 {
                            resp.headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.trim().parse::<u64>().ok())
                                .map(Duration::from_secs)
                                .unwrap_or(backoff)
                        } else {
                            backoff
                        };

                        log::warn!(
                            "{}: retry {}/{} in {}ms (HTTP {status})",
                            self.source_name,
                            attempt + 1,
                            MAX_RETRIES,
                            wait.as_millis(),
                        );
                        thread::sleep(wait);
                        backoff *= 2;
                        continue;
                    }

                    let text = resp.text().map_err(|e| {
                        SourceError::Network(format!(
                            "failed to read {} response body: {e}",
                            self.source_name,
                        ))
                    })?;
                    let trimmed = text.trim_start_matches('\u{feff}');
                    return serde_json::from_str(trimmed).map_err(|e| {
                        SourceError::Parse(format!(
                            "{} returned invalid JSON: {e} (body: {})",
                            self.source_name,
                            truncate_body(trimmed),
                        ))
                    });
                }
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == MAX_RETRIES {
                        return Err(SourceError::Network(format!(
                            "{} unreachable after {} attempts: {e}",
                            self.source_name, MAX_RETRIES,
                        )));
                    }

                    log::warn!(
                        "{}: retry {}/{} in {}ms ({e})",
                        self.source_name,
                        attempt + 1,
                        MAX_RETRIES,
                        backoff.as_millis(),
                    );
                    thread::sleep(backoff);
                    backoff *= 2;
                }
            }
        }

        Err(SourceError::Network(format!("{} retry loop exhausted", self.source_name)))
    }
}

fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

// ── API key ─────────────────────────────────────────────────────────

/// Resolve an API key: `--api-key` flag, then environment variable.
pub fn resolve_api_key(
    flag: Option<String>,
    source_name: &str,
    env_var: &str,
) -> Result<String, CliError> {
    let from_env = || std::env::var(env_var).ok();
    let key = flag.or_else(from_env).unwrap_or_default();
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError {
            code: exit_codes::EXIT_FETCH_NOT_AUTH,
            message: format!("missing {source_name} API key (use --api-key or set {env_var})"),
            hint: None,
        });
    }
    Ok(key.to_string())
}

// ── Tests ───────────────────────────────────────────────────────────

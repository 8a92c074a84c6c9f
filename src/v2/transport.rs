/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v2::errors::OoyalaError;
use crate::v2::properties::Method;
use bytes::Bytes;
use futures::future::join_all;
use reqwest::header;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Per-call timeout applied when no tier supplies one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// In-flight transfer bound for multi-request batches.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Transfer options. Every field is optional so the three tiers
/// (call > instance > hardcoded fallback) merge field by field.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub content_type: Option<String>,

    pub follow_redirects: Option<bool>,

    pub timeout: Option<Duration>,

    /// Disables TLS peer/host verification. Off unless explicitly requested.
    pub danger_accept_invalid_certs: Option<bool>,
}

impl RequestOptions {
    /// Resolves this call tier against an instance tier, falling back to the
    /// hardcoded defaults for anything neither supplies.
    pub fn resolve(&self, instance: &RequestOptions) -> ResolvedOptions {
        ResolvedOptions {
            content_type: self
                .content_type
                .clone()
                .or_else(|| instance.content_type.clone()),
            follow_redirects: self.follow_redirects.or(instance.follow_redirects).unwrap_or(false),
            timeout: self
                .timeout
                .or(instance.timeout)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            danger_accept_invalid_certs: self
                .danger_accept_invalid_certs
                .or(instance.danger_accept_invalid_certs)
                .unwrap_or(false),
        }
    }
}

/// The fully merged option set a transfer runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub content_type: Option<String>,
    pub follow_redirects: bool,
    pub timeout: Duration,
    pub danger_accept_invalid_certs: bool,
}

/// Status, headers and body of one completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResult {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

/// A request that has been signed and is ready to dispatch.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub options: RequestOptions,
    pub payload: Option<Bytes>,
}

/// Issues a single HTTP request.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    defaults: RequestOptions,
}

impl HttpRequest {
    pub fn new(defaults: RequestOptions) -> Self {
        Self { defaults }
    }

    /// Performs the exchange. A status of 400 or above becomes
    /// [`OoyalaError::Request`] carrying the status and response headers;
    /// connection level failures become [`OoyalaError::Transport`].
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
        payload: Option<&Bytes>,
    ) -> Result<HttpResult, OoyalaError> {
        let options = options.resolve(&self.defaults);

        // Redirect policy and TLS settings are client-level in reqwest, so
        // each exchange builds its own client from the resolved options.
        let redirect = if options.follow_redirects {
            reqwest::redirect::Policy::limited(10)
        } else {
            reqwest::redirect::Policy::none()
        };
        let client = reqwest::Client::builder()
            .redirect(redirect)
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.danger_accept_invalid_certs)
            .build()?;

        let mut request = client.request(method.into(), url);
        if let Some(content_type) = &options.content_type {
            request = request.header(header::CONTENT_TYPE, content_type.as_str());
        }
        request = match payload {
            Some(payload) if !payload.is_empty() => request.body(payload.clone()),
            _ => request.header(header::CONTENT_LENGTH, 0),
        };

        log::debug!("{} {}", method, url);
        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers = header_map(response.headers());
        let body = response.bytes().await?;

        if status >= 400 {
            return Err(OoyalaError::Request {
                status,
                headers,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(HttpResult { status, headers, body })
    }
}

/// Issues independent HTTP requests in parallel.
#[derive(Debug, Clone)]
pub struct HttpMultiRequest {
    request: HttpRequest,
    max_concurrent: usize,
}

impl HttpMultiRequest {
    pub fn new(defaults: RequestOptions, max_concurrent: usize) -> Self {
        Self {
            request: HttpRequest::new(defaults),
            max_concurrent,
        }
    }

    /// Starts every transfer, bounded by the concurrency limit, and waits for
    /// all of them. Each entry resolves its own options and keeps its own
    /// outcome: one failing transfer never aborts or blocks the others.
    pub async fn execute_multi(
        &self,
        method: Method,
        requests: HashMap<String, PreparedRequest>,
    ) -> HashMap<String, Result<HttpResult, OoyalaError>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent.max(1)));
        let transfers = requests.into_iter().map(|(id, prepared)| {
            let semaphore = semaphore.clone();
            async move {
                // The semaphore is owned by this call and never closed
                let _permit = semaphore.acquire().await.unwrap();
                let result = self
                    .request
                    .execute(method, &prepared.url, &prepared.options, prepared.payload.as_ref())
                    .await;
                (id, result)
            }
        });
        join_all(transfers).await.into_iter().collect()
    }
}

fn header_map(headers: &header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

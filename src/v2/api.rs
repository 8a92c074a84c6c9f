/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::OoyalaError;
use crate::v2::logging::{AccessLog, AccessLogEntry, NoopAccessLog};
use crate::v2::properties::Method;
use crate::v2::signer;
use crate::v2::transport::{
    DEFAULT_MAX_CONCURRENT_REQUESTS, HttpMultiRequest, HttpRequest, PreparedRequest,
    RequestOptions,
};
use bytes::Bytes;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

// Root Backlot API
pub const API_ORIGIN: &str = "https://api.ooyala.com";

// Cache-fronted origin serving all GET traffic
pub const CACHE_API_ORIGIN: &str = "http://cdn-api.ooyala.com";

/// Seconds a signed request stays valid, before round-up.
pub const DEFAULT_EXPIRATION_WINDOW: i64 = 120;

/// Granularity `expires` values are quantized to. Requests signed within the
/// same quantum share a URL, so intermediary caches can serve them.
pub const EXPIRES_ROUND_UP_WINDOW: i64 = 300;

const API_VERSION_PREFIX: &str = "/v2/";

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// One entry of a multi-request batch.
#[derive(Debug, Clone)]
pub struct MultiRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl MultiRequest {
    pub fn new(path: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }
}

/// Construction options. Every field falls back to a fixed default.
#[derive(Clone, Default)]
pub struct ApiOptions {
    pub base_url: Option<String>,
    pub cache_base_url: Option<String>,
    pub expiration_window: Option<i64>,
    pub max_concurrent_requests: Option<usize>,
    pub request_options: Option<RequestOptions>,
    pub access_log: Option<Arc<dyn AccessLog>>,
}

#[derive(Clone)]
struct Credentials {
    api_key: String,
    secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"xxx")
            .field("secret_key", &"xxx")
            .finish()
    }
}

/// Directly communicates with the API.
#[derive(Clone)]
pub struct ApiClient {
    creds: Credentials,
    base_url: String,
    cache_base_url: String,
    expiration_window: i64,
    http_request: HttpRequest,
    http_multi_request: HttpMultiRequest,
    access_log: Arc<dyn AccessLog>,
}

impl ApiClient {
    /// Creates a new Backlot client instance from the provided keys
    pub fn new(api_key: &str, secret_key: &str, options: ApiOptions) -> Self {
        let request_options = options.request_options.unwrap_or_else(|| RequestOptions {
            content_type: Some("application/json".to_owned()),
            follow_redirects: Some(true),
            ..RequestOptions::default()
        });
        let max_concurrent = options
            .max_concurrent_requests
            .unwrap_or(DEFAULT_MAX_CONCURRENT_REQUESTS);
        Self {
            creds: Credentials {
                api_key: api_key.into(),
                secret_key: secret_key.into(),
            },
            base_url: options.base_url.unwrap_or_else(|| API_ORIGIN.to_owned()),
            cache_base_url: options
                .cache_base_url
                .unwrap_or_else(|| CACHE_API_ORIGIN.to_owned()),
            expiration_window: options
                .expiration_window
                .unwrap_or(DEFAULT_EXPIRATION_WINDOW),
            http_request: HttpRequest::new(request_options.clone()),
            http_multi_request: HttpMultiRequest::new(request_options, max_concurrent),
            access_log: options.access_log.unwrap_or_else(|| Arc::new(NoopAccessLog)),
        }
    }

    /// Signs, dispatches and parses a single request.
    pub async fn send(
        &self,
        method: Method,
        request_path: &str,
        params: Option<&ApiParams<'_>>,
        body: Option<Bytes>,
    ) -> Result<serde_json::Value, OoyalaError> {
        let url = self.build_signed_url(
            method,
            request_path,
            params,
            body.as_deref().unwrap_or_default(),
        )?;

        let started = Instant::now();
        let result = self
            .http_request
            .execute(method, &url, &RequestOptions::default(), body.as_ref())
            .await;
        self.log_request(started, &url, method);

        parse_response(&result?.body)
    }

    /// Signs and dispatches a batch of requests in parallel. Every entry
    /// keeps its own outcome; one failing entry never fails the batch.
    pub async fn send_multiple(
        &self,
        method: Method,
        requests: &HashMap<String, MultiRequest>,
        body: Option<Bytes>,
    ) -> HashMap<String, Result<serde_json::Value, OoyalaError>> {
        let mut prepared = HashMap::with_capacity(requests.len());
        let mut results: HashMap<String, Result<serde_json::Value, OoyalaError>> = HashMap::new();

        for (id, request) in requests {
            let params: Vec<(&str, &str)> = request
                .params
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            match self.build_signed_url(
                method,
                &request.path,
                Some(params.as_slice()),
                body.as_deref().unwrap_or_default(),
            ) {
                Ok(url) => {
                    prepared.insert(
                        id.clone(),
                        PreparedRequest {
                            url,
                            options: RequestOptions::default(),
                            payload: body.clone(),
                        },
                    );
                }
                Err(err) => {
                    results.insert(id.clone(), Err(err));
                }
            }
        }

        let urls: Vec<(String, String)> = prepared
            .iter()
            .map(|(id, request)| (id.clone(), request.url.clone()))
            .collect();

        let started = Instant::now();
        let responses = self.http_multi_request.execute_multi(method, prepared).await;
        for (_, url) in &urls {
            self.log_request(started, url, method);
        }

        for (id, response) in responses {
            results.insert(id, response.and_then(|result| parse_response(&result.body)));
        }
        results
    }

    /// Builds the fully signed URL for a request without dispatching it:
    /// normalizes the path, injects `expires`, `api_key` and the GET cache
    /// breaker, and appends the signature.
    pub fn build_signed_url(
        &self,
        method: Method,
        request_path: &str,
        params: Option<&ApiParams<'_>>,
        body: &[u8],
    ) -> Result<String, OoyalaError> {
        let request_path = normalize_request_path(request_path);

        let mut query: Vec<(String, String)> = params
            .unwrap_or(&[])
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        if !query.iter().any(|(key, _)| key.as_str() == "expires") {
            query.push(("expires".to_owned(), self.compute_expires().to_string()));
        }
        if !query.iter().any(|(key, _)| key.as_str() == "api_key") {
            query.push(("api_key".to_owned(), self.creds.api_key.clone()));
        }

        // The cache breaker and the signature itself are never signed
        let signature =
            signer::signature_digest(&self.creds.secret_key, method, &request_path, &query, body);
        if method.is_cacheable() {
            query.push(("cacheBreaker".to_owned(), cache_breaker()));
        }
        query.push(("signature".to_owned(), signature));

        self.build_url(method, &request_path, &query)
    }

    /// Builds the URL for a request, appending the query parameters in the
    /// order they were injected. GET requests target the cache-fronted
    /// origin, every other verb the primary API origin.
    pub fn build_url(
        &self,
        method: Method,
        request_path: &str,
        query: &[(String, String)],
    ) -> Result<String, OoyalaError> {
        let origin = if method.is_cacheable() {
            &self.cache_base_url
        } else {
            &self.base_url
        };
        let mut url = url::Url::parse(origin)?.join(request_path)?;
        let pairs: Vec<String> = query
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect();
        url.set_query(Some(&pairs.join("&")));
        Ok(url.into())
    }

    /// Generates the signature token for a request. See
    /// [`signer::generate_signature`] for the canonicalization rules.
    pub fn generate_signature(
        &self,
        method: Method,
        request_path: &str,
        params: &[(String, String)],
        body: &[u8],
    ) -> String {
        signer::generate_signature(&self.creds.secret_key, method, request_path, params, body)
    }

    // Timing is recorded around the dispatch whether it succeeded or not.
    // The sink decides whether to keep the entry; sink failures never
    // propagate.
    fn log_request(&self, started: Instant, url: &str, method: Method) {
        let entry = AccessLogEntry {
            timestamp: Utc::now(),
            url: self.redact_url(url),
            method,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        self.access_log.record(&entry);
    }

    fn redact_url(&self, url: &str) -> String {
        let decoded = urlencoding::decode(url)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| url.to_owned());
        let trimmed = decoded
            .strip_prefix(self.cache_base_url.as_str())
            .or_else(|| decoded.strip_prefix(self.base_url.as_str()))
            .unwrap_or(&decoded);
        let trimmed = match trimmed.find("expires") {
            Some(idx) => &trimmed[..idx],
            None => trimmed,
        };
        trimmed.trim_end_matches(['&', '?']).to_owned()
    }

    fn compute_expires(&self) -> i64 {
        round_up_expires(Utc::now().timestamp() + self.expiration_window)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish()
    }
}

/// Prefixes a request path with the API version, once. Applying this twice
/// is a no-op.
pub fn normalize_request_path(request_path: &str) -> String {
    if request_path.starts_with(API_VERSION_PREFIX) {
        request_path.to_owned()
    } else {
        format!(
            "{API_VERSION_PREFIX}{}",
            request_path.trim_start_matches('/')
        )
    }
}

/// Quantizes an expiration instant to the smallest round-up window multiple
/// that is not below it.
pub fn round_up_expires(expiration: i64) -> i64 {
    // Equivalent to `expiration.div_ceil(EXPIRES_ROUND_UP_WINDOW)`, which is
    // unstable for signed integers (`int_roundings`, issue #88581).
    let d = expiration / EXPIRES_ROUND_UP_WINDOW;
    let r = expiration % EXPIRES_ROUND_UP_WINDOW;
    let quotient = if (r > 0 && EXPIRES_ROUND_UP_WINDOW > 0)
        || (r < 0 && EXPIRES_ROUND_UP_WINDOW < 0)
    {
        d + 1
    } else {
        d
    };
    quotient * EXPIRES_ROUND_UP_WINDOW
}

/// This is a workaround for the discover/editorial endpoint returning an
/// improper result on POST: the JSON body arrives wrapped in literal
/// `Results: <pre>...</pre>` markers, which have to be removed before
/// parsing.
pub fn strip_non_json_response(body: &str) -> String {
    body.replace("Results: <pre>", "").replace("</pre>", "")
}

fn parse_response(body: &Bytes) -> Result<serde_json::Value, OoyalaError> {
    let text = strip_non_json_response(&String::from_utf8_lossy(body));
    serde_json::from_str(&text).map_err(|source| OoyalaError::Decode { source, body: text })
}

// Monotonic high-resolution timestamp in 100 microsecond units. Appended to
// GET URLs so a stale intermediary cache can be bypassed; not part of the
// signed set.
fn cache_breaker() -> String {
    (Utc::now().timestamp_micros() / 100).to_string()
}

/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v2::api::{ApiClient, ApiOptions, ApiParams, MultiRequest};
use crate::v2::errors::OoyalaError;
use crate::v2::properties::Method;
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// High level Backlot client.
///
/// Cheap to clone; all clones share the same credentials and configuration,
/// which stay immutable for the lifetime of any in-flight call.
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    pub fn new(api_key: &str, secret_key: &str, options: ApiOptions) -> Self {
        Self {
            api_client: Arc::new(ApiClient::new(api_key, secret_key, options)),
        }
    }

    /// Generates a GET request to the API.
    pub async fn get(
        &self,
        request_path: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Value, OoyalaError> {
        self.api_client
            .send(Method::Get, request_path, params, None)
            .await
    }

    /// Generates multiple GET requests in parallel. Entries succeed or fail
    /// independently.
    pub async fn get_multiple(
        &self,
        requests: &HashMap<String, MultiRequest>,
    ) -> HashMap<String, Result<Value, OoyalaError>> {
        self.api_client
            .send_multiple(Method::Get, requests, None)
            .await
    }

    /// Generates a POST request to the API. An absent body is sent as the
    /// JSON empty string, which the API expects.
    pub async fn post(
        &self,
        request_path: &str,
        body: Option<&Value>,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Value, OoyalaError> {
        self.api_client
            .send(Method::Post, request_path, params, Some(encode_body(body)?))
            .await
    }

    /// Generates a PUT request to the API.
    pub async fn put(
        &self,
        request_path: &str,
        body: Option<&Value>,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Value, OoyalaError> {
        self.api_client
            .send(Method::Put, request_path, params, Some(encode_body(body)?))
            .await
    }

    /// Generates a PATCH request to the API.
    pub async fn patch(
        &self,
        request_path: &str,
        body: Option<&Value>,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Value, OoyalaError> {
        self.api_client
            .send(Method::Patch, request_path, params, Some(encode_body(body)?))
            .await
    }

    /// Generates a DELETE request to the API.
    pub async fn delete(
        &self,
        request_path: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Value, OoyalaError> {
        self.api_client
            .send(Method::Delete, request_path, params, None)
            .await
    }

    /// Sends a request to the given path using the passed HTTP method.
    /// An unsupported method fails with [`OoyalaError::UnsupportedMethod`]
    /// before anything is dispatched.
    pub async fn send_request(
        &self,
        method: &str,
        request_path: &str,
        params: Option<&ApiParams<'_>>,
        body: Option<Bytes>,
    ) -> Result<Value, OoyalaError> {
        self.api_client
            .send(Method::parse(method)?, request_path, params, body)
            .await
    }

    /// Sends multiple requests to the given paths in parallel using the
    /// passed HTTP method. The shared body, when given, applies to every
    /// entry.
    pub async fn send_multiple_requests(
        &self,
        method: &str,
        requests: &HashMap<String, MultiRequest>,
        body: Option<Bytes>,
    ) -> Result<HashMap<String, Result<Value, OoyalaError>>, OoyalaError> {
        Ok(self
            .api_client
            .send_multiple(Method::parse(method)?, requests, body)
            .await)
    }

    /// Builds the fully signed URL for a request without dispatching it.
    pub fn build_signed_url(
        &self,
        method: &str,
        request_path: &str,
        params: Option<&ApiParams<'_>>,
        body: &[u8],
    ) -> Result<String, OoyalaError> {
        self.api_client
            .build_signed_url(Method::parse(method)?, request_path, params, body)
    }

    /// Generates the signature token for a request.
    pub fn generate_signature(
        &self,
        method: &str,
        request_path: &str,
        params: &[(String, String)],
        body: &[u8],
    ) -> Result<String, OoyalaError> {
        Ok(self
            .api_client
            .generate_signature(Method::parse(method)?, request_path, params, body))
    }
}

fn encode_body(body: Option<&Value>) -> Result<Bytes, OoyalaError> {
    let empty = Value::String(String::new());
    let payload = serde_json::to_vec(body.unwrap_or(&empty))?;
    Ok(Bytes::from(payload))
}

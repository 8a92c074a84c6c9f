/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v2::properties::Method;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Generates the signature token for a request.
///
/// The canonical string is the secret key, the uppercased method, the request
/// path, every `key=value` pair in ascending key order, and the raw body
/// bytes. Its SHA-256 digest is base64 encoded, truncated to 43 characters
/// (dropping the single trailing pad), percent-encoded and stripped of any
/// trailing `=`.
///
/// Parameter values are signed raw. Percent-encoding happens exactly once,
/// when the URL is built, so the signed set is independent of the transport
/// encoding. The resulting token is added as the `signature` query parameter
/// and authorizes the call.
pub fn generate_signature(
    secret_key: &str,
    method: Method,
    request_path: &str,
    params: &[(String, String)],
    body: &[u8],
) -> String {
    let digest = signature_digest(secret_key, method, request_path, params, body);
    urlencoding::encode(&digest).trim_end_matches('=').to_string()
}

// The 43 character base64 form, before percent-encoding. URL assembly encodes
// query values uniformly, so it consumes this form rather than the token.
pub(crate) fn signature_digest(
    secret_key: &str,
    method: Method,
    request_path: &str,
    params: &[(String, String)],
    body: &[u8],
) -> String {
    let method: &'static str = method.into();
    let mut to_sign = String::new();
    to_sign.push_str(secret_key);
    to_sign.push_str(method);
    to_sign.push_str(request_path);

    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, value) in sorted {
        to_sign.push_str(key);
        to_sign.push('=');
        to_sign.push_str(value);
    }

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(body);

    // 32 digest bytes encode to 44 base64 characters ending in one pad
    let encoded = STANDARD.encode(hasher.finalize());
    encoded[..43].to_owned()
}

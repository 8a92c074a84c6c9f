/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::collections::HashMap;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum OoyalaError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    /// Raised before any network I/O is attempted.
    #[error("Method not supported {0}")]
    UnsupportedMethod(String),

    /// Connection, DNS or TLS level failure. No HTTP status is available.
    #[error("Request network error")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status. Response headers are kept
    /// for caller inspection (rate-limit headers and the like).
    #[error("HTTP error ({status}), response: {body}")]
    Request {
        status: u16,
        headers: HashMap<String, String>,
        body: String,
    },

    /// The response body was not valid JSON after quirk stripping. The raw
    /// body is carried for diagnostics.
    #[error("Response body is not valid JSON")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Failed serializing request body to JSON")]
    Serialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),
}

/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v2::errors::OoyalaError;
use std::str::FromStr;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// HTTP methods supported by the Backlot API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Parses a method string, rejecting verbs the API does not support.
    pub fn parse(method: &str) -> Result<Self, OoyalaError> {
        Self::from_str(method).map_err(|_| OoyalaError::UnsupportedMethod(method.to_owned()))
    }

    /// GET traffic is served through the cache-fronted origin.
    pub fn is_cacheable(self) -> bool {
        matches!(self, Method::Get)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Ooyala
//!
//! This library was created for working with the Ooyala Backlot APIv2 interface.
//!
//! ## Features
//!
//! - Signed requests (`api_key`/`expires`/`signature` query authentication)
//! - GET traffic routed through the cache-fronted origin, mutations through the
//!   primary API origin
//! - Parallel multi-request batches with bounded concurrency and per-entry
//!   failure isolation
//! - Pluggable access logging (file appender or no-op)
//! - Lower level interface for handling the raw communication
//!
//! *The Backlot API authorizes every call with a SHA-256 signature derived from
//! your secret key. This library handles the request signing. Getting the API
//! key/secret from the Backlot developers tab is left up to the consumer of
//! this library.*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! ooyala = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! **You will need to acquire an API key/secret from Backlot prior to using the API**
//!
//! ```no_run
//! use ooyala::v2::{ApiOptions, Client, MultiRequest};
//! use std::collections::HashMap;
//!
//! async fn inventory(api_key: &str, secret_key: &str) -> anyhow::Result<()> {
//!     // The API key/secret is obtained from the Backlot developers tab
//!     let client = Client::new(api_key, secret_key, ApiOptions::default());
//!
//!     // Single signed GET request
//!     let assets = client.get("assets", Some(&[("limit", "5")])).await?;
//!     println!("{assets:#}");
//!
//!     // Parallel batch: each entry succeeds or fails on its own
//!     let mut requests = HashMap::new();
//!     requests.insert(
//!         "assets".to_string(),
//!         MultiRequest::new("assets", vec![("limit".into(), "5".into())]),
//!     );
//!     requests.insert("players".to_string(), MultiRequest::new("players", vec![]));
//!     for (id, result) in client.get_multiple(&requests).await {
//!         match result {
//!             Ok(value) => println!("{id}: {value}"),
//!             Err(err) => eprintln!("{id} failed: {err}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod v2;

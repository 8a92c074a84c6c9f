/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate ooyala;

use anyhow::Result;
use dotenvy::dotenv;
use ooyala::v2::{ApiOptions, Client, MultiRequest};
use std::collections::HashMap;

// Fetches every asset named on the command line in one parallel batch:
//
//   cargo run --example parallel_asset_fetch -- <embed_code> [<embed_code>...]
//
// A bad embed code fails its own entry without disturbing the rest.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv().ok();

    let embed_codes: Vec<String> = std::env::args().skip(1).collect();
    if embed_codes.is_empty() {
        anyhow::bail!("usage: parallel_asset_fetch <embed_code> [<embed_code>...]");
    }

    let api_key = std::env::var("OOYALA_API_KEY")?;
    let secret_key = std::env::var("OOYALA_SECRET_KEY")?;
    let client = Client::new(&api_key, &secret_key, ApiOptions::default());

    let requests: HashMap<String, MultiRequest> = embed_codes
        .into_iter()
        .map(|embed_code| {
            let request = MultiRequest::new(format!("assets/{embed_code}"), vec![]);
            (embed_code, request)
        })
        .collect();

    for (embed_code, result) in client.get_multiple(&requests).await {
        match result {
            Ok(asset) => {
                let name = asset.get("name").and_then(|v| v.as_str()).unwrap_or("?");
                println!("{embed_code}: {name}");
            }
            Err(err) => eprintln!("{embed_code}: failed: {err}"),
        }
    }

    Ok(())
}

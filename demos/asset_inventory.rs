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
use ooyala::v2::{ApiOptions, Client};

// Lists the first page of assets for the account, with their embed codes.
//
// Expects OOYALA_API_KEY and OOYALA_SECRET_KEY in the environment or a .env
// file.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv().ok();

    let api_key = std::env::var("OOYALA_API_KEY")?;
    let secret_key = std::env::var("OOYALA_SECRET_KEY")?;
    let client = Client::new(&api_key, &secret_key, ApiOptions::default());

    let assets = client.get("assets", Some(&[("limit", "25")])).await?;
    let items = assets
        .get("items")
        .and_then(|items| items.as_array())
        .cloned()
        .unwrap_or_default();

    println!("{} assets:", items.len());
    for item in items {
        let name = item.get("name").and_then(|v| v.as_str()).unwrap_or("?");
        let embed_code = item
            .get("embed_code")
            .and_then(|v| v.as_str())
            .unwrap_or("?");
        println!("  {embed_code}  {name}");
    }

    Ok(())
}

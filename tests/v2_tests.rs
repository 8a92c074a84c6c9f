/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers;
    use dotenvy::dotenv;
    use ooyala::v2::{ApiOptions, Client, MultiRequest};
    use std::collections::HashMap;

    // Disabled for ci/cd builds since these need live Backlot keys
    #[ignore]
    #[tokio::test]
    async fn asset_listing() {
        dotenv().ok();
        let (api_key, secret_key) = helpers::get_backlot_keys().unwrap();
        let client = Client::new(&api_key, &secret_key, ApiOptions::default());
        let assets = client.get("assets", Some(&[("limit", "5")])).await.unwrap();
        println!("Assets: {assets:#}");
        assert!(assets.get("items").is_some());
    }

    #[ignore]
    #[tokio::test]
    async fn parallel_asset_and_player_listing() {
        dotenv().ok();
        let (api_key, secret_key) = helpers::get_backlot_keys().unwrap();
        let client = Client::new(&api_key, &secret_key, ApiOptions::default());

        let mut requests = HashMap::new();
        requests.insert(
            "assets".to_owned(),
            MultiRequest::new("assets", vec![("limit".to_owned(), "5".to_owned())]),
        );
        requests.insert("players".to_owned(), MultiRequest::new("players", vec![]));

        let results = client.get_multiple(&requests).await;
        assert_eq!(results.len(), 2);
        for (id, result) in results {
            println!("{id}: {:?}", result.unwrap());
        }
    }

    #[ignore]
    #[tokio::test]
    async fn remaining_credits() {
        dotenv().ok();
        let (api_key, secret_key) = helpers::get_backlot_keys().unwrap();
        let client = Client::new(&api_key, &secret_key, ApiOptions::default());
        let credits = client
            .get("remaining_credits_and_reset_time", None)
            .await
            .unwrap();
        println!("Credits: {credits:#}");
    }
}

/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

#[cfg(test)]
mod test {
    use ooyala::v2::{ApiOptions, Client, Method, generate_signature};

    const SECRET_KEY: &str = "329b5";

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    // Tokens precomputed from the canonical string
    //   secret + METHOD + path + sorted k=v pairs + body
    // hashed with SHA-256, base64 encoded, truncated to 43 chars and
    // percent-encoded.
    #[test]
    fn known_get_token() {
        let params = params(&[
            ("api_key", "7ab06"),
            ("expires", "1200"),
            ("where", "label='x'"),
        ]);
        assert_eq!(
            generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &params, b""),
            "kZNxWY4AM2j6yrECGhKYGmQssKqrszZSGwYH%2BouA7l4"
        );
    }

    #[test]
    fn known_post_token_covers_body() {
        let params = params(&[("api_key", "7ab06"), ("expires", "1500")]);
        assert_eq!(
            generate_signature(
                SECRET_KEY,
                Method::Post,
                "/v2/assets",
                &params,
                br#"{"name":"test"}"#
            ),
            "NV%2FviEJdABOWHXR%2Bnizx9WFQVYfJaETR78sygR8osbs"
        );
    }

    #[test]
    fn identical_inputs_yield_identical_tokens() {
        let params = params(&[("api_key", "7ab06"), ("expires", "1200")]);
        let first = generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &params, b"");
        let second = generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &params, b"");
        assert_eq!(first, second);
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let forward = params(&[
            ("api_key", "7ab06"),
            ("expires", "1200"),
            ("where", "label='x'"),
        ]);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &forward, b""),
            generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &reversed, b""),
        );
    }

    #[test]
    fn every_input_is_covered() {
        let base = params(&[
            ("api_key", "7ab06"),
            ("expires", "1200"),
            ("where", "label='x'"),
        ]);
        let token = generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &base, b"");

        let other_value = params(&[
            ("api_key", "7ab06"),
            ("expires", "1200"),
            ("where", "label='y'"),
        ]);
        assert_ne!(
            token,
            generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &other_value, b"")
        );
        assert_ne!(
            token,
            generate_signature(SECRET_KEY, Method::Delete, "/v2/assets", &base, b"")
        );
        assert_ne!(
            token,
            generate_signature(SECRET_KEY, Method::Get, "/v2/players", &base, b"")
        );
        assert_ne!(
            token,
            generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &base, b"x")
        );
        assert_ne!(
            token,
            generate_signature("00000", Method::Get, "/v2/assets", &base, b"")
        );
    }

    #[test]
    fn token_is_url_safe() {
        let params = params(&[("api_key", "7ab06"), ("expires", "1200")]);
        let token = generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &params, b"");
        assert!(!token.is_empty());
        assert!(!token.ends_with('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn client_surface_matches_free_function() {
        let client = Client::new("7ab06", SECRET_KEY, ApiOptions::default());
        let params = params(&[("api_key", "7ab06"), ("expires", "1200")]);
        assert_eq!(
            client
                .generate_signature("GET", "/v2/assets", &params, b"")
                .unwrap(),
            generate_signature(SECRET_KEY, Method::Get, "/v2/assets", &params, b"")
        );
    }
}

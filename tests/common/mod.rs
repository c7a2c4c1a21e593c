#![allow(dead_code)]

use serde_json::{json, Value};
use twitter_rest::{ApiClient, ClientConfig, Credentials};
use wiremock::{Match, MockServer, Request};

pub fn credentials() -> Credentials {
    Credentials::new(
        "test_consumer_key",
        "test_consumer_secret",
        "test_access_token",
        "test_access_token_secret",
    )
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new().with_base_url(format!("{}/1.1", server.uri()))
}

pub fn signed_client(server: &MockServer) -> ApiClient {
    ApiClient::new(config(server).with_credentials(credentials())).unwrap()
}

pub fn anonymous_client(server: &MockServer) -> ApiClient {
    ApiClient::new(config(server)).unwrap()
}

pub fn status(id: u64, text: &str) -> Value {
    json!({
        "id": id,
        "id_str": id.to_string(),
        "text": text,
        "created_at": "Wed Aug 29 17:12:58 +0000 2012",
        "user": {"id": 6253282, "screen_name": "twitterapi"}
    })
}

pub fn user(id: u64, screen_name: &str) -> Value {
    json!({"id": id, "screen_name": screen_name})
}

/// Matches requests that carry no `Authorization` header.
pub struct Unsigned;

impl Match for Unsigned {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .iter()
            .all(|(name, _)| !name.as_str().eq_ignore_ascii_case("authorization"))
    }
}

pub async fn request_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect()
}

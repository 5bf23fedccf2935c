use std::time::Duration;

use proptest::prelude::*;
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{
    AddressList, Client, DECODE_BODY_LIMIT, Error, ParseOptions, RequestOptions, normalize_base_url,
};

const KEY: &str = "pubkey-test";

fn client_for(server: &MockServer) -> Client {
    Client::builder(KEY)
        .base_url(format!("{}/v2", server.uri()))
        .build()
        .expect("mock base url is valid")
}

#[test]
fn normalize_base_url_trims_trailing_slash() {
    let out = normalize_base_url("https://api.mailgun.net/v2/").expect("valid url");
    assert_eq!(out, "https://api.mailgun.net/v2");
}

#[test]
fn normalize_base_url_rejects_garbage() {
    let err = normalize_base_url("not a url").expect_err("relative url should fail");
    assert!(matches!(err, Error::InvalidBaseUrl { .. }));
}

#[test]
fn debug_output_hides_api_key() {
    let client = Client::new("super-secret");
    let rendered = format!("{:?}", client);
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("https://api.mailgun.net/v2"));
}

#[test]
fn address_list_joins_sequences_with_commas() {
    let list = AddressList::from(vec!["a@x.com", "b@y.com"]);
    assert_eq!(list.as_str(), "a@x.com,b@y.com");
    assert_eq!(AddressList::from(["a@x.com"]).as_str(), "a@x.com");
    assert!(AddressList::from(Vec::<String>::new()).is_empty());
}

proptest! {
    #[test]
    fn joined_string_and_sequence_agree(addresses in prop::collection::vec("[a-z]{1,8}@[a-z]{1,8}\\.com", 0..6)) {
        let joined = addresses.join(",");
        prop_assert_eq!(AddressList::from(addresses.as_slice()), AddressList::from(joined));
    }
}

#[tokio::test]
async fn validate_sends_address_and_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/validate"))
        .and(query_param("address", "john.smith+tag@gmail.com"))
        .and(basic_auth("API", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_valid": true,
            "address": "john.smith+tag@gmail.com",
            "parts": {
                "local_part": "john.smith+tag",
                "domain": "gmail.com",
                "display_name": ""
            },
            "did_you_mean": null,
            "mailbox_verification": "unknown"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .validate("john.smith+tag@gmail.com")
        .await
        .expect("validation succeeds");

    assert!(result.is_valid);
    assert_eq!(result.address, "john.smith+tag@gmail.com");
    assert_eq!(result.parts.domain.as_deref(), Some("gmail.com"));
    assert_eq!(result.suggestion(), None);
    assert_eq!(result.message, None);
}

#[tokio::test]
async fn parse_sequence_defaults_to_syntax_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/parse"))
        .and(query_param("addresses", "a@x.com,b@y.com"))
        .and(query_param("syntaxOnly", "true"))
        .and(basic_auth("API", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parsed": ["a@x.com", "b@y.com"],
            "unparseable": []
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let from_seq = client
        .parse(vec!["a@x.com", "b@y.com"])
        .await
        .expect("parse succeeds");
    let from_str = client
        .parse("a@x.com,b@y.com")
        .await
        .expect("parse succeeds");

    assert_eq!(from_seq, from_str);
    assert_eq!(from_seq.parsed, vec!["a@x.com", "b@y.com"]);
    assert!(from_seq.all_parsed());
}

#[tokio::test]
async fn parse_with_options_sends_syntax_only_false() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/parse"))
        .and(query_param("addresses", "a@x.com"))
        .and(query_param("syntaxOnly", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parsed": [],
            "unparseable": ["a@x.com"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = ParseOptions::new().syntax_only(false);
    let result = client
        .parse_with_options(["a@x.com"], &options)
        .await
        .expect("parse succeeds");

    assert!(result.parsed.is_empty());
    assert_eq!(result.unparseable, vec!["a@x.com"]);
    assert!(!result.all_parsed());
}

#[tokio::test]
async fn unauthorized_body_is_returned_as_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/validate"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid private key"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .validate("someone@example.com")
        .await
        .expect("status codes are not inspected");

    assert!(!result.is_valid);
    assert_eq!(result.message.as_deref(), Some("Invalid private key"));
}

#[tokio::test]
async fn non_json_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/parse"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .parse("a@x.com")
        .await
        .expect_err("html body cannot decode");

    assert!(matches!(err, Error::Decode { status: 502, .. }));
}

#[tokio::test]
async fn forbidden_text_body_is_kept_in_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/validate"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .validate("someone@example.com")
        .await
        .expect_err("plain text cannot decode");

    match &err {
        Error::Decode { status, body, .. } => {
            assert_eq!(*status, 401);
            assert_eq!(body, "Forbidden");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
    assert!(err.to_string().contains("Forbidden"));
}

#[tokio::test]
async fn long_decode_body_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/parse"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(DECODE_BODY_LIMIT * 3)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.parse("a@x.com").await.expect_err("not json");

    match err {
        Error::Decode { body, .. } => {
            assert!(body.ends_with("..."));
            assert_eq!(body.len(), DECODE_BODY_LIMIT + 3);
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn per_call_timeout_surfaces_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/address/validate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "is_valid": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RequestOptions::new().with_timeout(Duration::from_millis(100));
    let err = client
        .validate_with_options("slow@example.com", &options)
        .await
        .expect_err("deadline elapses first");

    assert!(err.is_transport());
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let client = Client::builder(KEY)
        .base_url("http://127.0.0.1:1/v2")
        .build()
        .expect("valid url");

    let err = client
        .validate("someone@example.com")
        .await
        .expect_err("nothing listens on port 1");

    assert!(err.is_transport(), "unexpected error: {err:?}");
}

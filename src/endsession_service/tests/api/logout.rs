use endsession_adapters::providers::client_registry_provider::{
    INVALID_CLIENT_ID, INVALID_POST_LOGOUT_REDIRECT_URI,
};
use endsession_core::errors::descriptions;
use reqwest::Method;

use crate::helpers::{CLIENT_ID, REDIRECT_URI, TestApp, location};

async fn assert_invalid_request(response: reqwest::Response, description: &str) {
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json;charset=UTF-8")
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["error_description"], description);
}

#[tokio::test]
async fn get_logout_redirects_with_state() {
    let app = TestApp::new().await;

    let response = app
        .get_logout(&[
            ("id_token_hint", "eyJhbGciOiJub25lIn0.e30."),
            ("post_logout_redirect_uri", REDIRECT_URI),
            ("state", "af0ifjsldkj"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(
        location(&response),
        Some("https://rp.example/signed-out?state=af0ifjsldkj")
    );
}

#[tokio::test]
async fn post_logout_redirects_for_matching_client() {
    let app = TestApp::new().await;

    let response = app
        .post_logout(&[
            ("client_id", CLIENT_ID),
            ("post_logout_redirect_uri", REDIRECT_URI),
            ("state", "s p a c e"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(
        location(&response),
        Some("https://rp.example/signed-out?state=s+p+a+c+e")
    );
}

#[tokio::test]
async fn logout_without_redirect_is_empty_success() {
    let app = TestApp::new().await;

    let response = app.get_logout(&[("state", "xyz")]).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(location(&response).is_none());
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn unregistered_redirect_uri_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .get_logout(&[
            ("post_logout_redirect_uri", "https://evil.example/"),
            ("state", "xyz"),
        ])
        .await;

    assert!(location(&response).is_none());
    assert_invalid_request(response, INVALID_POST_LOGOUT_REDIRECT_URI).await;
}

#[tokio::test]
async fn unknown_client_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_logout(&[
            ("client_id", "ghost"),
            ("post_logout_redirect_uri", REDIRECT_URI),
        ])
        .await;

    assert_invalid_request(response, INVALID_CLIENT_ID).await;
}

#[tokio::test]
async fn unsupported_methods_are_rejected() {
    let app = TestApp::new().await;

    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let response = app.logout_raw(method, None, "").await;
        assert_invalid_request(response, descriptions::INVALID_HTTP_METHOD).await;
    }
}

#[tokio::test]
async fn post_requires_form_content_type() {
    let app = TestApp::new().await;

    let response = app.logout_raw(Method::POST, None, "state=xyz").await;
    assert_invalid_request(response, descriptions::MISSING_CONTENT_TYPE).await;

    let response = app
        .logout_raw(Method::POST, Some("application/json"), r#"{"state":"xyz"}"#)
        .await;
    assert_invalid_request(response, descriptions::INVALID_CONTENT_TYPE).await;
}

#[tokio::test]
async fn error_passthrough_renders_error_page() {
    let app = TestApp::with_error_passthrough(true).await;

    let response = app
        .get_logout(&[("post_logout_redirect_uri", "/relative")])
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("text/html"))
    );

    let body = response.text().await.unwrap();
    assert!(body.contains("invalid_request"));
}

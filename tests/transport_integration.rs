//! Integration tests for the reqwest transport using WireMock.
//!
//! These exercise the real HTTP stack: parameter encoding per method,
//! multipart file uploads, status passthrough, and transport error mapping.

use http::header::{HeaderValue, AUTHORIZATION};
use http::Method;
use std::time::Duration;
use twitter_client::transport::{
    ApiRequest, FileUpload, HttpTransport, Params, ReqwestTransport,
};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_get_sends_params_as_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/statuses/user_timeline.json"))
        .and(query_param("screen_name", "alice"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new(
        Method::GET,
        format!("{}/1/statuses/user_timeline.json", server.uri()),
    )
    .params(Params::new().set("screen_name", "alice").set("count", "5"));

    let response = transport().send(request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body.as_ref(), b"[]");
}

#[tokio::test]
async fn test_post_sends_params_as_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/statuses/update.json"))
        .and(header(
            "content-type",
            "application/x-www-form-urlencoded",
        ))
        .and(body_string_contains("status=hello+world"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"id":1,"text":"hello world"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new(
        Method::POST,
        format!("{}/1/statuses/update.json", server.uri()),
    )
    .params(Params::new().set("status", "hello world"));

    let response = transport().send(request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn test_files_switch_to_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/statuses/update_with_media.json"))
        .and(body_string_contains("name=\"media[]\""))
        .and(body_string_contains("filename=\"note.txt\""))
        .and(body_string_contains("attached content"))
        .and(body_string_contains("name=\"status\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new(
        Method::POST,
        format!("{}/1/statuses/update_with_media.json", server.uri()),
    )
    .params(Params::new().set("status", "with media"))
    .files(vec![FileUpload::new(
        "media[]",
        "note.txt",
        &b"attached content"[..],
    )]);

    let response = transport().send(request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn test_non_200_status_is_returned_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/statuses/show/12345.json"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":"Not found"}"#),
        )
        .mount(&server)
        .await;

    let request = ApiRequest::new(
        Method::GET,
        format!("{}/1/statuses/show/12345.json", server.uri()),
    );

    let response = transport().send(request).await.unwrap();
    assert_eq!(response.status.as_u16(), 404);
    assert_eq!(response.body.as_ref(), br#"{"error":"Not found"}"#);
}

#[tokio::test]
async fn test_headers_are_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1/statuses/mentions.json"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = ApiRequest::new(
        Method::GET,
        format!("{}/1/statuses/mentions.json", server.uri()),
    );
    request.header(AUTHORIZATION, HeaderValue::from_static("Bearer test-token"));

    let response = transport().send(request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn test_unreachable_server_maps_to_transport_error() {
    // Nothing listens on this port.
    let request = ApiRequest::new(Method::GET, "http://127.0.0.1:1/1/x.json");

    let err = transport().send(request).await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().starts_with("Request error: "));
}

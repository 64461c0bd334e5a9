//! Tests for the response adapter
//!
//! Verifies the translation from the plugin-facing intermediate response to
//! the transport vocabulary: the nil/adopted/204/redirect short-circuits,
//! the content-type dispatch, and the degraded 500 responses on type
//! mismatches.

mod common;

use plugboard::transport::{
    adapt_response, into_handler, CommonResponse, Context, Payload, Response,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_nil_yields_nil() {
    assert_eq!(adapt_response(None), None);
}

#[test]
fn test_adopted_sentinel() {
    common::init_tracing();
    assert_eq!(
        adapt_response(Some(CommonResponse::adopted())),
        Some(Response::Adopted)
    );
}

#[test]
fn test_204_is_no_content_regardless_of_content_type() {
    let resp = CommonResponse::text(204, "ignored");
    assert_eq!(adapt_response(Some(resp)), Some(Response::NoContent));
}

#[test]
fn test_redirect_with_string_target() {
    let resp = adapt_response(Some(CommonResponse::redirect(301, "/login")));
    assert_eq!(
        resp,
        Some(Response::Redirect {
            status: 301,
            location: "/login".to_string(),
        })
    );
}

#[test]
fn test_redirect_with_non_string_target_degrades_to_500() {
    let resp = CommonResponse::new(302, "", Payload::Json(json!({"to": "/login"})));
    match adapt_response(Some(resp)) {
        Some(Response::Text { status, body }) => {
            assert_eq!(status, 500);
            let text = String::from_utf8(body).unwrap();
            assert!(text.contains("invalid redirect value type"));
        }
        other => panic!("expected degraded 500 text response, got {other:?}"),
    }
}

#[test]
fn test_json_encodes_value() {
    let resp = adapt_response(Some(CommonResponse::json(201, json!({"id": 7}))));
    assert_eq!(
        resp,
        Some(Response::Json {
            status: 201,
            body: json!({"id": 7}),
        })
    );
}

#[test]
fn test_jsonp_carries_callback() {
    let resp = adapt_response(Some(CommonResponse::jsonp("cb", json!([1, 2]))));
    assert_eq!(
        resp,
        Some(Response::Jsonp {
            callback: "cb".to_string(),
            body: json!([1, 2]),
        })
    );
}

#[test]
fn test_text_accepts_string_and_bytes() {
    let from_string = adapt_response(Some(CommonResponse::text(200, "hello")));
    assert_eq!(
        from_string,
        Some(Response::Text {
            status: 200,
            body: b"hello".to_vec(),
        })
    );

    let from_bytes = adapt_response(Some(CommonResponse::new(
        200,
        "text",
        Payload::Bytes(b"raw".to_vec()),
    )));
    assert_eq!(
        from_bytes,
        Some(Response::Text {
            status: 200,
            body: b"raw".to_vec(),
        })
    );
}

#[test]
fn test_text_with_json_value_degrades_to_500() {
    let resp = CommonResponse::new(200, "text", Payload::Json(json!(42)));
    match adapt_response(Some(resp)) {
        Some(Response::Text { status, body }) => {
            assert_eq!(status, 500);
            assert!(String::from_utf8(body).unwrap().contains("invalid text value type"));
        }
        other => panic!("expected degraded 500 text response, got {other:?}"),
    }
}

#[test]
fn test_xml_requires_bytes() {
    let ok = adapt_response(Some(CommonResponse::xml(200, b"<r/>".to_vec())));
    assert_eq!(
        ok,
        Some(Response::Xml {
            status: 200,
            body: b"<r/>".to_vec(),
        })
    );

    let bad = CommonResponse::new(200, "xml", Payload::Text("<r/>".to_string()));
    match adapt_response(Some(bad)) {
        Some(Response::Text { status, body }) => {
            assert_eq!(status, 500);
            assert!(String::from_utf8(body).unwrap().contains("invalid XML value type"));
        }
        other => panic!("expected degraded 500 text response, got {other:?}"),
    }
}

#[test]
fn test_unknown_content_type_yields_nil() {
    let resp = CommonResponse::new(200, "protobuf", Payload::Bytes(vec![0]));
    assert_eq!(adapt_response(Some(resp)), None);
}

#[test]
fn test_into_handler_wraps_common_convention() {
    let common = Arc::new(|_ctx: &mut Context| Some(CommonResponse::json(200, json!("ok"))));
    let handler = into_handler(common);

    let resp = handler(&mut Context::default()).unwrap();
    assert_eq!(
        resp,
        Response::Json {
            status: 200,
            body: json!("ok"),
        }
    );
}

//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Echo it back on the response for correlation
//! - Decode the request path before lookup
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied `x-request-id` is kept as is

use std::borrow::Cow;

use axum::http::{HeaderName, HeaderValue, Request, Uri};
use percent_encoding::percent_decode_str;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Layer assigning an ID to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), UuidRequestId)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Read the request ID header, if any.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Percent-decoded request path. Paths that do not decode to UTF-8 are
/// returned as sent.
pub fn decoded_path(uri: &Uri) -> Cow<'_, str> {
    let raw = uri.path();
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_distinct_uuids() {
        let req = Request::builder().body(()).unwrap();
        let mut make = UuidRequestId;

        let a = make.make_request_id(&req).unwrap();
        let b = make.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());

        let text = a.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }

    #[test]
    fn test_decoded_path() {
        let uri: Uri = "/caf%C3%A9".parse().unwrap();
        assert_eq!(decoded_path(&uri), "/café");

        let uri: Uri = "/a%20b?q=%20".parse().unwrap();
        assert_eq!(decoded_path(&uri), "/a b");

        let uri: Uri = "/plain".parse().unwrap();
        assert!(matches!(decoded_path(&uri), Cow::Borrowed("/plain")));

        // Invalid UTF-8 after decoding stays encoded
        let uri: Uri = "/bad%FF".parse().unwrap();
        assert_eq!(decoded_path(&uri), "/bad%FF");
    }

    #[test]
    fn test_request_id_reads_header() {
        let req = Request::builder().header(X_REQUEST_ID, "abc-123").body(()).unwrap();
        assert_eq!(request_id(&req), "abc-123");

        let req = Request::builder().body(()).unwrap();
        assert_eq!(request_id(&req), "unknown");
    }
}

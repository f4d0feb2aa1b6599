//! Conversion of resolution actions into HTTP responses.
//!
//! - `Redirect(target)` → 302 Found with a `Location` header
//! - `Respond(body)` → 200 OK with a plain-text body
//! - A target that cannot be sent as a header value → 500

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::Action;

impl IntoResponse for Action {
    fn into_response(self) -> Response {
        match self {
            Action::Redirect(target) => match HeaderValue::try_from(target) {
                Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
                Err(e) => {
                    tracing::error!(error = %e, "Redirect target is not a valid Location header");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
                }
            },
            Action::Respond(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                body,
            )
                .into_response(),
        }
    }
}

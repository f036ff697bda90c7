//! Per-request correlation id.
//!
//! Every API call and static-file response carries `x-request-id`. The shop
//! front end (or whatever sits in front of the server) may supply one; a
//! short printable value is kept, anything else is replaced by a fresh UUID v4.
//! The id lands on the `http_request` span, the Sentry scope, and the response.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is kept as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Tag a request with its id, then echo the id on the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(request.headers())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// The caller's id, if it is non-empty, bounded, and visible ASCII.
fn incoming_request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id.bytes().all(|b| b.is_ascii_graphic())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_keeps_well_formed_id() {
        let headers = headers("checkout-7f3a");
        assert_eq!(incoming_request_id(&headers), Some("checkout-7f3a"));
    }

    #[test]
    fn test_absent_or_empty_id_is_ignored() {
        assert_eq!(incoming_request_id(&HeaderMap::new()), None);
        assert_eq!(incoming_request_id(&headers("")), None);
    }

    #[test]
    fn test_oversized_or_spaced_id_is_ignored() {
        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        assert_eq!(incoming_request_id(&headers(&long)), None);
        assert_eq!(incoming_request_id(&headers("two words")), None);

        let exact = "a".repeat(MAX_REQUEST_ID_LEN);
        assert_eq!(incoming_request_id(&headers(&exact)), Some(exact.as_str()));
    }
}

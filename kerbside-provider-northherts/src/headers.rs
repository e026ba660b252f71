//! Fixed header set attached to every Cloud 9 request.
//!
//! Credential lifecycle is not handled here; the backend accepts a static
//! basic token plus an API version marker.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

const BASIC_AUTHORIZATION: &str = "Basic Y2xvdWQ5OmlkQmNWNGJvcjU=";
const API_VERSION: &str = "2";

/// Build the header map sent with both API calls.
pub(crate) fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static(BASIC_AUTHORIZATION));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("x-api-version", HeaderValue::from_static(API_VERSION));
    headers
}

#[cfg(test)]
mod tests {
    use super::base_headers;

    #[test]
    fn header_set_is_complete() {
        let headers = base_headers();
        assert_eq!(headers.len(), 4);
        assert_eq!(
            headers
                .get("x-api-version")
                .and_then(|value| value.to_str().ok()),
            Some("2")
        );
    }
}

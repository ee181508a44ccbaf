//! Transport-neutral request and response values for proxy handlers.
//!
//! The HTTP layer converts framework requests into `ProxyRequest` and
//! `ProxyResponse` back into framework responses, so handlers never see
//! axum or reqwest types.

use serde::Serialize;

/// An incoming request, delegated verbatim to a proxy handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    /// Uppercase HTTP method (e.g. "POST").
    pub method: String,
    /// Path including the query string, if any.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ProxyRequest {
    /// Build a `POST` with a JSON body.
    pub fn post_json(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: "POST".to_string(),
            path: path.into(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response produced by a proxy handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ProxyResponse {
    /// A response with a JSON-serialized body.
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        let body = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
        Self {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_sets_content_type() {
        let resp = ProxyResponse::json(502, &serde_json::json!({ "error": "x" }));
        assert_eq!(resp.status, 502);
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.json_body().unwrap()["error"], "x");
    }

    #[test]
    fn test_request_header_lookup_is_case_insensitive() {
        let req = ProxyRequest::post_json("/api/proxyWebhook", b"{}".to_vec());
        assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
        assert!(req.header("authorization").is_none());
    }
}

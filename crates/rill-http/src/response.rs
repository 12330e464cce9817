//! JSON response building.

use serde::Serialize;

use crate::error::Result;

/// Content type attached to every JSON response.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// An ordered header set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Gets a header value, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the headers as raw byte pairs for the wire.
    pub fn as_byte_pairs(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
            .iter()
            .map(|(n, v)| (n.clone().into_bytes(), v.clone().into_bytes()))
            .collect()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no headers are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A built response: status, headers, and serialized body.
///
/// Constructed once per dispatch and immutable afterwards; consumed by the
/// transport send.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Vec<u8>,
}

impl Response {
    /// Serializes `content` into a 200 JSON response.
    ///
    /// Sets `content-type: application/json; charset=utf-8` and a
    /// `content-length` equal to the exact byte length of the body. Content
    /// that is not representable as JSON fails with
    /// [`DispatchError::Serialization`](crate::DispatchError::Serialization)
    /// and is never coerced.
    pub fn json<T: Serialize + ?Sized>(content: &T) -> Result<Self> {
        Self::json_with_status(content, 200)
    }

    /// Serializes `content` into a JSON response with the given status.
    pub fn json_with_status<T: Serialize + ?Sized>(content: &T, status: u16) -> Result<Self> {
        debug_assert!((100..=599).contains(&status), "invalid HTTP status {status}");
        let body = serde_json::to_vec(content)?;
        Ok(Self::from_body(status, body))
    }

    /// Builds the 404 response: JSON body `"Not found"`.
    pub fn not_found() -> Self {
        Self::from_body(404, b"\"Not found\"".to_vec())
    }

    fn from_body(status: u16, body: Vec<u8>) -> Self {
        let mut headers = Headers::new();
        headers.add("content-type", CONTENT_TYPE_JSON);
        headers.add("content-length", body.len().to_string());
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the header set.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the response, returning the body bytes.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn json_sets_status_and_headers() {
        let mut content = HashMap::new();
        content.insert("hello", "world");
        let res = Response::json(&content).unwrap();

        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers().get("content-type"),
            Some("application/json; charset=utf-8")
        );
        let expected = serde_json::to_vec(&content).unwrap();
        assert_eq!(
            res.headers().get("content-length"),
            Some(expected.len().to_string().as_str())
        );
        assert_eq!(res.body(), expected.as_slice());
    }

    #[test]
    fn content_length_is_exact_byte_length() {
        let res = Response::json("héllo").unwrap();
        let len: usize = res.headers().get("content-length").unwrap().parse().unwrap();
        assert_eq!(len, res.body().len());
        // Multibyte characters make byte length differ from char count.
        assert_eq!(res.body_string(), Some("\"héllo\"".to_string()));
    }

    #[test]
    fn non_serializable_content_fails() {
        // JSON object keys must be strings; a tuple key cannot serialize.
        let mut content = HashMap::new();
        content.insert((1u8, 2u8), "value");
        let err = Response::json(&content).unwrap_err();
        assert!(matches!(
            err,
            crate::error::DispatchError::Serialization(_)
        ));
    }

    #[test]
    fn not_found_contract() {
        let res = Response::not_found();
        assert_eq!(res.status(), 404);
        assert_eq!(res.body_string(), Some("\"Not found\"".to_string()));
        assert_eq!(
            res.headers().get("content-type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(res.headers().get("content-length"), Some("11"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let res = Response::json(&[1, 2, 3]).unwrap();
        assert_eq!(
            res.headers().get("Content-Type"),
            Some("application/json; charset=utf-8")
        );
    }

    #[test]
    fn byte_pairs_preserve_order() {
        let res = Response::json("x").unwrap();
        let pairs = res.headers().as_byte_pairs();
        assert_eq!(pairs[0].0, b"content-type");
        assert_eq!(pairs[1].0, b"content-length");
    }
}

// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::mem;

use http::header::HeaderName;
use http::HeaderMap;
use http::Method;

use crate::Result;

/// Signing view of an http request.
///
/// Holds everything the canonical request is built from except the body,
/// which stays with the caller and is only ever borrowed.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP path, exactly as it appears in the uri.
    pub path: String,
    /// HTTP query parameters, decoded, in uri order with duplicates kept.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Headers describing the body, for http stacks that keep them apart
    /// from the request headers.
    ///
    /// Entries are only used when `headers` has no header of the same name.
    pub content_headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing request from http::request::Parts.
    ///
    /// Headers are taken out of `parts` to avoid copy, they are returned by
    /// [`SigningRequest::apply`].
    pub fn build(parts: &mut http::request::Parts) -> Self {
        let mut req = Self::from_uri(parts.method.clone(), &parts.uri);
        req.headers = mem::take(&mut parts.headers);
        req
    }

    /// Build a signing request from borrowed http::request::Parts.
    ///
    /// Used on the verifying side where the request must stay untouched.
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        let mut req = Self::from_uri(parts.method.clone(), &parts.uri);
        req.headers = parts.headers.clone();
        req
    }

    fn from_uri(method: Method, uri: &http::Uri) -> Self {
        SigningRequest {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(parse_query).unwrap_or_default(),
            headers: HeaderMap::new(),
            content_headers: HeaderMap::new(),
        }
    }

    /// Attach body headers kept outside of the request headers.
    pub fn with_content_headers(mut self, headers: HeaderMap) -> Self {
        self.content_headers = headers;
        self
    }

    /// Apply the signing request back to http::request::Parts.
    ///
    /// Only headers are written back: method, path and query are never
    /// changed by signing.
    pub fn apply(mut self, parts: &mut http::request::Parts) {
        mem::swap(&mut parts.headers, &mut self.headers);
    }

    /// Get the first value of header by name.
    ///
    /// Returns `Ok(None)` if the header is absent and an error if its value
    /// is not visible ASCII.
    #[inline]
    pub fn header_get(&self, key: &HeaderName) -> Result<Option<&str>> {
        match self.headers.get(key) {
            Some(v) => Ok(Some(v.to_str()?)),
            None => Ok(None),
        }
    }
}

/// Decode a raw query string into ordered key/value pairs.
///
/// `+` is decoded as space and percent escapes are resolved; pairs without
/// `=` get an empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_query_keeps_order_and_duplicates() {
        assert_eq!(
            parse_query("b=2&a=1&b=3&flag&sp=1+2&enc=x%2Fy"),
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "3".to_string()),
                ("flag".to_string(), "".to_string()),
                ("sp".to_string(), "1 2".to_string()),
                ("enc".to_string(), "x/y".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_and_apply() {
        let req = Request::post("https://example.com/hooks/order?id=7")
            .header("content-type", "application/json")
            .body(())
            .expect("request must be valid");
        let (mut parts, _) = req.into_parts();

        let signing = SigningRequest::build(&mut parts);
        assert!(parts.headers.is_empty());
        assert_eq!(signing.method, Method::POST);
        assert_eq!(signing.path, "/hooks/order");
        assert_eq!(signing.query, vec![("id".to_string(), "7".to_string())]);
        assert_eq!(
            signing
                .header_get(&http::header::CONTENT_TYPE)
                .expect("must be valid"),
            Some("application/json")
        );

        signing.apply(&mut parts);
        assert_eq!(parts.headers["content-type"], "application/json");
    }

    #[test]
    fn test_from_parts_leaves_request_untouched() {
        let req = Request::get("/status")
            .header("x-api-key", "key")
            .body(())
            .expect("request must be valid");
        let (parts, _) = req.into_parts();

        let signing = SigningRequest::from_parts(&parts);
        assert_eq!(signing.path, "/status");
        assert!(signing.query.is_empty());
        assert_eq!(parts.headers["x-api-key"], "key");
        assert_eq!(signing.headers["x-api-key"], "key");
    }

    #[test]
    fn test_header_get_rejects_opaque_values() {
        let mut req = Request::get("/")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0;
        req.headers.insert(
            "x-api-key",
            http::HeaderValue::from_bytes(b"caf\xe9").expect("must be valid"),
        );

        let signing = SigningRequest::from_parts(&req);
        let err = signing
            .header_get(&HeaderName::from_static("x-api-key"))
            .expect_err("opaque header must be rejected");
        assert_eq!(err.kind(), crate::ErrorKind::MalformedHeader);
    }
}

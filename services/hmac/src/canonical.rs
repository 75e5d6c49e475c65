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

//! Canonical request construction.
//!
//! ```text
//! {METHOD}
//! {PATH}
//! {CANONICAL_QUERY}
//! {name:value lines of every signed header present, each ending in \n}
//! {signed header names joined by ;}
//! {hex(sha256(body))}
//! ```

use std::collections::BTreeMap;

use encoding_rs::Encoding;

use hooksign_core::encode::url_encode;
use hooksign_core::hash::hex_sha256;
use hooksign_core::SigningRequest;
use http::header::CONTENT_TYPE;
use http::HeaderMap;

use crate::SignedHeaders;

/// PayloadEncoding decides how the body is read before it's hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    /// Read the body as UTF-8 text, invalid sequences become U+FFFD.
    ///
    /// Valid UTF-8 bodies hash to the same value as [`PayloadEncoding::Binary`].
    #[default]
    Utf8,
    /// Hash the body bytes as they are.
    Binary,
    /// Read the body as text in the `charset` declared by `content-type`.
    ///
    /// Bodies without a charset, or with one that isn't recognized, are read
    /// like [`PayloadEncoding::Utf8`].
    Declared,
}

/// Build the canonical query string.
///
/// Parameters keep their request order, duplicates included. Keys and values
/// are encoded with [`url_encode`] and joined as `k=v` pairs by `&`.
pub fn canonical_query(query: &[(String, String)]) -> String {
    let mut s = String::with_capacity(query.len() * 16);

    for (idx, (k, v)) in query.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&url_encode(k));
        s.push('=');
        s.push_str(&url_encode(v));
    }

    s
}

/// Build the canonical headers block.
///
/// `content_headers` only contribute names that `headers` doesn't carry.
/// Multi-valued headers are joined by a single space. Signed names that are
/// absent from both maps produce no line.
pub fn canonical_headers(
    headers: &HeaderMap,
    content_headers: &HeaderMap,
    signed: &SignedHeaders,
) -> String {
    let mut merged: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in collect_headers(headers) {
        merged.insert(name, value);
    }
    for (name, value) in collect_headers(content_headers) {
        merged.entry(name).or_insert(value);
    }

    let mut s = String::with_capacity(256);
    for (name, value) in merged.iter().filter(|(k, _)| signed.contains(k)) {
        s.push_str(name);
        s.push(':');
        s.push_str(value);
        s.push('\n');
    }

    s
}

fn collect_headers(headers: &HeaderMap) -> impl Iterator<Item = (String, String)> + '_ {
    headers.keys().map(|name| {
        let value = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
            .collect::<Vec<_>>()
            .join(" ");

        (
            name.as_str().trim().to_lowercase(),
            value.trim().to_string(),
        )
    })
}

/// Hex encoded SHA256 of the body.
///
/// The body is only borrowed; an empty body hashes like the empty string.
/// `content_type` is only consulted by [`PayloadEncoding::Declared`].
pub fn payload_hash(body: &[u8], encoding: PayloadEncoding, content_type: Option<&str>) -> String {
    match encoding {
        PayloadEncoding::Utf8 => hex_sha256(String::from_utf8_lossy(body).as_bytes()),
        PayloadEncoding::Binary => hex_sha256(body),
        PayloadEncoding::Declared => match content_type.and_then(declared_charset) {
            Some(charset) => {
                let (text, _, _) = charset.decode(body);
                hex_sha256(text.as_bytes())
            }
            None => hex_sha256(String::from_utf8_lossy(body).as_bytes()),
        },
    }
}

/// Find the encoding named by the `charset` parameter of a `content-type` value.
fn declared_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, v)| Encoding::for_label(v.trim().trim_matches('"').as_bytes()))
}

/// Build the canonical request string of `req`.
pub fn canonical_request(
    req: &SigningRequest,
    signed: &SignedHeaders,
    body: &[u8],
    encoding: PayloadEncoding,
) -> String {
    // 512 is chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(512);

    f.push_str(req.method.as_str());
    f.push('\n');
    f.push_str(&req.path);
    f.push('\n');
    f.push_str(&canonical_query(&req.query));
    f.push('\n');
    f.push_str(&canonical_headers(
        &req.headers,
        &req.content_headers,
        signed,
    ));
    f.push('\n');
    f.push_str(&signed.to_canonical_string());
    f.push('\n');
    let content_type = req
        .headers
        .get(CONTENT_TYPE)
        .or_else(|| req.content_headers.get(CONTENT_TYPE))
        .and_then(|v| v.to_str().ok());
    f.push_str(&payload_hash(body, encoding, content_type));

    f
}

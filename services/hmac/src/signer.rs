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

//! Signing key derivation and signature calculation.

use std::fmt::{Debug, Formatter};

use hooksign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use hooksign_core::time::{format_date, format_iso8601_millis, DateTime};
use hooksign_core::utils::Redact;
use hooksign_core::SigningRequest;
use log::debug;

use crate::canonical::{canonical_request, PayloadEncoding};
use crate::constants::{HMAC_SHA256, SIGNING_KEY_PREFIX, SIGNING_KEY_TERMINATOR};

/// SignedHeaders is the normalized list of header names covered by a signature.
///
/// Names are trimmed, lower-cased, deduplicated and sorted, so the same set
/// is rebuilt from the comma-joined list carried by `x-api-signed-headers`
/// no matter how the signer ordered or cased it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignedHeaders(Vec<String>);

impl SignedHeaders {
    /// Normalize the given header names.
    ///
    /// Blank names are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();
        names.sort_unstable();
        names.dedup();

        Self(names)
    }

    /// Parse a comma-joined header list like `x-api-key,x-api-date`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Check if `name` is covered. `name` must already be lower-cased.
    pub fn contains(&self, name: &str) -> bool {
        self.0.binary_search_by(|v| v.as_str().cmp(name)).is_ok()
    }

    /// Iterate over the names in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of signed headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no header is signed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names joined by `;`, the form used inside the canonical request.
    pub fn to_canonical_string(&self) -> String {
        self.0.join(";")
    }
}

/// Derive the signing key for `service` on the UTC calendar day of `time`.
///
/// ```text
/// k1 = HMAC("KEY" + secret, YYYYMMDD)
/// k2 = HMAC(k1, service)
/// k3 = HMAC(k2, "api_request")
/// ```
///
/// Time of day doesn't take part: every request of the same day shares the key.
pub fn signing_key(secret_key: &str, service: &str, time: DateTime) -> Vec<u8> {
    // Sign secret
    let secret = format!("{SIGNING_KEY_PREFIX}{secret_key}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_date.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), SIGNING_KEY_TERMINATOR.as_bytes())
}

/// Build the string to sign.
///
/// ```text
/// HMAC-SHA256
/// 2022-03-13T07:20:04.123Z
/// <service>
/// <hex(sha256(canonical_request))>
/// ```
pub fn string_to_sign(service: &str, time: DateTime, canonical_request: &str) -> String {
    format!(
        "{HMAC_SHA256}\n{}\n{service}\n{}",
        format_iso8601_millis(time),
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Hex encoded HMAC of `string_to_sign` under the derived signing key.
pub fn signature(secret_key: &str, service: &str, time: DateTime, string_to_sign: &str) -> String {
    let key = signing_key(secret_key, service, time);
    hex_hmac_sha256(&key, string_to_sign.as_bytes())
}

/// SigningContext holds the secret and the service scope of one signer.
#[derive(Clone)]
pub struct SigningContext {
    secret_key: String,
    service: String,
}

impl Debug for SigningContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningContext")
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("service", &self.service)
            .finish()
    }
}

impl SigningContext {
    /// Create a new signing context.
    pub fn new(secret_key: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            service: service.into(),
        }
    }

    /// The service scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Calculate the signature of `req`.
    ///
    /// `body` is only borrowed, it's still available to the caller afterwards.
    pub fn calculate_signature(
        &self,
        req: &SigningRequest,
        signed: &SignedHeaders,
        body: &[u8],
        time: DateTime,
        encoding: PayloadEncoding,
    ) -> String {
        let creq = canonical_request(req, signed, body, encoding);
        debug!("calculated canonical request: {creq}");

        let string_to_sign = string_to_sign(&self.service, time, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        signature(&self.secret_key, &self.service, time, &string_to_sign)
    }
}

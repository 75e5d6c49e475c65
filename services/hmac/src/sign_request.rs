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

use std::fmt::{Debug, Formatter};

use hooksign_core::time::{format_iso8601_millis, now, DateTime};
use hooksign_core::utils::Redact;
use hooksign_core::{Error, Result, SigningRequest};
use http::header::{HeaderName, AUTHORIZATION};
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Request};
use log::debug;

use crate::canonical::PayloadEncoding;
use crate::constants::*;
use crate::{Config, SignedHeaders, SigningContext};

/// RequestSigner attaches the `x-api-*` headers and the signature to
/// outgoing requests.
///
/// Every request gets:
///
/// - `x-api-key`: the public api key
/// - `x-api-date`: signing time as `yyyy-MM-ddTHH:mm:ss.fffZ`
/// - `x-api-scope`: the service
/// - `x-api-algorithm`: `HMAC-SHA256`
/// - `x-api-signed-headers`: the four headers above plus the extra ones, comma joined
/// - `Authorization`: the lowercase hex signature, without any scheme
#[derive(Clone)]
pub struct RequestSigner {
    api_key: String,
    ctx: SigningContext,
    signed_headers: Vec<String>,
    payload_encoding: PayloadEncoding,

    time: Option<DateTime>,
}

impl Debug for RequestSigner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &Redact::from(&self.api_key))
            .field("ctx", &self.ctx)
            .field("signed_headers", &self.signed_headers)
            .field("payload_encoding", &self.payload_encoding)
            .field("time", &self.time)
            .finish()
    }
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new(api_key: &str, secret_key: &str, service: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            ctx: SigningContext::new(secret_key, service),
            signed_headers: Vec::new(),
            payload_encoding: PayloadEncoding::default(),

            time: None,
        }
    }

    /// Create a signer from config.
    ///
    /// `api_key`, `secret_key` and `service` must be set, call
    /// [`Config::from_env`] first to pick them from env.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let field = |v: &Option<String>, name: &str| {
            v.clone()
                .ok_or_else(|| Error::config_invalid(format!("{name} is required for signing")))
        };

        let api_key = field(&cfg.api_key, "api_key")?;
        let secret_key = field(&cfg.secret_key, "secret_key")?;
        let service = field(&cfg.service, "service")?;

        Ok(Self::new(&api_key, &secret_key, &service)
            .with_signed_headers(cfg.signed_headers.iter())
            .with_payload_encoding(cfg.payload_encoding))
    }

    /// Sign these headers too, on top of the mandatory `x-api-*` ones.
    ///
    /// Names are matched case-insensitively. Headers missing from a request
    /// are listed but don't contribute to the signature. Signing fails with
    /// [`hooksign_core::ErrorKind::RequestInvalid`] for `authorization` or an
    /// invalid header name.
    pub fn with_signed_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.signed_headers = names.into_iter().map(|v| v.as_ref().to_string()).collect();
        self
    }

    /// Specify how the body is read before hashing.
    pub fn with_payload_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.payload_encoding = encoding;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// Requests should be signed with the current time, which is used when
    /// this is not set. Fixed times are meant for replays and tests.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Header names transmitted in `x-api-signed-headers`, in transmit order.
    ///
    /// Extra names must be valid header names other than `authorization`,
    /// which carries the signature itself.
    fn transmitted_headers(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::with_capacity(4 + self.signed_headers.len());
        for name in MANDATORY_SIGNED_HEADERS
            .iter()
            .copied()
            .chain(self.signed_headers.iter().map(String::as_str))
        {
            let name = name.trim().to_lowercase();
            if name.is_empty() || names.contains(&name) {
                continue;
            }
            if name.contains(',') {
                return Err(Error::request_invalid(format!(
                    "signed header {name:?} must not contain ','"
                )));
            }
            if HeaderName::from_bytes(name.as_bytes())? == AUTHORIZATION {
                return Err(Error::request_invalid(
                    "authorization carries the signature and can't be signed",
                ));
            }
            names.push(name);
        }
        Ok(names)
    }

    /// Sign the request parts, `body` is the payload that will be sent along.
    ///
    /// Existing `x-api-*` and `Authorization` headers are replaced.
    pub fn sign(&self, parts: &mut Parts, body: &[u8]) -> Result<()> {
        self.sign_with_content_headers(parts, &HeaderMap::new(), body)
    }

    /// Sign the request parts together with headers that describe `body`
    /// but travel apart from the request headers.
    ///
    /// `content_headers` are only read: a signed name takes its value from
    /// `parts` first and from `content_headers` when `parts` lacks it.
    pub fn sign_with_content_headers(
        &self,
        parts: &mut Parts,
        content_headers: &HeaderMap,
        body: &[u8],
    ) -> Result<()> {
        let now = self.time.unwrap_or_else(now);

        // Build every header value before taking the headers out of parts,
        // so that a failure leaves the request untouched.
        let names = self.transmitted_headers()?;
        let api_key = HeaderValue::from_str(&self.api_key)?;
        let date = HeaderValue::try_from(format_iso8601_millis(now))?;
        let scope = HeaderValue::from_str(self.ctx.service())?;
        let signed_list = HeaderValue::try_from(names.join(","))?;

        let mut signed_req =
            SigningRequest::build(parts).with_content_headers(content_headers.clone());
        signed_req.headers.insert(X_API_KEY, api_key);
        signed_req.headers.insert(X_API_DATE, date);
        signed_req.headers.insert(X_API_SCOPE, scope);
        signed_req
            .headers
            .insert(X_API_ALGORITHM, HeaderValue::from_static(HMAC_SHA256));
        signed_req.headers.insert(X_API_SIGNED_HEADERS, signed_list);

        let signed = SignedHeaders::new(&names);
        debug!("calculated signed headers: {}", signed.to_canonical_string());

        let signature =
            self.ctx
                .calculate_signature(&signed_req, &signed, body, now, self.payload_encoding);

        // A lowercase hex string is always a valid header value.
        let mut authorization = HeaderValue::try_from(signature)?;
        authorization.set_sensitive(true);
        signed_req.headers.insert(AUTHORIZATION, authorization);

        // Apply to the request.
        signed_req.apply(parts);
        Ok(())
    }

    /// Sign a whole request whose body is already buffered.
    pub fn sign_request<B: AsRef<[u8]>>(&self, req: Request<B>) -> Result<Request<B>> {
        let (mut parts, body) = req.into_parts();
        self.sign(&mut parts, body.as_ref())?;
        Ok(Request::from_parts(parts, body))
    }
}

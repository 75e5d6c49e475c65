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

use hooksign_core::time::parse_iso8601_millis;
use hooksign_core::{Context, Error, ProvideSecret, Result, SecretRequest, SigningRequest};
use http::header::{HeaderName, AUTHORIZATION};
use http::request::Parts;
use http::{HeaderMap, Request};
use log::debug;
use subtle::ConstantTimeEq;

use crate::canonical::PayloadEncoding;
use crate::constants::*;
use crate::{SignedHeaders, SigningContext};

/// RequestVerifier checks signatures produced by [`crate::RequestSigner`].
///
/// Verification answers `Ok(true)` or `Ok(false)`. A malformed request (a
/// missing `x-api-*` header, a date in another format, an unknown algorithm)
/// is an error instead, and so is any failure of the secret provider.
#[derive(Debug)]
pub struct RequestVerifier<P> {
    ctx: Context,
    provider: P,
    payload_encoding: PayloadEncoding,
    strict_signed_headers: bool,
}

impl<P: ProvideSecret> RequestVerifier<P> {
    /// Create a new verifier resolving secrets through `provider`.
    pub fn new(ctx: Context, provider: P) -> Self {
        Self {
            ctx,
            provider,
            payload_encoding: PayloadEncoding::default(),
            strict_signed_headers: false,
        }
    }

    /// Specify how the body is read before hashing, must match the signer.
    pub fn with_payload_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.payload_encoding = encoding;
        self
    }

    /// Require every header listed in `x-api-signed-headers` to be present.
    ///
    /// By default a listed header that's absent is skipped while building the
    /// canonical request, the same way the signer skips it.
    pub fn with_strict_signed_headers(mut self, strict: bool) -> Self {
        self.strict_signed_headers = strict;
        self
    }

    /// Verify the signature of request parts against their buffered `body`.
    pub async fn verify(&self, parts: &Parts, body: &[u8]) -> Result<bool> {
        self.verify_with_content_headers(parts, &HeaderMap::new(), body)
            .await
    }

    /// Verify request parts whose body headers travel apart from the request
    /// headers, see [`crate::RequestSigner::sign_with_content_headers`].
    pub async fn verify_with_content_headers(
        &self,
        parts: &Parts,
        content_headers: &HeaderMap,
        body: &[u8],
    ) -> Result<bool> {
        let req = SigningRequest::from_parts(parts).with_content_headers(content_headers.clone());

        let signature = required_header(&req, &AUTHORIZATION)?;
        let date = required_header(&req, &X_API_DATE)?;
        let scope = required_header(&req, &X_API_SCOPE)?;
        let algorithm = required_header(&req, &X_API_ALGORITHM)?;
        let signed_list = required_header(&req, &X_API_SIGNED_HEADERS)?;
        let api_key = required_header(&req, &X_API_KEY)?;

        if algorithm != HMAC_SHA256 {
            return Err(Error::unsupported_algorithm(algorithm));
        }
        let time = parse_iso8601_millis(date)?;
        let signed = SignedHeaders::parse(signed_list);

        if self.strict_signed_headers {
            if let Some(name) = signed.iter().find(|name| {
                !req.headers.contains_key(*name) && !req.content_headers.contains_key(*name)
            }) {
                return Err(Error::missing_header(name));
            }
        }

        let secret = self
            .provider
            .provide_secret(&self.ctx, &SecretRequest::new(api_key, scope))
            .await?;

        let expected = SigningContext::new(secret, scope).calculate_signature(
            &req,
            &signed,
            body,
            time,
            self.payload_encoding,
        );

        let matched: bool = expected.as_bytes().ct_eq(signature.as_bytes()).into();
        if !matched {
            debug!("signature mismatch for scope {scope}");
        }
        Ok(matched)
    }

    /// Verify a whole request whose body is already buffered.
    pub async fn verify_request<B: AsRef<[u8]>>(&self, req: &Request<B>) -> Result<bool> {
        let (parts, body) = split_ref(req);
        self.verify(&parts, body).await
    }
}

fn required_header<'a>(req: &'a SigningRequest, name: &HeaderName) -> Result<&'a str> {
    req.header_get(name)?
        .ok_or_else(|| Error::missing_header(name))
}

/// Copy the head of `req` so it can be verified while the body stays borrowed.
fn split_ref<B: AsRef<[u8]>>(req: &Request<B>) -> (Parts, &[u8]) {
    let mut head = Request::new(());
    *head.method_mut() = req.method().clone();
    *head.uri_mut() = req.uri().clone();
    *head.version_mut() = req.version();
    *head.headers_mut() = req.headers().clone();

    (head.into_parts().0, req.body().as_ref())
}

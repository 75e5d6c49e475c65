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

use hooksign_core::utils::Redact;
use hooksign_core::Context;

use crate::canonical::PayloadEncoding;
use crate::constants::*;

/// Config carries all the configuration of a hooksign signer.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HOOKSIGN_API_KEY`]
    pub api_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HOOKSIGN_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `service` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HOOKSIGN_SERVICE`]
    pub service: Option<String>,
    /// Extra headers to sign besides the mandatory `x-api-*` ones.
    ///
    /// Loaded from env value [`HOOKSIGN_SIGNED_HEADERS`] (comma separated)
    /// only when empty.
    pub signed_headers: Vec<String>,
    /// How the body is read before hashing.
    pub payload_encoding: PayloadEncoding,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set service
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Set extra signed headers
    pub fn with_signed_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signed_headers = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set payload encoding
    pub fn with_payload_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.payload_encoding = encoding;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(HOOKSIGN_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HOOKSIGN_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HOOKSIGN_SERVICE) {
            self.service.get_or_insert(v);
        }
        if self.signed_headers.is_empty() {
            if let Some(v) = ctx.env_var(HOOKSIGN_SIGNED_HEADERS) {
                self.signed_headers = v
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect();
            }
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("service", &self.service)
            .field("signed_headers", &self.signed_headers)
            .field("payload_encoding", &self.payload_encoding)
            .finish()
    }
}

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

use async_trait::async_trait;
use hooksign_core::utils::Redact;
use hooksign_core::{Context, Error, ProvideSecret, Result, SecretRequest};
use subtle::ConstantTimeEq;

use crate::constants::*;

/// EnvSecretProvider resolves the secret from environment variables.
///
/// This provider looks for the following environment variables:
/// - `HOOKSIGN_API_KEY`: the only api key accepted
/// - `HOOKSIGN_SECRET_KEY`: its secret
/// - `HOOKSIGN_SERVICE`: the scope it's valid for, any scope if unset
///
/// Useful for receivers that talk to a single sender.
#[derive(Debug, Default, Clone)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    /// Create a new EnvSecretProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideSecret for EnvSecretProvider {
    async fn provide_secret(&self, ctx: &Context, req: &SecretRequest) -> Result<String> {
        let envs = ctx.env_vars();

        let (Some(api_key), Some(secret_key)) =
            (envs.get(HOOKSIGN_API_KEY), envs.get(HOOKSIGN_SECRET_KEY))
        else {
            return Err(Error::secret_not_found(format!(
                "{HOOKSIGN_API_KEY} or {HOOKSIGN_SECRET_KEY} is not set"
            )));
        };

        let key_matched: bool = api_key.as_bytes().ct_eq(req.api_key.as_bytes()).into();
        let scope_matched = envs
            .get(HOOKSIGN_SERVICE)
            .map_or(true, |service| *service == req.scope);

        if key_matched && scope_matched {
            Ok(secret_key.clone())
        } else {
            Err(Error::secret_not_found(format!(
                "api key {:?} in scope {} doesn't match env",
                Redact::from(&req.api_key),
                req.scope
            )))
        }
    }
}

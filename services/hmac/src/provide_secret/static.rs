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

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use hooksign_core::utils::Redact;
use hooksign_core::{Context, Error, ProvideSecret, Result, SecretRequest};

/// StaticSecretProvider resolves secrets from an in-memory table.
///
/// Each secret is bound to one `(api_key, scope)` pair: the same api key
/// used with another scope is unknown.
#[derive(Clone, Default)]
pub struct StaticSecretProvider {
    secrets: HashMap<SecretRequest, String>,
}

impl StaticSecretProvider {
    /// Create an empty StaticSecretProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the secret of `api_key` for `scope`.
    pub fn with_secret(
        mut self,
        api_key: impl Into<String>,
        scope: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.secrets
            .insert(SecretRequest::new(api_key, scope), secret_key.into());
        self
    }
}

impl Debug for StaticSecretProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecretProvider")
            .field(
                "api_keys",
                &self
                    .secrets
                    .keys()
                    .map(|k| (Redact::from(&k.api_key), k.scope.as_str()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[async_trait]
impl ProvideSecret for StaticSecretProvider {
    async fn provide_secret(&self, _: &Context, req: &SecretRequest) -> Result<String> {
        self.secrets.get(req).cloned().ok_or_else(|| {
            Error::secret_not_found(format!(
                "no secret registered for api key {:?} in scope {}",
                Redact::from(&req.api_key),
                req.scope
            ))
        })
    }
}

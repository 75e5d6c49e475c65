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

use std::fmt::{self, Debug};

use async_trait::async_trait;
use hooksign_core::{Context, Error, ErrorKind, ProvideSecret, Result, SecretRequest};

/// A chain of secret providers that will be tried in order.
///
/// A provider answering [`ErrorKind::SecretNotFound`] hands over to the next
/// one. Any other error stops the chain and is returned as is.
pub struct ProvideSecretChain {
    providers: Vec<Box<dyn ProvideSecret>>,
}

impl ProvideSecretChain {
    /// Create a new empty secret provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a secret provider to the chain.
    pub fn push(mut self, provider: impl ProvideSecret) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Create a secret provider chain from a vector of providers.
    pub fn from_vec(providers: Vec<Box<dyn ProvideSecret>>) -> Self {
        Self { providers }
    }
}

impl Default for ProvideSecretChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ProvideSecretChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideSecretChain")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

#[async_trait]
impl ProvideSecret for ProvideSecretChain {
    async fn provide_secret(&self, ctx: &Context, req: &SecretRequest) -> Result<String> {
        for provider in &self.providers {
            log::debug!("trying secret provider: {:?}", provider);

            match provider.provide_secret(ctx, req).await {
                Ok(secret) => {
                    log::debug!("resolved secret from provider: {:?}", provider);
                    return Ok(secret);
                }
                Err(e) if e.kind() == ErrorKind::SecretNotFound => {
                    log::debug!("no secret found in provider {:?}: {}", provider, e);
                    continue;
                }
                Err(e) => {
                    log::warn!("error resolving secret from provider {:?}: {:?}", provider, e);
                    return Err(e);
                }
            }
        }

        Err(Error::secret_not_found(format!(
            "no provider in chain knows scope {}",
            req.scope
        )))
    }
}

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

use crate::{Context, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// SecretRequest identifies the secret a verifier needs.
///
/// Both fields are taken verbatim from the incoming request headers
/// `x-api-key` and `x-api-scope`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretRequest {
    /// The public api key sent by the caller.
    pub api_key: String,
    /// The service scope the request was signed for.
    pub scope: String,
}

impl SecretRequest {
    /// Create a new secret request.
    pub fn new(api_key: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            scope: scope.into(),
        }
    }
}

/// ProvideSecret is the trait used by the verifier to resolve the secret key
/// of an incoming request.
///
/// This is the only asynchronous step of verification. Implementations may
/// hit a database or a remote secret store; hooksign does not retry, time out
/// or cache on their behalf.
#[async_trait::async_trait]
pub trait ProvideSecret: Debug + Send + Sync + 'static {
    /// Resolve the secret key for `req`.
    ///
    /// Return [`crate::ErrorKind::SecretNotFound`] when the pair is unknown so
    /// chained providers can fall through to the next one.
    async fn provide_secret(&self, ctx: &Context, req: &SecretRequest) -> Result<String>;
}

#[async_trait::async_trait]
impl<T: ProvideSecret + ?Sized> ProvideSecret for Arc<T> {
    async fn provide_secret(&self, ctx: &Context, req: &SecretRequest) -> Result<String> {
        (**self).provide_secret(ctx, req).await
    }
}

#[async_trait::async_trait]
impl<T: ProvideSecret + ?Sized> ProvideSecret for Box<T> {
    async fn provide_secret(&self, ctx: &Context, req: &SecretRequest) -> Result<String> {
        (**self).provide_secret(ctx, req).await
    }
}

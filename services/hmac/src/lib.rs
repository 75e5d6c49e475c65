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

//! HMAC-SHA256 request signing and verification for api requests and webhooks.
//!
//! The signer canonicalizes method, path, query, a chosen set of headers and
//! the body hash, then signs the result with a key derived from the secret,
//! the UTC date and the service scope. The verifier rebuilds the same
//! canonical request from the incoming request and compares signatures in
//! constant time.
//!
//! ## Example
//!
//! ```
//! use hooksign_core::Context;
//! use hooksign_hmac::{RequestSigner, RequestVerifier, StaticSecretProvider};
//!
//! # async fn example() -> hooksign_core::Result<()> {
//! let signer = RequestSigner::new("api-key", "secret", "orders")
//!     .with_signed_headers(["content-type"]);
//!
//! let req = http::Request::post("https://hooks.example.com/orders")
//!     .header("content-type", "application/json")
//!     .body(r#"{"id":1}"#)?;
//! let req = signer.sign_request(req)?;
//!
//! let verifier = RequestVerifier::new(
//!     Context::new(),
//!     StaticSecretProvider::new().with_secret("api-key", "orders", "secret"),
//! );
//! assert!(verifier.verify_request(&req).await?);
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{
    HMAC_SHA256, HOOKSIGN_API_KEY, HOOKSIGN_SECRET_KEY, HOOKSIGN_SERVICE, HOOKSIGN_SIGNED_HEADERS,
    MANDATORY_SIGNED_HEADERS, X_API_ALGORITHM, X_API_DATE, X_API_KEY, X_API_SCOPE,
    X_API_SIGNED_HEADERS,
};

mod config;
pub use config::Config;

pub mod canonical;
pub use canonical::PayloadEncoding;

mod signer;
pub use signer::{signature, signing_key, string_to_sign, SignedHeaders, SigningContext};

mod sign_request;
pub use sign_request::RequestSigner;

mod verify_request;
pub use verify_request::RequestVerifier;

mod provide_secret;
pub use provide_secret::{EnvSecretProvider, ProvideSecretChain, StaticSecretProvider};

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

//! Core components for signing and verifying HMAC API requests.
//!
//! This crate provides the building blocks shared by the hooksign signers:
//!
//! - [`encode`]: percent encoding restricted to unreserved characters, and hex rendering
//! - [`hash`]: SHA256 and HMAC-SHA256 helpers
//! - [`time`]: fixed, UTC only timestamp formats
//! - [`SigningRequest`]: a detached view of the request fields that get signed
//! - [`ProvideSecret`]: the collaborator used to resolve secret keys while verifying
//! - [`Context`]: the environment that providers and config loaders read from
//!
//! ## Example
//!
//! ```
//! use hooksign_core::encode::{to_hex, url_encode};
//! use hooksign_core::hash::sha256;
//!
//! assert_eq!(url_encode("x/y"), "x%2Fy");
//! assert_eq!(
//!     to_hex(sha256(b"")),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod encode;
pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, NoopEnv, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideSecret, SecretRequest};
mod request;
pub use request::{parse_query, SigningRequest};

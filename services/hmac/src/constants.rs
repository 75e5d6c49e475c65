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

use http::header::HeaderName;

// Headers attached to every signed request.

/// Header carrying the public api key.
pub const X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");
/// Header carrying the signing time, `yyyy-MM-ddTHH:mm:ss.fffZ`.
pub const X_API_DATE: HeaderName = HeaderName::from_static("x-api-date");
/// Header carrying the service scope.
pub const X_API_SCOPE: HeaderName = HeaderName::from_static("x-api-scope");
/// Header carrying the algorithm label.
pub const X_API_ALGORITHM: HeaderName = HeaderName::from_static("x-api-algorithm");
/// Header carrying the comma joined signed header names.
pub const X_API_SIGNED_HEADERS: HeaderName = HeaderName::from_static("x-api-signed-headers");

/// Headers that are always part of the signed header list, in the order
/// they are transmitted.
pub const MANDATORY_SIGNED_HEADERS: [&str; 4] =
    ["x-api-key", "x-api-date", "x-api-scope", "x-api-algorithm"];

/// Label of the only supported algorithm, first line of every string to sign.
pub const HMAC_SHA256: &str = "HMAC-SHA256";

/// Prefix prepended to the secret key before the first derivation step.
pub const SIGNING_KEY_PREFIX: &str = "KEY";

/// Label used by the last derivation step.
pub const SIGNING_KEY_TERMINATOR: &str = "api_request";

// Env values used by config and secret providers.

/// Env value of the api key.
pub const HOOKSIGN_API_KEY: &str = "HOOKSIGN_API_KEY";
/// Env value of the secret key.
pub const HOOKSIGN_SECRET_KEY: &str = "HOOKSIGN_SECRET_KEY";
/// Env value of the service scope.
pub const HOOKSIGN_SERVICE: &str = "HOOKSIGN_SERVICE";
/// Env value of the extra signed headers, comma separated.
pub const HOOKSIGN_SIGNED_HEADERS: &str = "HOOKSIGN_SIGNED_HEADERS";

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

//! Byte level encoders used while building canonical strings.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// AsciiSet of bytes that must be escaped by [`url_encode`].
///
/// Every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static URL_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent encode the UTF-8 bytes of `value`.
///
/// Escaped bytes are rendered as `%` followed by two uppercase hex digits.
/// Input is never decoded first, so `%` itself becomes `%25`: encode exactly once.
pub fn url_encode(value: &str) -> String {
    utf8_percent_encode(value, &URL_ENCODE_SET).to_string()
}

/// Render bytes as lowercase hex without separators.
pub fn to_hex(content: impl AsRef<[u8]>) -> String {
    hex::encode(content)
}

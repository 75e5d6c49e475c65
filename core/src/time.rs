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

//! Time related utils.
//!
//! All formats are fixed and locale independent; every value is UTC.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use chrono::Timelike;
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Date stamp format: "20220313"
const DATE: &str = "%Y%m%d";

/// Time format with millisecond precision: "2022-03-13T07:20:04.123Z"
const ISO8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Shape of a timestamp rendered with [`ISO8601_MILLIS`], `d` is any ASCII digit.
const ISO8601_MILLIS_SHAPE: &[u8; 24] = b"dddd-dd-ddTdd:dd:dd.dddZ";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date stamp: `20220313`
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into ISO8601 with milliseconds: `2022-03-13T07:20:04.123Z`
///
/// Sub-millisecond precision is truncated.
pub fn format_iso8601_millis(t: DateTime) -> String {
    t.format(ISO8601_MILLIS).to_string()
}

/// Parse a timestamp produced by [`format_iso8601_millis`].
///
/// Parsing is strict: every field must be zero padded, exactly three fraction
/// digits and a literal `Z` are required, and leap seconds are refused.
pub fn parse_iso8601_millis(s: &str) -> Result<DateTime> {
    let malformed = || {
        Error::malformed_date(format!(
            "timestamp {s:?} is not in yyyy-MM-ddTHH:mm:ss.fffZ format"
        ))
    };

    let bytes = s.as_bytes();
    if bytes.len() != ISO8601_MILLIS_SHAPE.len() {
        return Err(malformed());
    }
    let shaped = bytes
        .iter()
        .zip(ISO8601_MILLIS_SHAPE)
        .all(|(b, want)| match *want {
            b'd' => b.is_ascii_digit(),
            _ => b == want,
        });
    if !shaped {
        return Err(malformed());
    }

    let t = NaiveDateTime::parse_from_str(s, ISO8601_MILLIS)?;
    // chrono reads second 60 as a leap second, stored as nanos past 1e9.
    if t.nanosecond() >= 1_000_000_000 {
        return Err(malformed());
    }
    Ok(t.and_utc())
}

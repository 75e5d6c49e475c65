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

use std::fmt;
use thiserror::Error;

/// The error type for hooksign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A header required for verification is absent from the request
    MissingHeader,

    /// A header is present but its value is not usable (not visible ASCII, etc.)
    MalformedHeader,

    /// The `x-api-date` header does not match the signing timestamp format
    MalformedDate,

    /// The request declares an algorithm other than `HMAC-SHA256`
    UnsupportedAlgorithm,

    /// No secret is known for the given api key and scope
    SecretNotFound,

    /// Request cannot be signed (missing required fields, etc.)
    RequestInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors (I/O, secret store failures, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was caused by a malformed incoming request.
    ///
    /// Callers usually answer these with `400 Bad Request` instead of `401`.
    pub fn is_malformed_request(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingHeader
                | ErrorKind::MalformedHeader
                | ErrorKind::MalformedDate
                | ErrorKind::UnsupportedAlgorithm
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a missing header error
    pub fn missing_header(name: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::MissingHeader,
            format!("missing required header: {name}"),
        )
    }

    /// Create a malformed header error
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedHeader, message)
    }

    /// Create a malformed date error
    pub fn malformed_date(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDate, message)
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm(algorithm: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnsupportedAlgorithm,
            format!("unsupported signing algorithm: {algorithm}"),
        )
    }

    /// Create a secret not found error
    pub fn secret_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SecretNotFound, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingHeader => write!(f, "missing header"),
            ErrorKind::MalformedHeader => write!(f, "malformed header"),
            ErrorKind::MalformedDate => write!(f, "malformed date"),
            ErrorKind::UnsupportedAlgorithm => write!(f, "unsupported algorithm"),
            ErrorKind::SecretNotFound => write!(f, "secret not found"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::malformed_header(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Self::malformed_date(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

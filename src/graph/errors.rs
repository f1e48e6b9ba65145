/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::graph::exception::{ErrorMessage, FacebookError};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid request parameters: {0}")]
    Validation(FacebookError),

    #[error("Request network error: {0}")]
    Transport(FacebookError),

    #[error("API Response was error: {0}")]
    Api(FacebookError),

    #[error("Unsupported error source: {0}")]
    UnsupportedSource(String),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),
}

impl GraphError {
    /// Local validation failure raised before any request is made
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation(ErrorMessage::new(code, message).into())
    }

    /// Network or HTTP layer failure
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(ErrorMessage::new(ErrorCode::HttpError, message).into())
    }

    /// The normalized error carried by this error, if any
    pub fn facebook_error(&self) -> Option<&FacebookError> {
        match self {
            Self::Validation(e) | Self::Transport(e) | Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GraphError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Codes used for errors raised by this library rather than the Graph API
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum ErrorCode {
    HttpError = 10000,
    MissingParams = 10001,
    InvalidParams = 10002,
    NotSupportMethod = 10010,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u32::from(*self))
    }
}

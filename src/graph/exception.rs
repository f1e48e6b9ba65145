/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Normalization of local and remote failures into a single [`FacebookError`].
//!
//! The Graph API reports failures inside an error envelope
//! (see [Handling Errors](https://developers.facebook.com/docs/graph-api/guides/error-handling)):
//!
//! ```json
//! {"error": {"message": "Invalid token", "type": "OAuthException", "code": 190, "fbtrace_id": "..."}}
//! ```
//!
//! Failures raised by this library are described with an [`ErrorMessage`] instead. Both
//! shapes end up in the same [`FacebookError`] so callers only have one thing to inspect.

use crate::graph::errors::{ErrorCode, GraphError};
use crate::graph::parsers::lookup_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// `error_type` given to errors raised by this library
pub const INTERNAL_ERROR_TYPE: &str = "PyFacebookException";

/// `error_type` given to errors returned by the Graph API
pub const REMOTE_ERROR_TYPE: &str = "FacebookException";

/// Describes an error raised locally, never sent over the network.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorMessage {
    pub code: Option<String>,
    pub message: Option<String>,
    pub error_type: String,
    pub error_subcode: Option<String>,
    pub error_user_title: Option<String>,
    pub error_user_msg: Option<String>,
}

impl Default for ErrorMessage {
    fn default() -> Self {
        Self {
            code: None,
            message: None,
            error_type: INTERNAL_ERROR_TYPE.to_string(),
            error_subcode: None,
            error_user_title: None,
            error_user_msg: None,
        }
    }
}

impl ErrorMessage {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.to_string()),
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// The two shapes an error can be normalized from.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorSource {
    /// Raised by this library
    Internal(ErrorMessage),
    /// Contents of the API's `error` envelope
    Remote(Map<String, Value>),
}

impl From<ErrorMessage> for ErrorSource {
    fn from(msg: ErrorMessage) -> Self {
        Self::Internal(msg)
    }
}

impl From<Map<String, Value>> for ErrorSource {
    fn from(map: Map<String, Value>) -> Self {
        Self::Remote(map)
    }
}

// Decoded response bodies only qualify when they are JSON objects
impl TryFrom<Value> for ErrorSource {
    type Error = GraphError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::Remote(map)),
            other => Err(GraphError::UnsupportedSource(format!(
                "expected an error object, found: {other}"
            ))),
        }
    }
}

/// Single error value surfaced to callers regardless of where the failure happened.
#[derive(Clone, Debug, PartialEq)]
pub struct FacebookError {
    message: Option<String>,
    error_type: String,
    kind: Option<String>,
    code: Option<String>,
    error_subcode: Option<String>,
    error_user_title: Option<String>,
    error_user_msg: Option<String>,
    fbtrace_id: Option<String>,
    raw_data: Value,
}

/// Converts either error shape into a [`FacebookError`]
pub fn normalize(source: ErrorSource) -> FacebookError {
    match source {
        ErrorSource::Internal(msg) => {
            let raw_data = serde_json::to_value(&msg).unwrap_or_default();
            FacebookError {
                kind: Some(msg.error_type.clone()),
                message: msg.message,
                error_type: msg.error_type,
                code: msg.code,
                error_subcode: msg.error_subcode,
                error_user_title: msg.error_user_title,
                error_user_msg: msg.error_user_msg,
                fbtrace_id: None,
                raw_data,
            }
        }
        ErrorSource::Remote(map) => FacebookError {
            message: lookup_string(&map, "message"),
            error_type: REMOTE_ERROR_TYPE.to_string(),
            kind: lookup_string(&map, "type"),
            code: lookup_string(&map, "code"),
            error_subcode: lookup_string(&map, "error_subcode"),
            error_user_title: lookup_string(&map, "error_user_title"),
            error_user_msg: lookup_string(&map, "error_user_msg"),
            fbtrace_id: lookup_string(&map, "fbtrace_id"),
            raw_data: json!({ "error": map }),
        },
    }
}

impl From<ErrorSource> for FacebookError {
    fn from(source: ErrorSource) -> Self {
        normalize(source)
    }
}

impl From<ErrorMessage> for FacebookError {
    fn from(msg: ErrorMessage) -> Self {
        normalize(ErrorSource::Internal(msg))
    }
}

impl TryFrom<Value> for FacebookError {
    type Error = GraphError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ErrorSource::try_from(value).map(normalize)
    }
}

impl FacebookError {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// `PyFacebookException` for local errors, `FacebookException` for API errors
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    /// The API's own error type (e.g. `OAuthException`). Mirrors `error_type` for local errors.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Numeric form of the code, when it is one
    pub fn code_number(&self) -> Option<i64> {
        self.code.as_deref().and_then(|c| c.parse().ok())
    }

    /// The library error code, if this error was raised locally
    pub fn error_code(&self) -> Option<ErrorCode> {
        if self.error_type != INTERNAL_ERROR_TYPE {
            return None;
        }
        self.code
            .as_deref()
            .and_then(|c| c.parse::<u32>().ok())
            .and_then(|c| ErrorCode::try_from(c).ok())
    }

    pub fn error_subcode(&self) -> Option<&str> {
        self.error_subcode.as_deref()
    }

    pub fn error_user_title(&self) -> Option<&str> {
        self.error_user_title.as_deref()
    }

    pub fn error_user_msg(&self) -> Option<&str> {
        self.error_user_msg.as_deref()
    }

    /// Only present for errors returned by the API
    pub fn fbtrace_id(&self) -> Option<&str> {
        self.fbtrace_id.as_deref()
    }

    /// The value this error was built from
    pub fn raw_data(&self) -> &Value {
        &self.raw_data
    }

    // Keeps the full response body when the envelope itself was malformed
    pub(crate) fn with_raw_data(mut self, raw_data: Value) -> Self {
        self.raw_data = raw_data;
        self
    }
}

impl std::fmt::Display for FacebookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn or_none(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or("None")
        }
        write!(
            f,
            "{}(code={},type={},message={},error_subcode={},error_user_title={},error_user_msg={})",
            self.error_type,
            or_none(&self.code),
            or_none(&self.kind),
            or_none(&self.message),
            or_none(&self.error_subcode),
            or_none(&self.error_user_title),
            or_none(&self.error_user_msg),
        )
    }
}

impl std::error::Error for FacebookError {}

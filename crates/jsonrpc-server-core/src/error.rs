use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::types::{JsonRpcVersion, RequestId};

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64), // -32099 to -32000
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => crate::error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => crate::error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => crate::error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => crate::error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => crate::error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::ServerError(_) => "Server error",
        }
    }

    /// HTTP status a transport should pair with an error of this kind.
    pub fn http_status(&self) -> u16 {
        match self {
            JsonRpcErrorCode::ParseError
            | JsonRpcErrorCode::InvalidRequest
            | JsonRpcErrorCode::InvalidParams => 400,
            JsonRpcErrorCode::MethodNotFound => 404,
            JsonRpcErrorCode::InternalError | JsonRpcErrorCode::ServerError(_) => 500,
        }
    }

    /// Map a numeric code back onto the taxonomy.
    pub fn from_code(code: i64) -> Self {
        match code {
            crate::error_codes::PARSE_ERROR => JsonRpcErrorCode::ParseError,
            crate::error_codes::INVALID_REQUEST => JsonRpcErrorCode::InvalidRequest,
            crate::error_codes::METHOD_NOT_FOUND => JsonRpcErrorCode::MethodNotFound,
            crate::error_codes::INVALID_PARAMS => JsonRpcErrorCode::InvalidParams,
            crate::error_codes::INTERNAL_ERROR => JsonRpcErrorCode::InternalError,
            other => JsonRpcErrorCode::ServerError(other),
        }
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// JSON-RPC Error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: JsonRpcErrorCode, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: message.unwrap_or_else(|| code.message().to_string()),
            data,
        }
    }

    pub fn parse_error(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::ParseError, None, data)
    }

    pub fn invalid_request(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::InvalidRequest, None, data)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::MethodNotFound,
            None,
            Some(Value::String(method.to_string())),
        )
    }

    pub fn invalid_params(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::InvalidParams, None, data)
    }

    pub fn internal_error(message: Option<String>) -> Self {
        Self::new(JsonRpcErrorCode::InternalError, message, None)
    }
}

/// JSON-RPC Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: RequestId,
    pub error: JsonRpcErrorObject,
}

impl JsonRpcError {
    pub fn new(id: RequestId, error: JsonRpcErrorObject) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            error,
        }
    }

    pub fn code(&self) -> JsonRpcErrorCode {
        JsonRpcErrorCode::from_code(self.error.code)
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON-RPC Error {}: {}",
            self.error.code, self.error.message
        )
    }
}

impl std::error::Error for JsonRpcError {}

/// Every way processing a request can fail.
///
/// All variants except [`RpcError::Application`] are protocol errors: they are
/// raised on purpose, either by the processor or by a method that wants a
/// specific code on the wire, and are converted without being logged.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Raised by a method with an explicit code.
    #[error("{message}")]
    Protocol {
        code: JsonRpcErrorCode,
        message: String,
        data: Option<Value>,
    },

    /// Any other failure raised while running a method.
    #[error("{0}")]
    Application(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RpcError {
    /// Protocol error with the standard message for `code`.
    pub fn protocol(code: JsonRpcErrorCode, data: Option<Value>) -> Self {
        RpcError::Protocol {
            code,
            message: code.message().to_string(),
            data,
        }
    }

    /// Server-defined error in the reserved -32099..=-32000 range.
    pub fn server_error(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        let code = if (crate::error_codes::SERVER_ERROR_START..=crate::error_codes::SERVER_ERROR_END)
            .contains(&code)
        {
            JsonRpcErrorCode::ServerError(code)
        } else {
            JsonRpcErrorCode::ServerError(crate::error_codes::SERVER_ERROR_END)
        };
        RpcError::Protocol {
            code,
            message: message.into(),
            data,
        }
    }

    /// Wrap an arbitrary failure raised inside a method body.
    pub fn application<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        RpcError::Application(error.into())
    }

    pub fn is_protocol_error(&self) -> bool {
        !matches!(self, RpcError::Application(_))
    }

    pub fn code(&self) -> JsonRpcErrorCode {
        match self {
            RpcError::Parse(_) => JsonRpcErrorCode::ParseError,
            RpcError::InvalidRequest(_) => JsonRpcErrorCode::InvalidRequest,
            RpcError::MethodNotFound(_) => JsonRpcErrorCode::MethodNotFound,
            RpcError::InvalidParams(_) => JsonRpcErrorCode::InvalidParams,
            RpcError::Protocol { code, .. } => *code,
            RpcError::Application(_) => JsonRpcErrorCode::InternalError,
        }
    }

    /// Convert into the wire error object.
    pub fn to_error_object(&self) -> JsonRpcErrorObject {
        match self {
            RpcError::Parse(detail) => {
                JsonRpcErrorObject::parse_error(Some(Value::String(detail.clone())))
            }
            RpcError::InvalidRequest(detail) => {
                JsonRpcErrorObject::invalid_request(Some(Value::String(detail.clone())))
            }
            RpcError::MethodNotFound(method) => JsonRpcErrorObject::method_not_found(method),
            RpcError::InvalidParams(detail) => {
                JsonRpcErrorObject::invalid_params(Some(Value::String(detail.clone())))
            }
            RpcError::Protocol {
                code,
                message,
                data,
            } => JsonRpcErrorObject::new(*code, Some(message.clone()), data.clone()),
            RpcError::Application(source) => {
                JsonRpcErrorObject::internal_error(Some(source.to_string()))
            }
        }
    }
}

/// Failures raised while building a method registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Method '{0}' is already registered")]
    DuplicateMethod(String),
}

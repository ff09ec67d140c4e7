//! # JSON-RPC 2.0 Request Processing
//!
//! The request-processing core of a JSON-RPC 2.0 server. Given a request that
//! a transport has already decoded into a [`serde_json::Value`], and a
//! registry of methods, it validates the request, extracts the method name and
//! arguments, resolves and runs the method, and produces the response.
//!
//! Transports, JSON encoding and method storage stay outside this crate.
//!
//! ## Features
//! - JSON-RPC 2.0 request validation against the protocol schema
//! - Positional and named argument binding checked before invocation
//! - Optional camelCase to snake_case name conversion
//! - Notification handling, with optional error reporting for debugging
//!
//! ```rust
//! use jsonrpc_server_core::prelude::*;
//! use serde_json::json;
//!
//! let mut methods = Methods::new();
//! methods
//!     .register_fn("add", MethodSignature::required(["a", "b"]), |args| {
//!         let a: i64 = args.get_as("a")?;
//!         let b: i64 = args.get_as("b")?;
//!         Ok(json!(a + b))
//!     })
//!     .unwrap();
//!
//! let raw = json!({"jsonrpc": "2.0", "method": "add", "params": [2, 3], "id": 1});
//! let mut request = JsonRpcRequest::new(&raw, ProcessorConfig::default());
//! let response = request.call(&methods);
//! assert_eq!(response.to_json_string().unwrap(), r#"{"jsonrpc":"2.0","id":1,"result":5}"#);
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod method;
pub mod naming;
pub mod params;
pub mod prelude;
pub mod request;
pub mod response;
pub mod schema;
pub mod types;

// Re-export main types
pub use config::ProcessorConfig;
pub use dispatch::{dispatch, dispatch_str};
pub use error::{JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject, RegistryError, RpcError};
pub use method::{FunctionMethod, MethodRegistry, MethodSignature, Methods, RpcMethod};
pub use params::{Arguments, BoundArguments};
pub use request::{JsonRpcRequest, RequestState};
pub use response::{JsonRpcResponse, RpcResponse};
pub use types::{JsonRpcVersion, RequestId};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}

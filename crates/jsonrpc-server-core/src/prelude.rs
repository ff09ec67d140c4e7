//! # JSON-RPC Server Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use jsonrpc_server_core::prelude::*;
//! ```

pub use crate::config::ProcessorConfig;
pub use crate::dispatch::{dispatch, dispatch_str};
pub use crate::error::{JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject, RpcError};
pub use crate::method::{MethodRegistry, MethodSignature, Methods, RpcMethod};
pub use crate::params::{Arguments, BoundArguments};
pub use crate::request::{JsonRpcRequest, RequestState};
pub use crate::response::{JsonRpcResponse, RpcResponse};
pub use crate::types::{JsonRpcVersion, RequestId};

// Standard error codes
pub use crate::error_codes::*;

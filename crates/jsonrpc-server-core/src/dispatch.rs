//! One-call entry points for transports.

use serde_json::Value;
use tracing::debug;

use crate::{
    config::ProcessorConfig, error::RpcError, method::MethodRegistry, request::JsonRpcRequest,
    response::RpcResponse, types::RequestId,
};

/// Parse and call a decoded request in one step.
pub fn dispatch(
    registry: &(impl MethodRegistry + ?Sized),
    raw: &Value,
    config: ProcessorConfig,
) -> RpcResponse {
    let mut request = JsonRpcRequest::new(raw, config);
    request.call(registry).clone()
}

/// Decode `text` as JSON, then dispatch it.
///
/// Text that is not valid JSON yields a `Parse error` response with a null
/// id, since no id could be read.
pub fn dispatch_str(
    registry: &(impl MethodRegistry + ?Sized),
    text: &str,
    config: ProcessorConfig,
) -> RpcResponse {
    match serde_json::from_str::<Value>(text) {
        Ok(raw) => dispatch(registry, &raw, config),
        Err(err) => {
            debug!("JSON-RPC parse error: {}", err);
            RpcResponse::error(RequestId::Null, &RpcError::Parse(err.to_string()))
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{JsonRpcError, RpcError};
use crate::types::{JsonRpcVersion, RequestId};

/// A successful JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: RequestId,
    pub result: Value,
}

impl JsonRpcResponse {
    pub fn new(id: RequestId, result: Value) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            result,
        }
    }
}

impl<T> From<(RequestId, T)> for JsonRpcResponse
where
    T: Into<Value>,
{
    fn from((id, result): (RequestId, T)) -> Self {
        Self::new(id, result.into())
    }
}

/// Outcome of processing one request.
///
/// `Notification` means nothing must be written back to the client; the
/// other two variants serialize to a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcResponse {
    /// Response with a `result` member
    Success(JsonRpcResponse),
    /// No response body
    Notification,
    /// Response with an `error` member
    Error(JsonRpcError),
}

impl RpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        RpcResponse::Success(JsonRpcResponse::new(id, result))
    }

    pub fn notification() -> Self {
        RpcResponse::Notification
    }

    /// Error response for `error`. Pass `RequestId::Null` when the id could
    /// not be read from the request.
    pub fn error(id: RequestId, error: &RpcError) -> Self {
        RpcResponse::Error(JsonRpcError::new(id, error.to_error_object()))
    }

    /// Check if this result represents an error
    pub fn is_error(&self) -> bool {
        matches!(self, RpcResponse::Error(_))
    }

    /// Check if this result needs a response
    pub fn needs_response(&self) -> bool {
        !matches!(self, RpcResponse::Notification)
    }

    /// The id echoed back to the client, if there is a body
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            RpcResponse::Success(response) => Some(&response.id),
            RpcResponse::Error(error) => Some(&error.id),
            RpcResponse::Notification => None,
        }
    }

    /// HTTP status a transport should send alongside this response
    pub fn http_status(&self) -> u16 {
        match self {
            RpcResponse::Success(_) => 200,
            RpcResponse::Notification => 204,
            RpcResponse::Error(error) => error.code().http_status(),
        }
    }

    /// Response body as a JSON value, `None` for notifications
    pub fn to_value(&self) -> Option<Value> {
        match self {
            RpcResponse::Success(response) => serde_json::to_value(response).ok(),
            RpcResponse::Error(error) => serde_json::to_value(error).ok(),
            RpcResponse::Notification => None,
        }
    }

    /// Convert to JSON string if there's a response to send
    pub fn to_json_string(&self) -> Option<String> {
        match self {
            RpcResponse::Success(response) => serde_json::to_string(response).ok(),
            RpcResponse::Error(error) => serde_json::to_string(error).ok(),
            RpcResponse::Notification => None,
        }
    }
}

impl From<JsonRpcResponse> for RpcResponse {
    fn from(response: JsonRpcResponse) -> Self {
        Self::Success(response)
    }
}

impl From<JsonRpcError> for RpcResponse {
    fn from(error: JsonRpcError) -> Self {
        Self::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, json};

    #[test]
    fn test_success_round_trip() {
        let response = RpcResponse::success(RequestId::from(7), json!(42));

        let json_str = response.to_json_string().unwrap();
        let parsed: JsonRpcResponse = from_str(&json_str).unwrap();

        assert_eq!(parsed.id, RequestId::from(7));
        assert_eq!(parsed.result, json!(42));
        assert_eq!(RpcResponse::from(parsed), response);
    }

    #[test]
    fn test_success_shape() {
        let response = RpcResponse::success(RequestId::from("abc"), json!({"ok": true}));
        assert_eq!(
            response.to_value().unwrap(),
            json!({"jsonrpc": "2.0", "id": "abc", "result": {"ok": true}})
        );
        assert_eq!(response.http_status(), 200);
    }

    #[test]
    fn test_null_result_is_kept() {
        let response = RpcResponse::success(RequestId::from(1), Value::Null);
        let value = response.to_value().unwrap();
        assert_eq!(value.get("result"), Some(&Value::Null));
    }

    #[test]
    fn test_notification_has_no_body() {
        let response = RpcResponse::notification();
        assert!(!response.needs_response());
        assert!(!response.is_error());
        assert_eq!(response.to_json_string(), None);
        assert_eq!(response.to_value(), None);
        assert_eq!(response.id(), None);
        assert_eq!(response.http_status(), 204);
    }

    #[test]
    fn test_error_response() {
        let response = RpcResponse::error(
            RequestId::Null,
            &RpcError::InvalidRequest("missing method".to_string()),
        );
        assert!(response.is_error());
        assert!(response.needs_response());
        assert_eq!(response.id(), Some(&RequestId::Null));
        assert_eq!(response.http_status(), 400);
        assert_eq!(
            response.to_value().unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32600, "message": "Invalid Request", "data": "missing method"}
            })
        );
    }

    #[test]
    fn test_response_from_tuple() {
        let response: JsonRpcResponse = (RequestId::from(1), json!({"test": true})).into();
        assert_eq!(response.id, RequestId::from(1));
        assert_eq!(response.result, json!({"test": true}));
    }
}

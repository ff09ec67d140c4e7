use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, error};

use crate::{
    config::ProcessorConfig,
    error::RpcError,
    method::{self, MethodRegistry},
    naming,
    params::Arguments,
    response::RpcResponse,
    schema,
    types::RequestId,
};

/// Where a request is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Parsed successfully, waiting for [`JsonRpcRequest::call`]
    Parsed,
    /// Parsing failed; the error response is already set
    ParseFailed,
    /// The method ran and produced a result
    Called,
    /// Resolving, validating or running the method failed
    CallFailed,
}

/// A JSON-RPC request being processed.
///
/// Processing happens in two phases. [`JsonRpcRequest::new`] validates the
/// decoded payload and extracts the method name, arguments and id.
/// [`JsonRpcRequest::call`] resolves the method in a registry, checks the
/// arguments against its signature and runs it. Failures in either phase are
/// turned into an error response (or silence, for notifications); they never
/// escape as a Rust error.
#[derive(Debug, Clone)]
pub struct JsonRpcRequest {
    method: String,
    args: Arguments,
    id: Option<RequestId>,
    is_notification: bool,
    config: ProcessorConfig,
    state: RequestState,
    response: Option<RpcResponse>,
}

impl JsonRpcRequest {
    /// Parse a decoded request payload.
    pub fn new(raw: &Value, config: ProcessorConfig) -> Self {
        // Only a missing `id` member makes a notification; `"id": null` does not.
        let is_notification = raw
            .as_object()
            .is_some_and(|object| !object.contains_key("id"));

        let mut request = Self {
            method: String::new(),
            args: Arguments::default(),
            id: None,
            is_notification,
            config,
            state: RequestState::Parsed,
            response: None,
        };

        if let Err(err) = request.parse(raw) {
            request.response = Some(request.failure_response(err));
            request.state = RequestState::ParseFailed;
        }
        request
    }

    fn parse(&mut self, raw: &Value) -> Result<(), RpcError> {
        if self.config.schema_validation {
            schema::validate(raw)?;
        }

        let object = raw
            .as_object()
            .ok_or_else(|| RpcError::InvalidRequest("request must be an object".to_string()))?;

        self.method = object
            .get("method")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RpcError::InvalidRequest("method must be present and a string".to_string())
            })?
            .to_string();

        self.args = Arguments::from_params(object.get("params"))?;

        self.id = match object.get("id") {
            None => None,
            Some(value) => Some(RequestId::from_value(value).ok_or_else(|| {
                RpcError::InvalidRequest("id must be a string, number or null".to_string())
            })?),
        };

        if self.config.convert_camel_case {
            self.method = naming::convert_camel_case(&self.method);
            self.args.map_named(naming::convert_camel_case_keys);
        }

        debug!(
            method = %self.method,
            notification = self.is_notification,
            "Parsed JSON-RPC request"
        );
        Ok(())
    }

    /// Resolve and run the method, returning the response.
    ///
    /// If parsing failed, or the request was already called, the stored
    /// response is returned and nothing is invoked.
    pub fn call(&mut self, registry: &(impl MethodRegistry + ?Sized)) -> &RpcResponse {
        let response = match self.response.take() {
            Some(response) => response,
            None => match self.invoke(registry) {
                Ok(result) => {
                    self.state = RequestState::Called;
                    if self.is_notification {
                        RpcResponse::notification()
                    } else {
                        RpcResponse::success(self.id.clone().unwrap_or(RequestId::Null), result)
                    }
                }
                Err(err) => {
                    self.state = RequestState::CallFailed;
                    self.failure_response(err)
                }
            },
        };
        self.response.insert(response)
    }

    fn invoke(&self, registry: &(impl MethodRegistry + ?Sized)) -> Result<Value, RpcError> {
        let method = method::resolve(registry, &self.method)?;
        let bound = method.signature().bind(&self.args)?;

        debug!(method = %self.method, "Invoking JSON-RPC method");
        panic::catch_unwind(AssertUnwindSafe(|| method.call(bound))).unwrap_or_else(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "method panicked".to_string());
            Err(RpcError::application(message))
        })
    }

    /// Convert a failure from either phase into the response to send.
    fn failure_response(&self, err: RpcError) -> RpcResponse {
        if !err.is_protocol_error() {
            error!(
                method = %self.method,
                error = ?err,
                "Unexpected error while processing JSON-RPC request: {}",
                error_chain(&err)
            );
        }

        if self.is_notification && !self.config.notification_errors {
            RpcResponse::notification()
        } else {
            RpcResponse::error(self.id.clone().unwrap_or(RequestId::Null), &err)
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &Arguments {
        &self.args
    }

    /// The request id; `None` when the `id` member was absent.
    pub fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    pub fn is_notification(&self) -> bool {
        self.is_notification
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// The response, once one has been set.
    pub fn response(&self) -> Option<&RpcResponse> {
        self.response.as_ref()
    }

    /// Consume the request, returning its response if one has been set.
    pub fn into_response(self) -> Option<RpcResponse> {
        self.response
    }
}

fn error_chain(err: &RpcError) -> String {
    let mut message = err.to_string();
    // An application error displays as its wrapped error; start below it.
    let mut source = match err {
        RpcError::Application(inner) => std::error::Error::source(inner.as_ref()),
        other => std::error::Error::source(other),
    };
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

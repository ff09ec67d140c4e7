//! Shared helpers for the JSON-RPC integration tests.
//!
//! The probe registry records every invocation so tests can check both what a
//! method received and whether it ran at all.

use std::sync::Arc;

use jsonrpc_server_core::prelude::*;
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

/// One recorded invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeCall {
    pub method: String,
    pub positional: Vec<Value>,
    pub named: Map<String, Value>,
    pub bound: Map<String, Value>,
}

/// Collects invocations made through a [`probe_registry`]
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<ProbeCall>>>,
}

#[allow(dead_code)]
impl CallLog {
    pub fn calls(&self) -> Vec<ProbeCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last(&self) -> Option<ProbeCall> {
        self.calls.lock().last().cloned()
    }

    fn record(&self, method: &str, args: &BoundArguments) {
        self.calls.lock().push(ProbeCall {
            method: method.to_string(),
            positional: args.positional().to_vec(),
            named: args.named().clone(),
            bound: args.bound().clone(),
        });
    }
}

/// Registry whose methods record their arguments before doing anything else.
///
/// - `add(a, b)` returns `a + b`
/// - `ping()` returns `"pong"`
/// - `record(*args, **kwargs)` returns the number of arguments received
/// - `greet(name, greeting="Hello")` returns a greeting
/// - `fail()` raises an application error
/// - `reject()` raises a server error with code -32010
/// - `sqrt(value)` raises `Invalid params` with detail for negative input
#[allow(dead_code)]
pub fn probe_registry() -> (Methods, CallLog) {
    let log = CallLog::default();
    let mut methods = Methods::new();

    let calls = log.clone();
    methods
        .register_fn("add", MethodSignature::required(["a", "b"]), move |args| {
            calls.record("add", &args);
            let a: i64 = args.get_as("a")?;
            let b: i64 = args.get_as("b")?;
            Ok(json!(a + b))
        })
        .expect("register add");

    let calls = log.clone();
    methods
        .register_fn("ping", MethodSignature::new(), move |args| {
            calls.record("ping", &args);
            Ok(json!("pong"))
        })
        .expect("register ping");

    let calls = log.clone();
    methods
        .register_fn(
            "record",
            MethodSignature::new()
                .with_variadic_positional()
                .with_variadic_named(),
            move |args| {
                calls.record("record", &args);
                Ok(json!(args.positional().len() + args.named().len()))
            },
        )
        .expect("register record");

    let calls = log.clone();
    methods
        .register_fn(
            "greet",
            MethodSignature::required(["name"]).with_optional(["greeting"]),
            move |args| {
                calls.record("greet", &args);
                let name: String = args.get_as("name")?;
                let greeting: String = args
                    .get_optional("greeting")?
                    .unwrap_or_else(|| "Hello".to_string());
                Ok(json!(format!("{greeting}, {name}!")))
            },
        )
        .expect("register greet");

    let calls = log.clone();
    methods
        .register_fn("fail", MethodSignature::new(), move |args| {
            calls.record("fail", &args);
            Err(RpcError::application("database unavailable"))
        })
        .expect("register fail");

    let calls = log.clone();
    methods
        .register_fn("reject", MethodSignature::new(), move |args| {
            calls.record("reject", &args);
            Err(RpcError::server_error(
                -32010,
                "Rejected by policy",
                Some(json!({"policy": "deny-all"})),
            ))
        })
        .expect("register reject");

    let calls = log.clone();
    methods
        .register_fn("sqrt", MethodSignature::required(["value"]), move |args| {
            calls.record("sqrt", &args);
            let value: f64 = args.get_as("value")?;
            if value < 0.0 {
                return Err(RpcError::protocol(
                    JsonRpcErrorCode::InvalidParams,
                    Some(json!({"field": "value", "reason": "must not be negative"})),
                ));
            }
            Ok(json!(value.sqrt()))
        })
        .expect("register sqrt");

    (methods, log)
}

/// Run both phases and return the response.
#[allow(dead_code)]
pub fn process(methods: &Methods, raw: Value, config: ProcessorConfig) -> RpcResponse {
    let mut request = JsonRpcRequest::new(&raw, config);
    request.call(methods).clone()
}

/// Error code of an error response, panicking on any other variant.
#[allow(dead_code)]
pub fn error_code(response: &RpcResponse) -> i64 {
    match response {
        RpcResponse::Error(err) => err.error.code,
        other => panic!("expected an error response, got {other:?}"),
    }
}

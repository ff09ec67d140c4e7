//! Structural validation of decoded requests against the JSON-RPC 2.0
//! request schema.

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::RpcError;

/// The request schema, as shipped with the crate.
pub const REQUEST_SCHEMA: &str = include_str!("../schema/request-schema.json");

static VALIDATOR: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let schema: Value = serde_json::from_str(REQUEST_SCHEMA)
        .map_err(|err| format!("request schema is not valid JSON: {err}"))?;
    jsonschema::validator_for(&schema)
        .map_err(|err| format!("request schema failed to compile: {err}"))
});

/// Check `raw` against the request schema.
///
/// Fails with [`RpcError::InvalidRequest`] carrying the first violation.
pub fn validate(raw: &Value) -> Result<(), RpcError> {
    let validator = VALIDATOR
        .as_ref()
        .map_err(|err| RpcError::application(err.clone()))?;

    if let Some(violation) = validator.iter_errors(raw).next() {
        return Err(RpcError::InvalidRequest(violation.to_string()));
    }
    Ok(())
}

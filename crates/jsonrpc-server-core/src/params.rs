use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::RpcError;

/// Arguments carried by a request's `params` member.
///
/// A request carries positional or named arguments, never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    named: Map<String, Value>,
}

impl Arguments {
    /// Normalize the `params` member into positional and named arguments.
    ///
    /// An absent member yields no arguments. Anything other than an array or
    /// an object fails with [`RpcError::InvalidRequest`].
    pub fn from_params(params: Option<&Value>) -> Result<Self, RpcError> {
        match params {
            None => Ok(Self::default()),
            Some(Value::Array(values)) => Ok(Self::positional(values.clone())),
            Some(Value::Object(map)) => Ok(Self::named(map.clone())),
            Some(other) => Err(RpcError::InvalidRequest(format!(
                "params must be an array or an object, got {}",
                json_type_name(other)
            ))),
        }
    }

    pub fn positional(values: Vec<Value>) -> Self {
        Self {
            positional: values,
            named: Map::new(),
        }
    }

    pub fn named(map: Map<String, Value>) -> Self {
        Self {
            positional: Vec::new(),
            named: map,
        }
    }

    pub fn positional_args(&self) -> &[Value] {
        &self.positional
    }

    pub fn named_args(&self) -> &Map<String, Value> {
        &self.named
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub(crate) fn map_named(&mut self, f: impl FnOnce(Map<String, Value>) -> Map<String, Value>) {
        if !self.named.is_empty() {
            let named = std::mem::take(&mut self.named);
            self.named = f(named);
        }
    }
}

/// Arguments after they have been bound to a method's parameter names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    pub(crate) values: Map<String, Value>,
    pub(crate) extra_positional: Vec<Value>,
    pub(crate) extra_named: Map<String, Value>,
    pub(crate) raw: Arguments,
}

impl BoundArguments {
    /// Value bound to the parameter `name`, if supplied.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deserialize the value bound to `name`.
    ///
    /// A missing or mistyped value fails with [`RpcError::InvalidParams`].
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, RpcError> {
        let value = self
            .values
            .get(name)
            .cloned()
            .ok_or_else(|| RpcError::InvalidParams(format!("missing argument '{}'", name)))?;
        serde_json::from_value(value)
            .map_err(|err| RpcError::InvalidParams(format!("argument '{}': {}", name, err)))
    }

    /// Like [`get_as`](Self::get_as) but `None` when the argument was omitted.
    pub fn get_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, RpcError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(_) => self.get_as(name).map(Some),
        }
    }

    /// Parameter values keyed by name.
    pub fn bound(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Positional values beyond the declared parameters.
    pub fn extra_positional(&self) -> &[Value] {
        &self.extra_positional
    }

    /// Named values not matching a declared parameter.
    pub fn extra_named(&self) -> &Map<String, Value> {
        &self.extra_named
    }

    /// Positional arguments exactly as the request supplied them.
    pub fn positional(&self) -> &[Value] {
        self.raw.positional_args()
    }

    /// Named arguments exactly as the request supplied them.
    pub fn named(&self) -> &Map<String, Value> {
        self.raw.named_args()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

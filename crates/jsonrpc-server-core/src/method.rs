use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    error::{RegistryError, RpcError},
    params::{Arguments, BoundArguments},
};

/// Parameters a method accepts, declared up front instead of discovered at
/// call time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSignature {
    /// Parameters that must be supplied, in positional order
    pub required: Vec<String>,
    /// Parameters that may be omitted, positioned after `required`
    pub optional: Vec<String>,
    /// Accept positional arguments beyond the declared parameters
    pub variadic_positional: bool,
    /// Accept named arguments that match no declared parameter
    pub variadic_named: bool,
}

impl MethodSignature {
    /// Signature with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().with_required(names)
    }

    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_optional<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_variadic_positional(mut self) -> Self {
        self.variadic_positional = true;
        self
    }

    pub fn with_variadic_named(mut self) -> Self {
        self.variadic_named = true;
        self
    }

    /// Declared parameter names in positional order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }

    /// Bind `args` to this signature the way a call would.
    ///
    /// Fails with [`RpcError::InvalidParams`] on too many positional
    /// arguments, an unexpected named argument, a parameter supplied both by
    /// position and by name, or a missing required parameter.
    pub fn bind(&self, args: &Arguments) -> Result<BoundArguments, RpcError> {
        let names: Vec<&str> = self.parameters().collect();
        let positional = args.positional_args();

        if positional.len() > names.len() && !self.variadic_positional {
            return Err(RpcError::InvalidParams(format!(
                "takes {} positional argument(s) but {} were given",
                names.len(),
                positional.len()
            )));
        }

        let mut values = Map::new();
        for (name, value) in names.iter().zip(positional) {
            values.insert((*name).to_string(), value.clone());
        }
        let extra_positional = positional.iter().skip(names.len()).cloned().collect();

        let mut extra_named = Map::new();
        for (key, value) in args.named_args() {
            if names.contains(&key.as_str()) {
                if values.contains_key(key) {
                    return Err(RpcError::InvalidParams(format!(
                        "multiple values for argument '{}'",
                        key
                    )));
                }
                values.insert(key.clone(), value.clone());
            } else if self.variadic_named {
                extra_named.insert(key.clone(), value.clone());
            } else {
                return Err(RpcError::InvalidParams(format!(
                    "unexpected argument '{}'",
                    key
                )));
            }
        }

        if let Some(missing) = self.required.iter().find(|name| !values.contains_key(*name)) {
            return Err(RpcError::InvalidParams(format!(
                "missing required argument '{}'",
                missing
            )));
        }

        Ok(BoundArguments {
            values,
            extra_positional,
            extra_named,
            raw: args.clone(),
        })
    }
}

/// A callable registered under a method name.
pub trait RpcMethod: Send + Sync {
    /// Parameters this method accepts
    fn signature(&self) -> &MethodSignature;

    /// Run the method with arguments already bound to its signature
    fn call(&self, args: BoundArguments) -> Result<Value, RpcError>;
}

/// A method backed by a closure
pub struct FunctionMethod<F>
where
    F: Fn(BoundArguments) -> Result<Value, RpcError> + Send + Sync,
{
    signature: MethodSignature,
    handler_fn: F,
}

impl<F> FunctionMethod<F>
where
    F: Fn(BoundArguments) -> Result<Value, RpcError> + Send + Sync,
{
    pub fn new(signature: MethodSignature, handler_fn: F) -> Self {
        Self {
            signature,
            handler_fn,
        }
    }
}

impl<F> RpcMethod for FunctionMethod<F>
where
    F: Fn(BoundArguments) -> Result<Value, RpcError> + Send + Sync,
{
    fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    fn call(&self, args: BoundArguments) -> Result<Value, RpcError> {
        (self.handler_fn)(args)
    }
}

/// Lookup capability the processor resolves method names against.
pub trait MethodRegistry {
    /// Exact-match lookup by name
    fn resolve(&self, name: &str) -> Option<Arc<dyn RpcMethod>>;

    /// Names of all registered methods (optional - used for introspection)
    fn method_names(&self) -> Vec<String> {
        vec![]
    }
}

/// Resolve `name` in `registry`, failing with [`RpcError::MethodNotFound`].
pub fn resolve(
    registry: &(impl MethodRegistry + ?Sized),
    name: &str,
) -> Result<Arc<dyn RpcMethod>, RpcError> {
    registry
        .resolve(name)
        .ok_or_else(|| RpcError::MethodNotFound(name.to_string()))
}

/// Map-backed method registry
#[derive(Default, Clone)]
pub struct Methods {
    methods: HashMap<String, Arc<dyn RpcMethod>>,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `method` under `name`; a name can only be taken once.
    pub fn register<M>(&mut self, name: impl Into<String>, method: M) -> Result<(), RegistryError>
    where
        M: RpcMethod + 'static,
    {
        let name = name.into();
        if self.methods.contains_key(&name) {
            return Err(RegistryError::DuplicateMethod(name));
        }
        self.methods.insert(name, Arc::new(method));
        Ok(())
    }

    /// Register a closure with the given signature.
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        signature: MethodSignature,
        handler_fn: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(BoundArguments) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        self.register(name, FunctionMethod::new(signature, handler_fn))
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl MethodRegistry for Methods {
    fn resolve(&self, name: &str) -> Option<Arc<dyn RpcMethod>> {
        self.methods.get(name).cloned()
    }

    fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for Methods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Methods")
            .field("methods", &self.method_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(value: Value) -> Arguments {
        match value {
            Value::Object(map) => Arguments::named(map),
            _ => panic!("expected object"),
        }
    }

    fn invalid_params(result: Result<BoundArguments, RpcError>) -> String {
        match result {
            Err(RpcError::InvalidParams(detail)) => detail,
            other => panic!("expected InvalidParams, got {other:?}"),
        }
    }

    #[test]
    fn test_bind_positional() {
        let sig = MethodSignature::required(["a", "b"]);
        let bound = sig.bind(&Arguments::positional(vec![json!(2), json!(3)])).unwrap();
        assert_eq!(bound.get("a"), Some(&json!(2)));
        assert_eq!(bound.get("b"), Some(&json!(3)));
        assert!(bound.extra_positional().is_empty());
    }

    #[test]
    fn test_bind_named() {
        let sig = MethodSignature::required(["a"]).with_optional(["b"]);
        let bound = sig.bind(&named(json!({"a": 1}))).unwrap();
        assert_eq!(bound.get("a"), Some(&json!(1)));
        assert_eq!(bound.get("b"), None);
    }

    #[test]
    fn test_too_many_positional() {
        let sig = MethodSignature::required(["a"]);
        let detail = invalid_params(sig.bind(&Arguments::positional(vec![json!(1), json!(2)])));
        assert!(detail.contains("positional"));
    }

    #[test]
    fn test_missing_required() {
        let sig = MethodSignature::required(["a", "b"]);
        let detail = invalid_params(sig.bind(&Arguments::positional(vec![json!(1)])));
        assert!(detail.contains("'b'"));
    }

    #[test]
    fn test_unexpected_named() {
        let sig = MethodSignature::required(["a", "b"]);
        let detail = invalid_params(sig.bind(&named(json!({"x": 1}))));
        assert!(detail.contains("'x'"));
    }

    #[test]
    fn test_variadics_collect_extras() {
        let sig = MethodSignature::required(["a"])
            .with_variadic_positional()
            .with_variadic_named();

        let bound = sig
            .bind(&Arguments::positional(vec![json!(1), json!(2), json!(3)]))
            .unwrap();
        assert_eq!(bound.extra_positional(), &[json!(2), json!(3)]);

        let bound = sig.bind(&named(json!({"a": 1, "z": 9}))).unwrap();
        assert_eq!(bound.extra_named().get("z"), Some(&json!(9)));
        assert_eq!(bound.named().len(), 2);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut methods = Methods::new();
        methods
            .register_fn("ping", MethodSignature::new(), |_| Ok(json!("pong")))
            .unwrap();
        let err = methods
            .register_fn("ping", MethodSignature::new(), |_| Ok(json!("pong")))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateMethod("ping".to_string()));
        assert_eq!(methods.len(), 1);
    }

    #[test]
    fn test_resolve_is_exact_match() {
        let mut methods = Methods::new();
        methods
            .register_fn("getUser", MethodSignature::new(), |_| Ok(Value::Null))
            .unwrap();

        assert!(resolve(&methods, "getUser").is_ok());
        assert!(matches!(
            resolve(&methods, "getuser"),
            Err(RpcError::MethodNotFound(name)) if name == "getuser"
        ));
        assert!(matches!(resolve(&methods, "get_user"), Err(RpcError::MethodNotFound(_))));
    }

    #[test]
    fn test_function_method_call() {
        let mut methods = Methods::new();
        methods
            .register_fn("add", MethodSignature::required(["a", "b"]), |args| {
                let a: i64 = args.get_as("a")?;
                let b: i64 = args.get_as("b")?;
                Ok(json!(a + b))
            })
            .unwrap();

        let method = resolve(&methods, "add").unwrap();
        let bound = method
            .signature()
            .bind(&Arguments::positional(vec![json!(2), json!(3)]))
            .unwrap();
        assert_eq!(method.call(bound).unwrap(), json!(5));
        assert_eq!(methods.method_names(), vec!["add".to_string()]);
    }
}

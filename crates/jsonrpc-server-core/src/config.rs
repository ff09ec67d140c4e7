use serde::{Deserialize, Serialize};

/// Options read by the request processor.
///
/// Passed by value into each [`JsonRpcRequest`](crate::JsonRpcRequest); the
/// processor never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Validate requests against the JSON-RPC 2.0 request schema
    pub schema_validation: bool,
    /// Convert camelCase method and argument names to snake_case
    pub convert_camel_case: bool,
    /// Respond with errors to failed notifications instead of staying silent
    pub notification_errors: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            schema_validation: true,
            convert_camel_case: false,
            notification_errors: false,
        }
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema_validation(mut self, enabled: bool) -> Self {
        self.schema_validation = enabled;
        self
    }

    pub fn with_convert_camel_case(mut self, enabled: bool) -> Self {
        self.convert_camel_case = enabled;
        self
    }

    pub fn with_notification_errors(mut self, enabled: bool) -> Self {
        self.notification_errors = enabled;
        self
    }
}

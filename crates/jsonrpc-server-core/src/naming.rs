//! camelCase to snake_case conversion for method and argument names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("literal pattern"));
static LOWER_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("literal pattern"));

/// Convert a camelCase identifier to snake_case.
///
/// `getUserName` becomes `get_user_name`. Identifiers that do not look like
/// plain camelCase are returned unchanged: empty names, names starting with
/// a digit or holding non-ASCII characters, and names with consecutive
/// uppercase letters such as `getHTTPStatus`.
pub fn convert_camel_case(name: &str) -> String {
    if !is_plain_identifier(name) {
        return name.to_string();
    }
    let split = WORD_BOUNDARY.replace_all(name, "${1}_${2}");
    LOWER_UPPER.replace_all(&split, "${1}_${2}").to_lowercase()
}

/// Convert every key of `map`, descending into nested objects.
pub fn convert_camel_case_keys(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Object(nested) => Value::Object(convert_camel_case_keys(nested)),
                other => other,
            };
            (convert_camel_case(&key), value)
        })
        .collect()
}

fn is_plain_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    let Some(first) = bytes.first() else {
        return false;
    };
    if first.is_ascii_digit() || !name.is_ascii() {
        return false;
    }
    !bytes
        .windows(2)
        .any(|pair| pair[0].is_ascii_uppercase() && pair[1].is_ascii_uppercase())
}

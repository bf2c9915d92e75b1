//! Parameter maps passed to stage factories and actions.

use std::collections::HashMap;

/// A string-keyed map of arbitrary JSON values.
///
/// Used both for run parameters (consumed by stage factories) and for
/// per-stage action parameters.
pub type Params = HashMap<String, serde_json::Value>;

/// Returns the string stored under `key`, if present and a string.
#[must_use]
pub fn param_str<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).and_then(serde_json::Value::as_str)
}

/// Returns the string stored under `key`, or `default`.
#[must_use]
pub fn param_str_or<'a>(params: &'a Params, key: &str, default: &'a str) -> &'a str {
    param_str(params, key).unwrap_or(default)
}

/// Builds a parameter map from key/value pairs.
#[must_use]
pub fn params_from<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Params
where
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_lookup() {
        let params = params_from([("url", serde_json::json!("https://x")), ("seconds", serde_json::json!(2))]);

        assert_eq!(param_str(&params, "url"), Some("https://x"));
        assert_eq!(param_str(&params, "seconds"), None);
        assert_eq!(param_str_or(&params, "missing", "fallback"), "fallback");
    }
}

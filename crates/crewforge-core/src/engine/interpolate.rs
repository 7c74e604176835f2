use crate::crew::Inputs;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_\-]*)\}").expect("valid regex"));

/// Replace `{key}` with the matching input. Strings are inserted verbatim,
/// other values as JSON text; unknown keys are left untouched.
pub fn interpolate(text: &str, inputs: &Inputs) -> String {
    if inputs.is_empty() {
        return text.to_string();
    }
    INPUT_RE
        .replace_all(text, |caps: &Captures| match inputs.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inputs(pairs: &[(&str, Value)]) -> Inputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_known_keys_are_replaced() {
        let inputs = inputs(&[("audience", json!("beginners")), ("words", json!(300))]);
        assert_eq!(
            interpolate("Write for {audience} in {words} words", &inputs),
            "Write for beginners in 300 words"
        );
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let inputs = inputs(&[("audience", json!("experts"))]);
        assert_eq!(interpolate("{tone} for {audience}", &inputs), "{tone} for experts");
    }

    #[test]
    fn test_non_identifier_braces_are_ignored() {
        let inputs = inputs(&[("a", json!("x"))]);
        assert_eq!(interpolate("json {\"a\": 1} and {a}", &inputs), "json {\"a\": 1} and x");
    }
}

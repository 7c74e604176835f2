use anyhow::{bail, Result};
use crewforge_core::Inputs;
use serde_json::Value;

/// Parse one `key=value` pair from the command line.
///
/// The value is read as JSON when it parses (`count=3`, `tags=["a","b"]`),
/// otherwise it is kept as a plain string. Only the first `=` splits.
pub fn parse_input(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Invalid input '{}': expected key=value", raw);
    };

    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid input '{}': key is empty", raw);
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Collect repeated `--input` flags; later keys override earlier ones.
pub fn collect_inputs(raw: &[String]) -> Result<Inputs> {
    let mut inputs = Inputs::new();
    for pair in raw {
        let (key, value) = parse_input(pair)?;
        inputs.insert(key, value);
    }
    Ok(inputs)
}

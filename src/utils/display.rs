use serde_json::Value;

const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Renders a JSON value the way a browser coerces it inside a template string.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            // integers past 2^53 lose precision just as a browser number would
            match n.as_i64() {
                Some(i) if i.unsigned_abs() <= MAX_SAFE_INTEGER => i.to_string(),
                _ => n.as_f64().map(display_f64).unwrap_or_else(|| n.to_string()),
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Display for a field that may be absent from the record.
pub fn display_field(value: Option<&Value>) -> String {
    value.map(display_value).unwrap_or_else(|| "undefined".to_string())
}

fn display_f64(f: f64) -> String {
    let magnitude = f.abs();
    if f == 0.0 {
        // covers -0.0 as well
        "0".to_string()
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        exponent_form(f)
    } else {
        // shortest round-trip digits, no trailing ".0"
        f.to_string()
    }
}

/// `1e+21` / `1.5e-7` shape: explicit sign on positive exponents.
fn exponent_form(f: f64) -> String {
    let formatted = format!("{f:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Print a success message, merging `data` into the JSON object when present
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print `label: value` lines in text mode, or the object as-is in JSON mode
pub fn output_details(output_format: OutputFormat, details: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(details)?),
        OutputFormat::Text => {
            if let Some(object) = details.as_object() {
                for (key, value) in object {
                    match value {
                        Value::String(s) => println!("{:<12} {}", format!("{}:", key), s),
                        other => println!("{:<12} {}", format!("{}:", key), other),
                    }
                }
            }
        }
    }
    Ok(())
}

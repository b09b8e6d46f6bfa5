use serde_json::{Map, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Map<String, Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".to_string(), Value::Bool(true));
            response.insert("message".to_string(), Value::String(message.to_string()));
            response.extend(data);

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            for (key, value) in data {
                match value {
                    Value::String(s) => println!("  {}: {}", key, s),
                    other => println!("  {}: {}", key, other),
                }
            }
        }
    }
    Ok(())
}

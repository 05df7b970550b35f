use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let Some(data) = data {
                response["data"] = data;
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print API data: raw JSON, or one line per record using `render`
pub fn output_records<F>(output_format: OutputFormat, data: &Value, empty_message: &str, render: F) -> anyhow::Result<()>
where
    F: Fn(&Value) -> String,
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => {
            let records = match data {
                Value::Array(items) => items.as_slice(),
                other => std::slice::from_ref(other),
            };
            if records.is_empty() {
                println!("{}", empty_message);
            }
            for record in records {
                println!("{}", render(record));
            }
        }
    }
    Ok(())
}

/// Field as display text; missing fields render as `-`
pub fn field(record: &Value, name: &str) -> String {
    match &record[name] {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// `todo list` line: id, weather, owner, title
pub fn render_todo(todo: &Value) -> String {
    format!(
        "{}  [{}]  {}  {}",
        field(todo, "id"),
        field(todo, "weather"),
        field(todo, "nickname"),
        field(todo, "title")
    )
}

//! Template rendering for titles.
//!
//! Single-pass substitution of `{field}` placeholders against a title's
//! record form. No loops or conditionals inside templates.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::entities::Title;
use crate::shared::errors::{AppError, AppResult};

// Matches an escaped brace pair or one `{field}` placeholder.
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").unwrap())
}

/// Substitute every `{field}` in `template` with the title's field value.
///
/// Strings render bare, numbers as decimal, `delta` as its JSON object
/// literal. An unknown field name is a usage error, never ignored.
/// `{{` and `}}` escape to literal braces.
pub fn render(title: &Title, template: &str) -> AppResult<String> {
    let record = serde_json::to_value(title.to_record())?;
    let fields = record
        .as_object()
        .ok_or_else(|| AppError::SerializationError("title record is not an object".into()))?;

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in placeholder().captures_iter(template) {
        let matched = caps.get(0).unwrap();
        out.push_str(&template[last..matched.start()]);
        last = matched.end();

        match caps.get(1) {
            None => {
                // "{{" or "}}"
                out.push_str(&matched.as_str()[..1]);
            }
            Some(name) => {
                let value = fields.get(name.as_str()).ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "Unknown template field '{{{}}}'",
                        name.as_str()
                    ))
                })?;
                out.push_str(&render_value(value));
            }
        }
    }
    out.push_str(&template[last..]);
    Ok(out)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

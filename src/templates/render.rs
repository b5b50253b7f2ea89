//! Placeholder Rendering
//!
//! Fills `{{ .key }}` placeholders in template HTML from a JSON object.

use serde_json::{Map, Value};

use crate::error::Result;

const OPEN: &str = "{{ .";
const CLOSE: &str = " }}";

/// Substitutes every `{{ .key }}` in `html` with the matching field of `data`.
///
/// Missing or empty (`""`) data leaves the HTML unchanged; any other data,
/// whitespace included, must be a JSON object. The HTML is scanned once, so
/// text inserted for one placeholder is never itself substituted.
/// Placeholders with no matching field are left in place.
pub fn combine_html_with_data(html: &str, data: Option<&str>) -> Result<String> {
    let data = match data {
        Some(data) if !data.is_empty() => data,
        _ => return Ok(html.to_string()),
    };

    let fields: Map<String, Value> = serde_json::from_str(data)?;

    let mut rendered = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(OPEN) {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];

        let Some(end) = after.find(CLOSE) else {
            rendered.push_str(&rest[start..]);
            return Ok(rendered);
        };

        match fields.get(&after[..end]) {
            Some(value) => {
                rendered.push_str(&display_value(value));
                rest = &after[end + CLOSE.len()..];
            }
            None => {
                // Not a known key; keep the opener and rescan after it
                rendered.push_str(OPEN);
                rest = after;
            }
        }
    }
    rendered.push_str(rest);

    Ok(rendered)
}

/// Text inserted for a JSON value: strings verbatim, `null` as `<nil>`,
/// everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "<nil>".to_string(),
        other => other.to_string(),
    }
}

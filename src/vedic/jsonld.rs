//! JSON-LD rendering of a birth chart

use serde_json::{json, Map, Value};

use crate::models::VedicChart;

/// Node type of the chart document
pub const CHART_TYPE: &str = "VedicBirthChart";

fn context() -> Value {
    json!({
        "@vocab": "https://schema.org/",
        "birthDatetime": { "@type": "xsd:dateTime" },
        "xsd": "http://www.w3.org/2001/XMLSchema#"
    })
}

/// The chart as a JSON-LD document with `@context` and `@type` at the top
pub fn to_json_ld(chart: &VedicChart) -> serde_json::Result<Value> {
    let body = serde_json::to_value(chart)?;

    let mut document = Map::new();
    document.insert("@context".to_string(), context());
    document.insert("@type".to_string(), Value::String(CHART_TYPE.to_string()));
    if let Value::Object(fields) = body {
        for (key, mut value) in fields {
            if key == "person" {
                if let Value::Object(person) = &mut value {
                    person.insert("@type".to_string(), Value::String("Person".to_string()));
                }
            }
            document.insert(key, value);
        }
    }

    Ok(Value::Object(document))
}

/// Pretty-printed JSON-LD string of the chart
pub fn to_json_ld_string(chart: &VedicChart) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_json_ld(chart)?)
}

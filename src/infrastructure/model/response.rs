//! Tolerant parsing of the model's JSON answer.
//!
//! The payload is produced by a language model, so every field is checked and
//! coerced here. Entries that cannot be made sense of are dropped and counted;
//! nothing past this module sees raw JSON except `NewPlan::details`.

use serde_json::{Map, Value};
use tracing::warn;

use crate::shared::errors::VerificationError;
use crate::shared::types::NewPlan;
use crate::shared::utils::format_price;

/// One validated entry of `results`
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCheck {
    pub name: String,
    pub registered: Option<f64>,
    pub current: Option<f64>,
    pub changed: bool,
}

/// Validated model answer for one category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReport {
    pub results: Vec<PriceCheck>,
    pub new_plans: Vec<NewPlan>,
    /// Entries dropped because they failed validation
    pub discarded: usize,
}

/// Parse the concatenated text of a model answer
pub fn parse_report(text: &str) -> Result<ModelReport, VerificationError> {
    let root = extract_json_object(text)?;
    let Value::Object(root) = root else {
        return Err(VerificationError::MalformedPayload(
            "top-level value is not an object".to_string(),
        ));
    };

    let mut report = ModelReport::default();

    match root.get("results") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for item in items {
                match parse_price_check(item) {
                    Ok(check) => report.results.push(check),
                    Err(reason) => {
                        warn!("⚠️ Discarding result entry {}: {}", item, reason);
                        report.discarded += 1;
                    }
                }
            }
        }
        Some(other) => {
            return Err(VerificationError::MalformedPayload(format!(
                "`results` is not a list: {}",
                other
            )));
        }
    }

    match root.get("new_plans") {
        Some(Value::Array(items)) => {
            for item in items {
                match parse_new_plan(item) {
                    Some(plan) => report.new_plans.push(plan),
                    None => {
                        warn!("⚠️ Discarding new plan entry {}", item);
                        report.discarded += 1;
                    }
                }
            }
        }
        None | Some(Value::Null) => {}
        Some(other) => warn!("⚠️ Ignoring non-list `new_plans`: {}", other),
    }

    Ok(report)
}

/// Remove fenced code-block markers the model likes to wrap JSON in
pub fn strip_code_fences(text: &str) -> String {
    text.trim().replace("```json", "").replace("```", "").trim().to_string()
}

fn extract_json_object(text: &str) -> Result<Value, VerificationError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(VerificationError::EmptyResponse);
    }

    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(err) => {
            // Web search answers often surround the JSON with prose
            match (cleaned.find('{'), cleaned.rfind('}')) {
                (Some(start), Some(end)) if start < end => {
                    Ok(serde_json::from_str(&cleaned[start..=end])?)
                }
                _ => Err(err.into()),
            }
        }
    }
}

fn parse_price_check(item: &Value) -> Result<PriceCheck, String> {
    let Value::Object(fields) = item else {
        return Err("not an object".to_string());
    };

    let name = match fields.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return Err("missing name".to_string()),
    };

    let registered = optional_price(fields, "registered")?;
    let current = optional_price(fields, "current")?;
    let changed = match fields.get("changed") {
        None | Some(Value::Null) => false,
        Some(value) => coerce_flag(value).ok_or_else(|| format!("bad `changed` value {}", value))?,
    };

    Ok(PriceCheck {
        name,
        registered,
        current,
        changed,
    })
}

fn optional_price(fields: &Map<String, Value>, key: &str) -> Result<Option<f64>, String> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce_price(value)
            .map(Some)
            .ok_or_else(|| format!("bad `{}` value {}", key, value)),
    }
}

/// Accepts JSON numbers and strings like `"12.99"`, `"12,99 €"`, `"€12.99"`
/// or `"12,99€/mes"`. Thousands separators are not understood.
pub fn coerce_price(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => strip_currency(s).replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|p| p.is_finite())
}

/// Drop the euro sign on either side and a trailing billing period
fn strip_currency(raw: &str) -> &str {
    let mut s = raw.trim();
    for period in ["/mes", "/month", "al mes"] {
        if let Some(rest) = s.strip_suffix(period) {
            s = rest.trim_end();
            break;
        }
    }
    s.trim_start_matches('€').trim_end_matches('€').trim()
}

fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "sí" | "si" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_new_plan(item: &Value) -> Option<NewPlan> {
    match item {
        Value::Object(fields) => {
            let mut details = fields.clone();
            let name = details.remove("name").and_then(|v| display_text(&v));
            let price = details.remove("price").and_then(|v| display_price(&v));
            Some(NewPlan { name, price, details })
        }
        Value::String(s) if !s.trim().is_empty() => Some(NewPlan {
            name: Some(s.trim().to_string()),
            ..Default::default()
        }),
        _ => None,
    }
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn display_price(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().map(format_price),
        Value::String(s) => {
            let s = strip_currency(s);
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => None,
    }
}

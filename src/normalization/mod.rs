//! # Record Normalization
//!
//! Raw records (bulk imports, seed fixtures) arrive with either camelCase or
//! snake_case field names and with fields missing or blank. The helpers here
//! look a field up under its camelCase alias first, then its snake_case name,
//! and treat empty strings, zero, `false` and `null` as absent, so every
//! display field ends up with a concrete fallback.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::organization::OrganizationStatus;
use crate::repositories::api_endpoint::NewApiEndpoint;
use crate::repositories::bi::NewMetric;
use crate::repositories::market::NewMarketEntry;
use crate::repositories::organization::NewOrganization;

/// Errors raised while normalizing raw records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("payload must be a JSON array of records")]
    NotAnArray,
}

/// `contact_email` -> `contactEmail`
pub fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper_next = false;
    for ch in snake.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy value under the camelCase alias, then the snake_case name.
fn lookup<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    let camel = camel_case(field);
    [camel.as_str(), field]
        .into_iter()
        .filter_map(|key| record.get(key))
        .find(|value| is_truthy(value))
}

/// Text field, or `default` when absent or blank. Numbers are stringified.
pub fn text(record: &Map<String, Value>, field: &str, default: &str) -> String {
    match lookup(record, field) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Number(value)) => value.to_string(),
        Some(Value::Bool(value)) => value.to_string(),
        _ => default.to_string(),
    }
}

/// Boolean flag. Accepts `true`, non-zero numbers and the strings `1`/`true`/`yes`.
pub fn flag(record: &Map<String, Value>, field: &str) -> bool {
    match lookup(record, field) {
        Some(Value::Bool(value)) => *value,
        Some(Value::Number(_)) => true,
        Some(Value::String(value)) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        ),
        _ => false,
    }
}

/// Numeric field; numeric strings are parsed. Zero or unparseable yields `default`.
pub fn number(record: &Map<String, Value>, field: &str, default: f64) -> f64 {
    let parsed = match lookup(record, field) {
        Some(Value::Number(value)) => value.as_f64(),
        Some(Value::String(value)) => value.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(default)
}

/// Integer field, truncating fractional input.
pub fn integer(record: &Map<String, Value>, field: &str, default: i64) -> i64 {
    let value = number(record, field, default as f64);
    if value.is_finite() {
        value.trunc() as i64
    } else {
        default
    }
}

/// RFC 3339 timestamp, or `default` when missing or unparseable.
pub fn timestamp(
    record: &Map<String, Value>,
    field: &str,
    default: DateTime<Utc>,
) -> DateTime<Utc> {
    lookup(record, field)
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or(default)
}

/// List of strings from a JSON array or a comma-separated string.
pub fn string_list(record: &Map<String, Value>, field: &str) -> Vec<String> {
    match lookup(record, field) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(value)) => split_list(value),
        _ => Vec::new(),
    }
}

/// Split comma-separated text, trimming entries and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn as_object(record: &Value, index: usize) -> Result<&Map<String, Value>, NormalizationError> {
    record
        .as_object()
        .ok_or(NormalizationError::NotAnObject { index })
}

/// Normalize an import payload: a JSON array of organization records.
pub fn normalize_organizations(
    payload: &Value,
    now: DateTime<Utc>,
) -> Result<Vec<NewOrganization>, NormalizationError> {
    normalize_all(payload, |record| normalize_organization(record, now))
}

pub fn normalize_organization(record: &Map<String, Value>, now: DateTime<Utc>) -> NewOrganization {
    let status = OrganizationStatus::parse(&text(record, "status", ""))
        .unwrap_or(OrganizationStatus::Pending);

    NewOrganization {
        name: text(record, "name", ""),
        domain: text(record, "domain", ""),
        industry: text(record, "industry", ""),
        size: text(record, "size", ""),
        country: text(record, "country", ""),
        contact_email: text(record, "contact_email", ""),
        contact_phone: text(record, "contact_phone", ""),
        address: text(record, "address", ""),
        status,
        consent_lebonlogiciel: flag(record, "consent_lebonlogiciel"),
        consent_prospection: flag(record, "consent_prospection"),
        consent_date: timestamp(record, "consent_date", now),
        total_licenses: integer(record, "total_licenses", 0),
        total_users: integer(record, "total_users", 0),
        monthly_revenue: number(record, "monthly_revenue", 0.0),
        created_at: timestamp(record, "created_at", now),
        last_activity: timestamp(record, "last_activity", now),
    }
}

pub fn normalize_market_entry(record: &Map<String, Value>) -> NewMarketEntry {
    NewMarketEntry {
        software_name: text(record, "software_name", ""),
        category: text(record, "category", ""),
        market_rank: i32::try_from(integer(record, "market_rank", 0)).unwrap_or(0),
        total_users: integer(record, "total_users", 0),
        average_rating: number(record, "average_rating", 0.0).clamp(0.0, 5.0),
        growth_rate: number(record, "growth_rate", 0.0),
        main_competitors: string_list(record, "main_competitors"),
        market_share: number(record, "market_share", 0.0),
    }
}

pub fn normalize_api_endpoint(record: &Map<String, Value>) -> NewApiEndpoint {
    NewApiEndpoint {
        name: text(record, "name", "N/A"),
        path: text(record, "path", ""),
        method: text(record, "method", "GET"),
        description: text(record, "description", ""),
        data_type: text(record, "data_type", "anonymized"),
        platform: text(record, "platform", "general"),
        status: text(record, "status", "active"),
        response_time_avg: number(record, "response_time_avg", 0.0),
        calls_today: integer(record, "calls_today", 0),
        success_rate: number(record, "success_rate", 100.0),
    }
}

pub fn normalize_bi_metric(record: &Map<String, Value>) -> NewMetric {
    NewMetric {
        name: text(record, "name", ""),
        category: text(record, "category", "general"),
        value: number(record, "value", 0.0),
        previous_value: number(record, "previous_value", 0.0),
        unit: text(record, "unit", ""),
        period: text(record, "period", "monthly"),
    }
}

/// Normalize every object in a fixture array with `normalize`.
pub fn normalize_all<T>(
    payload: &Value,
    normalize: impl Fn(&Map<String, Value>) -> T,
) -> Result<Vec<T>, NormalizationError> {
    let records = payload.as_array().ok_or(NormalizationError::NotAnArray)?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| as_object(record, index).map(&normalize))
        .collect()
}

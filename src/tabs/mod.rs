//! # Tab Logic
//!
//! Pure functions behind each admin tab: the filter predicates applied to a
//! listed table and the summary cards reduced from it. Nothing here touches
//! the database, so handlers fetch rows and hand them over.

use serde_json::Value;

pub mod api_management;
pub mod bi;
pub mod exports;
pub mod market;
pub mod organizations;
pub mod overview;
pub mod team;
pub mod webhooks;

/// Filter value meaning "no constraint".
pub const ALL: &str = "all";

/// Case-insensitive substring match against any field. An empty term matches everything.
pub fn matches_search(term: Option<&str>, fields: &[&str]) -> bool {
    let term = match term {
        Some(term) if !term.is_empty() => term.to_lowercase(),
        _ => return true,
    };
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Categorical equality. `None`, empty and `all` impose no constraint.
pub fn matches_choice(filter: Option<&str>, value: &str) -> bool {
    match filter.map(str::trim) {
        None | Some("") | Some(ALL) => true,
        Some(expected) => expected == value,
    }
}

/// Status flip used by the toggle actions: `active` becomes `inactive`, anything else `active`.
pub fn toggle_status(current: &str) -> &'static str {
    if current == "active" {
        "inactive"
    } else {
        "active"
    }
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Strings out of a stored JSON array column. Non-string entries are skipped.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_search_matches_everything() {
        assert!(matches_search(None, &["Acme"]));
        assert!(matches_search(Some(""), &["Acme"]));
        assert!(matches_search(Some(""), &[]));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search(Some("ACM"), &["", "acme.fr"]));
        assert!(matches_search(Some("santé"), &["Santé publique"]));
        assert!(!matches_search(Some("globex"), &["Acme", "acme.fr"]));
        assert!(!matches_search(Some(" acme"), &["Acme", "acme.fr"]));
    }

    #[test]
    fn choice_filter() {
        assert!(matches_choice(None, "active"));
        assert!(matches_choice(Some("all"), "active"));
        assert!(matches_choice(Some(""), "inactive"));
        assert!(matches_choice(Some("active"), "active"));
        assert!(!matches_choice(Some("active"), "inactive"));
    }

    #[test]
    fn toggle_flips_active_only() {
        assert_eq!(toggle_status("active"), "inactive");
        assert_eq!(toggle_status("inactive"), "active");
        assert_eq!(toggle_status("expired"), "active");
        assert_eq!(toggle_status("error"), "active");
    }

    #[test]
    fn mean_and_rounding() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean([98.0, 99.0, 100.0]), Some(99.0));
        assert_eq!(round_to(4.256, 1), 4.3);
        assert_eq!(round_to(99.5, 0), 100.0);
    }

    #[test]
    fn string_list_skips_non_strings() {
        let value = json!(["read", 3, "write"]);
        assert_eq!(string_list(Some(&value)), vec!["read", "write"]);
        assert!(string_list(None).is_empty());
        assert!(string_list(Some(&json!({"a": 1}))).is_empty());
    }
}

//! Query string building, parsing, and location patching.
//!
//! Three independent operations:
//! - [`encode_query`] - build a query string from key/value parameters
//! - [`decode_query`] - parse the query portion of a URL into a flat map
//! - [`patch_location_query`] - patch the tracked location's query
//!   parameters through a [`HistoryApi`] collaborator

use std::collections::HashMap;

use url::form_urlencoded;
use url::Url;

use crate::traits::HistoryApi;

// ============================================================================
// Query Value
// ============================================================================

/// A query parameter value.
///
/// `Missing`, NaN numbers, and empty strings are invalid: [`encode_query`]
/// filters them out and [`patch_location_query`] deletes their parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Text value; invalid when empty.
    Text(String),
    /// Numeric value; invalid when NaN.
    Number(f64),
    /// Boolean value, rendered as `true`/`false`.
    Flag(bool),
    /// Absent value; always invalid.
    Missing,
}

impl QueryValue {
    /// Renders the value to its query-string form, or `None` when invalid.
    ///
    /// Integral numbers render without a fractional part.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(n) if n.is_nan() => None,
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            Self::Flag(flag) => Some(flag.to_string()),
            Self::Missing => None,
        }
    }

    /// Returns true when the value survives filtering.
    pub fn is_valid(&self) -> bool {
        self.render().is_some()
    }
}

impl From<&str> for QueryValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for QueryValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for QueryValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for QueryValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

// ============================================================================
// Encode / Decode
// ============================================================================

/// Builds a query string from `params` and appends it to `base`.
///
/// Invalid values are filtered out; surviving pairs are percent-encoded in
/// input order. The `?` separator is appended only when at least one pair
/// survives, otherwise `base` is returned unchanged.
pub fn encode_query(base: &str, params: &[(String, QueryValue)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (key, value) in params {
        if let Some(text) = value.render() {
            serializer.append_pair(key, &text);
            any = true;
        }
    }

    if any {
        format!("{base}?{}", serializer.finish())
    } else {
        base.to_string()
    }
}

/// Parses the query portion of `url` into a flat string map.
///
/// Everything after the first `?` is parsed as a standard query string; the
/// last occurrence of a repeated key wins. A URL without a query yields an
/// empty map.
pub fn decode_query(url: &str) -> HashMap<String, String> {
    let query = url.split_once('?').map_or("", |(_, tail)| tail);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

// ============================================================================
// Location Patching
// ============================================================================

/// Patches the query parameters of the tracked location.
///
/// Reads the current location from `history`; a missing or unparseable
/// location makes this a no-op. For each entry in `params`, a valid value
/// sets that parameter (replacing every previous occurrence, keeping the
/// first occurrence's position) and an invalid value deletes it. The new
/// location is committed via [`HistoryApi::replace`] when `replace_history`
/// is set, via [`HistoryApi::push`] otherwise; no navigation is triggered.
pub fn patch_location_query(
    history: &dyn HistoryApi,
    params: &[(String, QueryValue)],
    replace_history: bool,
) {
    let Ok(mut location) = Url::parse(&history.current_url()) else {
        return;
    };

    let mut pairs: Vec<(String, String)> = location.query_pairs().into_owned().collect();

    for (key, value) in params {
        match value.render() {
            Some(text) => {
                let mut found = false;
                pairs.retain_mut(|(name, existing)| {
                    if name == key {
                        if found {
                            return false;
                        }
                        found = true;
                        *existing = text.clone();
                    }
                    true
                });
                if !found {
                    pairs.push((key.clone(), text));
                }
            }
            None => pairs.retain(|(name, _)| name != key),
        }
    }

    if pairs.is_empty() {
        location.set_query(None);
    } else {
        location
            .query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    if replace_history {
        history.replace(location.to_string());
    } else {
        history.push(location.to_string());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MemoryHistory;

    fn params(entries: &[(&str, QueryValue)]) -> Vec<(String, QueryValue)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_encode_filters_invalid_values() {
        let query = encode_query(
            "",
            &params(&[
                ("category", QueryValue::from("books")),
                ("price", QueryValue::from("")),
            ]),
        );
        assert_eq!(query, "?category=books");
    }

    #[test]
    fn test_encode_without_valid_params_returns_base() {
        let query = encode_query(
            "/items",
            &params(&[
                ("a", QueryValue::Missing),
                ("b", QueryValue::Number(f64::NAN)),
                ("c", QueryValue::from("")),
            ]),
        );
        assert_eq!(query, "/items");
    }

    #[test]
    fn test_encode_preserves_input_order() {
        let query = encode_query(
            "/items",
            &params(&[
                ("page", QueryValue::from(2_i64)),
                ("active", QueryValue::from(true)),
                ("q", QueryValue::from("rust lang")),
            ]),
        );
        assert_eq!(query, "/items?page=2&active=true&q=rust+lang");
    }

    #[test]
    fn test_decode_flat_map() {
        let parsed = decode_query("/user?page=1&sort_by=name&filter=active");
        assert_eq!(parsed["page"], "1");
        assert_eq!(parsed["sort_by"], "name");
        assert_eq!(parsed["filter"], "active");
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_decode_without_query_is_empty() {
        assert!(decode_query("/user").is_empty());
    }

    #[test]
    fn test_decode_last_occurrence_wins() {
        let parsed = decode_query("/user?page=1&page=2");
        assert_eq!(parsed["page"], "2");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let input = params(&[
            ("category", QueryValue::from("books")),
            ("price", QueryValue::from(10_i64)),
            ("sale", QueryValue::from(false)),
            ("skip", QueryValue::Missing),
        ]);
        let parsed = decode_query(&encode_query("/items", &input));

        assert_eq!(parsed["category"], "books");
        assert_eq!(parsed["price"], "10");
        assert_eq!(parsed["sale"], "false");
        assert!(!parsed.contains_key("skip"));
    }

    #[test]
    fn test_patch_sets_and_deletes_parameters() {
        let history = MemoryHistory::new("http://h/list?page=1&stale=x");
        patch_location_query(
            &history,
            &params(&[
                ("page", QueryValue::from(2_i64)),
                ("stale", QueryValue::Missing),
                ("sort", QueryValue::from("name")),
            ]),
            false,
        );

        let current = decode_query(&history.current_url());
        assert_eq!(current["page"], "2");
        assert_eq!(current["sort"], "name");
        assert!(!current.contains_key("stale"));
    }

    #[test]
    fn test_patch_pushes_new_entry_by_default() {
        let history = MemoryHistory::new("http://h/list");
        patch_location_query(&history, &params(&[("page", QueryValue::from(1_i64))]), false);

        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.current_url(), "http://h/list?page=1");
    }

    #[test]
    fn test_patch_replace_keeps_entry_count() {
        let history = MemoryHistory::new("http://h/list");
        patch_location_query(&history, &params(&[("page", QueryValue::from(1_i64))]), true);

        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.current_url(), "http://h/list?page=1");
    }

    #[test]
    fn test_patch_without_location_is_noop() {
        let history = MemoryHistory::empty();
        patch_location_query(&history, &params(&[("page", QueryValue::from(1_i64))]), false);

        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_patch_collapses_repeated_keys() {
        let history = MemoryHistory::new("http://h/list?tag=a&page=1&tag=b");
        patch_location_query(&history, &params(&[("tag", QueryValue::from("c"))]), true);

        assert_eq!(history.current_url(), "http://h/list?tag=c&page=1");
    }
}

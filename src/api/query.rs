//! Canonical query strings.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Joined with `,` when rendered.
    List(Vec<String>),
}

impl ParamValue {
    fn render(&self) -> String {
        match self {
            ParamValue::Text(value) => value.clone(),
            ParamValue::Int(value) => value.to_string(),
            ParamValue::Float(value) => value.to_string(),
            ParamValue::Bool(value) => value.to_string(),
            ParamValue::List(values) => values.join(","),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u8> for ParamValue {
    fn from(value: u8) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Parameter set rendered as a canonical, `?`-prefixed query string.
///
/// Keys are kept sorted so two logically equal sets always render to the same
/// bytes, and therefore to the same [`QueryKey`](super::QueryKey). Absent
/// values are dropped; an empty set renders as `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    /// Like [`set`](Self::set) but `None` removes the parameter.
    pub fn set_opt<V: Into<ParamValue>>(
        mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.insert(name, value.map(Into::into));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<ParamValue>) {
        let name = name.into();
        match value {
            Some(value) => {
                self.entries.insert(name, value);
            }
            None => {
                self.entries.remove(&name);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered `(name, value)` pairs in canonical order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.render()))
    }

    pub fn to_query_string(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        // Pairs start after the leading `?`.
        let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
        for (name, value) in self.pairs() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }

    /// `path` followed by the canonical query string.
    pub fn apply(&self, path: &str) -> String {
        format!("{path}{self}")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_dropped() {
        let params = QueryParams::new()
            .set_opt("type", None::<String>)
            .set("search", "abc");
        assert_eq!(params.to_query_string(), "?search=abc");
    }

    #[test]
    fn empty_set_renders_nothing() {
        assert_eq!(QueryParams::new().to_query_string(), "");
        assert_eq!(QueryParams::new().apply("/api/admin/icons/list"), "/api/admin/icons/list");
    }

    #[test]
    fn keys_are_sorted_and_values_stringified() {
        let params = QueryParams::new()
            .set("visible", true)
            .set("limit", 20)
            .set("ratio", 1.5)
            .set("ids", vec!["3".to_string(), "1".to_string()]);
        assert_eq!(
            params.to_query_string(),
            "?ids=3%2C1&limit=20&ratio=1.5&visible=true"
        );
    }

    #[test]
    fn values_are_url_encoded() {
        let params = QueryParams::new().set("search", "kim & lee");
        assert_eq!(params.to_query_string(), "?search=kim+%26+lee");
    }

    #[test]
    fn first_pair_follows_the_question_mark_directly() {
        let params = QueryParams::new().set("status", "pending").set("page", 2);
        assert_eq!(
            params.apply("/api/admin/reservations/list"),
            "/api/admin/reservations/list?page=2&status=pending"
        );
        assert!(!params.to_query_string().contains("?&"));
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = QueryParams::new().set("b", 1).set("a", 2);
        let b = QueryParams::new().set("a", 2).set("b", 1);
        assert_eq!(a.to_query_string(), b.to_query_string());
    }

    #[test]
    fn set_opt_none_removes_previous_value() {
        let params = QueryParams::new()
            .set("status", "pending")
            .set_opt("status", None::<&str>);
        assert!(params.is_empty());
    }
}

/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::graph::errors::{ErrorCode, GraphError};
use crate::graph::parsers::is_truthy;
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered, de-duplicated set of field names sent as the `fields` parameter.
///
/// Fields can be given as a comma separated string, a list of names or a mapping of
/// name to flag where only the names flagged `true` are kept. Strings, lists and
/// [`Fields::from_flags`] keep the order given. A `BTreeMap` or a JSON object yields its
/// names in key order.
///
/// ```rust
/// use fbgraph::graph::Fields;
/// use std::collections::BTreeMap;
///
/// assert_eq!(Fields::from("name, id,name").to_string(), "name,id");
/// assert_eq!(Fields::from(vec!["name", "id"]).to_string(), "name,id");
/// assert_eq!(Fields::from_flags([("name", true), ("link", false), ("id", true)]).to_string(), "name,id");
/// assert_eq!(Fields::from(BTreeMap::from([("name", true), ("id", true)])).to_string(), "id,name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields(Vec<String>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field name, ignoring blanks and names already present
    pub fn push(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.0.iter().any(|f| f == name) {
            return;
        }
        self.0.push(name.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Builds from `(name, wanted)` pairs keeping the order they are given in
    pub fn from_flags<S, I>(flags: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, bool)>,
    {
        flags
            .into_iter()
            .filter_map(|(name, wanted)| wanted.then_some(name))
            .collect()
    }

    /// Value to transmit, None when there is nothing to ask for
    pub fn to_param(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.0.join(","))
    }
}

impl std::fmt::Display for Fields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Fields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for name in iter {
            // Entries may themselves be comma separated
            for part in name.as_ref().split(',') {
                fields.push(part);
            }
        }
        fields
    }
}

impl From<&str> for Fields {
    fn from(value: &str) -> Self {
        std::iter::once(value).collect()
    }
}

impl From<String> for Fields {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&String> for Fields {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Fields {
    fn from(value: Vec<S>) -> Self {
        value.into_iter().collect()
    }
}

impl<S: AsRef<str>> From<&[S]> for Fields {
    fn from(value: &[S]) -> Self {
        value.iter().collect()
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Fields {
    fn from(value: [S; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<S: AsRef<str>> From<BTreeMap<S, bool>> for Fields {
    fn from(value: BTreeMap<S, bool>) -> Self {
        value
            .into_iter()
            .filter_map(|(name, wanted)| wanted.then_some(name))
            .collect()
    }
}

// Accepts the loosely typed forms a caller may have decoded from JSON
impl TryFrom<&Value> for Fields {
    type Error = GraphError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let invalid =
            || GraphError::validation(ErrorCode::InvalidParams, "Parameter (fields) not valid");
        match value {
            Value::Null => Ok(Fields::new()),
            Value::String(s) => Ok(Fields::from(s)),
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()
                .map(Fields::from),
            // serde_json maps iterate in key order
            Value::Object(map) => Ok(map
                .iter()
                .filter(|(_, flag)| is_truthy(flag))
                .map(|(name, _)| name)
                .collect()),
            _ => Err(invalid()),
        }
    }
}

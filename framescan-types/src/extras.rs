//! Flat key/value envelope carried across the system boundary.
//!
//! A scan invocation passes its parameters in as an [`Extras`] bag and
//! receives the terminal result back as another one. Values are typed;
//! a getter returns `None` when the key is absent *or* holds a value of
//! a different type, so a malformed carrier degrades to defaults
//! instead of failing the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single typed value stored in an [`Extras`] envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraValue {
    Bool(bool),
    Int(i64),
    IntList(Vec<i64>),
    Text(String),
    Bytes(Vec<u8>),
}

/// Flat key/value carrier for scan parameters and scan results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extras {
    entries: BTreeMap<String, ExtraValue>,
}

impl Extras {
    /// Create an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over the stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.entries.insert(key.to_string(), ExtraValue::Bool(value));
    }

    pub fn put_int(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), ExtraValue::Int(value));
    }

    pub fn put_int_list(&mut self, key: &str, values: Vec<i64>) {
        self.entries
            .insert(key.to_string(), ExtraValue::IntList(values));
    }

    pub fn put_text(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .insert(key.to_string(), ExtraValue::Text(value.into()));
    }

    pub fn put_bytes(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_string(), ExtraValue::Bytes(value));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(ExtraValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(ExtraValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int_list(&self, key: &str) -> Option<&[i64]> {
        match self.entries.get(key) {
            Some(ExtraValue::IntList(values)) => Some(values),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ExtraValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.entries.get(key) {
            Some(ExtraValue::Bytes(value)) => Some(value),
            _ => None,
        }
    }
}

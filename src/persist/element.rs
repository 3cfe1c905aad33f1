//! The persisted element layout.
//!
//! An element is a single-key JSON object: the key is the scheme's type
//! id, the value an object of fields. Leaf fields are strings (numbers
//! in decimal text, booleans as `"true"`/`"false"`); repeated children
//! such as rules sit under a singular key as an array of field objects,
//! and plain string lists are arrays of strings.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

/// Builds one element, field by field.
pub struct ElementWriter {
    tag: &'static str,
    fields: Map<String, Value>,
}

impl ElementWriter {
    pub fn new(tag: &'static str) -> Self {
        ElementWriter {
            tag,
            fields: Map::new(),
        }
    }

    pub fn text(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Write the field only when a value is present.
    pub fn opt_text(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.text(key, value),
            None => self,
        }
    }

    pub fn number<T: fmt::Display>(self, key: &str, value: T) -> Self {
        let text = value.to_string();
        self.text(key, &text)
    }

    pub fn boolean(self, key: &str, value: bool) -> Self {
        self.text(key, if value { "true" } else { "false" })
    }

    pub fn list(mut self, key: &str, values: &[String]) -> Self {
        let items = values
            .iter()
            .map(|value| Value::String(value.clone()))
            .collect();
        self.fields.insert(key.to_string(), Value::Array(items));
        self
    }

    /// Nested field objects under a singular key, e.g. `"Rule"`.
    pub fn children(mut self, key: &str, items: Vec<Value>) -> Self {
        self.fields.insert(key.to_string(), Value::Array(items));
        self
    }

    pub fn finish(self) -> Value {
        let mut element = Map::new();
        element.insert(self.tag.to_string(), Value::Object(self.fields));
        Value::Object(element)
    }
}

/// Builds one child field object (no tag), for `ElementWriter::children`.
pub struct ChildWriter {
    fields: Map<String, Value>,
}

impl ChildWriter {
    pub fn new() -> Self {
        ChildWriter { fields: Map::new() }
    }

    pub fn text(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    pub fn number<T: fmt::Display>(self, key: &str, value: T) -> Self {
        let text = value.to_string();
        self.text(key, &text)
    }

    pub fn list(mut self, key: &str, values: &[String]) -> Self {
        let items = values
            .iter()
            .map(|value| Value::String(value.clone()))
            .collect();
        self.fields.insert(key.to_string(), Value::Array(items));
        self
    }

    pub fn finish(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for ChildWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads fields out of one element. Missing or unparseable fields fall
/// back to caller-supplied defaults, so old or hand-edited files still
/// load.
pub struct ElementReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> ElementReader<'a> {
    /// Split a single-key element into its tag and a reader over its
    /// fields. `None` when the value is not shaped like an element.
    pub fn open(element: &'a Value) -> Option<(&'a str, ElementReader<'a>)> {
        let object = element.as_object()?;
        if object.len() != 1 {
            return None;
        }
        let (tag, fields) = object.iter().next()?;
        Some((
            tag.as_str(),
            ElementReader {
                fields: fields.as_object()?,
            },
        ))
    }

    pub fn text(&self, key: &str, default: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(value)) => value.clone(),
            _ => default.to_string(),
        }
    }

    pub fn opt_text(&self, key: &str) -> Option<String> {
        match self.fields.get(key) {
            Some(Value::String(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Parse a numeric field out of its decimal text.
    pub fn parsed<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.fields.get(key) {
            Some(Value::String(value)) => value.parse().unwrap_or(default),
            _ => default,
        }
    }

    pub fn boolean(&self, key: &str, default: bool) -> bool {
        match self.fields.get(key) {
            Some(Value::String(value)) => match value.as_str() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            _ => default,
        }
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Readers over the child field objects stored under `key`.
    pub fn children(&self, key: &str) -> Vec<ElementReader<'a>> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_object())
                .map(|fields| ElementReader { fields })
                .collect(),
            _ => Vec::new(),
        }
    }
}

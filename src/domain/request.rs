use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::validation::ValidationLocation;

// Framework-neutral view of an incoming request, as seen by validators
// and business operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub method: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl ServiceRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            params: BTreeMap::new(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: Value::Null,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        // Header names are case-insensitive; store them lowercased.
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    // Look up a raw input value by location. Non-body values are strings.
    pub fn input(&self, location: ValidationLocation, field: &str) -> Option<Value> {
        match location {
            ValidationLocation::Body => self.body.get(field).cloned(),
            ValidationLocation::Query => self.query.get(field).cloned().map(Value::String),
            ValidationLocation::Params => self.params.get(field).cloned().map(Value::String),
            ValidationLocation::Headers => self
                .headers
                .get(&field.to_ascii_lowercase())
                .cloned()
                .map(Value::String),
        }
    }
}

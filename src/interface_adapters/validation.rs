use serde_json::Value;
use thiserror::Error;

use crate::domain::ports::RequestValidator;
use crate::domain::request::ServiceRequest;
use crate::domain::validation::{ValidationError, ValidationLocation, ValidationResult};

// A single constraint applied to one request input.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Present,
    Text,
    Length { min: usize, max: usize },
    PositiveInteger,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorConfigError {
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("invalid length bounds for {field}: min {min} is greater than max {max}")]
    InvalidLength { field: String, min: usize, max: usize },
}

#[derive(Debug, Clone)]
struct FieldRule {
    location: ValidationLocation,
    field: String,
    rules: Vec<Rule>,
}

// Declarative validator: every declared field is required, and only the
// first failing rule of a field is reported. Failures come back in
// declaration order.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    fields: Vec<FieldRule>,
}

impl FieldRules {
    // Validator that accepts every request.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn builder() -> FieldRulesBuilder {
        FieldRulesBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct FieldRulesBuilder {
    fields: Vec<FieldRule>,
}

impl FieldRulesBuilder {
    pub fn rule(mut self, location: ValidationLocation, field: &str, rule: Rule) -> Self {
        match self
            .fields
            .iter_mut()
            .find(|known| known.location == location && known.field == field)
        {
            Some(known) => known.rules.push(rule),
            None => self.fields.push(FieldRule {
                location,
                field: field.to_string(),
                rules: vec![rule],
            }),
        }
        self
    }

    pub fn build(self) -> Result<FieldRules, ValidatorConfigError> {
        for field in &self.fields {
            if field.field.trim().is_empty() {
                return Err(ValidatorConfigError::EmptyFieldName);
            }
            for rule in &field.rules {
                if let Rule::Length { min, max } = rule {
                    if min > max {
                        return Err(ValidatorConfigError::InvalidLength {
                            field: field.field.clone(),
                            min: *min,
                            max: *max,
                        });
                    }
                }
            }
        }

        Ok(FieldRules {
            fields: self.fields,
        })
    }
}

impl RequestValidator for FieldRules {
    fn validate(&self, request: &ServiceRequest) -> ValidationResult {
        self.fields
            .iter()
            .filter_map(|field| check_field(field, request))
            .collect()
    }
}

fn check_field(field: &FieldRule, request: &ServiceRequest) -> Option<ValidationError> {
    let name = &field.field;
    let value = match request.input(field.location, name) {
        Some(Value::Null) | None => {
            return Some(ValidationError::new(
                name.clone(),
                format!("{name} is required"),
                field.location,
            ));
        }
        Some(value) => value,
    };

    field
        .rules
        .iter()
        .find_map(|rule| check_rule(rule, name, &value))
        .map(|message| ValidationError::new(name.clone(), message, field.location).with_value(value))
}

fn check_rule(rule: &Rule, name: &str, value: &Value) -> Option<String> {
    match rule {
        Rule::Present => None,
        Rule::Text => (!value.is_string()).then(|| format!("{name} must be a string")),
        Rule::Length { min, max } => {
            let ok = value
                .as_str()
                .map(|text| (*min..=*max).contains(&text.chars().count()))
                .unwrap_or(false);
            (!ok).then(|| format!("{name} must be between {min} and {max} characters"))
        }
        Rule::PositiveInteger => {
            let parsed = match value {
                Value::Number(number) => number.as_u64(),
                Value::String(text) => text.trim().parse::<u64>().ok(),
                _ => None,
            };
            (!matches!(parsed, Some(n) if n > 0))
                .then(|| format!("{name} must be a positive integer"))
        }
        Rule::Email => {
            let ok = value.as_str().map(looks_like_email).unwrap_or(false);
            (!ok).then(|| format!("{name} must be a valid email address"))
        }
    }
}

fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

//! Declarative request validation.
//!
//! A [`Schema`] is an ordered list of fields, each with an ordered list of
//! rules. Every rule of every field runs; the violations are joined with
//! `", "` in declaration order so a request always gets one stable message.

use email_address::{EmailAddress, Options};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub mod sanitize;

pub use sanitize::escape_html;

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Fails with the field's default message
    NotEmpty,
    Email(&'static str),
    MinLength(usize, &'static str),
    OneOf(&'static [&'static str], &'static str),
}

impl Rule {
    fn violation(&self, value: &str, default_message: &'static str) -> Option<&'static str> {
        let ok = match self {
            Rule::NotEmpty => !value.is_empty(),
            Rule::Email(_) => is_email(value),
            Rule::MinLength(min, _) => value.chars().count() >= *min,
            Rule::OneOf(allowed, _) => allowed.iter().any(|a| *a == value),
        };
        if ok {
            return None;
        }
        Some(match self {
            Rule::NotEmpty => default_message,
            Rule::Email(msg) | Rule::MinLength(_, msg) | Rule::OneOf(_, msg) => *msg,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub message: &'static str,
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl Field {
    pub fn new(name: &'static str, message: &'static str) -> Self {
        Self {
            name,
            message,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Skip every rule when the field is absent or null
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Run every rule against `body`. Call [`Checked::finish`] to get the values.
    pub fn check(&self, body: &Map<String, Value>) -> Checked {
        let mut slots = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let raw = body.get(field.name).filter(|v| !v.is_null());
            if field.optional && raw.is_none() {
                slots.push(Slot {
                    name: field.name,
                    value: None,
                    errors: Vec::new(),
                });
                continue;
            }

            let value = raw.map(stringify).unwrap_or_default();
            let value = value.trim();
            let errors = field
                .rules
                .iter()
                .filter_map(|rule| rule.violation(value, field.message))
                .map(str::to_string)
                .collect();

            slots.push(Slot {
                name: field.name,
                value: Some(escape_html(value)),
                errors,
            });
        }

        Checked { slots }
    }
}

#[derive(Debug)]
struct Slot {
    name: &'static str,
    value: Option<String>,
    errors: Vec<String>,
}

/// Outcome of the synchronous rules; asynchronous checks add to it via [`Checked::reject`].
#[derive(Debug)]
pub struct Checked {
    slots: Vec<Slot>,
}

impl Checked {
    /// Sanitized value so far, even if the field has violations
    pub fn value(&self, name: &str) -> Option<&str> {
        self.slot(name).and_then(|s| s.value.as_deref())
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.slot(name).map(|s| s.errors.is_empty()).unwrap_or(false)
    }

    /// Record a violation found outside the schema, in `name`'s position
    pub fn reject(&mut self, name: &str, message: impl Into<String>) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.name == name) {
            slot.errors.push(message.into());
        }
    }

    pub fn finish(self) -> Result<Validated, ApiError> {
        let errors: Vec<String> = self
            .slots
            .iter()
            .flat_map(|s| s.errors.iter().cloned())
            .collect();
        if !errors.is_empty() {
            return Err(ApiError::ValidationFailed(errors.join(", ")));
        }

        Ok(Validated {
            values: self
                .slots
                .into_iter()
                .filter_map(|s| s.value.map(|v| (s.name, v)))
                .collect(),
        })
    }

    fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }
}

/// Trimmed, escaped values of a request that passed validation
#[derive(Debug)]
pub struct Validated {
    values: Vec<(&'static str, String)>,
}

impl Validated {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    /// Value of a required field; empty when the schema did not declare it
    pub fn take(&mut self, name: &str) -> String {
        self.values
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| std::mem::take(v))
            .unwrap_or_default()
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Bare address syntax plus a dotted domain, so `anna@localhost` and
/// `Anna <anna@gmail.com>` are refused
fn is_email(value: &str) -> bool {
    match EmailAddress::parse_with_options(value, Options::default().without_display_text()) {
        // A bracketed address with no display text still parses
        Ok(address) if address.email() == value => {
            let domain = address.domain();
            domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        _ => false,
    }
}

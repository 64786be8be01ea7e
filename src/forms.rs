//! Form intake pipeline.
//!
//! Raw submissions are normalized first (trim, markup escaping, multi-value
//! coercion), then checked by independent per-field rules. Every failing rule
//! contributes a [`FieldError`]; nothing short-circuits. A failed submission
//! hands back the normalized echo so the form can be redisplayed as typed.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

/// Letters and digits only
pub static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("valid alphanumeric pattern"));

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub value: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>, value: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            value: value.to_string(),
        }
    }
}

/// Result of running a submission through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T, F> {
    Valid(T),
    Invalid { errors: Vec<FieldError>, echo: F },
}

/// A form that can be normalized and checked
pub trait FormIntake: Sized {
    /// Fully normalized value ready for persistence
    type Value;

    /// Field names in declaration order; errors are reported in this order
    const FIELDS: &'static [&'static str];

    /// Trim, escape and coerce the raw submission
    fn normalize(self) -> Self;

    /// Run every field rule against normalized input
    fn check(&self) -> Result<Self::Value, Vec<FieldError>>;
}

/// Normalize `raw`, then validate it
pub fn validate<F: FormIntake>(raw: F) -> Validated<F::Value, F> {
    let echo = raw.normalize();
    match echo.check() {
        Ok(value) => Validated::Valid(value),
        Err(mut errors) => {
            errors.sort_by_key(|e| field_position(F::FIELDS, &e.field));
            Validated::Invalid { errors, echo }
        }
    }
}

fn field_position(fields: &[&str], name: &str) -> usize {
    fields.iter().position(|f| *f == name).unwrap_or(fields.len())
}

// ---------------------------------------------------------------------------
// Multi-valued fields
// ---------------------------------------------------------------------------

/// A field that may arrive as a scalar or as a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MultiValue {
    One(String),
    Many(Vec<String>),
}

impl MultiValue {
    /// Absent input becomes an empty list, a scalar a one-element list
    pub fn into_list(value: Option<Self>) -> Vec<String> {
        match value {
            None => Vec::new(),
            Some(MultiValue::One(v)) => vec![v],
            Some(MultiValue::Many(vs)) => vs,
        }
    }
}

/// `deserialize_with` helper coercing a multi-valued field into a list
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<MultiValue>::deserialize(deserializer)?;
    Ok(MultiValue::into_list(value))
}

// ---------------------------------------------------------------------------
// Sanitizers
// ---------------------------------------------------------------------------

/// Replace markup-significant characters with HTML entities
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim then escape
pub fn sanitize(value: &str) -> String {
    escape(value.trim())
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Non-empty after normalization
pub fn required(field: &str, value: &str, message: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(FieldError::new(field, message, value))
    } else {
        Ok(())
    }
}

/// At most `max` characters
pub fn bounded(field: &str, value: &str, max: usize, message: &str) -> Result<(), FieldError> {
    if value.chars().count() > max {
        Err(FieldError::new(field, message, value))
    } else {
        Ok(())
    }
}

/// Optional ISO-8601 date; an empty value is skipped rather than rejected
pub fn optional_date(field: &str, value: &str, message: &str) -> Result<Option<NaiveDate>, FieldError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_iso_date(value)
        .map(Some)
        .ok_or_else(|| FieldError::new(field, message, value))
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|dt| dt.date())
}

/// Store identifier reference
pub fn identifier(field: &str, value: &str, message: &str) -> Result<Uuid, FieldError> {
    Uuid::parse_str(value).map_err(|_| FieldError::new(field, message, value))
}

/// Flatten derived-rule failures into `FieldError`s, following `fields` order
pub fn rule_failures(
    result: Result<(), ValidationErrors>,
    fields: &[(&str, &str)],
) -> Vec<FieldError> {
    let errors = match result {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };
    let by_field = errors.field_errors();

    let mut out = Vec::new();
    for &(name, value) in fields {
        for (key, failures) in by_field.iter() {
            if AsRef::<str>::as_ref(key) != name {
                continue;
            }
            for failure in failures.iter() {
                let message = failure
                    .message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(failure.code.to_string()));
                out.push(FieldError::new(name, message, value));
            }
        }
    }
    out
}

/// Gather rule results, keeping every failure
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn rule(&mut self, result: Result<(), FieldError>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    pub fn take<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// `Ok(build())` when nothing failed
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, Vec<FieldError>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or_else(Vec::new)
    }
}

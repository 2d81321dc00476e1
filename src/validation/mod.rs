//! Request body validation
//!
//! Turns an untrusted request body into an [`Item`]. Decoding and schema
//! validation are separate steps so the handler can tell a body that is not
//! JSON at all apart from a JSON object with bad fields.
//!
//! Fields are checked in declaration order (`name`, `pieces`, `year`,
//! `theme`, `difficulty`, `price_us`) and every issue is collected; callers
//! that only report one issue must take the first.

pub mod shaper;

use crate::models::{Difficulty, Item};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

pub use shaper::{ErrorInfo, RequestRejection};

/// Validation error codes
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Required field is missing
    MissingRequired,
    /// Invalid data type
    InvalidType,
    /// Value outside the allowed set
    InvalidEnum,
    /// Body is JSON but not an object
    SchemaViolation,
}

/// One problem found while validating a body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldIssue {
    /// Offending field; `None` when the problem is not tied to a field
    pub field: Option<String>,
    /// Human readable message
    pub message: String,
    /// Error code for machine processing
    pub code: ValidationErrorCode,
}

impl FieldIssue {
    fn new(field: Option<&str>, message: impl Into<String>, code: ValidationErrorCode) -> Self {
        Self {
            field: field.map(str::to_string),
            message: message.into(),
            code,
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(Some(field), "Field required", ValidationErrorCode::MissingRequired)
    }

    fn invalid_type(field: &str, message: impl Into<String>) -> Self {
        Self::new(Some(field), message, ValidationErrorCode::InvalidType)
    }
}

/// Body was valid JSON but did not satisfy the item schema
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// First issue in declaration order, if any
    pub fn first(&self) -> Option<&FieldIssue> {
        self.issues.first()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|issue| match &issue.field {
                Some(field) => format!("{field}: {}", issue.message),
                None => issue.message.clone(),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Body could not be decoded as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedBody {
    /// Decoder message, for logs only
    pub reason: String,
}

impl fmt::Display for MalformedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body is not valid JSON: {}", self.reason)
    }
}

/// Decode raw body bytes into an untyped JSON value
pub fn decode_body(bytes: &[u8]) -> Result<Value, MalformedBody> {
    serde_json::from_slice(bytes).map_err(|e| MalformedBody {
        reason: e.to_string(),
    })
}

/// Validate a decoded body against the item schema
pub fn validate_item(value: &Value) -> Result<Item, ValidationFailure> {
    let Some(object) = value.as_object() else {
        return Err(ValidationFailure::new(vec![FieldIssue::new(
            None,
            "Input should be a valid dictionary or object to extract fields from",
            ValidationErrorCode::SchemaViolation,
        )]));
    };

    let mut issues = Vec::new();

    let name = keep(&mut issues, text_field(object, "name"));
    let pieces = keep(&mut issues, integer_field(object, "pieces"));
    let year = keep(&mut issues, integer_field(object, "year"));
    let theme = keep(&mut issues, text_field(object, "theme"));
    let difficulty = keep(&mut issues, difficulty_field(object, "difficulty"));
    let price_us = keep(&mut issues, number_field(object, "price_us"));

    match (name, pieces, year, theme, difficulty, price_us) {
        (Some(name), Some(pieces), Some(year), Some(theme), Some(difficulty), Some(price_us)) => {
            Ok(Item {
                name,
                pieces,
                year,
                theme,
                difficulty,
                price_us,
            })
        }
        _ => Err(ValidationFailure::new(issues)),
    }
}

/// Decode and validate in one step
pub fn parse_item(bytes: &[u8]) -> Result<Item, RequestRejection> {
    let value = decode_body(bytes).map_err(RequestRejection::MalformedBody)?;
    validate_item(&value).map_err(RequestRejection::SchemaViolation)
}

fn keep<T>(issues: &mut Vec<FieldIssue>, result: Result<T, FieldIssue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(issue) => {
            issues.push(issue);
            None
        }
    }
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, FieldIssue> {
    object.get(field).ok_or_else(|| FieldIssue::missing(field))
}

fn text_field(object: &Map<String, Value>, field: &str) -> Result<String, FieldIssue> {
    match required(object, field)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(FieldIssue::invalid_type(field, "Input should be a valid string")),
    }
}

fn integer_field(object: &Map<String, Value>, field: &str) -> Result<i64, FieldIssue> {
    match required(object, field)? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() != 0.0 => Err(FieldIssue::invalid_type(
                    field,
                    "Input should be a valid integer, got a number with a fractional part",
                )),
                Some(f) => whole_number(f)
                    .ok_or_else(|| FieldIssue::invalid_type(field, "Input should be a valid integer")),
                None => Err(FieldIssue::invalid_type(field, "Input should be a valid integer")),
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_number))
                .ok_or_else(|| {
                    FieldIssue::invalid_type(
                        field,
                        "Input should be a valid integer, unable to parse string as an integer",
                    )
                })
        }
        _ => Err(FieldIssue::invalid_type(field, "Input should be a valid integer")),
    }
}

/// `f` as an `i64` when it is finite, has no fractional part and fits
fn whole_number(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn number_field(object: &Map<String, Value>, field: &str) -> Result<f64, FieldIssue> {
    match required(object, field)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FieldIssue::invalid_type(field, "Input should be a valid number")),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(FieldIssue::invalid_type(
                field,
                "Input should be a valid number, unable to parse string as a number",
            )),
        },
        _ => Err(FieldIssue::invalid_type(field, "Input should be a valid number")),
    }
}

fn difficulty_field(object: &Map<String, Value>, field: &str) -> Result<Difficulty, FieldIssue> {
    let value = required(object, field)?;
    value
        .as_str()
        .and_then(Difficulty::from_literal)
        .ok_or_else(|| {
            FieldIssue::new(
                Some(field),
                format!("Input should be {}", difficulty_choices()),
                ValidationErrorCode::InvalidEnum,
            )
        })
}

/// `'easy', 'medium' or 'hard'`
fn difficulty_choices() -> String {
    let quoted: Vec<String> = Difficulty::ALL
        .iter()
        .map(|d| format!("'{}'", d.as_str()))
        .collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

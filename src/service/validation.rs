//! Request validation against per-field rules.

use crate::error::AppError;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    /// `YYYY-MM-DD`.
    Date,
}

#[derive(Clone, Copy, Debug)]
pub struct ValidationRule {
    pub required: bool,
    /// In characters, not bytes.
    pub max_length: Option<usize>,
    pub format: Option<Format>,
}

impl ValidationRule {
    pub const fn required() -> Self {
        ValidationRule {
            required: true,
            max_length: None,
            format: None,
        }
    }

    pub const fn optional() -> Self {
        ValidationRule {
            required: false,
            max_length: None,
            format: None,
        }
    }

    pub const fn max(self, n: usize) -> Self {
        ValidationRule {
            max_length: Some(n),
            ..self
        }
    }

    pub const fn format(self, f: Format) -> Self {
        ValidationRule {
            format: Some(f),
            ..self
        }
    }
}

pub type Rules = [(&'static str, ValidationRule)];

pub const FACULTY_RULES: &Rules = &[
    ("name", ValidationRule::required().max(100)),
    ("description", ValidationRule::optional()),
    ("established_date", ValidationRule::optional().format(Format::Date)),
    ("dean", ValidationRule::optional().max(100)),
];

pub const STUDENT_RULES: &Rules = &[
    ("first_name", ValidationRule::required().max(50)),
    ("last_name", ValidationRule::required().max(50)),
    ("email", ValidationRule::required().max(254).format(Format::Email)),
    ("student_id", ValidationRule::required().max(20)),
    ("faculty_id", ValidationRule::required()),
    ("enrollment_date", ValidationRule::required().format(Format::Date)),
    ("graduation_year", ValidationRule::optional()),
    ("date_of_birth", ValidationRule::optional().format(Format::Date)),
    ("phone_number", ValidationRule::optional().max(15)),
    ("address", ValidationRule::optional()),
    ("is_active", ValidationRule::optional()),
];

pub const POST_RULES: &Rules = &[
    ("title", ValidationRule::optional().max(20)),
    ("description", ValidationRule::optional().max(5000)),
];

/// Columns the database manages; clients never write them.
pub const READONLY_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body: required fields present, present fields well-formed, no unknown fields.
    pub fn validate(body: &HashMap<String, Value>, rules: &Rules) -> Result<(), AppError> {
        Self::reject_unknown(body, rules)?;
        for (col, rule) in rules {
            let val = body.get(*col);
            if rule.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", col)));
            }
            if let Some(v) = val {
                validate_field(col, v, rule)?;
            }
        }
        Ok(())
    }

    /// Validate only the fields present in body (for PATCH). Required fields may be absent but not null.
    pub fn validate_partial(body: &HashMap<String, Value>, rules: &Rules) -> Result<(), AppError> {
        Self::reject_unknown(body, rules)?;
        for (col, v) in body {
            if let Some((_, rule)) = rules.iter().find(|(name, _)| *name == col.as_str()) {
                if rule.required && v.is_null() {
                    return Err(AppError::Validation(format!("{} cannot be null", col)));
                }
                validate_field(col, v, rule)?;
            }
        }
        Ok(())
    }

    fn reject_unknown(body: &HashMap<String, Value>, rules: &Rules) -> Result<(), AppError> {
        for key in body.keys() {
            if READONLY_FIELDS.contains(&key.as_str()) {
                return Err(AppError::BadRequest(format!("{} is read-only", key)));
            }
            if !rules.iter().any(|(name, _)| *name == key.as_str()) {
                return Err(AppError::BadRequest(format!("unknown field: {}", key)));
            }
        }
        Ok(())
    }

    /// Length checks for plain string fields outside a JSON body (form submissions).
    pub fn validate_text(fields: &[(&str, &str)], rules: &Rules) -> Result<(), AppError> {
        for (col, value) in fields {
            if let Some((_, rule)) = rules.iter().find(|(name, _)| name == col) {
                validate_field(col, &Value::String(value.to_string()), rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(col: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    if let Some(format) = rule.format {
        validate_format(col, v, format)?;
    }
    if let Some(max) = rule.max_length {
        if let Some(s) = v.as_str() {
            if s.chars().count() > max {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    col, max
                )));
            }
        }
    }
    Ok(())
}

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn validate_format(col: &str, v: &Value, format: Format) -> Result<(), AppError> {
    let Some(s) = v.as_str() else {
        return Err(AppError::Validation(format!("{} must be a string", col)));
    };
    match format {
        Format::Email => {
            let re = Regex::new(EMAIL_PATTERN)
                .map_err(|_| AppError::Validation(format!("invalid pattern for {}", col)))?;
            if !re.is_match(s) {
                return Err(AppError::Validation(format!("{} must be a valid email", col)));
            }
        }
        Format::Date => {
            if chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
                return Err(AppError::Validation(format!("{} must be a date (YYYY-MM-DD)", col)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> HashMap<String, Value> {
        match v {
            Value::Object(m) => m.into_iter().collect(),
            _ => HashMap::new(),
        }
    }

    #[test]
    fn create_requires_required_fields() {
        let err = RequestValidator::validate(&map(json!({"dean": "x"})), FACULTY_RULES).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "name is required"));
        RequestValidator::validate(&map(json!({"name": "Law"})), FACULTY_RULES).unwrap();
    }

    #[test]
    fn max_length_counts_characters() {
        let ok = "é".repeat(20);
        RequestValidator::validate_text(&[("title", ok.as_str())], POST_RULES).unwrap();
        let long = "é".repeat(21);
        assert!(RequestValidator::validate_text(&[("title", long.as_str())], POST_RULES).is_err());
    }

    #[test]
    fn checks_formats() {
        let bad_email = map(json!({"email": "not-an-email"}));
        assert!(RequestValidator::validate_partial(&bad_email, STUDENT_RULES).is_err());
        let bad_date = map(json!({"enrollment_date": "01/09/2025"}));
        assert!(RequestValidator::validate_partial(&bad_date, STUDENT_RULES).is_err());
        let ok = map(json!({"email": "ada@uni.edu", "date_of_birth": null}));
        RequestValidator::validate_partial(&ok, STUDENT_RULES).unwrap();
    }

    #[test]
    fn rejects_readonly_and_unknown_fields() {
        let ro = map(json!({"created_at": "2025-01-01T00:00:00Z"}));
        assert!(matches!(
            RequestValidator::validate_partial(&ro, STUDENT_RULES),
            Err(AppError::BadRequest(_))
        ));
        let unknown = map(json!({"nickname": "ada"}));
        assert!(matches!(
            RequestValidator::validate_partial(&unknown, STUDENT_RULES),
            Err(AppError::BadRequest(_))
        ));
        let null_required = map(json!({"first_name": null}));
        assert!(RequestValidator::validate_partial(&null_required, STUDENT_RULES).is_err());
    }
}

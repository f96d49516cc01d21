//! Fixed category tables and form value coercion.
//!
//! Each categorical field owns one ordered list of allowed literals; the code
//! of a literal is its position in that list. The same lists feed the form
//! schema, so the encodable domain and the offered choices cannot drift.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const YES_NO: &[&str] = &["No", "Yes"];
const CONTRACT: &[&str] = &["Month-to-month", "One year", "Two year"];
const PAYMENT_METHOD: &[&str] = &[
    "Electronic check",
    "Mailed check",
    "Bank transfer (automatic)",
    "Credit card (automatic)",
];
const INTERNET_SERVICE: &[&str] = &["DSL", "Fiber optic", "No"];

/// Categorical input fields with a fixed encoding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    DeviceProtection,
    TechSupport,
    Contract,
    PaymentMethod,
    StreamingMovies,
    Partner,
    InternetService,
}

impl CategoricalField {
    /// Every categorical field, in feature-vector order.
    pub const ALL: [CategoricalField; 7] = [
        CategoricalField::DeviceProtection,
        CategoricalField::TechSupport,
        CategoricalField::Contract,
        CategoricalField::PaymentMethod,
        CategoricalField::StreamingMovies,
        CategoricalField::Partner,
        CategoricalField::InternetService,
    ];

    /// Column name the downstream artifacts were fit with.
    pub fn column(self) -> &'static str {
        match self {
            CategoricalField::DeviceProtection => "DeviceProtection",
            CategoricalField::TechSupport => "TechSupport",
            CategoricalField::Contract => "Contract",
            CategoricalField::PaymentMethod => "PaymentMethod",
            CategoricalField::StreamingMovies => "StreamingMovies",
            CategoricalField::Partner => "Partner",
            CategoricalField::InternetService => "InternetService",
        }
    }

    /// Allowed literals, ordered by code.
    pub fn choices(self) -> &'static [&'static str] {
        match self {
            CategoricalField::DeviceProtection
            | CategoricalField::TechSupport
            | CategoricalField::StreamingMovies
            | CategoricalField::Partner => YES_NO,
            CategoricalField::Contract => CONTRACT,
            CategoricalField::PaymentMethod => PAYMENT_METHOD,
            CategoricalField::InternetService => INTERNET_SERVICE,
        }
    }

    /// Look up the integer code for an exact literal.
    pub fn encode(self, value: &str) -> Result<u8, InputError> {
        self.choices()
            .iter()
            .position(|choice| *choice == value)
            .map(|idx| idx as u8)
            .ok_or_else(|| InputError::UnknownCategory {
                field: self.column(),
                value: value.to_string(),
            })
    }
}

/// Input problems detected before any artifact runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A categorical value is outside its table.
    #[error("{field}: {value:?} is not one of the allowed choices")]
    UnknownCategory { field: &'static str, value: String },
    /// A numeric field could not be read as a number.
    #[error("{field}: could not convert {value} to a number")]
    NotNumeric { field: &'static str, value: String },
    /// The flag field could not be read as 0/1.
    #[error("{field}: could not convert {value} to an integer")]
    NotInteger { field: &'static str, value: String },
}

/// Loosely-typed value as submitted by a form or JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Anything else (`null` from an empty box, arrays, objects). Accepted
    /// here so it fails coercion inside the predictor instead of at parse time.
    Other(serde_json::Value),
}

impl FormValue {
    /// Coerce to an integer flag, truncating finite numbers toward zero.
    pub fn to_integer(&self, field: &'static str) -> Result<i64, InputError> {
        let not_integer = || InputError::NotInteger {
            field,
            value: self.to_string(),
        };
        match self {
            FormValue::Bool(flag) => Ok(i64::from(*flag)),
            FormValue::Number(value) if value.is_finite() => Ok(value.trunc() as i64),
            FormValue::Number(_) | FormValue::Other(_) => Err(not_integer()),
            FormValue::Text(text) => {
                let trimmed = text.trim();
                match trimmed.to_ascii_lowercase().as_str() {
                    "true" => Ok(1),
                    "false" => Ok(0),
                    _ => trimmed.parse::<i64>().map_err(|_| not_integer()),
                }
            }
        }
    }

    /// Coerce to a float. No range checks are applied.
    pub fn to_float(&self, field: &'static str) -> Result<f64, InputError> {
        let not_numeric = || InputError::NotNumeric {
            field,
            value: self.to_string(),
        };
        match self {
            FormValue::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
            FormValue::Number(value) => Ok(*value),
            FormValue::Text(text) => text.trim().parse::<f64>().map_err(|_| not_numeric()),
            FormValue::Other(_) => Err(not_numeric()),
        }
    }

    /// Encode through a category table. Only text can match a literal.
    pub fn to_code(&self, field: CategoricalField) -> Result<u8, InputError> {
        match self {
            FormValue::Text(text) => field.encode(text),
            other => Err(InputError::UnknownCategory {
                field: field.column(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Bool(flag) => write!(f, "{flag}"),
            FormValue::Number(value) => write!(f, "{value}"),
            FormValue::Text(text) => write!(f, "{text:?}"),
            FormValue::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

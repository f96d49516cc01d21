//! Raw input records and the fixed-order feature vector.

use serde::{Deserialize, Serialize};

use crate::encoding::{CategoricalField, FormValue, InputError};

/// Number of features the selector was fit with.
pub const FEATURE_COUNT: usize = 11;

/// Column order expected by the downstream artifacts.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "SeniorCitizen",
    "tenure",
    "DeviceProtection",
    "TechSupport",
    "Contract",
    "TotalCharges",
    "PaymentMethod",
    "MonthlyCharges",
    "StreamingMovies",
    "Partner",
    "InternetService",
];

/// One customer as submitted by the caller, before any coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInputRecord {
    pub senior_citizen: FormValue,
    pub tenure: FormValue,
    pub device_protection: FormValue,
    pub tech_support: FormValue,
    pub contract: FormValue,
    pub total_charges: FormValue,
    pub payment_method: FormValue,
    pub monthly_charges: FormValue,
    pub streaming_movies: FormValue,
    pub partner: FormValue,
    pub internet_service: FormValue,
}

/// Encoded features in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Encode and assemble a raw record.
    ///
    /// Fields are checked in column order; the first failure is returned.
    pub fn assemble(record: &RawInputRecord) -> Result<Self, InputError> {
        let code = |value: &FormValue, field: CategoricalField| {
            value.to_code(field).map(f64::from)
        };
        Ok(Self([
            record.senior_citizen.to_integer(FEATURE_COLUMNS[0])? as f64,
            record.tenure.to_float(FEATURE_COLUMNS[1])?,
            code(&record.device_protection, CategoricalField::DeviceProtection)?,
            code(&record.tech_support, CategoricalField::TechSupport)?,
            code(&record.contract, CategoricalField::Contract)?,
            record.total_charges.to_float(FEATURE_COLUMNS[5])?,
            code(&record.payment_method, CategoricalField::PaymentMethod)?,
            record.monthly_charges.to_float(FEATURE_COLUMNS[7])?,
            code(&record.streaming_movies, CategoricalField::StreamingMovies)?,
            code(&record.partner, CategoricalField::Partner)?,
            code(&record.internet_service, CategoricalField::InternetService)?,
        ]))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pair each value with its column name, for logging.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<FeatureVector> for [f64; FEATURE_COUNT] {
    fn from(vector: FeatureVector) -> Self {
        vector.0
    }
}

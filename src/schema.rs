//! Input form description: the eleven fields in call order.
//!
//! Rendering is left to whatever front end consumes this list. Dropdown
//! choices come straight from the encoding tables.

use crate::encoding::CategoricalField;

pub const TITLE: &str = "📉 Customer Churn Predictor";
pub const DESCRIPTION: &str = "11-input model with RFE + scaler + Trained and Tuned XGBoost";

/// Widget kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Checkbox,
    Number,
    Dropdown(CategoricalField),
}

/// One form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in [`crate::features::RawInputRecord`] and in JSON input.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Allowed values for dropdowns, empty otherwise.
    pub fn choices(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Dropdown(field) => field.choices(),
            FieldKind::Checkbox | FieldKind::Number => &[],
        }
    }

    /// Command-line flag for this field, e.g. `--total-charges`.
    pub fn flag(&self) -> String {
        format!("--{}", self.key.replace('_', "-"))
    }
}

/// Form fields in the order the prediction call takes them.
pub static FIELDS: [FieldSpec; 11] = [
    FieldSpec {
        key: "senior_citizen",
        label: "Senior Citizen",
        kind: FieldKind::Checkbox,
    },
    FieldSpec {
        key: "tenure",
        label: "Tenure",
        kind: FieldKind::Number,
    },
    FieldSpec {
        key: "device_protection",
        label: "Device Protection",
        kind: FieldKind::Dropdown(CategoricalField::DeviceProtection),
    },
    FieldSpec {
        key: "tech_support",
        label: "Tech Support",
        kind: FieldKind::Dropdown(CategoricalField::TechSupport),
    },
    FieldSpec {
        key: "contract",
        label: "Contract",
        kind: FieldKind::Dropdown(CategoricalField::Contract),
    },
    FieldSpec {
        key: "total_charges",
        label: "Total Charges",
        kind: FieldKind::Number,
    },
    FieldSpec {
        key: "payment_method",
        label: "Payment Method",
        kind: FieldKind::Dropdown(CategoricalField::PaymentMethod),
    },
    FieldSpec {
        key: "monthly_charges",
        label: "Monthly Charges",
        kind: FieldKind::Number,
    },
    FieldSpec {
        key: "streaming_movies",
        label: "Streaming Movies",
        kind: FieldKind::Dropdown(CategoricalField::StreamingMovies),
    },
    FieldSpec {
        key: "partner",
        label: "Partner",
        kind: FieldKind::Dropdown(CategoricalField::Partner),
    },
    FieldSpec {
        key: "internet_service",
        label: "Internet Service",
        kind: FieldKind::Dropdown(CategoricalField::InternetService),
    },
];

/// Find a field by its command-line flag.
pub fn field_for_flag(flag: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|field| field.flag() == flag)
}

/// Human-readable listing of the form.
pub fn describe() -> String {
    let mut lines = vec![TITLE.to_string(), DESCRIPTION.to_string(), String::new()];
    for field in &FIELDS {
        let kind = match field.kind {
            FieldKind::Checkbox => "checkbox".to_string(),
            FieldKind::Number => "number".to_string(),
            FieldKind::Dropdown(_) => format!("one of: {}", field.choices().join(" | ")),
        };
        lines.push(format!("  {:<22} {:<18} {kind}", field.flag(), field.label));
    }
    lines.join("\n")
}

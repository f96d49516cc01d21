use std::path::Path;

use churnpal::RawInputRecord;
use churnpal::artifacts::ArtifactPaths;
use serde_json::json;

/// Write a small but realistic artifact set into `dir`.
///
/// The selector keeps tenure, contract, monthly charges and internet
/// service. Three trees push towards churn for short tenure, month-to-month
/// contracts and fiber connections.
pub fn write_fixture_artifacts(dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths {
        selector: dir.join("rfe_selector.json"),
        scaler: dir.join("scaler.json"),
        classifier: dir.join("classifier.json"),
    };
    let selector = json!({
        "n_features_in": 11,
        "support": [false, true, false, false, true, false, false, true, false, false, true],
        "ranking": [5, 1, 3, 2, 1, 4, 6, 1, 7, 8, 1]
    });
    let scaler = json!({
        "mean": [32.0, 0.7, 65.0, 0.9],
        "scale": [24.0, 0.8, 30.0, 0.7]
    });
    let classifier = json!({
        "model_version": 1,
        "n_features": 4,
        "base_score": 0.27,
        "trees": [
            {"nodes": [
                {"feature": 1, "threshold": -0.25, "left": 1, "right": 2},
                {"leaf": 1.2},
                {"leaf": -1.0}
            ]},
            {"nodes": [
                {"feature": 0, "threshold": -0.5, "left": 1, "right": 2},
                {"leaf": 0.6},
                {"leaf": -0.6}
            ]},
            {"nodes": [
                {"feature": 3, "threshold": -0.5, "left": 1, "right": 2},
                {"leaf": -0.4},
                {"feature": 3, "threshold": 1.0, "left": 3, "right": 4, "default_left": false},
                {"leaf": 0.5},
                {"leaf": -0.8}
            ]}
        ]
    });
    write_json(&paths.selector, &selector);
    write_json(&paths.scaler, &scaler);
    write_json(&paths.classifier, &classifier);
    paths
}

pub fn write_json(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

/// Loyal DSL customer on a yearly contract.
pub fn loyal_customer() -> RawInputRecord {
    serde_json::from_value(json!({
        "senior_citizen": false,
        "tenure": 12,
        "device_protection": "Yes",
        "tech_support": "No",
        "contract": "One year",
        "total_charges": 850.5,
        "payment_method": "Mailed check",
        "monthly_charges": 70.2,
        "streaming_movies": "No",
        "partner": "Yes",
        "internet_service": "DSL"
    }))
    .unwrap()
}

/// New month-to-month fiber customer.
pub fn at_risk_customer() -> RawInputRecord {
    serde_json::from_value(json!({
        "senior_citizen": true,
        "tenure": 2,
        "device_protection": "No",
        "tech_support": "No",
        "contract": "Month-to-month",
        "total_charges": 190.0,
        "payment_method": "Electronic check",
        "monthly_charges": 95.0,
        "streaming_movies": "Yes",
        "partner": "No",
        "internet_service": "Fiber optic"
    }))
    .unwrap()
}

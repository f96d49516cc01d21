//! End-to-end predictions against JSON artifacts on disk.

mod support;

use churnpal::artifacts::ArtifactError;
use churnpal::encoding::FormValue;
use churnpal::predictor::{CHURN_LABEL, ERROR_PREFIX, NOT_CHURN_LABEL};
use churnpal::schema::{FIELDS, FieldKind};
use churnpal::{ChurnLabel, ChurnPredictor, FeatureVector, PredictError, config};
use support::artifacts::{at_risk_customer, loyal_customer, write_fixture_artifacts, write_json};
use support::churnpal_env::TempConfigHome;
use tempfile::tempdir;

fn fixture_predictor() -> ChurnPredictor {
    let dir = tempdir().unwrap();
    let paths = write_fixture_artifacts(dir.path());
    ChurnPredictor::load(&paths).unwrap()
}

#[test]
fn reference_record_encodes_in_fixed_order() {
    let vector = FeatureVector::assemble(&loyal_customer()).unwrap();
    assert_eq!(
        vector.as_slice(),
        &[0.0, 12.0, 1.0, 0.0, 1.0, 850.5, 1.0, 70.2, 0.0, 1.0, 0.0]
    );
}

#[test]
fn fixture_artifacts_separate_the_two_customers() {
    let predictor = fixture_predictor();
    assert_eq!(predictor.predict(&loyal_customer()), NOT_CHURN_LABEL);
    assert_eq!(predictor.predict(&at_risk_customer()), CHURN_LABEL);
    assert_eq!(
        predictor.classify(&at_risk_customer()).unwrap(),
        ChurnLabel::Churn
    );
}

#[test]
fn every_valid_combination_yields_a_label() {
    let predictor = fixture_predictor();
    let mut record = loyal_customer();
    for field in FIELDS.iter() {
        let FieldKind::Dropdown(_) = field.kind else {
            continue;
        };
        for choice in field.choices() {
            let value = FormValue::from(*choice);
            match field.key {
                "device_protection" => record.device_protection = value,
                "tech_support" => record.tech_support = value,
                "contract" => record.contract = value,
                "payment_method" => record.payment_method = value,
                "streaming_movies" => record.streaming_movies = value,
                "partner" => record.partner = value,
                "internet_service" => record.internet_service = value,
                other => panic!("unexpected dropdown {other}"),
            }
            for tenure in [0.0, 1.0, 24.0, 72.0, -3.0] {
                record.tenure = tenure.into();
                let text = predictor.predict(&record);
                assert!(
                    text == CHURN_LABEL || text == NOT_CHURN_LABEL,
                    "unexpected output {text:?}"
                );
            }
        }
    }
}

#[test]
fn invalid_inputs_return_error_text_not_labels() {
    let predictor = fixture_predictor();

    let mut record = loyal_customer();
    record.payment_method = "Crypto".into();
    let text = predictor.predict(&record);
    assert!(text.starts_with(ERROR_PREFIX), "{text}");

    let mut record = loyal_customer();
    record.total_charges = "n/a".into();
    let text = predictor.predict(&record);
    assert!(text.starts_with(ERROR_PREFIX), "{text}");
    assert!(text.contains("TotalCharges"), "{text}");

    let mut record = loyal_customer();
    record.internet_service = FormValue::Bool(false);
    assert!(predictor.predict(&record).starts_with(ERROR_PREFIX));
}

#[test]
fn predictions_are_deterministic_across_threads() {
    let predictor = std::sync::Arc::new(fixture_predictor());
    let expected = predictor.predict(&at_risk_customer());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = predictor.clone();
            std::thread::spawn(move || predictor.predict(&at_risk_customer()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn mismatched_artifacts_fail_at_load() {
    let dir = tempdir().unwrap();
    let paths = write_fixture_artifacts(dir.path());
    write_json(
        &paths.scaler,
        &serde_json::json!({"mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]}),
    );
    let err = ChurnPredictor::load(&paths).unwrap_err();
    assert!(matches!(err, ArtifactError::Incompatible { .. }), "{err}");
}

#[test]
fn tagged_result_distinguishes_input_errors() {
    let predictor = fixture_predictor();
    let mut record = loyal_customer();
    record.contract = "Three year".into();
    assert!(matches!(
        predictor.classify(&record),
        Err(PredictError::Input(_))
    ));
}

#[test]
fn default_config_points_at_app_artifacts_dir() {
    let home = TempConfigHome::new();
    let config = config::load_or_default().unwrap();
    let paths = config.artifact_paths(None).unwrap();
    let root = home.app_root();
    assert!(root.is_dir());
    assert_eq!(paths.selector, root.join("artifacts").join("rfe_selector.json"));
    assert_eq!(paths.classifier, root.join("artifacts").join("classifier.json"));
}

#[test]
fn infinite_tenure_is_compared_not_treated_as_missing() {
    let predictor = fixture_predictor();
    let mut record = at_risk_customer();
    record.internet_service = "DSL".into();

    // Long tenure pulls the margin below zero; short tenure pushes it above.
    record.tenure = "inf".into();
    assert_eq!(predictor.predict(&record), NOT_CHURN_LABEL);
    record.tenure = "-inf".into();
    assert_eq!(predictor.predict(&record), CHURN_LABEL);
}

#[test]
fn null_numeric_field_becomes_error_text() {
    let predictor = fixture_predictor();
    let mut record = loyal_customer();
    record.tenure = serde_json::from_str("null").unwrap();
    let text = predictor.predict(&record);
    assert_eq!(text, format!("{ERROR_PREFIX}tenure: could not convert null to a number"));
}

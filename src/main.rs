//! Command-line entry point: one churn prediction per invocation.

use std::path::PathBuf;

use churnpal::schema::{self, FieldKind};
use churnpal::{ChurnPredictor, RawInputRecord, config, logging};
use serde_json::{Map, Value};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<PathBuf>,
    artifacts_dir: Option<PathBuf>,
    json: Option<String>,
    fields: Map<String, Value>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Fields,
    Predict(CliOptions),
}

fn run() -> Result<(), String> {
    let options = match parse_args(std::env::args().skip(1).collect())? {
        Command::Help => {
            println!("{}", help_text());
            return Ok(());
        }
        Command::Fields => {
            println!("{}", schema::describe());
            return Ok(());
        }
        Command::Predict(options) => options,
    };

    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = match &options.config_path {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    let paths = config
        .artifact_paths(options.artifacts_dir.as_deref())
        .map_err(|err| err.to_string())?;
    let predictor = ChurnPredictor::load(&paths)
        .map_err(|err| format!("Failed to load model artifacts: {err}"))?;

    let record = build_record(options.json.as_deref(), options.fields)?;
    println!("{}", predictor.predict(&record));
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Command, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "--fields" => return Ok(Command::Fields),
            "--config" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--config requires a value".to_string())?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--artifacts" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--artifacts requires a value".to_string())?;
                options.artifacts_dir = Some(PathBuf::from(value));
            }
            "--json" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--json requires a value".to_string())?;
                options.json = Some(value.to_string());
            }
            _ => {
                let field = schema::field_for_flag(arg)
                    .ok_or_else(|| format!("Unknown argument: {arg}\n\n{}", help_text()))?;
                let value = match field.kind {
                    FieldKind::Checkbox => Value::Bool(true),
                    FieldKind::Number | FieldKind::Dropdown(_) => {
                        idx += 1;
                        let value = args
                            .get(idx)
                            .ok_or_else(|| format!("{arg} requires a value"))?;
                        Value::String(value.to_string())
                    }
                };
                options.fields.insert(field.key.to_string(), value);
            }
        }
        idx += 1;
    }
    Ok(Command::Predict(options))
}

/// Merge `--json` input with field flags (flags win) into a record.
fn build_record(json: Option<&str>, fields: Map<String, Value>) -> Result<RawInputRecord, String> {
    let mut object = match json {
        Some(text) => serde_json::from_str::<Map<String, Value>>(text)
            .map_err(|err| format!("Invalid --json object: {err}"))?,
        None => Map::new(),
    };
    object.extend(fields);
    for field in &schema::FIELDS {
        if field.kind == FieldKind::Checkbox {
            object
                .entry(field.key.to_string())
                .or_insert(Value::Bool(false));
        }
    }
    serde_json::from_value(Value::Object(object)).map_err(|err| format!("Invalid input: {err}"))
}

fn help_text() -> String {
    [
        "churnpal".to_string(),
        String::new(),
        "Usage:".to_string(),
        "  churnpal [--config <file>] [--artifacts <dir>] [--json <object>] [field flags]"
            .to_string(),
        "  churnpal --fields".to_string(),
        String::new(),
        "Options:".to_string(),
        "  --config <file>     Config file (default: <config dir>/.churnpal/config.toml).".to_string(),
        "  --artifacts <dir>   Folder holding rfe_selector.json, scaler.json, classifier.json."
            .to_string(),
        "  --json <object>     Record as a JSON object keyed by field name.".to_string(),
        "  --fields            List the input fields and their allowed values.".to_string(),
        String::new(),
        schema::describe(),
    ]
    .join("\n")
}

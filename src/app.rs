//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves configuration
//! - installs logging
//! - loads the model artifact (fatal on failure, before any form is shown)
//! - dispatches to the form or a scripting command

use clap::Parser;
use tracing::info;

use crate::app::pipeline::Predictor;
use crate::cli::{BatchArgs, Cli, Command, PredictArgs};
use crate::config::AppConfig;
use crate::encoding::{CategoryRegistry, FeatureEncoder};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::logging::LogSink;
use crate::models::{Classifier, ModelArtifact};
use crate::report::{BatchResult, OutcomeKind};

pub mod pipeline;

/// Entry point for the `salary` binary.
pub fn run() -> Result<(), AppError> {
    // We want `salary` and `salary --model m.json` to behave like `salary tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let config = AppConfig::from_env(&cli.global);
    let sink = match cli.command {
        Command::Tui => LogSink::FileOnly,
        _ => LogSink::Stderr,
    };
    crate::logging::init(&config, sink)?;

    let encoder = FeatureEncoder::new(CategoryRegistry::census());

    // The layout does not depend on a model, so it works without one.
    if let Command::Columns = cli.command {
        print!("{}", crate::report::format_columns(&encoder.column_names()));
        return Ok(());
    }

    let model = load_model(&config, &encoder)?;
    let predictor = Predictor::new(&encoder, &model);

    match cli.command {
        Command::Tui => handle_tui(&predictor, &model),
        Command::Predict(args) => handle_predict(&predictor, &args),
        Command::Batch(args) => handle_batch(&predictor, &args),
        Command::Columns => Ok(()),
    }
}

/// Load the artifact and log the layout compatibility note.
pub fn load_model(config: &AppConfig, encoder: &FeatureEncoder) -> Result<ModelArtifact, AppError> {
    let model = ModelArtifact::load(&config.model_path)?;
    model.log_compatibility(&encoder.column_names());
    Ok(model)
}

fn handle_tui(predictor: &Predictor<'_>, model: &ModelArtifact) -> Result<(), AppError> {
    let summary = format!(
        "model: {} | features: {} | trained with: {}",
        model.spec().display_name(),
        model.input_width(),
        model.trained_with().unwrap_or("unknown"),
    );
    crate::tui::run(predictor, summary)
}

fn handle_predict(predictor: &Predictor<'_>, args: &PredictArgs) -> Result<(), AppError> {
    let rendered = predictor.run(&args.to_record()).render();
    match rendered.kind {
        OutcomeKind::Success => {
            println!("{}", rendered.text);
            Ok(())
        }
        OutcomeKind::Error => Err(AppError::new(EXIT_RUNTIME, rendered.text)),
    }
}

fn handle_batch(predictor: &Predictor<'_>, args: &BatchArgs) -> Result<(), AppError> {
    let input = crate::io::load_batch(&args.input, predictor.encoder().registry())?;
    info!(rows = input.records.len(), path = %args.input.display(), "running batch prediction");

    let results: Vec<BatchResult> = input
        .records
        .iter()
        .map(|(line, record)| BatchResult {
            line: *line,
            outcome: predictor.run(record).outcome,
        })
        .collect();

    print!("{}", crate::report::format_batch_csv(&results));
    eprint!("{}", crate::report::format_batch_summary(&input, &results));
    Ok(())
}

/// Rewrite argv so `salary` defaults to `salary tui`.
///
/// Rules:
/// - `salary`                            -> `salary tui`
/// - `salary --model m.json`             -> `salary tui --model m.json`
/// - `salary --model m.json predict ...` -> unchanged (global flags before a subcommand)
/// - `salary --help/--version/-h`        -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    if argv.len() < 2 {
        argv.push("tui".to_string());
        return argv;
    }

    let mut args = argv.iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" | "-V" | "--version" => return argv,
            // Global flags that take a separate value.
            "--model" | "--log-file" => {
                args.next();
            }
            flag if flag.starts_with('-') => {}
            // First positional decides: a subcommand (or `help`) or a typo clap reports.
            _ => return argv,
        }
    }

    // Only flags: treat them as form flags.
    argv.insert(1, "tui".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_binary_launches_form() {
        assert_eq!(rewrite_args(argv(&["salary"])), argv(&["salary", "tui"]));
    }

    #[test]
    fn leading_flag_is_treated_as_form_flag() {
        assert_eq!(
            rewrite_args(argv(&["salary", "--model", "m.json"])),
            argv(&["salary", "tui", "--model", "m.json"])
        );
    }

    #[test]
    fn global_flags_before_subcommand_are_untouched() {
        let args = argv(&["salary", "--model", "m.json", "predict"]);
        assert_eq!(rewrite_args(args.clone()), args);

        let cli = Cli::try_parse_from(rewrite_args(args)).unwrap();
        assert!(matches!(cli.command, Command::Predict(_)));
        assert_eq!(cli.global.model, Some(std::path::PathBuf::from("m.json")));

        let args = argv(&["salary", "--log-file=x.log", "columns"]);
        assert_eq!(rewrite_args(args.clone()), args);
        let args = argv(&["salary", "--log-file", "predict.log"]);
        assert_eq!(
            rewrite_args(args),
            argv(&["salary", "tui", "--log-file", "predict.log"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["salary", "predict"])), argv(&["salary", "predict"]));
        assert_eq!(rewrite_args(argv(&["salary", "--help"])), argv(&["salary", "--help"]));
    }

    #[test]
    fn missing_model_is_fatal_with_load_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            model_path: dir.path().join("RandomForest.json"),
            log_file: None,
            log_filter: "info".to_string(),
        };
        let encoder = FeatureEncoder::new(CategoryRegistry::census());
        let err = load_model(&config, &encoder).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_MODEL_LOAD);
        assert!(err.to_string().contains("RandomForest.json"));
    }
}

//! Command-line parsing for the salary predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! encoding/model code. Categorical flags accept exactly the registry values,
//! and numeric flags carry the same bounds as the form controls.

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, RangedI64ValueParser};
use clap::{Args, Parser, Subcommand};

use crate::domain::{AttributeRecord, NumericAttribute};
use crate::encoding::registry::{
    EDUCATION, MARITAL_STATUS, NATIVE_COUNTRY, OCCUPATION, RACE, RELATIONSHIP, SEX, WORKCLASS,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "salary",
    version,
    about = "Predict whether a person earns more than $50K/year"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Model artifact (JSON). Defaults to $SALARY_MODEL, then ./RandomForest.json.
    #[arg(long, global = true, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Append logs to this file (defaults to $SALARY_LOG_FILE).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form.
    Tui,
    /// Predict once from command-line attributes and print the result.
    Predict(PredictArgs),
    /// Predict every row of a CSV with UCI Adult column headers.
    Batch(BatchArgs),
    /// Print the encoded feature layout the model must be trained on.
    Columns,
}

/// One attribute record as flags. Defaults match the form's initial state.
#[derive(Debug, Clone, Parser)]
pub struct PredictArgs {
    #[arg(long, default_value_t = NumericAttribute::Age.bounds().default, value_parser = bounded(NumericAttribute::Age))]
    pub age: i64,

    #[arg(long, default_value = "Private", value_parser = PossibleValuesParser::new(WORKCLASS.iter().copied()))]
    pub workclass: String,

    /// Final weight (census sampling weight).
    #[arg(long, default_value_t = NumericAttribute::Fnlwgt.bounds().default, value_parser = bounded(NumericAttribute::Fnlwgt))]
    pub fnlwgt: i64,

    #[arg(long, default_value = "Bachelors", value_parser = PossibleValuesParser::new(EDUCATION.iter().copied()))]
    pub education: String,

    #[arg(long, default_value_t = NumericAttribute::EducationNum.bounds().default, value_parser = bounded(NumericAttribute::EducationNum))]
    pub education_num: i64,

    #[arg(long, default_value = "Married-civ-spouse", value_parser = PossibleValuesParser::new(MARITAL_STATUS.iter().copied()))]
    pub marital_status: String,

    #[arg(long, default_value = "Tech-support", value_parser = PossibleValuesParser::new(OCCUPATION.iter().copied()))]
    pub occupation: String,

    #[arg(long, default_value = "Wife", value_parser = PossibleValuesParser::new(RELATIONSHIP.iter().copied()))]
    pub relationship: String,

    #[arg(long, default_value = "White", value_parser = PossibleValuesParser::new(RACE.iter().copied()))]
    pub race: String,

    #[arg(long, default_value = "Female", value_parser = PossibleValuesParser::new(SEX.iter().copied()))]
    pub sex: String,

    #[arg(long, default_value_t = NumericAttribute::CapitalGain.bounds().default, value_parser = bounded(NumericAttribute::CapitalGain))]
    pub capital_gain: i64,

    #[arg(long, default_value_t = NumericAttribute::CapitalLoss.bounds().default, value_parser = bounded(NumericAttribute::CapitalLoss))]
    pub capital_loss: i64,

    #[arg(long, default_value_t = NumericAttribute::HoursPerWeek.bounds().default, value_parser = bounded(NumericAttribute::HoursPerWeek))]
    pub hours_per_week: i64,

    #[arg(
        long,
        default_value = "United-States",
        hide_possible_values = true,
        value_parser = PossibleValuesParser::new(NATIVE_COUNTRY.iter().copied())
    )]
    pub native_country: String,
}

impl PredictArgs {
    pub fn to_record(&self) -> AttributeRecord {
        AttributeRecord {
            age: self.age as f64,
            workclass: self.workclass.clone(),
            fnlwgt: self.fnlwgt as f64,
            education: self.education.clone(),
            education_num: self.education_num as f64,
            marital_status: self.marital_status.clone(),
            occupation: self.occupation.clone(),
            relationship: self.relationship.clone(),
            race: self.race.clone(),
            sex: self.sex.clone(),
            capital_gain: self.capital_gain as f64,
            capital_loss: self.capital_loss as f64,
            hours_per_week: self.hours_per_week as f64,
            native_country: self.native_country.clone(),
        }
    }
}

/// Range parser sharing the form control's bounds.
fn bounded(attr: NumericAttribute) -> RangedI64ValueParser<i64> {
    let bounds = attr.bounds();
    clap::value_parser!(i64).range(bounds.min..=bounds.max)
}

/// Options for batch prediction.
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Input CSV (headers: age, workclass, fnlwgt, ..., native-country).
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,
}

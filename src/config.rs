//! Runtime configuration.
//!
//! Precedence for every setting: command-line flag, then environment (a `.env`
//! file is loaded first if present), then the built-in default.

use std::path::PathBuf;

use crate::cli::GlobalArgs;

pub const DEFAULT_MODEL_PATH: &str = "RandomForest.json";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const ENV_MODEL: &str = "SALARY_MODEL";
pub const ENV_LOG_FILE: &str = "SALARY_LOG_FILE";
pub const ENV_LOG_FILTER: &str = "SALARY_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub log_file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env(args: &GlobalArgs) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    pub fn resolve(args: &GlobalArgs, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model_path = args
            .model
            .clone()
            .or_else(|| non_empty(ENV_MODEL).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
        let log_file = args
            .log_file
            .clone()
            .or_else(|| non_empty(ENV_LOG_FILE).map(PathBuf::from));
        let log_filter = non_empty(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            model_path,
            log_file,
            log_filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let cfg = AppConfig::resolve(&GlobalArgs::default(), |_| None);
        assert_eq!(cfg.model_path, PathBuf::from("RandomForest.json"));
        assert_eq!(cfg.log_file, None);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn env_overrides_default_and_flag_overrides_env() {
        let vars = env(&[(ENV_MODEL, "/models/env.json"), (ENV_LOG_FILTER, "debug"), (ENV_LOG_FILE, "")]);
        let lookup = |k: &str| vars.get(k).cloned();

        let cfg = AppConfig::resolve(&GlobalArgs::default(), lookup);
        assert_eq!(cfg.model_path, PathBuf::from("/models/env.json"));
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.log_file, None);

        let args = GlobalArgs {
            model: Some(PathBuf::from("flag.json")),
            log_file: Some(PathBuf::from("salary.log")),
        };
        let cfg = AppConfig::resolve(&args, lookup);
        assert_eq!(cfg.model_path, PathBuf::from("flag.json"));
        assert_eq!(cfg.log_file, Some(PathBuf::from("salary.log")));
    }
}

use thiserror::Error;
use valguard_core::RuleError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unknown rule '{rule_name}' for function '{function_name}'. Supported: in_range, contains, length_between, matches_regex, one_of, date_format")]
    UnknownRule {
        rule_name: String,
        function_name: String,
    },
    #[error("Rule '{rule_name}' for function '{function_name}' requires field '{field}'")]
    MissingField {
        rule_name: String,
        function_name: String,
        field: String,
    },
    #[error("Function '{function_name}' is not registered")]
    UnknownFunction { function_name: String },
    #[error("Validation error")]
    ValidationError(#[from] RuleError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error: config file not found: '{path}'")]
    FileNotFound { path: String },
    #[error("Error: input file not found: '{path}'")]
    InputNotFound { path: String },
    #[error("Value '{value}' is not a number")]
    NotANumber { value: String },
}

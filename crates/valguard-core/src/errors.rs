use thiserror::Error;

/// Errors raised while building rules or the function catalog.
///
/// Failed validations are not errors: they are reported as diagnostics
/// on the call response.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A rule was constructed with configuration it cannot honour
    #[error("Invalid configuration for rule '{rule}': {message}")]
    InvalidConfiguration { rule: String, message: String },

    /// A regex pattern failed to compile
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Two constructors produced functions with the same name
    #[error("Function '{0}' is registered more than once")]
    DuplicateFunction(String),

    /// Lookup of a name that is not in the catalog
    #[error("Function '{0}' not found in registry")]
    UnknownFunction(String),
}

impl RuleError {
    pub fn invalid_configuration(rule: &str, message: impl Into<String>) -> Self {
        RuleError::InvalidConfiguration {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

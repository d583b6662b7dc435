use anyhow::{Context, Result};
use valguard_core::{builtin_registry, register_configured, FunctionRegistry, RuleConfig};

use crate::{
    errors::CliError,
    parser::{Bound, Config, FunctionConfig},
};

fn required<T: Clone>(
    value: &Option<T>,
    function: &FunctionConfig,
    field: &str,
) -> Result<T, CliError> {
    value.clone().ok_or_else(|| CliError::MissingField {
        rule_name: function.rule.clone(),
        function_name: function.name.clone(),
        field: field.to_string(),
    })
}

/// Maps one config entry to a rule configuration.
///
/// Only checks that the fields the rule needs are present. The values
/// themselves are validated when the rule is constructed.
pub fn rule_config(function: &FunctionConfig) -> Result<RuleConfig, CliError> {
    let config = match function.rule.as_str() {
        "in_range" => {
            if function.min.is_none() && function.max.is_none() {
                return Err(CliError::MissingField {
                    rule_name: function.rule.clone(),
                    function_name: function.name.clone(),
                    field: "min or max".to_string(),
                });
            }
            match (function.min, function.max) {
                (None | Some(Bound::Integer(_)), None | Some(Bound::Integer(_))) => {
                    let as_int = |b: Option<Bound>| match b {
                        Some(Bound::Integer(i)) => Some(i),
                        _ => None,
                    };
                    RuleConfig::IntegerRange {
                        min: as_int(function.min),
                        max: as_int(function.max),
                    }
                }
                (min, max) => RuleConfig::NumberRange {
                    min: min.map(|b| b.as_f64()),
                    max: max.map(|b| b.as_f64()),
                },
            }
        }
        "contains" => RuleConfig::Contains {
            substring: required(&function.substring, function, "substring")?,
        },
        "length_between" => RuleConfig::StringLength {
            min: function.min_length,
            max: function.max_length,
        },
        "matches_regex" => RuleConfig::Regex {
            pattern: required(&function.pattern, function, "pattern")?,
            flags: function.flags.clone(),
        },
        "one_of" => RuleConfig::OneOf {
            members: required(&function.members, function, "members")?,
        },
        "date_format" => RuleConfig::DateFormat {
            format: required(&function.format, function, "format")?,
        },
        _ => {
            return Err(CliError::UnknownRule {
                rule_name: function.rule.clone(),
                function_name: function.name.clone(),
            })
        }
    };
    Ok(config)
}

/// Builds the catalog: every built-in plus the functions declared in `config`.
pub fn build_registry(config: &Config) -> Result<FunctionRegistry> {
    let mut builder = builtin_registry();
    for function in &config.function {
        let rule = rule_config(function)
            .with_context(|| format!("Failed to parse function: '{}'", function.name))?;
        register_configured(&mut builder, function.name.clone(), rule);
    }
    let registry = builder
        .build()
        .map_err(CliError::from)
        .context("Failed to build function registry")?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use valguard_core::{RuleError, Value};

    fn function(rule: &str) -> FunctionConfig {
        FunctionConfig {
            name: "custom".to_string(),
            rule: rule.to_string(),
            min: None,
            max: None,
            substring: None,
            min_length: None,
            max_length: None,
            pattern: None,
            flags: None,
            members: None,
            format: None,
        }
    }

    #[test]
    fn test_integer_bounds_make_integer_range() {
        let mut f = function("in_range");
        f.min = Some(Bound::Integer(1));
        f.max = Some(Bound::Integer(10));
        assert_eq!(
            rule_config(&f).unwrap(),
            RuleConfig::IntegerRange {
                min: Some(1),
                max: Some(10)
            }
        );
    }

    #[test]
    fn test_float_bound_makes_number_range() {
        let mut f = function("in_range");
        f.min = Some(Bound::Integer(0));
        f.max = Some(Bound::Float(0.5));
        assert_eq!(
            rule_config(&f).unwrap(),
            RuleConfig::NumberRange {
                min: Some(0.0),
                max: Some(0.5)
            }
        );
    }

    #[test]
    fn test_missing_field() {
        let err = rule_config(&function("contains")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Rule 'contains' for function 'custom' requires field 'substring'"
        );
        assert!(rule_config(&function("in_range")).is_err());
    }

    #[test]
    fn test_unknown_rule() {
        let err = rule_config(&function("is_cat")).unwrap_err();
        assert!(matches!(err, CliError::UnknownRule { .. }));
    }

    #[test]
    fn test_build_registry_with_config() {
        let mut f = function("contains");
        f.name = "has_prod".to_string();
        f.substring = Some("prod".to_string());
        let config = Config { function: vec![f] };

        let registry = build_registry(&config).unwrap();
        assert!(registry.contains("is_base64"));
        let response = registry.call("has_prod", &Value::string("eu-prod")).unwrap();
        assert_eq!(response.result, Some(true));
    }

    #[test]
    fn test_build_registry_rejects_duplicate() {
        let mut f = function("contains");
        f.name = "is_cidr".to_string();
        f.substring = Some("/".to_string());
        let config = Config { function: vec![f] };

        let err = build_registry(&config).unwrap_err();
        let cause = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(
            cause,
            CliError::ValidationError(RuleError::DuplicateFunction(_))
        ));
    }

    #[test]
    fn test_build_registry_rejects_inverted_range() {
        let mut f = function("in_range");
        f.min = Some(Bound::Integer(10));
        f.max = Some(Bound::Integer(1));
        let config = Config { function: vec![f] };

        assert!(build_registry(&config).is_err());
    }
}

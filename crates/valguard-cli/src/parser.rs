use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::errors::ConfigError;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub function: Vec<FunctionConfig>,
}

/// One configured function. Which optional fields are required depends on `rule`.
#[derive(Debug, Deserialize)]
pub struct FunctionConfig {
    pub name: String,
    pub rule: String,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    pub substring: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub flags: Option<String>,
    pub members: Option<Vec<String>>,
    pub format: Option<String>,
}

/// A range bound as written in TOML: `1` is an integer, `1.0` a float.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Integer(i64),
    Float(f64),
}

impl Bound {
    pub fn as_f64(&self) -> f64 {
        match self {
            Bound::Integer(i) => *i as f64,
            Bound::Float(f) => *f,
        }
    }
}

pub fn parse_config(path: &str) -> Result<Config> {
    if !Path::new(path).exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_string(),
        }
        .into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[function]]
name = "is_percentage"
rule = "in_range"
min = 0
max = 100.5

[[function]]
name = "is_env"
rule = "one_of"
members = ["dev", "prod"]
"#
        )
        .unwrap();

        let config = parse_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.function.len(), 2);
        assert_eq!(config.function[0].min, Some(Bound::Integer(0)));
        assert_eq!(config.function[0].max, Some(Bound::Float(100.5)));
        assert_eq!(
            config.function[1].members,
            Some(vec!["dev".to_string(), "prod".to_string()])
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let file = NamedTempFile::new().unwrap();
        let config = parse_config(file.path().to_str().unwrap()).unwrap();
        assert!(config.function.is_empty());
    }

    #[test]
    fn test_missing_config_file() {
        let err = parse_config("/nonexistent/valguard.toml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: config file not found: '/nonexistent/valguard.toml'"
        );
    }

    #[test]
    fn test_missing_name_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[function]]\nrule = \"contains\"").unwrap();
        assert!(parse_config(file.path().to_str().unwrap()).is_err());
    }
}

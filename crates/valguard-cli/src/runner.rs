use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use valguard_core::{DescriptionStyle, FunctionDefinition, FunctionRegistry, Value};
use valguard_reports::{JsonFormatter, Reporter, StdOutFormatter, Summary};

use crate::{
    constructor::build_registry,
    errors::{CliError, ConfigError},
    parser::{parse_config, Config},
    Args, Command, OutputFormat,
};

pub const EXIT_TRUE: i32 = 0;
pub const EXIT_FALSE: i32 = 1;
pub const EXIT_UNKNOWN: i32 = 2;

pub fn run(args: Args) -> Result<i32> {
    let config = match &args.config {
        Some(path) => parse_config(path)?,
        None => Config::default(),
    };
    let registry = build_registry(&config)?;
    info!(functions = registry.len(), "catalog ready");

    let version = env!("CARGO_PKG_VERSION").to_string();
    let mut reporter: Box<dyn Reporter> = match args.output {
        OutputFormat::Stdout => Box::new(StdOutFormatter::new(version)),
        OutputFormat::Json => Box::new(JsonFormatter::new(version)),
    };

    let code = match args.command {
        Command::List { markdown } => {
            let style = if markdown {
                DescriptionStyle::Markdown
            } else {
                DescriptionStyle::Plain
            };
            list(&registry, reporter.as_mut(), style);
            EXIT_TRUE
        }
        Command::Call {
            function,
            value,
            null,
            unknown,
            number,
        } => {
            let input = input_value(value, null, unknown, number)?;
            call(&registry, reporter.as_mut(), &function, &input)?
        }
        Command::Check { function, input } => {
            check(&registry, reporter.as_mut(), &function, &input)?
        }
    };
    reporter.finish();
    Ok(code)
}

pub fn list(registry: &FunctionRegistry, reporter: &mut dyn Reporter, style: DescriptionStyle) {
    let definitions: Vec<&FunctionDefinition> = registry
        .functions()
        .iter()
        .map(|function| function.definition())
        .collect();
    reporter.on_catalog(&definitions, style);
}

pub fn input_value(
    value: Option<String>,
    null: bool,
    unknown: bool,
    number: bool,
) -> Result<Value, ConfigError> {
    if unknown {
        return Ok(Value::Unknown);
    }
    if null {
        return Ok(Value::Null);
    }
    match value {
        None => Ok(Value::Null),
        Some(raw) if number => raw
            .trim()
            .parse::<f64>()
            .map(Value::number)
            .map_err(|_| ConfigError::NotANumber { value: raw }),
        Some(raw) => Ok(Value::string(raw)),
    }
}

pub fn call(
    registry: &FunctionRegistry,
    reporter: &mut dyn Reporter,
    name: &str,
    input: &Value,
) -> Result<i32> {
    let function = registry.get(name).ok_or_else(|| CliError::UnknownFunction {
        function_name: name.to_string(),
    })?;
    let response = function.call(input);
    reporter.on_response(name, input, &response);

    let code = match response.result {
        Some(true) => EXIT_TRUE,
        Some(false) => EXIT_FALSE,
        None if response.error.is_some() => EXIT_FALSE,
        None => EXIT_UNKNOWN,
    };
    Ok(code)
}

/// Evaluates every line of `path`. Empty lines are null and count as unknown.
pub fn check(
    registry: &FunctionRegistry,
    reporter: &mut dyn Reporter,
    name: &str,
    path: &Path,
) -> Result<i32> {
    let function = registry.get(name).ok_or_else(|| CliError::UnknownFunction {
        function_name: name.to_string(),
    })?;
    if !path.exists() {
        return Err(ConfigError::InputNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let values: Vec<Value> = content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                Value::Null
            } else {
                Value::string(line)
            }
        })
        .collect();

    let responses = function.call_batch(&values);
    let mut summary = Summary::default();
    for (value, response) in values.iter().zip(&responses) {
        reporter.on_response(name, value, response);
        summary.record(response);
    }
    reporter.on_summary(&summary);

    Ok(if summary.has_failures() { EXIT_FALSE } else { EXIT_TRUE })
}

//! Generic adapter exposing any [`Validator`] as a named boolean function.
//!
//! Every function built here has the same shape: one scalar parameter in,
//! one boolean out. Presence handling lives in [`ValidationFunction::call`]
//! and nowhere else:
//!
//! 1. `Unknown` input returns an unknown result.
//! 2. `Null` input also returns an unknown result; absence is not judged.
//! 3. Any known input goes to the validator. No diagnostics means `true`,
//!    any diagnostic means `false` and every diagnostic is surfaced with the
//!    parameter name as its attribute path.
//!
//! In cases 1 and 2 the wrapped validator is never invoked. A known value of
//! a type the validator cannot check is the validator's own failure to report.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    diagnostic::Diagnostics,
    validator::{DescriptionStyle, Validator},
    value::{ParameterType, Value},
};

/// Name given to the single parameter unless overridden.
pub const DEFAULT_PARAMETER_NAME: &str = "value";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub allow_null: bool,
    pub allow_unknown: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    Bool,
}

/// Static metadata a host uses to expose a function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub markdown_description: String,
    pub parameter: Parameter,
    pub return_type: ReturnType,
}

impl FunctionDefinition {
    pub fn description(&self, style: DescriptionStyle) -> &str {
        match style {
            DescriptionStyle::Plain => &self.description,
            DescriptionStyle::Markdown => &self.markdown_description,
        }
    }
}

/// Error returned to the host instead of a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionError {
    pub text: String,
    /// Index of the offending argument, if the error concerns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<usize>,
}

impl FunctionError {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            argument: None,
        }
    }

    pub fn argument(index: usize, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            argument: Some(index),
        }
    }

    fn from_diagnostics(diagnostics: &Diagnostics) -> Self {
        let text = diagnostics
            .iter()
            .map(|d| format!("{}: {}", d.summary, d.detail))
            .collect::<Vec<_>>()
            .join("\n");
        Self::argument(0, text)
    }
}

impl fmt::Display for FunctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument {
            Some(index) => write!(f, "argument {}: {}", index, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Outcome of one function call.
///
/// `result` is `None` when the outcome is not yet known. It is the
/// authoritative pass/fail signal; `diagnostics` and `error` explain a
/// `false` result to humans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResponse {
    pub result: Option<bool>,
    pub diagnostics: Diagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FunctionError>,
}

impl CallResponse {
    pub fn valid() -> Self {
        Self {
            result: Some(true),
            diagnostics: Diagnostics::new(),
            error: None,
        }
    }

    pub fn invalid(diagnostics: Diagnostics) -> Self {
        let error = Some(FunctionError::from_diagnostics(&diagnostics));
        Self {
            result: Some(false),
            diagnostics,
            error,
        }
    }

    pub fn unknown() -> Self {
        Self {
            result: None,
            diagnostics: Diagnostics::new(),
            error: None,
        }
    }

    pub fn argument_error(error: FunctionError) -> Self {
        Self {
            result: None,
            diagnostics: Diagnostics::new(),
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result == Some(true)
    }

    pub fn is_unknown(&self) -> bool {
        self.result.is_none()
    }
}

/// A named unit the host can invoke.
pub trait Function: Send + Sync {
    fn definition(&self) -> &FunctionDefinition;

    fn call(&self, value: &Value) -> CallResponse;

    fn name(&self) -> &str {
        &self.definition().name
    }

    /// Calls the function for every value in parallel, keeping input order.
    fn call_batch(&self, values: &[Value]) -> Vec<CallResponse> {
        values.par_iter().map(|value| self.call(value)).collect()
    }
}

/// Wraps one validator into a [`Function`].
pub struct ValidationFunction<V> {
    definition: FunctionDefinition,
    validator: V,
}

impl<V: Validator> ValidationFunction<V> {
    pub fn new(name: impl Into<String>, validator: V) -> Self {
        let definition = FunctionDefinition {
            name: name.into(),
            description: validator.description(DescriptionStyle::Plain),
            markdown_description: validator.markdown_description(),
            parameter: Parameter {
                name: DEFAULT_PARAMETER_NAME.to_string(),
                param_type: validator.parameter_type(),
                allow_null: true,
                allow_unknown: true,
            },
            return_type: ReturnType::Bool,
        };
        Self {
            definition,
            validator,
        }
    }

    pub fn with_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.definition.parameter.name = name.into();
        self
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn boxed(self) -> Box<dyn Function>
    where
        V: 'static,
    {
        Box::new(self)
    }
}

impl<V: Validator> Function for ValidationFunction<V> {
    fn definition(&self) -> &FunctionDefinition {
        &self.definition
    }

    fn call(&self, value: &Value) -> CallResponse {
        let name = self.definition.name.as_str();
        match value {
            Value::Unknown => {
                debug!(function = name, "input unknown, result unknown");
                return CallResponse::unknown();
            }
            Value::Null => {
                debug!(function = name, "input null, result unknown");
                return CallResponse::unknown();
            }
            Value::Known(_) => {}
        }

        let diagnostics = self.validator.validate(value);
        if diagnostics.is_empty() {
            debug!(function = name, "validation passed");
            return CallResponse::valid();
        }

        let path = self.definition.parameter.name.as_str();
        let diagnostics: Diagnostics = diagnostics
            .into_iter()
            .map(|diag| match diag.attribute_path {
                Some(_) => diag,
                None => diag.with_attribute_path(path),
            })
            .collect();
        for diag in &diagnostics {
            warn!(
                function = name,
                severity = %diag.severity,
                summary = %diag.summary,
                detail = %diag.detail,
                "validation failed"
            );
        }
        CallResponse::invalid(diagnostics)
    }
}

//! Input values handed to validation functions.
//!
//! A [`Value`] carries one scalar payload plus its presence state. Hosts
//! that resolve inputs lazily pass [`Value::Unknown`] until the payload is
//! available, and [`Value::Null`] when the input is explicitly absent.

use std::fmt;

use serde::Serialize;

/// Scalar payload of a known value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Number(_) => "number",
            Scalar::Bool(_) => "bool",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{:?}", s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// The single input of a validation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// A resolved payload.
    Known(Scalar),
    /// The input is explicitly absent.
    Null,
    /// The input cannot be resolved yet.
    Unknown,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Known(Scalar::String(s.into()))
    }

    pub fn number(n: f64) -> Self {
        Value::Known(Scalar::Number(n))
    }

    pub fn bool(b: bool) -> Self {
        Value::Known(Scalar::Bool(b))
    }

    pub fn null() -> Self {
        Value::Null
    }

    pub fn unknown() -> Self {
        Value::Unknown
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    /// Returns the payload if the value is known.
    pub fn as_known(&self) -> Option<&Scalar> {
        match self {
            Value::Known(scalar) => Some(scalar),
            Value::Null | Value::Unknown => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_known().and_then(Scalar::as_str)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        s.map(Value::string).unwrap_or(Value::Null)
    }
}

/// Declared type of a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Bool,
    /// Accepts any scalar.
    Dynamic,
}

impl ParameterType {
    pub fn accepts(&self, scalar: &Scalar) -> bool {
        matches!(
            (self, scalar),
            (ParameterType::Dynamic, _)
                | (ParameterType::String, Scalar::String(_))
                | (ParameterType::Number, Scalar::Number(_))
                | (ParameterType::Bool, Scalar::Bool(_))
        )
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Bool => "bool",
            ParameterType::Dynamic => "dynamic",
        };
        f.write_str(s)
    }
}

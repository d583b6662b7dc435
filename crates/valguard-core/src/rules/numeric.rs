use std::{fmt::Display, str::FromStr};

use num_traits::{Num, NumCast, ToPrimitive};

use crate::{
    diagnostic::Diagnostics,
    errors::RuleError,
    validator::{invalid, DescriptionStyle, Validator},
    value::{ParameterType, Scalar, Value},
};

/// Lowest and highest valid TCP/UDP port.
pub const PORT_RANGE: (i64, i64) = (1, 65_535);

/// Reads a number from a string or number scalar.
///
/// Strings are trimmed before parsing. Numbers that `N` cannot represent
/// exactly, such as `2.5` for an integer type, are rejected.
fn parse_number<N>(scalar: &Scalar) -> Result<N, String>
where
    N: NumCast + FromStr + Copy,
{
    match scalar {
        Scalar::String(s) => s
            .trim()
            .parse::<N>()
            .map_err(|_| format!("value {:?} is not a valid number", s)),
        Scalar::Number(n) => match N::from(*n) {
            Some(v) if ToPrimitive::to_f64(&v) == Some(*n) => Ok(v),
            _ => Err(format!("value {} is not representable", n)),
        },
        Scalar::Bool(b) => Err(format!("expected a number, got bool {}", b)),
    }
}

/// Inclusive numeric bounds, either side optional.
///
/// Accepts numbers and numeric strings, so `"5"` and `5` are equivalent.
#[derive(Debug, Clone)]
pub struct InRange<N> {
    min: Option<N>,
    max: Option<N>,
}

impl<N> InRange<N>
where
    N: Num + PartialOrd + Copy + Display,
{
    pub fn new(min: Option<N>, max: Option<N>) -> Result<Self, RuleError> {
        match (min, max) {
            (None, None) => Err(RuleError::invalid_configuration(
                "in_range",
                "at least one of min or max is required",
            )),
            // Written as a negation so NaN bounds are rejected too.
            (Some(min), Some(max)) if !(min <= max) => Err(RuleError::invalid_configuration(
                "in_range",
                format!("minimum {} is greater than maximum {}", min, max),
            )),
            (Some(b), _) | (_, Some(b)) if b.partial_cmp(&b).is_none() => Err(
                RuleError::invalid_configuration("in_range", "bounds must be comparable numbers"),
            ),
            _ => Ok(Self { min, max }),
        }
    }

    pub fn between(min: N, max: N) -> Result<Self, RuleError> {
        Self::new(Some(min), Some(max))
    }

    pub fn at_least(min: N) -> Result<Self, RuleError> {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: N) -> Result<Self, RuleError> {
        Self::new(None, Some(max))
    }

    fn bounds(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("between {} and {}", min, max),
            (Some(min), None) => format!("greater than or equal to {}", min),
            (None, Some(max)) => format!("less than or equal to {}", max),
            (None, None) => "any number".to_string(),
        }
    }
}

impl<N> Validator for InRange<N>
where
    N: Num + NumCast + PartialOrd + Copy + Display + FromStr + Send + Sync,
{
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => format!("value must be a number {}", self.bounds()),
            DescriptionStyle::Markdown => format!("value must be a number **{}**", self.bounds()),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        let Some(scalar) = value.as_known() else {
            return Diagnostics::new();
        };
        let number: N = match parse_number(scalar) {
            Ok(n) => n,
            Err(reason) => return invalid("Invalid number", reason),
        };
        if number.partial_cmp(&number).is_none() {
            return invalid("Invalid number", format!("value {} is not comparable", number));
        }
        if let Some(min) = self.min {
            if number < min {
                return invalid(
                    "Value out of range",
                    format!("value {} is less than the minimum {}", number, min),
                );
            }
        }
        if let Some(max) = self.max {
            if number > max {
                return invalid(
                    "Value out of range",
                    format!("value {} is greater than the maximum {}", number, max),
                );
            }
        }
        Diagnostics::new()
    }

    fn parameter_type(&self) -> ParameterType {
        ParameterType::Dynamic
    }
}

/// Whole number given as a string or number.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCheck;

impl IntegerCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for IntegerCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be an integer".to_string(),
            DescriptionStyle::Markdown => "value must be an **integer**".to_string(),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        match value.as_known() {
            None => Diagnostics::new(),
            Some(scalar) => match parse_number::<i64>(scalar) {
                Ok(_) => Diagnostics::new(),
                Err(reason) => invalid("Invalid integer", reason),
            },
        }
    }

    fn parameter_type(&self) -> ParameterType {
        ParameterType::Dynamic
    }
}

/// Finite number given as a string or number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCheck;

impl NumberCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for NumberCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a finite number".to_string(),
            DescriptionStyle::Markdown => "value must be a **finite** number".to_string(),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        let Some(scalar) = value.as_known() else {
            return Diagnostics::new();
        };
        match parse_number::<f64>(scalar) {
            Ok(n) if n.is_finite() => Diagnostics::new(),
            Ok(n) => invalid("Invalid number", format!("value {} is not finite", n)),
            Err(reason) => invalid("Invalid number", reason),
        }
    }

    fn parameter_type(&self) -> ParameterType {
        ParameterType::Dynamic
    }
}

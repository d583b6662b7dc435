use crate::{diagnostic::Diagnostics, value::ParameterType, value::Value};

/// Output format requested from [`Validator::description`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStyle {
    Plain,
    Markdown,
}

/// A single-purpose check over one input value.
///
/// Implementations hold only configuration fixed at construction and must
/// be safe to share across threads. Null and unknown inputs are filtered
/// out by [`ValidationFunction`](crate::ValidationFunction) before
/// `validate` runs, but a validator called directly with one of them must
/// return an empty [`Diagnostics`].
pub trait Validator: Send + Sync {
    /// Static statement of the rule. Never depends on input.
    fn description(&self, style: DescriptionStyle) -> String;

    /// Checks `value`. An empty result means the value passes.
    fn validate(&self, value: &Value) -> Diagnostics;

    /// Scalar type this validator expects as input.
    fn parameter_type(&self) -> ParameterType {
        ParameterType::String
    }

    fn markdown_description(&self) -> String {
        self.description(DescriptionStyle::Markdown)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn description(&self, style: DescriptionStyle) -> String {
        (**self).description(style)
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        (**self).validate(value)
    }

    fn parameter_type(&self) -> ParameterType {
        (**self).parameter_type()
    }
}

/// Shared shape of the failure diagnostic every rule reports.
pub(crate) fn invalid(summary: &str, detail: String) -> Diagnostics {
    let mut diags = Diagnostics::new();
    diags.add_error(summary, detail);
    diags
}

/// Runs `check` on the string payload of a known value.
///
/// Null and unknown values pass without running `check`. A known value
/// that is not a string fails with a type diagnostic.
pub(crate) fn with_str(value: &Value, check: impl FnOnce(&str) -> Diagnostics) -> Diagnostics {
    match value.as_known() {
        None => Diagnostics::new(),
        Some(scalar) => match scalar.as_str() {
            Some(s) => check(s),
            None => invalid(
                "Invalid value type",
                format!("expected a string, got {} {}", scalar.type_name(), scalar),
            ),
        },
    }
}

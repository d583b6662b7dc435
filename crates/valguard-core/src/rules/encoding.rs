use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    diagnostic::Diagnostics,
    validator::{invalid, with_str, DescriptionStyle, Validator},
    value::Value,
};

/// Standard-alphabet, padded Base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Check;

impl Base64Check {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for Base64Check {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a valid Base64 encoded string".to_string(),
            DescriptionStyle::Markdown => {
                "value must be a valid [Base64](https://www.rfc-editor.org/rfc/rfc4648#section-4) encoded string"
                    .to_string()
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| match STANDARD.decode(input) {
            Ok(_) => Diagnostics::new(),
            Err(e) => invalid(
                "Invalid Base64 encoding",
                format!("value {:?} has an invalid encoding: {}", input, e),
            ),
        })
    }
}

/// Any JSON document: object, array or scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCheck;

impl JsonCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for JsonCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a valid JSON document".to_string(),
            DescriptionStyle::Markdown => "value must be a valid `JSON` document".to_string(),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            match serde_json::from_str::<serde_json::Value>(input) {
                Ok(_) => Diagnostics::new(),
                // The document may be large or sensitive, only the parser error is echoed.
                Err(e) => invalid("Invalid JSON", format!("value is not valid JSON: {}", e)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    #[test]
    fn test_base64_valid() {
        let rule = Base64Check::new();
        assert!(rule.validate(&Value::string("U29sdmluZyB0aGU=")).is_empty());
        assert!(rule.validate(&Value::string("")).is_empty());
    }

    #[test]
    fn test_base64_invalid() {
        let rule = Base64Check::new();
        let diags = rule.validate(&Value::string("not base64!"));
        assert_eq!(diags.len(), 1);
        let diag = &diags.as_slice()[0];
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.summary, "Invalid Base64 encoding");
        assert!(diag.detail.contains("invalid encoding"));
        assert!(diag.detail.contains("not base64!"));
    }

    #[test]
    fn test_base64_missing_padding() {
        let rule = Base64Check::new();
        assert_eq!(rule.validate(&Value::string("U29sdmluZyB0aGU")).len(), 1);
    }

    #[test]
    fn test_base64_ignores_absent_values() {
        let rule = Base64Check::new();
        assert!(rule.validate(&Value::null()).is_empty());
        assert!(rule.validate(&Value::unknown()).is_empty());
    }

    #[test]
    fn test_json() {
        let rule = JsonCheck::new();
        assert!(rule.validate(&Value::string(r#"{"a": [1, 2]}"#)).is_empty());
        assert!(rule.validate(&Value::string("42")).is_empty());
        assert_eq!(rule.validate(&Value::string("{a: 1}")).len(), 1);
    }

    #[test]
    fn test_non_string_input() {
        let diags = JsonCheck::new().validate(&Value::number(1.0));
        assert_eq!(diags.as_slice()[0].summary, "Invalid value type");
    }
}

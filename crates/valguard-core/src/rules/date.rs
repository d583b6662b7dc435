use chrono::{
    format::{Item, StrftimeItems},
    DateTime, NaiveDate, NaiveDateTime, NaiveTime,
};

use crate::{
    diagnostic::Diagnostics,
    errors::RuleError,
    validator::{invalid, with_str, DescriptionStyle, Validator},
    value::Value,
};

/// Timestamp in RFC 3339 form, e.g. `2024-01-31T12:00:00Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc3339Check;

impl Rfc3339Check {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for Rfc3339Check {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a valid RFC 3339 timestamp".to_string(),
            DescriptionStyle::Markdown => {
                "value must be a valid [RFC 3339](https://www.rfc-editor.org/rfc/rfc3339) timestamp"
                    .to_string()
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| match DateTime::parse_from_rfc3339(input) {
            Ok(_) => Diagnostics::new(),
            Err(e) => invalid(
                "Invalid RFC 3339 timestamp",
                format!("value {:?} is not an RFC 3339 timestamp: {}", input, e),
            ),
        })
    }
}

/// Date, time or datetime in a fixed `strftime` format.
///
/// The format is checked when the rule is built. A value passes if it
/// parses as a datetime, a date or a time in that format.
#[derive(Debug, Clone)]
pub struct DateFormat {
    format: String,
}

impl DateFormat {
    pub fn new(format: impl Into<String>) -> Result<Self, RuleError> {
        let format = format.into();
        if format.is_empty() {
            return Err(RuleError::invalid_configuration(
                "date_format",
                "format must not be empty",
            ));
        }
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(RuleError::invalid_configuration(
                "date_format",
                format!("'{}' is not a valid strftime format", format),
            ));
        }
        Ok(Self { format })
    }

    fn parses(&self, input: &str) -> bool {
        NaiveDateTime::parse_from_str(input, &self.format).is_ok()
            || NaiveDate::parse_from_str(input, &self.format).is_ok()
            || NaiveTime::parse_from_str(input, &self.format).is_ok()
    }
}

impl Validator for DateFormat {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => {
                format!("value must be a date in the format {}", self.format)
            }
            DescriptionStyle::Markdown => {
                format!("value must be a date in the format `{}`", self.format)
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            if self.parses(input) {
                Diagnostics::new()
            } else {
                invalid(
                    "Invalid date",
                    format!(
                        "value {:?} does not match the date format {}",
                        input, self.format
                    ),
                )
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes<V: Validator>(rule: &V, input: &str) -> bool {
        rule.validate(&Value::string(input)).is_empty()
    }

    #[test]
    fn test_rfc3339() {
        let rule = Rfc3339Check::new();
        assert!(passes(&rule, "2024-01-31T12:00:00Z"));
        assert!(passes(&rule, "2024-01-31T12:00:00.123+02:00"));
        assert!(!passes(&rule, "2024-01-31"));
        assert!(!passes(&rule, "2024-02-30T12:00:00Z"));
    }

    #[test]
    fn test_date_format_date_only() {
        let rule = DateFormat::new("%Y-%m-%d").unwrap();
        assert!(passes(&rule, "2024-02-29"));
        assert!(!passes(&rule, "2023-02-29"));
        assert!(!passes(&rule, "29/02/2024"));
    }

    #[test]
    fn test_date_format_datetime_and_time() {
        let datetime = DateFormat::new("%d/%m/%Y %H:%M").unwrap();
        assert!(passes(&datetime, "31/01/2024 08:30"));

        let time = DateFormat::new("%H:%M:%S").unwrap();
        assert!(passes(&time, "23:59:59"));
        assert!(!passes(&time, "24:00:00"));
    }

    #[test]
    fn test_date_format_invalid_configuration() {
        assert!(DateFormat::new("").is_err());
        assert!(DateFormat::new("%Y-%Q").is_err());
    }
}

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    diagnostic::Diagnostics,
    errors::RuleError,
    utils::hasher::Xxh3Builder,
    validator::{invalid, with_str, DescriptionStyle, Validator},
    value::Value,
};

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("static UUID pattern")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static email pattern")
});

/// Requires a fixed substring somewhere in the value.
#[derive(Debug, Clone)]
pub struct Contains {
    substring: String,
}

impl Contains {
    pub fn new(substring: impl Into<String>) -> Result<Self, RuleError> {
        let substring = substring.into();
        if substring.is_empty() {
            return Err(RuleError::invalid_configuration(
                "contains",
                "substring must not be empty",
            ));
        }
        Ok(Self { substring })
    }
}

impl Validator for Contains {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => format!("value must contain {:?}", self.substring),
            DescriptionStyle::Markdown => format!("value must contain `{}`", self.substring),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            if input.contains(self.substring.as_str()) {
                Diagnostics::new()
            } else {
                invalid(
                    "Missing required substring",
                    format!("value {:?} does not contain {:?}", input, self.substring),
                )
            }
        })
    }
}

/// Bounds the length of the value, counted in characters.
#[derive(Debug, Clone)]
pub struct StringLength {
    min: Option<usize>,
    max: Option<usize>,
}

impl StringLength {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, RuleError> {
        match (min, max) {
            (None, None) => Err(RuleError::invalid_configuration(
                "length_between",
                "at least one of min_length or max_length is required",
            )),
            (Some(min), Some(max)) if min > max => Err(RuleError::invalid_configuration(
                "length_between",
                format!("min_length {} is greater than max_length {}", min, max),
            )),
            _ => Ok(Self { min, max }),
        }
    }

    fn bounds(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("between {} and {} characters long", min, max),
            (Some(min), None) => format!("at least {} characters long", min),
            (None, Some(max)) => format!("at most {} characters long", max),
            (None, None) => "of any length".to_string(),
        }
    }
}

impl Validator for StringLength {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => format!("value must be {}", self.bounds()),
            DescriptionStyle::Markdown => format!("value must be **{}**", self.bounds()),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            let len = input.chars().count();
            let too_short = self.min.is_some_and(|min| len < min);
            let too_long = self.max.is_some_and(|max| len > max);
            if too_short || too_long {
                invalid(
                    "Invalid length",
                    format!(
                        "value is {} characters long, it must be {}",
                        len,
                        self.bounds()
                    ),
                )
            } else {
                Diagnostics::new()
            }
        })
    }
}

/// Requires the value to match a regular expression.
///
/// `flags` takes the inline flag letters supported by the `regex` crate
/// (`i`, `m`, `s`, `x`, `U`), e.g. `Some("i")` for case-insensitive matching.
#[derive(Debug, Clone)]
pub struct RegexMatch {
    pattern: String,
    regex: Regex,
}

impl RegexMatch {
    pub fn new(pattern: impl Into<String>, flags: Option<&str>) -> Result<Self, RuleError> {
        let pattern = pattern.into();
        let full = match flags {
            Some(flags) if !flags.is_empty() => {
                if let Some(bad) = flags.chars().find(|c| !"imsxU".contains(*c)) {
                    return Err(RuleError::invalid_configuration(
                        "matches_regex",
                        format!("unsupported regex flag '{}'", bad),
                    ));
                }
                format!("(?{}){}", flags, pattern)
            }
            _ => pattern.clone(),
        };
        let regex = Regex::new(&full)?;
        Ok(Self { pattern, regex })
    }
}

impl Validator for RegexMatch {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => format!("value must match the pattern {}", self.pattern),
            DescriptionStyle::Markdown => {
                format!("value must match the pattern `{}`", self.pattern)
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            if self.regex.is_match(input) {
                Diagnostics::new()
            } else {
                invalid(
                    "Pattern mismatch",
                    format!("value {:?} does not match {}", input, self.pattern),
                )
            }
        })
    }
}

/// Restricts the value to a fixed set of members. Case sensitive.
#[derive(Debug, Clone)]
pub struct OneOf {
    members: HashSet<String, Xxh3Builder>,
    listed: Vec<String>,
}

impl OneOf {
    pub fn new(members: Vec<String>) -> Result<Self, RuleError> {
        if members.is_empty() {
            return Err(RuleError::invalid_configuration(
                "one_of",
                "members must not be empty",
            ));
        }
        let mut set = HashSet::with_hasher(Xxh3Builder);
        let mut listed = Vec::with_capacity(members.len());
        for member in members {
            if set.insert(member.clone()) {
                listed.push(member);
            }
        }
        Ok(Self {
            members: set,
            listed,
        })
    }
}

impl Validator for OneOf {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => format!("value must be one of: {}", self.listed.join(", ")),
            DescriptionStyle::Markdown => format!(
                "value must be one of: {}",
                self.listed
                    .iter()
                    .map(|m| format!("`{}`", m))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            if self.members.contains(input) {
                Diagnostics::new()
            } else {
                invalid(
                    "Value not allowed",
                    format!(
                        "value {:?} is not one of: {}",
                        input,
                        self.listed.join(", ")
                    ),
                )
            }
        })
    }
}

/// Canonical hyphenated UUID, any version.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidCheck;

impl UuidCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for UuidCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a valid UUID".to_string(),
            DescriptionStyle::Markdown => {
                "value must be a valid UUID in the `8-4-4-4-12` hexadecimal form".to_string()
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            if UUID.is_match(input) {
                Diagnostics::new()
            } else {
                invalid(
                    "Invalid UUID",
                    format!("value {:?} is not a valid UUID", input),
                )
            }
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailCheck;

impl EmailCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for EmailCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a valid email address".to_string(),
            DescriptionStyle::Markdown => {
                "value must be a valid email address of the form `local@domain.tld`".to_string()
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            if EMAIL.is_match(input) {
                Diagnostics::new()
            } else {
                invalid(
                    "Invalid email address",
                    format!("value {:?} is not a valid email address", input),
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
    fn test_contains() {
        let rule = Contains::new("prod").unwrap();
        assert!(passes(&rule, "eu-prod-1"));
        let diags = rule.validate(&Value::string("eu-dev-1"));
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.as_slice()[0].detail,
            "value \"eu-dev-1\" does not contain \"prod\""
        );
    }

    #[test]
    fn test_contains_rejects_empty_substring() {
        assert!(matches!(
            Contains::new(""),
            Err(RuleError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_string_length() {
        let rule = StringLength::new(Some(3), Some(5)).unwrap();
        assert!(passes(&rule, "abc"));
        assert!(passes(&rule, "abcde"));
        assert!(passes(&rule, "héllo"));
        assert!(!passes(&rule, "ab"));
        assert!(!passes(&rule, "abcdef"));
    }

    #[test]
    fn test_string_length_single_bound() {
        let min_only = StringLength::new(Some(2), None).unwrap();
        assert!(passes(&min_only, "ab"));
        assert!(!passes(&min_only, "a"));

        let max_only = StringLength::new(None, Some(2)).unwrap();
        assert!(passes(&max_only, ""));
        assert!(!passes(&max_only, "abc"));
    }

    #[test]
    fn test_string_length_invalid_configuration() {
        assert!(StringLength::new(Some(5), Some(3)).is_err());
        assert!(StringLength::new(None, None).is_err());
    }

    #[test]
    fn test_regex_match() {
        let rule = RegexMatch::new(r"^\d{3}$", None).unwrap();
        assert!(passes(&rule, "123"));
        assert!(!passes(&rule, "12"));
        assert!(!passes(&rule, "abc"));
    }

    #[test]
    fn test_regex_match_with_flags() {
        let rule = RegexMatch::new("^abc$", Some("i")).unwrap();
        assert!(passes(&rule, "ABC"));
        assert!(passes(&rule, "aBc"));
        assert!(!passes(&rule, "abd"));
    }

    #[test]
    fn test_regex_invalid_configuration() {
        assert!(matches!(
            RegexMatch::new("(unclosed", None),
            Err(RuleError::InvalidPattern(_))
        ));
        assert!(matches!(
            RegexMatch::new("abc", Some("q")),
            Err(RuleError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_one_of() {
        let rule = OneOf::new(vec![
            "apple".to_string(),
            "banana".to_string(),
            "apple".to_string(),
        ])
        .unwrap();
        assert!(passes(&rule, "apple"));
        assert!(!passes(&rule, "Apple"));
        assert!(!passes(&rule, ""));
        assert_eq!(
            rule.description(DescriptionStyle::Plain),
            "value must be one of: apple, banana"
        );
    }

    #[test]
    fn test_one_of_rejects_empty_members() {
        assert!(OneOf::new(vec![]).is_err());
    }

    #[test]
    fn test_uuid() {
        let rule = UuidCheck::new();
        assert!(passes(&rule, "123e4567-e89b-12d3-a456-426614174000"));
        assert!(!passes(&rule, "123e4567e89b12d3a456426614174000"));
        assert!(!passes(&rule, "123e4567-e89b-12d3-a456-42661417400g"));
    }

    #[test]
    fn test_email() {
        let rule = EmailCheck::new();
        assert!(passes(&rule, "test@example.com"));
        assert!(passes(&rule, "first.last+tag@sub.example.co.uk"));
        assert!(!passes(&rule, "invalid-email"));
        assert!(!passes(&rule, "@invalid.com"));
    }
}

//! Built-in functions and compilation of configured rules.
//!
//! Unconfigured rules are registered under fixed names by
//! [`builtin_registry`]. Rules that need configuration are described by a
//! [`RuleConfig`] and turned into functions by [`compile_function`].

use crate::{
    errors::RuleError,
    function::{Function, ValidationFunction},
    registry::RegistryBuilder,
    rules::{
        Base64Check, CidrCheck, Contains, DateFormat, EmailCheck, HostnameCheck, InRange,
        IntegerCheck, IpAddressCheck, IpVersion, JsonCheck, MacAddressCheck, NumberCheck, OneOf,
        RegexMatch, Rfc3339Check, StringLength, UuidCheck, PORT_RANGE,
    },
};

/// Names of the functions registered by [`builtin_registry`], in order.
pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "is_base64",
    "is_json",
    "is_cidr",
    "is_ip",
    "is_ipv4",
    "is_ipv6",
    "is_mac_address",
    "is_hostname",
    "is_uuid",
    "is_email",
    "is_rfc3339",
    "is_port",
    "is_integer",
    "is_number",
];

/// Returns a builder preloaded with every built-in function.
///
/// Hosts can register more constructors before calling `build`.
pub fn builtin_registry() -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();
    builder
        .register(|| Ok(ValidationFunction::new("is_base64", Base64Check::new()).boxed()))
        .register(|| Ok(ValidationFunction::new("is_json", JsonCheck::new()).boxed()))
        .register(|| Ok(ValidationFunction::new("is_cidr", CidrCheck::new()).boxed()))
        .register(|| {
            Ok(ValidationFunction::new("is_ip", IpAddressCheck::new(IpVersion::Any)).boxed())
        })
        .register(|| {
            Ok(ValidationFunction::new("is_ipv4", IpAddressCheck::new(IpVersion::V4)).boxed())
        })
        .register(|| {
            Ok(ValidationFunction::new("is_ipv6", IpAddressCheck::new(IpVersion::V6)).boxed())
        })
        .register(|| Ok(ValidationFunction::new("is_mac_address", MacAddressCheck::new()).boxed()))
        .register(|| Ok(ValidationFunction::new("is_hostname", HostnameCheck::new()).boxed()))
        .register(|| Ok(ValidationFunction::new("is_uuid", UuidCheck::new()).boxed()))
        .register(|| Ok(ValidationFunction::new("is_email", EmailCheck::new()).boxed()))
        .register(|| Ok(ValidationFunction::new("is_rfc3339", Rfc3339Check::new()).boxed()))
        .register(|| {
            let (min, max) = PORT_RANGE;
            Ok(ValidationFunction::new("is_port", InRange::<i64>::between(min, max)?).boxed())
        })
        .register(|| Ok(ValidationFunction::new("is_integer", IntegerCheck::new()).boxed()))
        .register(|| Ok(ValidationFunction::new("is_number", NumberCheck::new()).boxed()));
    builder
}

/// Configuration of a rule that cannot be registered without parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConfig {
    /// Integer bounds, inclusive.
    IntegerRange { min: Option<i64>, max: Option<i64> },
    /// Floating point bounds, inclusive.
    NumberRange { min: Option<f64>, max: Option<f64> },
    Contains { substring: String },
    StringLength {
        min: Option<usize>,
        max: Option<usize>,
    },
    Regex {
        pattern: String,
        flags: Option<String>,
    },
    OneOf { members: Vec<String> },
    DateFormat { format: String },
}

impl RuleConfig {
    /// Short rule identifier, as used in configuration files.
    pub fn rule_name(&self) -> &'static str {
        match self {
            RuleConfig::IntegerRange { .. } | RuleConfig::NumberRange { .. } => "in_range",
            RuleConfig::Contains { .. } => "contains",
            RuleConfig::StringLength { .. } => "length_between",
            RuleConfig::Regex { .. } => "matches_regex",
            RuleConfig::OneOf { .. } => "one_of",
            RuleConfig::DateFormat { .. } => "date_format",
        }
    }
}

/// Builds a named function from a rule configuration.
///
/// # Errors
///
/// Returns the rule's construction error if the configuration is invalid,
/// e.g. an inverted range or a pattern that does not compile.
pub fn compile_function(name: &str, config: &RuleConfig) -> Result<Box<dyn Function>, RuleError> {
    let function = match config {
        RuleConfig::IntegerRange { min, max } => {
            ValidationFunction::new(name, InRange::new(*min, *max)?).boxed()
        }
        RuleConfig::NumberRange { min, max } => {
            ValidationFunction::new(name, InRange::new(*min, *max)?).boxed()
        }
        RuleConfig::Contains { substring } => {
            ValidationFunction::new(name, Contains::new(substring.clone())?).boxed()
        }
        RuleConfig::StringLength { min, max } => {
            ValidationFunction::new(name, StringLength::new(*min, *max)?).boxed()
        }
        RuleConfig::Regex { pattern, flags } => {
            ValidationFunction::new(name, RegexMatch::new(pattern.clone(), flags.as_deref())?)
                .boxed()
        }
        RuleConfig::OneOf { members } => {
            ValidationFunction::new(name, OneOf::new(members.clone())?).boxed()
        }
        RuleConfig::DateFormat { format } => {
            ValidationFunction::new(name, DateFormat::new(format.clone())?).boxed()
        }
    };
    Ok(function)
}

/// Registers a configured function on `builder`.
///
/// The configuration is validated when the registry is built.
pub fn register_configured(builder: &mut RegistryBuilder, name: String, config: RuleConfig) {
    builder.register(move || compile_function(&name, &config));
}

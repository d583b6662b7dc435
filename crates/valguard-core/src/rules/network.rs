use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    diagnostic::Diagnostics,
    validator::{invalid, with_str, DescriptionStyle, Validator},
    value::Value,
};

static MAC_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$|^(?:[0-9A-Fa-f]{2}-){5}[0-9A-Fa-f]{2}$")
        .expect("static MAC address pattern")
});

static HOSTNAME_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("static hostname label pattern")
});

const MAX_HOSTNAME_LEN: usize = 253;

/// IPv4 or IPv6 network in CIDR notation, e.g. `10.0.0.0/24` or `2001:db8::/32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CidrCheck;

impl CidrCheck {
    pub fn new() -> Self {
        Self
    }

    fn check(input: &str) -> Result<(), String> {
        let (addr, prefix) = input
            .split_once('/')
            .ok_or_else(|| "missing '/' prefix length separator".to_string())?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| format!("'{}' is not an IP address", addr))?;
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("prefix length '{}' is not a number", prefix));
        }
        let max = if addr.is_ipv4() { 32 } else { 128 };
        match prefix.parse::<u32>() {
            Ok(len) if len <= max => Ok(()),
            _ => Err(format!(
                "prefix length {} is out of range 0-{} for {}",
                prefix,
                max,
                if addr.is_ipv4() { "IPv4" } else { "IPv6" }
            )),
        }
    }
}

impl Validator for CidrCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be valid CIDR notation".to_string(),
            DescriptionStyle::Markdown => {
                "value must be valid [CIDR](https://www.rfc-editor.org/rfc/rfc4632) notation"
                    .to_string()
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| match Self::check(input) {
            Ok(()) => Diagnostics::new(),
            Err(reason) => invalid(
                "Invalid CIDR notation",
                format!("value {:?} is not valid CIDR notation: {}", input, reason),
            ),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpVersion {
    #[default]
    Any,
    V4,
    V6,
}

impl IpVersion {
    fn label(&self) -> &'static str {
        match self {
            IpVersion::Any => "IP",
            IpVersion::V4 => "IPv4",
            IpVersion::V6 => "IPv6",
        }
    }

    fn matches(&self, addr: &IpAddr) -> bool {
        match self {
            IpVersion::Any => true,
            IpVersion::V4 => addr.is_ipv4(),
            IpVersion::V6 => addr.is_ipv6(),
        }
    }
}

/// Bare IP address, optionally restricted to one family.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpAddressCheck {
    version: IpVersion,
}

impl IpAddressCheck {
    pub fn new(version: IpVersion) -> Self {
        Self { version }
    }
}

impl Validator for IpAddressCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        let label = self.version.label();
        match style {
            DescriptionStyle::Plain => format!("value must be a valid {} address", label),
            DescriptionStyle::Markdown => format!("value must be a valid **{}** address", label),
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| match input.parse::<IpAddr>() {
            Ok(addr) if self.version.matches(&addr) => Diagnostics::new(),
            _ => invalid(
                "Invalid IP address",
                format!(
                    "value {:?} is not a valid {} address",
                    input,
                    self.version.label()
                ),
            ),
        })
    }
}

/// Six hex octets separated consistently by `:` or `-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacAddressCheck;

impl MacAddressCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for MacAddressCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a valid MAC address".to_string(),
            DescriptionStyle::Markdown => {
                "value must be a valid MAC address such as `00:1A:2B:3C:4D:5E`".to_string()
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| {
            if MAC_ADDRESS.is_match(input) {
                Diagnostics::new()
            } else {
                invalid(
                    "Invalid MAC address",
                    format!("value {:?} is not a valid MAC address", input),
                )
            }
        })
    }
}

/// RFC 1123 hostname. A single trailing dot is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameCheck;

impl HostnameCheck {
    pub fn new() -> Self {
        Self
    }

    fn check(input: &str) -> Result<(), String> {
        let name = input.strip_suffix('.').unwrap_or(input);
        if name.is_empty() {
            return Err("hostname is empty".to_string());
        }
        if name.len() > MAX_HOSTNAME_LEN {
            return Err(format!(
                "hostname is {} characters long, the maximum is {}",
                name.len(),
                MAX_HOSTNAME_LEN
            ));
        }
        match name.split('.').find(|label| !HOSTNAME_LABEL.is_match(label)) {
            Some(label) => Err(format!("label {:?} is not valid", label)),
            None => Ok(()),
        }
    }
}

impl Validator for HostnameCheck {
    fn description(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => "value must be a valid hostname".to_string(),
            DescriptionStyle::Markdown => {
                "value must be a valid hostname as defined by [RFC 1123](https://www.rfc-editor.org/rfc/rfc1123)"
                    .to_string()
            }
        }
    }

    fn validate(&self, value: &Value) -> Diagnostics {
        with_str(value, |input| match Self::check(input) {
            Ok(()) => Diagnostics::new(),
            Err(reason) => invalid(
                "Invalid hostname",
                format!("value {:?} is not a valid hostname: {}", input, reason),
            ),
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
    fn test_cidr_valid() {
        let rule = CidrCheck::new();
        assert!(passes(&rule, "10.0.0.0/24"));
        assert!(passes(&rule, "0.0.0.0/0"));
        assert!(passes(&rule, "192.168.1.1/32"));
        assert!(passes(&rule, "2001:db8::/32"));
        assert!(passes(&rule, "::/128"));
    }

    #[test]
    fn test_cidr_prefix_out_of_range() {
        let rule = CidrCheck::new();
        let diags = rule.validate(&Value::string("10.0.0.0/99"));
        assert_eq!(diags.len(), 1);
        let diag = &diags.as_slice()[0];
        assert_eq!(diag.summary, "Invalid CIDR notation");
        assert!(diag.detail.contains("out of range 0-32"));
        assert!(!passes(&rule, "2001:db8::/129"));
    }

    #[test]
    fn test_cidr_malformed() {
        let rule = CidrCheck::new();
        assert!(!passes(&rule, "10.0.0.0"));
        assert!(!passes(&rule, "10.0.0/24"));
        assert!(!passes(&rule, "10.0.0.0/"));
        assert!(!passes(&rule, "10.0.0.0/+8"));
        assert!(!passes(&rule, "10.0.0.0/24/1"));
    }

    #[test]
    fn test_ip_versions() {
        let any = IpAddressCheck::new(IpVersion::Any);
        let v4 = IpAddressCheck::new(IpVersion::V4);
        let v6 = IpAddressCheck::new(IpVersion::V6);

        assert!(passes(&any, "127.0.0.1"));
        assert!(passes(&any, "::1"));
        assert!(passes(&v4, "127.0.0.1"));
        assert!(!passes(&v4, "::1"));
        assert!(passes(&v6, "fe80::1"));
        assert!(!passes(&v6, "10.1.1.1"));
        assert!(!passes(&any, "256.0.0.1"));
    }

    #[test]
    fn test_ip_description() {
        let v6 = IpAddressCheck::new(IpVersion::V6);
        assert_eq!(
            v6.description(DescriptionStyle::Plain),
            "value must be a valid IPv6 address"
        );
    }

    #[test]
    fn test_mac_address() {
        let rule = MacAddressCheck::new();
        assert!(passes(&rule, "00:1A:2B:3C:4D:5E"));
        assert!(passes(&rule, "00-1a-2b-3c-4d-5e"));
        assert!(!passes(&rule, "00:1A-2B:3C:4D:5E"));
        assert!(!passes(&rule, "00:1A:2B:3C:4D"));
        assert!(!passes(&rule, "GG:1A:2B:3C:4D:5E"));
    }

    #[test]
    fn test_hostname() {
        let rule = HostnameCheck::new();
        assert!(passes(&rule, "example.com"));
        assert!(passes(&rule, "example.com."));
        assert!(passes(&rule, "localhost"));
        assert!(passes(&rule, "a-b.c1.io"));
        assert!(!passes(&rule, ""));
        assert!(!passes(&rule, "-bad.example.com"));
        assert!(!passes(&rule, "bad..example.com"));
        assert!(!passes(&rule, &format!("{}.com", "a".repeat(64))));
        assert!(!passes(&rule, &vec!["abcdefghi"; 30].join(".")));
    }
}

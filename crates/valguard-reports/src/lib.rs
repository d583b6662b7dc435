pub mod formatters;

pub use formatters::{json::JsonFormatter, stdout::StdOutFormatter};
use valguard_core::{CallResponse, DescriptionStyle, FunctionDefinition, Value};

/// Receives host events and renders them in one output format.
pub trait Reporter {
    fn on_catalog(&mut self, definitions: &[&FunctionDefinition], style: DescriptionStyle);
    fn on_response(&mut self, function: &str, input: &Value, response: &CallResponse);
    fn on_summary(&mut self, summary: &Summary);
    /// Writes whatever the reporter buffered. Streaming reporters do nothing.
    fn finish(&mut self) {}
}

/// Tally of call results for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub unknown: usize,
}

impl Summary {
    pub fn record(&mut self, response: &CallResponse) {
        match response.result {
            Some(true) => self.passed += 1,
            Some(false) => self.failed += 1,
            None if response.error.is_some() => self.failed += 1,
            None => self.unknown += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.unknown
    }

    /// Unknown results are not failures.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valguard_core::{Diagnostics, FunctionError};

    #[test]
    fn test_summary_record() {
        let mut summary = Summary::default();
        summary.record(&CallResponse::valid());
        summary.record(&CallResponse::invalid(Diagnostics::new()));
        summary.record(&CallResponse::unknown());
        summary.record(&CallResponse::valid());

        assert_eq!(
            summary,
            Summary {
                passed: 2,
                failed: 1,
                unknown: 1
            }
        );
        assert_eq!(summary.total(), 4);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_argument_error_counts_as_failure() {
        let mut summary = Summary::default();
        summary.record(&CallResponse::unknown());
        assert!(!summary.has_failures());

        summary.record(&CallResponse::argument_error(FunctionError::argument(0, "bad type")));
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.unknown, 1);
    }
}

use prettytable::{Cell, Row, Table};
use valguard_core::{CallResponse, DescriptionStyle, FunctionDefinition, Value};

use crate::{Reporter, Summary};

pub struct StdOutFormatter {
    intro: String,
}

impl StdOutFormatter {
    pub fn new(version: String) -> Self {
        Self {
            intro: format!("ValGuard v{} - Validation Functions", version),
        }
    }

    pub fn format_catalog(
        &self,
        definitions: &[&FunctionDefinition],
        style: DescriptionStyle,
    ) -> String {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Function"),
            Cell::new("Parameter"),
            Cell::new("Description"),
        ]));
        for definition in definitions {
            table.add_row(Row::new(vec![
                Cell::new(&definition.name),
                Cell::new(&format!(
                    "{}: {}",
                    definition.parameter.name, definition.parameter.param_type
                )),
                Cell::new(definition.description(style)),
            ]));
        }
        format!(
            "{}\n{}\n{}",
            self.intro,
            "=".repeat(self.intro.len()),
            table
        )
    }

    pub fn format_response(
        &self,
        function: &str,
        input: &Value,
        response: &CallResponse,
    ) -> String {
        let status = match response.result {
            Some(true) => "TRUE",
            Some(false) => "FALSE",
            None => "UNKNOWN",
        };
        let shown = match input {
            Value::Known(scalar) => scalar.to_string(),
            Value::Null => "null".to_string(),
            Value::Unknown => "(unknown)".to_string(),
        };
        let mut out = format!("{}({}) - {}", function, shown, status);
        for diag in &response.diagnostics {
            out.push_str(&format!("\n  {}", diag));
        }
        if response.diagnostics.is_empty() {
            if let Some(error) = &response.error {
                out.push_str(&format!("\n  Error: {}", error));
            }
        }
        out
    }

    pub fn format_summary(&self, summary: &Summary) -> String {
        format!(
            "===================================\nResult: {} passed, {} failed, {} unknown",
            summary.passed, summary.failed, summary.unknown
        )
    }
}

impl Reporter for StdOutFormatter {
    fn on_catalog(&mut self, definitions: &[&FunctionDefinition], style: DescriptionStyle) {
        println!("{}", self.format_catalog(definitions, style));
    }

    fn on_response(&mut self, function: &str, input: &Value, response: &CallResponse) {
        println!("{}", self.format_response(function, input, response));
    }

    fn on_summary(&mut self, summary: &Summary) {
        println!("\n{}", self.format_summary(summary));
    }
}

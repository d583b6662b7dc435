use chrono::Local;
use serde::Serialize;
use serde_json::Error;
use valguard_core::{CallResponse, DescriptionStyle, FunctionDefinition, Value};

use crate::{Reporter, Summary};

/// Buffers every event and prints one JSON document on `finish`.
#[derive(Serialize)]
pub struct JsonFormatter {
    version: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    functions: Vec<FunctionEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    calls: Vec<CallEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Serialize)]
struct FunctionEntry {
    #[serde(flatten)]
    definition: FunctionDefinition,
    description_style: &'static str,
}

#[derive(Serialize)]
struct CallEntry {
    function: String,
    input: Value,
    #[serde(flatten)]
    response: CallResponse,
}

impl JsonFormatter {
    pub fn new(version: String) -> Self {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            version,
            timestamp,
            functions: Vec::new(),
            calls: Vec::new(),
            summary: None,
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Reporter for JsonFormatter {
    fn on_catalog(&mut self, definitions: &[&FunctionDefinition], style: DescriptionStyle) {
        let description_style = match style {
            DescriptionStyle::Plain => "plain",
            DescriptionStyle::Markdown => "markdown",
        };
        self.functions
            .extend(definitions.iter().map(|definition| FunctionEntry {
                definition: (*definition).clone(),
                description_style,
            }));
    }

    fn on_response(&mut self, function: &str, input: &Value, response: &CallResponse) {
        self.calls.push(CallEntry {
            function: function.to_string(),
            input: input.clone(),
            response: response.clone(),
        });
    }

    fn on_summary(&mut self, summary: &Summary) {
        self.summary = Some(*summary);
    }

    fn finish(&mut self) {
        match self.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize report: {}", e),
        }
    }
}

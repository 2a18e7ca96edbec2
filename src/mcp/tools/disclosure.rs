//! The `search_disclosure_documents` tool: descriptor and argument shape.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::rongda::{ReportType, RetrievalRequest};

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "search_disclosure_documents";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Search for listed company disclosure documents (annual/quarterly reports, ",
            "announcements) in the Rongda database. The company name is fuzzy-matched to ",
            "stock codes, then the disclosure index is searched for the given content ",
            "keywords, newest first (single page of 20 results). ",
            "start_time, end_time and report_type are accepted but not yet applied to ",
            "the remote query."
        )
        .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "company_name": {
                    "type": "string",
                    "description": "Company name or fragment, e.g. '平安银行'"
                },
                "key_words": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Full-text keywords to search for in document content"
                },
                "start_time": {
                    "type": "string",
                    "format": "date-time",
                    "description": "Earliest publication time (RFC 3339; accepted, not yet applied)"
                },
                "end_time": {
                    "type": "string",
                    "format": "date-time",
                    "description": "Latest publication time (RFC 3339; accepted, not yet applied)"
                },
                "report_type": {
                    "type": "string",
                    "enum": ["AnnualReports", "QuarterlyReports"],
                    "description": "Report category (accepted, not yet applied)"
                }
            },
            "required": ["company_name", "key_words"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchDisclosureRequest {
    pub company_name: String,
    pub key_words: Vec<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub report_type: Option<ReportType>,
}

impl SearchDisclosureRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("company_name must not be empty".to_string());
        }
        Ok(())
    }

    pub fn into_retrieval_request(self) -> RetrievalRequest {
        RetrievalRequest {
            company_name: self.company_name,
            key_words: self.key_words,
            start_time: self.start_time,
            end_time: self.end_time,
            report_type: self.report_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_arguments() {
        let request: SearchDisclosureRequest =
            serde_json::from_value(json!({ "company_name": "平安银行", "key_words": ["财报"] }))
                .unwrap();

        assert_eq!(request.company_name, "平安银行");
        assert_eq!(request.key_words, vec!["财报"]);
        assert!(request.start_time.is_none());
        assert!(request.report_type.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn parses_optional_filters() {
        let request: SearchDisclosureRequest = serde_json::from_value(json!({
            "company_name": "平安银行",
            "key_words": [],
            "start_time": "2024-01-01T00:00:00Z",
            "report_type": "AnnualReports"
        }))
        .unwrap();

        assert!(request.start_time.is_some());
        assert_eq!(request.report_type, Some(ReportType::AnnualReports));
    }

    #[test]
    fn rejects_blank_company_name() {
        let request: SearchDisclosureRequest =
            serde_json::from_value(json!({ "company_name": "  ", "key_words": [] })).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn descriptor_declares_required_arguments() {
        let descriptor = descriptor();

        assert_eq!(descriptor.name, TOOL_NAME);
        let required = descriptor.input_schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("company_name")));
        assert!(required.contains(&json!("key_words")));
    }
}

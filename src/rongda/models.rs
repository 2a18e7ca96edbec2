//! Domain records for the disclosure retrieval pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Report category accepted by the public tool contract.
///
/// Accepted but not yet wired into the outgoing search query; the remote
/// payload format for category filtering is unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    AnnualReports,
    QuarterlyReports,
}

/// A resolved security: short stock code plus display name.
///
/// Derived from hint-search items and used only as a search request parameter.
/// Duplicates are tolerated; they merely produce duplicate search hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockIdentifier {
    pub code: String,
    pub name: String,
}

impl StockIdentifier {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// The `"<code> <name>"` string the search endpoint expects. A missing
    /// name degrades to the code alone.
    pub fn composite(&self) -> String {
        composite_security(&self.code, &self.name)
    }
}

/// Join a security code and name with a single space, dropping the separator
/// when the name is absent.
pub fn composite_security(code: &str, name: &str) -> String {
    if name.is_empty() {
        code.to_string()
    } else {
        format!("{} {}", code, name)
    }
}

/// One retrieval request, built once per tool call and never mutated.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub identifiers: Vec<StockIdentifier>,
    pub keywords: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub report_type: Option<ReportType>,
}

impl SearchQuery {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            identifiers: Vec::new(),
            keywords,
            start_time: None,
            end_time: None,
            report_type: None,
        }
    }
}

/// The unmodified shape of one comprehensive-search result item.
///
/// Every field is optional on the wire; missing values normalize to empty so
/// the normalizer stays total. `secCode` arrives as either a string or a bare
/// number depending on the listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub downpath: String,
    #[serde(default)]
    pub htmlpath: Option<String>,
    #[serde(default, rename = "dateStr")]
    pub date_str: String,
    #[serde(default, rename = "secCode", deserialize_with = "string_or_number")]
    pub sec_code: String,
    #[serde(default, rename = "secName")]
    pub sec_name: String,
    #[serde(default, rename = "noticeTypeName")]
    pub notice_type_name: Vec<String>,
}

/// A disclosure document as returned to the tool caller.
///
/// `title` and `content` are guaranteed free of the service's highlighting
/// markup. `dateStr` is the service-native date string, passed through
/// verbatim rather than parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialReport {
    pub title: String,
    pub content: String,
    pub downpath: String,
    pub htmlpath: Option<String>,
    #[serde(rename = "dateStr")]
    pub date_str: String,
    pub security_code: String,
    #[serde(rename = "noticeTypeName")]
    pub notice_type_name: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

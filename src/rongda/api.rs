//! HTTP client operations against the Rongda endpoints: the stock hint
//! resolver (fuzzy name -> security identifiers) and the comprehensive
//! disclosure search.

use log::warn;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::RongdaError;
use super::models::{RawSearchRecord, StockIdentifier};
use super::session::Session;

const HINT_PATH: &str = "/api/web-server/xp/3947/searchStockHint";
const SEARCH_PATH: &str = "/api/web-server/xp/comprehensive/search";

#[derive(Debug, Deserialize)]
struct HintEnvelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Vec<HintItem>>,
    #[serde(default, rename = "retMsg")]
    ret_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HintItem {
    // Both fields can be absent or null; they normalize to empty strings.
    #[serde(default)]
    stock_code_short: Option<String>,
    #[serde(default)]
    stock_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    datas: Vec<RawSearchRecord>,
}

/// Resolve a free-text company name or fragment to security identifiers.
///
/// Zero candidates, a non-200 answer, or a malformed success envelope all
/// yield an empty vector with a diagnostic log rather than an error: the
/// search stage is defined for zero identifiers, so there is nothing to
/// abort. Result order follows the remote ranking; no re-sorting.
pub async fn search_stock_hint(
    session: &Session,
    hint_key: &str,
) -> Result<Vec<StockIdentifier>, RongdaError> {
    let response = session
        .get(HINT_PATH)
        .query(&[
            ("stockType", "comprehensive"),
            ("searchAfter", ""),
            ("hintKey", hint_key),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!("stock hint request failed with status {status}");
        return Ok(Vec::new());
    }

    let envelope: HintEnvelope = match response.json().await {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!("stock hint response was not valid JSON: {err}");
            return Ok(Vec::new());
        }
    };

    let data = match envelope.data {
        Some(data) if envelope.code == 200 && envelope.success => data,
        _ => {
            warn!(
                "stock hint returned no usable envelope: {}",
                envelope.ret_msg.as_deref().unwrap_or("unknown error")
            );
            return Ok(Vec::new());
        }
    };

    Ok(data
        .into_iter()
        .map(|item| {
            StockIdentifier::new(
                item.stock_code_short.unwrap_or_default(),
                item.stock_name.unwrap_or_default(),
            )
        })
        .collect())
}

/// Build the comprehensive-search request body. Category is fixed to
/// disclosure type "2", sorted by publication date descending, first page of
/// 20 results; callers needing more must issue repeated calls with narrower
/// filters.
fn search_payload(identifiers: &[StockIdentifier], keywords: &[String]) -> Value {
    let sec_codes: Vec<String> = identifiers.iter().map(StockIdentifier::composite).collect();

    json!({
        "code_uid": 1683257028933u64,
        "obj": {
            "title": [],
            "titleOr": [],
            "titleNot": [],
            "content": keywords,
            "contentOr": [],
            "contentNot": [],
            "sectionTitle": [],
            "sectionTitleOr": [],
            "sectionTitleNot": [],
            "intelligentContent": "",
            "type": "2",
            "sortField": "pubdate",
            "order": "desc",
            "pageNum": 1,
            "pageSize": 20,
            "startDate": "",
            "endDate": "",
            "secCodes": sec_codes,
            "secCodeCombo": [],
            "secCodeComboName": [],
            "notice_code": [],
            "area": [],
            "seniorIndustry": [],
            "industry_code": [],
            "seniorPlate": [],
            "plateList": [],
        },
        "model": "comprehensive",
        "model_new": "comprehensive",
        "searchSource": "manual",
    })
}

/// Run one disclosure search for the given identifiers and content keywords.
///
/// A 200 answer with a missing or empty `datas` list is a valid "no results"
/// outcome. Anything else is a typed `SearchFailure` carrying status and body,
/// so direct callers can tell a broken search subsystem from an empty result
/// set; the orchestrator degrades it to empty after logging.
pub async fn comprehensive_search(
    session: &Session,
    identifiers: &[StockIdentifier],
    keywords: &[String],
) -> Result<Vec<RawSearchRecord>, RongdaError> {
    let response = session
        .post(SEARCH_PATH)
        .header(CONTENT_TYPE, "application/json")
        .json(&search_payload(identifiers, keywords))
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if status.as_u16() != 200 {
        return Err(RongdaError::SearchFailure {
            status: status.as_u16(),
            body,
        });
    }

    let envelope: SearchEnvelope =
        serde_json::from_str(&body).map_err(|_| RongdaError::SearchFailure {
            status: status.as_u16(),
            body,
        })?;

    Ok(envelope.datas)
}

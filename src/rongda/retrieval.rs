//! Retrieval orchestrator: session acquisition, name resolution, search and
//! normalization composed into the one operation the tool layer exposes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use super::api;
use super::config::RongdaConfig;
use super::error::RongdaError;
use super::models::{FinancialReport, ReportType, SearchQuery};
use super::normalize::normalize;
use super::session::Session;

/// One tool-level retrieval request, before name resolution.
#[derive(Debug, Clone)]
pub struct RetrievalRequest {
    pub company_name: String,
    pub key_words: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub report_type: Option<ReportType>,
}

/// Backend seam for the MCP layer, so the tool registry can be exercised
/// against a stub in tests.
#[async_trait]
pub trait DisclosureSource: Send + Sync {
    /// Retrieve disclosure documents for a company. Only authentication
    /// failures surface as errors; every other abnormal condition degrades to
    /// a smaller or empty result plus a diagnostic log line.
    async fn search_disclosures(
        &self,
        request: RetrievalRequest,
    ) -> Result<Vec<FinancialReport>, RongdaError>;
}

/// The production backend against the live Rongda service.
pub struct RongdaClient {
    config: RongdaConfig,
}

impl RongdaClient {
    pub fn new(config: RongdaConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DisclosureSource for RongdaClient {
    async fn search_disclosures(
        &self,
        request: RetrievalRequest,
    ) -> Result<Vec<FinancialReport>, RongdaError> {
        // Fresh session per retrieval; released on every path below.
        let session = Session::acquire(&self.config).await?;
        let reports = run_pipeline(&session, &request).await;
        session.release().await;
        Ok(reports)
    }
}

async fn run_pipeline(session: &Session, request: &RetrievalRequest) -> Vec<FinancialReport> {
    let identifiers = match api::search_stock_hint(session, &request.company_name).await {
        Ok(identifiers) => identifiers,
        Err(err) => {
            warn!("stock hint lookup failed, proceeding without identifiers: {err}");
            Vec::new()
        }
    };

    if identifiers.is_empty() {
        info!(
            "no identifiers resolved for '{}', search proceeds with an empty security list",
            request.company_name
        );
    }

    if request.start_time.is_some() || request.end_time.is_some() || request.report_type.is_some()
    {
        // Accepted by the public contract, not applied to the outgoing query.
        debug!("time bounds / report type filters are not applied to the remote search");
    }

    let query = SearchQuery {
        identifiers,
        keywords: request.key_words.clone(),
        start_time: request.start_time,
        end_time: request.end_time,
        report_type: request.report_type,
    };

    let raw = match api::comprehensive_search(session, &query.identifiers, &query.keywords).await {
        Ok(raw) => raw,
        Err(RongdaError::SearchFailure { status, body }) => {
            error!("comprehensive search failed with status {status}: {body}");
            Vec::new()
        }
        Err(err) => {
            error!("comprehensive search transport failed: {err}");
            Vec::new()
        }
    };

    raw.into_iter().map(normalize).collect()
}

//! Rongda disclosure retrieval pipeline.
//!
//! Data flow: company name -> stock hint resolver -> identifiers ->
//! comprehensive search -> raw records -> normalizer -> `FinancialReport`s.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod retrieval;
pub mod session;

pub use config::RongdaConfig;
pub use error::RongdaError;
pub use models::{FinancialReport, RawSearchRecord, ReportType, SearchQuery, StockIdentifier};
pub use retrieval::{DisclosureSource, RetrievalRequest, RongdaClient};

//! Command Line Interface
//!
//! This crate provides the `commission-calc` tool: it reads a deal's
//! commission request as JSON and prints the allocation summary.
//!
//! # Architecture
//!
//! - **Config**: `COMMISSION_*` environment settings with command line overrides
//! - **Request**: decoding of every stored configuration shape
//! - **Render**: JSON and plain-text reports
//! - **Error Handling**: one error type for everything that can stop a run
//!
//! # Example
//!
//! ```rust
//! use interface_cli::{build_report, request::CalcRequest};
//! use domain_commission::AllocationEngine;
//!
//! let request = CalcRequest::parse(r#"{"dealValue": 100, "commissionConfig": [{"percent": 100}]}"#).unwrap();
//! let report = build_report(&request, AllocationEngine::default());
//! assert!(report.summary.matches_deal_value);
//! ```

pub mod config;
pub mod error;
pub mod request;
pub mod render;

use domain_commission::{merge_with_sub_deals, AllocationEngine, SubDealTotals};

use crate::render::{MergedReport, Report};
use crate::request::CalcRequest;

/// Computes the report for a request
///
/// The sub-deal section is only present when the request names sub-deals.
pub fn build_report(request: &CalcRequest, engine: AllocationEngine) -> Report {
    let summary = engine.summarize(request.deal_value, request.deposit_percent, &request.lines);

    let merged = if request.sub_deals.is_empty() {
        None
    } else {
        Some(MergedReport {
            groups: merge_with_sub_deals(&summary.lines, &request.sub_deals, &engine),
            sub_deal_totals: SubDealTotals::from_sub_deals(&request.sub_deals),
        })
    };

    Report { summary, merged }
}

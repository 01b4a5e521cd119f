// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSP weakness scanning
//!
//! - Findings and their report metadata
//! - Known bypass catalog
//! - Rule set and policy analyzer
//! - Passive scan driver for captured responses

mod analyzer;
mod catalog;
mod finding;
mod passive;
pub mod rules;

pub use analyzer::PolicyAnalyzer;
pub use catalog::{BypassCatalog, KnownBypass};
pub use finding::{BypassMatch, Confidence, Finding, FindingKind, Severity};
pub use passive::{
    consolidate, parse_raw_headers, CapturedResponse, Consolidation, HttpExchange, IssueLog,
    PassiveScanner, ScanIssue,
};
pub use rules::Rule;

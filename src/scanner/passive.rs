// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Passive scan driver
//!
//! Selects the CSP-family headers of a captured response, analyzes each
//! one and tags the findings with the response URL for reporting.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::analyzer::PolicyAnalyzer;
use super::finding::{Finding, Severity};
use crate::config::ScannerConfig;
use crate::error::Result;
use crate::security::ContentSecurityPolicy;

/// A captured request/response pair supplied by the host
pub trait HttpExchange {
    /// URL of the request
    fn url(&self) -> &str;

    /// Response headers as (name, value) pairs, in wire order
    fn response_headers(&self) -> Vec<(String, String)>;
}

/// Response captured as URL plus header pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedResponse {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl CapturedResponse {
    /// Create from already split headers
    pub fn new(url: impl Into<String>, headers: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            headers,
        }
    }

    /// Create from raw HTTP/1.x response bytes
    pub fn from_raw(url: impl Into<String>, raw: &[u8]) -> Self {
        Self::new(url, parse_raw_headers(raw))
    }

    /// Add a header, builder style
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl HttpExchange for CapturedResponse {
    fn url(&self) -> &str {
        &self.url
    }

    fn response_headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }
}

/// Split the header block of a raw HTTP/1.x response into pairs
///
/// The status line is skipped, folded continuation lines are joined onto
/// the previous header and parsing stops at the first blank line.
pub fn parse_raw_headers(raw: &[u8]) -> Vec<(String, String)> {
    let text = String::from_utf8_lossy(raw);
    let mut headers: Vec<(String, String)> = Vec::new();

    let lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    for (idx, line) in lines.enumerate() {
        if line.is_empty() {
            break;
        }
        if idx == 0 && line.starts_with("HTTP/") {
            continue;
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some((_, value)) = headers.last_mut() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(line.trim());
            }
            continue;
        }

        match line.split_once(':') {
            Some((name, value)) => headers.push((name.trim().to_string(), value.trim().to_string())),
            None => tracing::debug!(line = %line, "Ignoring malformed header line"),
        }
    }

    headers
}

/// A finding attached to the response it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanIssue {
    /// URL of the analyzed response
    pub url: String,
    /// Header that carried the policy
    pub header_name: String,
    #[serde(flatten)]
    pub finding: Finding,
}

impl ScanIssue {
    /// Issue name as shown in a report
    pub fn name(&self) -> &'static str {
        self.finding.kind.name()
    }

    pub fn severity(&self) -> Severity {
        self.finding.severity
    }
}

/// Which issues to keep when two describe the same problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consolidation {
    /// Report the existing issue only
    KeepExisting,
    /// Report both issues
    KeepBoth,
}

/// Issues with the same name and URL are duplicates
pub fn consolidate(existing: &ScanIssue, new: &ScanIssue) -> Consolidation {
    if existing.name() == new.name() && existing.url == new.url {
        Consolidation::KeepExisting
    } else {
        Consolidation::KeepBoth
    }
}

/// Passive CSP scanner
pub struct PassiveScanner {
    config: ScannerConfig,
    analyzer: PolicyAnalyzer,
}

impl Default for PassiveScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveScanner {
    /// Create scanner with default config
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    /// Create scanner with custom config
    pub fn with_config(config: ScannerConfig) -> Self {
        let analyzer = PolicyAnalyzer::from_config(&config);
        Self { config, analyzer }
    }

    /// Scanner configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Parse and analyze a single CSP header
    pub fn analyze_header(&self, name: &str, value: &str) -> Result<Vec<Finding>> {
        let policy = ContentSecurityPolicy::parse_with(name, value, self.config.strict_directives)?;
        Ok(self.analyzer.analyze(&policy))
    }

    /// Analyze every CSP header of a captured exchange
    pub fn scan<E: HttpExchange + ?Sized>(&self, exchange: &E) -> Vec<ScanIssue> {
        self.scan_headers(exchange.url(), &exchange.response_headers())
    }

    /// Analyze every CSP header in `headers`
    ///
    /// Headers that fail to parse are skipped; the others are still analyzed.
    pub fn scan_headers(&self, url: &str, headers: &[(String, String)]) -> Vec<ScanIssue> {
        let mut issues = Vec::new();

        for (name, value) in headers {
            if !self.config.is_policy_header(name) || value.trim().is_empty() {
                continue;
            }

            match self.analyze_header(name, value) {
                Ok(findings) => {
                    tracing::debug!(url, header = %name, findings = findings.len(), "Analyzed CSP header");
                    issues.extend(findings.into_iter().map(|finding| ScanIssue {
                        url: url.to_string(),
                        header_name: name.clone(),
                        finding,
                    }));
                }
                Err(e) => {
                    tracing::warn!(url, header = %name, error = %e, "Skipping unparseable CSP header");
                }
            }
        }

        issues
    }
}

/// Thread-safe issue collector that drops duplicates
#[derive(Clone, Default)]
pub struct IssueLog {
    issues: Arc<RwLock<Vec<ScanIssue>>>,
}

impl IssueLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue, returns false if it duplicates a recorded one
    pub fn record(&self, issue: ScanIssue) -> bool {
        let mut issues = self.issues.write();

        let duplicate = issues
            .iter()
            .any(|existing| consolidate(existing, &issue) == Consolidation::KeepExisting);
        if duplicate {
            return false;
        }

        issues.push(issue);
        true
    }

    /// Record several issues, returns how many were new
    pub fn extend(&self, issues: impl IntoIterator<Item = ScanIssue>) -> usize {
        issues.into_iter().map(|issue| self.record(issue)).filter(|new| *new).count()
    }

    /// Recorded issues, in first-seen order
    pub fn issues(&self) -> Vec<ScanIssue> {
        self.issues.read().clone()
    }

    pub fn len(&self) -> usize {
        self.issues.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.read().is_empty()
    }
}

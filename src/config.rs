// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scanner configuration

use std::time::Duration;

use crate::scanner::{BypassCatalog, FindingKind};
use crate::security::CSP_HEADERS;

/// Default user agent for the fetch command
pub const DEFAULT_USER_AGENT: &str = concat!("csp-bypass/", env!("CARGO_PKG_VERSION"));

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Fail a header on unknown directives instead of skipping them
    pub strict_directives: bool,
    /// CSP header names to inspect (case-insensitive)
    pub header_names: Vec<String>,
    /// Rule kinds that are not run
    pub disabled_rules: Vec<FindingKind>,
    /// Entries added on top of the built-in bypass catalog
    pub extra_bypasses: Option<BypassCatalog>,
    /// User agent string for fetched responses
    pub user_agent: String,
    /// Request timeout for fetched responses
    pub timeout: Duration,
    /// Maximum redirects to follow when fetching
    pub max_redirects: usize,
    /// Accept invalid TLS certificates when fetching
    pub ignore_https_errors: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            strict_directives: true,
            header_names: CSP_HEADERS.iter().map(|h| h.to_string()).collect(),
            disabled_rules: vec![],
            extra_bypasses: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            ignore_https_errors: false,
        }
    }
}

impl ScannerConfig {
    /// Create a new scanner config
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict directive parsing (the default)
    pub fn strict() -> Self {
        Self::default()
    }

    /// Skip unknown directives instead of rejecting the header
    pub fn lenient() -> Self {
        Self {
            strict_directives: false,
            ..Default::default()
        }
    }

    /// Enable/disable strict directive parsing
    pub fn strict_directives(mut self, strict: bool) -> Self {
        self.strict_directives = strict;
        self
    }

    /// Also inspect another header name
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        if !self.header_names.contains(&name) {
            self.header_names.push(name);
        }
        self
    }

    /// Do not run rules of this kind
    pub fn disable_rule(mut self, kind: FindingKind) -> Self {
        if !self.disabled_rules.contains(&kind) {
            self.disabled_rules.push(kind);
        }
        self
    }

    /// Add bypass catalog entries
    pub fn bypasses(mut self, catalog: BypassCatalog) -> Self {
        match self.extra_bypasses {
            Some(ref mut existing) => existing.merge(&catalog),
            None => self.extra_bypasses = Some(catalog),
        }
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignore HTTPS errors
    pub fn ignore_https_errors(mut self, ignore: bool) -> Self {
        self.ignore_https_errors = ignore;
        self
    }

    /// Whether a rule kind runs
    pub fn is_enabled(&self, kind: FindingKind) -> bool {
        !self.disabled_rules.contains(&kind)
    }

    /// Whether a header should be analyzed
    pub fn is_policy_header(&self, name: &str) -> bool {
        self.header_names.iter().any(|h| h.eq_ignore_ascii_case(name))
    }

    /// Built-in catalog plus any extra entries
    pub fn catalog(&self) -> BypassCatalog {
        let mut catalog = BypassCatalog::builtin().clone();
        if let Some(ref extra) = self.extra_bypasses {
            catalog.merge(extra);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::Directive;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();

        assert!(config.strict_directives);
        assert!(config.is_policy_header("X-WebKit-CSP"));
        assert!(!config.is_policy_header("content-security-policy-report-only"));
        assert!(FindingKind::ALL.iter().all(|k| config.is_enabled(*k)));
    }

    #[test]
    fn test_builder() {
        let config = ScannerConfig::lenient()
            .header_name("Content-Security-Policy-Report-Only")
            .disable_rule(FindingKind::MissingDirective)
            .disable_rule(FindingKind::MissingDirective)
            .timeout(Duration::from_secs(5));

        assert!(!config.strict_directives);
        assert!(config.is_policy_header("content-security-policy-report-only"));
        assert_eq!(config.disabled_rules, vec![FindingKind::MissingDirective]);
        assert!(!config.is_enabled(FindingKind::MissingDirective));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_catalog_merges_extra() {
        let config = ScannerConfig::new()
            .bypasses(BypassCatalog::new().with_entry(Directive::ScriptSrc, "a.example.com", "p"))
            .bypasses(BypassCatalog::new().with_entry(Directive::ScriptSrc, "b.example.com", "p"));

        let catalog = config.catalog();
        assert_eq!(catalog.len(), BypassCatalog::builtin().len() + 2);
    }
}

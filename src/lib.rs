// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # csp-bypass - Passive Content-Security-Policy Analyzer
//!
//! Parses CSP response headers and reports weaknesses an attacker can use
//! to get script execution despite the policy.
//!
//! ## Checks
//!
//! - Deprecated `X-Content-Security-Policy` / `X-WebKit-CSP` headers
//! - `'unsafe-inline'` / `'unsafe-eval'` in script-src and style-src
//! - Wildcard sources
//! - Missing directives that do not fall back to default-src
//! - Weak default-src
//! - Whitelisted domains hosting known bypasses (JSONP, AngularJS, ...)
//!
//! ## Example
//!
//! ```rust
//! use csp_bypass::{ContentSecurityPolicy, Directive, FindingKind, PolicyAnalyzer};
//!
//! let csp = ContentSecurityPolicy::parse(
//!     "Content-Security-Policy",
//!     "default-src 'self'; script-src 'self' *.googleapis.com 'unsafe-eval'",
//! )?;
//!
//! assert!(csp.effective(Directive::ImgSrc).contains(&"'self'".to_string()));
//!
//! let findings = PolicyAnalyzer::new().analyze(&csp);
//! assert!(findings.iter().any(|f| f.kind == FindingKind::KnownBypass));
//! # Ok::<(), csp_bypass::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod scanner;
pub mod security;

// Re-exports for convenience

// Config
pub use config::ScannerConfig;

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::HttpClient;

// Policy model
pub use security::{ContentSecurityPolicy, Directive, NO_FALLBACK};
pub use security::matcher::matches as domain_matches;

// Scanning
pub use scanner::{BypassCatalog, KnownBypass, PolicyAnalyzer, Rule};
pub use scanner::{BypassMatch, Confidence, Finding, FindingKind, Severity};
pub use scanner::{CapturedResponse, HttpExchange, IssueLog, PassiveScanner, ScanIssue};

/// Parse one CSP header and run every rule over it
pub fn analyze_header(header_name: &str, header_value: &str) -> Result<Vec<Finding>> {
    let policy = ContentSecurityPolicy::parse(header_name, header_value)?;
    Ok(PolicyAnalyzer::new().analyze(&policy))
}

/// csp-bypass version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_header() {
        let findings = analyze_header(
            "Content-Security-Policy",
            "script-src 'self' https: 'unsafe-eval' 'unsafe-inline' http:",
        )
        .unwrap();

        assert!(findings
            .iter()
            .any(|f| f.kind == FindingKind::UnsafeContentSource
                && f.directive == Some(Directive::ScriptSrc)));
    }

    #[test]
    fn test_analyze_header_rejects_unknown_directive() {
        let err = analyze_header("Content-Security-Policy", "foobar-src 'none'").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_domain_matches_reexport() {
        assert!(domain_matches("*.googleapis.com", &["ajax", "googleapis", "com"]));
    }
}

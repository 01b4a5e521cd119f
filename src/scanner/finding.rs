// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Finding types produced by the policy analyzer

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::security::Directive;

/// Kind of CSP weakness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// Policy delivered through X-WebKit-CSP / X-Content-Security-Policy
    DeprecatedHeader,
    /// 'unsafe-inline' or 'unsafe-eval' in script-src / style-src
    UnsafeContentSource,
    /// Wildcard in a source list
    WildcardContentSource,
    /// Directive without default-src fallback is not set
    MissingDirective,
    /// default-src allows more than 'self', 'none' or https:
    WeakDefaultSource,
    /// Whitelisted domain hosts a known CSP bypass
    KnownBypass,
}

impl FindingKind {
    /// Every kind, in analyzer order
    pub const ALL: &'static [FindingKind] = &[
        FindingKind::DeprecatedHeader,
        FindingKind::UnsafeContentSource,
        FindingKind::WildcardContentSource,
        FindingKind::MissingDirective,
        FindingKind::WeakDefaultSource,
        FindingKind::KnownBypass,
    ];

    /// Issue name as shown in a report
    pub fn name(&self) -> &'static str {
        match self {
            FindingKind::DeprecatedHeader => "Deprecated CSP Header",
            FindingKind::UnsafeContentSource => "Unsafe CSP Content Source",
            FindingKind::WildcardContentSource => "Wildcard CSP Content Source",
            FindingKind::MissingDirective => "Missing CSP Directive",
            FindingKind::WeakDefaultSource => "Weak CSP Default Source",
            FindingKind::KnownBypass => "Known CSP Bypass",
        }
    }

    /// Short stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            FindingKind::DeprecatedHeader => "deprecated-header",
            FindingKind::UnsafeContentSource => "unsafe-content-source",
            FindingKind::WildcardContentSource => "wildcard-content-source",
            FindingKind::MissingDirective => "missing-directive",
            FindingKind::WeakDefaultSource => "weak-default-source",
            FindingKind::KnownBypass => "known-bypass",
        }
    }

    /// Look up a kind by its identifier
    pub fn from_id(id: &str) -> Option<Self> {
        FindingKind::ALL.iter().copied().find(|k| k.id() == id)
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            FindingKind::DeprecatedHeader => {
                "The policy is sent in a vendor-prefixed header. Browsers either ignore these \
                 headers or implement an outdated, partial version of CSP."
            }
            FindingKind::UnsafeContentSource => {
                "'unsafe-inline' or 'unsafe-eval' re-enables inline script/style or string \
                 evaluation, which removes most of the XSS protection CSP provides."
            }
            FindingKind::WildcardContentSource => {
                "A wildcard source allows content from any host matching the pattern, \
                 including hosts an attacker may control."
            }
            FindingKind::MissingDirective => {
                "This directive does not fall back to default-src. Leaving it out places no \
                 restriction on what it governs."
            }
            FindingKind::WeakDefaultSource => {
                "default-src allows sources beyond 'self', 'none' and https:. Every fetch \
                 directive that is not set inherits this list."
            }
            FindingKind::KnownBypass => {
                "The policy whitelists a domain that serves content usable to execute \
                 arbitrary script, such as JSONP endpoints or old AngularJS builds."
            }
        }
    }

    /// Get remediation advice
    pub fn remediation(&self) -> &'static str {
        match self {
            FindingKind::DeprecatedHeader => {
                "Send the policy in the Content-Security-Policy header instead."
            }
            FindingKind::UnsafeContentSource => {
                "Remove 'unsafe-inline' and 'unsafe-eval'. Move inline code to external files \
                 or use nonces/hashes."
            }
            FindingKind::WildcardContentSource => "Replace wildcard sources with explicit hosts.",
            FindingKind::MissingDirective => "Set the directive explicitly, e.g. to 'none' or 'self'.",
            FindingKind::WeakDefaultSource => "Restrict default-src to 'none' or 'self'.",
            FindingKind::KnownBypass => {
                "Remove the domain from the policy or narrow it to a path that does not serve \
                 attacker-usable content."
            }
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finding severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Medium,
    High,
}

/// Finding confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Certain,
}

/// Matched known-bypass domain and the payload that abuses it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassMatch {
    /// Policy source token that matched
    pub source: String,
    /// Catalog domain
    pub domain: String,
    /// Exploitation payload
    pub payload: String,
}

/// One detected CSP weakness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub directive: Option<Directive>,
    pub severity: Severity,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass: Option<BypassMatch>,
}

impl Finding {
    /// Create a finding with certain confidence
    pub fn new(kind: FindingKind, severity: Severity) -> Self {
        Self {
            kind,
            directive: None,
            severity,
            confidence: Confidence::Certain,
            bypass: None,
        }
    }

    /// Attach the offending directive
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Attach a known-bypass match
    pub fn with_bypass(mut self, bypass: BypassMatch) -> Self {
        self.bypass = Some(bypass);
        self
    }

    /// Human readable detail line
    pub fn detail(&self) -> String {
        let mut detail = match self.directive {
            Some(d) => format!("{} ({})", self.kind.name(), d),
            None => self.kind.name().to_string(),
        };
        if let Some(ref bypass) = self.bypass {
            detail.push_str(&format!(
                ": {} matches {}, payload: {}",
                bypass.source, bypass.domain, bypass.payload
            ));
        }
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids() {
        for kind in FindingKind::ALL {
            assert_eq!(FindingKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(FindingKind::from_id("insecure-content-source"), None);
    }

    #[test]
    fn test_detail() {
        let finding = Finding::new(FindingKind::UnsafeContentSource, Severity::High)
            .with_directive(Directive::ScriptSrc);
        assert_eq!(finding.detail(), "Unsafe CSP Content Source (script-src)");

        let finding = Finding::new(FindingKind::KnownBypass, Severity::Medium)
            .with_directive(Directive::ScriptSrc)
            .with_bypass(BypassMatch {
                source: "*.googleapis.com".to_string(),
                domain: "ajax.googleapis.com".to_string(),
                payload: "<x>".to_string(),
            });
        assert!(finding.detail().contains("*.googleapis.com matches ajax.googleapis.com"));
    }

    #[test]
    fn test_serialize() {
        let finding = Finding::new(FindingKind::MissingDirective, Severity::Medium)
            .with_directive(Directive::BaseUri);
        let json = serde_json::to_value(&finding).unwrap();

        assert_eq!(json["kind"], "missing-directive");
        assert_eq!(json["directive"], "base-uri");
        assert_eq!(json["severity"], "Medium");
        assert_eq!(json["confidence"], "Certain");
        assert!(json.get("bypass").is_none());
    }
}

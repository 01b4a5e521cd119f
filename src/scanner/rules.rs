// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Policy rules
//!
//! Each rule inspects one parsed policy and appends findings. Rules share
//! no state and never see each other's output.

use std::sync::Arc;

use super::catalog::BypassCatalog;
use super::finding::{BypassMatch, Finding, FindingKind, Severity};
use crate::security::matcher;
use crate::security::{source, ContentSecurityPolicy, Directive, NO_FALLBACK};

/// A single check over a parsed policy
pub trait Rule: Send + Sync {
    /// Kind of finding this rule emits
    fn kind(&self) -> FindingKind;

    /// Append findings for `policy`
    fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>);
}

/// Policy delivered through a vendor-prefixed header
pub struct DeprecatedHeaderRule;

impl Rule for DeprecatedHeaderRule {
    fn kind(&self) -> FindingKind {
        FindingKind::DeprecatedHeader
    }

    fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>) {
        if policy.is_deprecated_header() {
            findings.push(Finding::new(self.kind(), Severity::Medium));
        }
    }
}

/// 'unsafe-inline' / 'unsafe-eval' in script-src or style-src
pub struct UnsafeContentSourceRule;

impl Rule for UnsafeContentSourceRule {
    fn kind(&self) -> FindingKind {
        FindingKind::UnsafeContentSource
    }

    fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>) {
        for directive in [Directive::ScriptSrc, Directive::StyleSrc] {
            let unsafe_source = policy
                .effective(directive)
                .iter()
                .any(|s| s == source::UNSAFE_EVAL || s == source::UNSAFE_INLINE);

            if unsafe_source {
                findings.push(Finding::new(self.kind(), Severity::High).with_directive(directive));
            }
        }
    }
}

/// `*` anywhere in an explicit source list
pub struct WildcardContentSourceRule;

impl Rule for WildcardContentSourceRule {
    fn kind(&self) -> FindingKind {
        FindingKind::WildcardContentSource
    }

    fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>) {
        for (directive, sources) in policy.iter_explicit() {
            if sources.iter().any(|s| s.contains('*')) {
                findings.push(Finding::new(self.kind(), Severity::Medium).with_directive(directive));
            }
        }
    }
}

/// No-fallback directive left unset
pub struct MissingDirectiveRule;

impl Rule for MissingDirectiveRule {
    fn kind(&self) -> FindingKind {
        FindingKind::MissingDirective
    }

    fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>) {
        for directive in NO_FALLBACK {
            if !policy.has_explicit(*directive) {
                findings.push(Finding::new(self.kind(), Severity::Medium).with_directive(*directive));
            }
        }
    }
}

/// default-src allowing anything beyond 'self', 'none' and https:
pub struct WeakDefaultSourceRule;

impl Rule for WeakDefaultSourceRule {
    fn kind(&self) -> FindingKind {
        FindingKind::WeakDefaultSource
    }

    fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>) {
        let weak = policy
            .effective(Directive::DefaultSrc)
            .iter()
            .any(|s| s != source::SELF && s != source::NONE && s != source::HTTPS);

        if weak {
            findings.push(
                Finding::new(self.kind(), Severity::Medium).with_directive(Directive::DefaultSrc),
            );
        }
    }
}

/// Whitelisted domains that host known bypass payloads
pub struct KnownBypassRule {
    catalog: Arc<BypassCatalog>,
}

impl KnownBypassRule {
    /// Check against the given catalog
    pub fn new(catalog: Arc<BypassCatalog>) -> Self {
        Self { catalog }
    }

    /// Check against the built-in catalog
    pub fn builtin() -> Self {
        Self::new(Arc::new(BypassCatalog::builtin().clone()))
    }

    /// Keywords and bare schemes name no host
    fn is_host_source(src: &str) -> bool {
        !src.starts_with('\'') && src != source::HTTP && src != source::HTTPS
    }
}

impl Rule for KnownBypassRule {
    fn kind(&self) -> FindingKind {
        FindingKind::KnownBypass
    }

    fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>) {
        for (directive, bypasses) in self.catalog.iter() {
            let sources = policy
                .effective(directive)
                .iter()
                .filter(|s| Self::is_host_source(s));

            for src in sources {
                for bypass in bypasses.iter().filter(|b| matcher::matches(src, b.labels())) {
                    tracing::debug!(directive = %directive, source = %src, domain = %bypass.domain, "Known bypass matched");
                    findings.push(
                        Finding::new(self.kind(), Severity::Medium)
                            .with_directive(directive)
                            .with_bypass(BypassMatch {
                                source: src.clone(),
                                domain: bypass.domain.clone(),
                                payload: bypass.payload.clone(),
                            }),
                    );
                }
            }
        }
    }
}

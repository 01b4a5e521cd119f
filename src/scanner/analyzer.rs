// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Policy analyzer

use std::sync::Arc;

use super::catalog::BypassCatalog;
use super::finding::{Finding, FindingKind};
use super::rules::{
    DeprecatedHeaderRule, KnownBypassRule, MissingDirectiveRule, Rule, UnsafeContentSourceRule,
    WeakDefaultSourceRule, WildcardContentSourceRule,
};
use crate::config::ScannerConfig;
use crate::security::ContentSecurityPolicy;

/// Runs an ordered list of rules over a parsed policy
pub struct PolicyAnalyzer {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for PolicyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyAnalyzer {
    /// Create analyzer with every rule and the built-in catalog
    pub fn new() -> Self {
        Self::with_catalog(BypassCatalog::builtin().clone())
    }

    /// Create analyzer with every rule and a custom catalog
    pub fn with_catalog(catalog: BypassCatalog) -> Self {
        Self {
            rules: default_rules(Arc::new(catalog)),
        }
    }

    /// Create analyzer honoring disabled rules and extra catalog entries
    pub fn from_config(config: &ScannerConfig) -> Self {
        let rules = default_rules(Arc::new(config.catalog()))
            .into_iter()
            .filter(|rule| config.is_enabled(rule.kind()))
            .collect();
        Self { rules }
    }

    /// Create analyzer without rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after the existing ones
    pub fn with_rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Kinds of the configured rules, in run order
    pub fn rule_kinds(&self) -> Vec<FindingKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Run every rule over `policy`
    pub fn analyze(&self, policy: &ContentSecurityPolicy) -> Vec<Finding> {
        let mut findings = Vec::new();

        for rule in &self.rules {
            let before = findings.len();
            rule.check(policy, &mut findings);
            tracing::debug!(
                rule = rule.kind().id(),
                findings = findings.len() - before,
                "Rule evaluated"
            );
        }

        findings
    }
}

fn default_rules(catalog: Arc<BypassCatalog>) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DeprecatedHeaderRule),
        Box::new(UnsafeContentSourceRule),
        Box::new(WildcardContentSourceRule),
        Box::new(MissingDirectiveRule),
        Box::new(WeakDefaultSourceRule),
        Box::new(KnownBypassRule::new(catalog)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::finding::Severity;
    use crate::security::Directive;

    const PARSER_2: &str = "default-src 'self' https:; connect-src 'self' https: http:; \
        font-src 'self' https:; frame-src *; img-src 'self' https: http: data:; \
        media-src 'self' https:; object-src 'self' https:; \
        script-src 'self' https: 'unsafe-eval' 'unsafe-inline' http:; \
        style-src 'self' https: 'unsafe-inline' http:; report-uri /tracking/csp;";

    fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
        findings.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(PolicyAnalyzer::new().rule_kinds(), FindingKind::ALL.to_vec());
    }

    #[test]
    fn test_full_policy() {
        let csp = ContentSecurityPolicy::parse("Content-Security-Policy", PARSER_2).unwrap();
        let findings = PolicyAnalyzer::new().analyze(&csp);

        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::UnsafeContentSource,
                FindingKind::UnsafeContentSource,
                FindingKind::WildcardContentSource,
                FindingKind::MissingDirective,
                FindingKind::MissingDirective,
                FindingKind::MissingDirective,
                FindingKind::MissingDirective,
                FindingKind::MissingDirective,
            ]
        );
        assert_eq!(findings[0].directive, Some(Directive::ScriptSrc));
        assert_eq!(findings[1].directive, Some(Directive::StyleSrc));
        assert_eq!(findings[2].directive, Some(Directive::FrameSrc));
        assert!(findings[..2].iter().all(|f| f.severity == Severity::High));
        // report-uri is set
        assert!(!findings.iter().any(|f| f.directive == Some(Directive::ReportUri)));
    }

    #[test]
    fn test_deprecated_header_weak_default_and_bypass() {
        let csp = ContentSecurityPolicy::parse(
            "X-Content-Security-Policy",
            "default-src 'self' ajax.googleapis.com; base-uri 'none'; form-action 'self'; \
             frame-ancestors 'none'; plugin-types application/pdf; report-uri /r; sandbox",
        )
        .unwrap();
        let findings = PolicyAnalyzer::new().analyze(&csp);

        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::DeprecatedHeader,
                FindingKind::WeakDefaultSource,
                FindingKind::KnownBypass,
                FindingKind::KnownBypass,
                FindingKind::KnownBypass,
            ]
        );
        let last = findings.last().unwrap();
        assert_eq!(last.directive, Some(Directive::ObjectSrc));
        assert_eq!(last.bypass.as_ref().unwrap().domain, "ajax.googleapis.com");
    }

    #[test]
    fn test_from_config_disables_rules() {
        let config = ScannerConfig::new()
            .disable_rule(FindingKind::MissingDirective)
            .disable_rule(FindingKind::KnownBypass);
        let analyzer = PolicyAnalyzer::from_config(&config);

        assert_eq!(analyzer.rule_kinds().len(), 4);
        let csp: ContentSecurityPolicy = "script-src ajax.googleapis.com".parse().unwrap();
        assert!(analyzer.analyze(&csp).is_empty());
    }

    #[test]
    fn test_custom_catalog_and_rule() {
        struct FrameSrcRule;

        impl Rule for FrameSrcRule {
            fn kind(&self) -> FindingKind {
                FindingKind::WildcardContentSource
            }

            fn check(&self, policy: &ContentSecurityPolicy, findings: &mut Vec<Finding>) {
                if policy.has_explicit(Directive::FrameSrc) {
                    findings.push(
                        Finding::new(self.kind(), Severity::Medium)
                            .with_directive(Directive::FrameSrc),
                    );
                }
            }
        }

        let analyzer = PolicyAnalyzer::empty()
            .with_rule(KnownBypassRule::new(Arc::new(
                BypassCatalog::new().with_entry(Directive::FrameSrc, "widgets.example.com", "p"),
            )))
            .with_rule(FrameSrcRule);

        let csp: ContentSecurityPolicy = "frame-src https://*.example.com".parse().unwrap();
        let findings = analyzer.analyze(&csp);

        assert_eq!(
            kinds(&findings),
            vec![FindingKind::KnownBypass, FindingKind::WildcardContentSource]
        );
    }

    #[test]
    fn test_no_findings_for_tight_policy() {
        let csp: ContentSecurityPolicy = "default-src 'none'; script-src 'self'; style-src 'self'; \
             base-uri 'none'; form-action 'self'; frame-ancestors 'none'; \
             plugin-types application/pdf; report-uri /csp; sandbox allow-scripts"
            .parse()
            .unwrap();

        assert!(PolicyAnalyzer::new().analyze(&csp).is_empty());
    }
}

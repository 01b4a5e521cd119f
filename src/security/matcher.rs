// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Source token vs. known bypass domain matching
//!
//! Labels are compared right-to-left and the label counts must agree.
//! A `*` label in the policy source stands for exactly one label of the
//! bypass domain, so `*.bar.com` matches `foo.bar.com` but neither
//! `bar.com` nor `a.foo.bar.com`.

/// Split a dotted domain into labels
pub fn domain_labels(domain: &str) -> Vec<&str> {
    domain.split('.').collect()
}

/// Host portion of a source token
///
/// Drops a `scheme://` prefix, then any path and port. The scheme plays
/// no part in matching since catalog domains carry none.
pub fn source_host(source: &str) -> &str {
    let host = match source.split_once("://") {
        Some((_scheme, rest)) => rest,
        None => source,
    };
    let host = host.split('/').next().unwrap_or(host);
    host.split(':').next().unwrap_or(host)
}

/// Whether a policy source token admits the given bypass domain
pub fn matches<S: AsRef<str>>(source: &str, bypass_labels: &[S]) -> bool {
    let host = source_host(source);
    if host.is_empty() {
        return false;
    }

    let source_labels = domain_labels(host);
    if source_labels.len() != bypass_labels.len() {
        return false;
    }

    source_labels
        .iter()
        .rev()
        .zip(bypass_labels.iter().rev())
        .all(|(src, bypass)| *src == "*" || src.eq_ignore_ascii_case(bypass.as_ref()))
}

/// Convenience wrapper taking a dotted bypass domain
pub fn matches_domain(source: &str, bypass_domain: &str) -> bool {
    matches(source, &domain_labels(bypass_domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_domain_match() {
        assert!(matches("foo.bar.com", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_wildcard_main() {
        assert!(matches("*.bar.com", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_simple_mismatch() {
        assert!(!matches("foobar.com", &["foobar", "net"]));
        assert!(!matches("foobar.com", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_scheme_match() {
        assert!(matches("ws://*.bar.com", &["foo", "bar", "com"]));
        assert!(matches("https://foo.bar.com", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_scheme_mismatch() {
        assert!(!matches("ws://*.foo.com", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_realworld_match() {
        assert!(matches("*.googleapis.com", &["ajax", "googleapis", "com"]));
        assert!(matches("ajax.googleapis.com", &["ajax", "googleapis", "com"]));
        assert!(matches_domain("https://ajax.googleapis.com/ajax/libs/", "ajax.googleapis.com"));
    }

    #[test]
    fn test_wildcard_is_one_label() {
        // fewer labels
        assert!(!matches("*.com", &["foo", "bar", "com"]));
        // more labels
        assert!(!matches("*.a.bar.com", &["foo", "bar", "com"]));
        assert!(!matches("*", &["foo", "bar", "com"]));
        assert!(matches("*", &["localhost"]));
    }

    #[test]
    fn test_wildcard_only_on_policy_side() {
        assert!(!matches("foo.bar.com", &["*", "bar", "com"]));
        assert!(matches("*.bar.com", &["*", "bar", "com"]));
    }

    #[test]
    fn test_wildcard_in_middle_label() {
        assert!(matches("foo.*.com", &["foo", "bar", "com"]));
        assert!(!matches("foo.*.net", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches("AJAX.GoogleAPIs.com", &["ajax", "googleapis", "com"]));
        assert!(matches("ajax.googleapis.com", &["AJAX", "googleapis", "COM"]));
    }

    #[test]
    fn test_partial_label_is_not_a_match() {
        assert!(!matches("ajax.googleapis.co", &["ajax", "googleapis", "com"]));
        assert!(!matches("jax.googleapis.com", &["ajax", "googleapis", "com"]));
    }

    #[test]
    fn test_port_and_path_ignored() {
        assert!(matches("https://foo.bar.com:443", &["foo", "bar", "com"]));
        assert!(matches("foo.bar.com/path/x.js", &["foo", "bar", "com"]));
        assert!(matches("*.bar.com:*", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_degenerate_sources() {
        assert!(!matches("", &["foo", "bar", "com"]));
        assert!(!matches("https://", &["foo", "bar", "com"]));
        assert!(!matches("foo.bar.com.", &["foo", "bar", "com"]));
    }

    #[test]
    fn test_source_host() {
        assert_eq!(source_host("ws://*.bar.com"), "*.bar.com");
        assert_eq!(source_host("https://a.b.c:8443/x"), "a.b.c");
        assert_eq!(source_host("a.b.c"), "a.b.c");
    }
}

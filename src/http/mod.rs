// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP fetching for live targets
//!
//! Only headers are kept; bodies are never read into the analysis.

mod client;

pub use client::HttpClient;

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
}

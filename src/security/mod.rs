// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSP policy model
//!
//! - Directive names and the no-fallback set
//! - Header parsing and fallback-aware lookups
//! - Wildcard-aware domain matching

mod csp;
mod directive;
pub mod matcher;

pub use csp::{
    is_csp_header, is_deprecated_header, source, ContentSecurityPolicy, CSP_HEADERS,
    DEPRECATED_HEADERS,
};
pub use directive::{Directive, NO_FALLBACK};

//! Site crawlers.
//!
//! Each submodule targets one source site and owns its host constant,
//! recognition patterns, and visit functions.

/// Google Finance quote pages (NSE)
pub mod google_finance;

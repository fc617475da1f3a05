//! # Google Finance quote scraping for NSE-listed holdings.
//!
//! Quote pages are fetched as raw markup and scanned with recognition
//! patterns per field. There is no structured API behind this: the
//! patterns are deliberately a fallback list per field, tolerant of
//! partial matches, because the page layout shifts without notice.

/// Quote-page retrieval and field extraction
pub mod quote;

/// Google Finance host domain
const HOST: &str = "www.google.com";

/// Exchange suffix appended to every lookup symbol.
const EXCHANGE: &str = "NSE";

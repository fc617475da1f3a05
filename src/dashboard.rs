//! Dashboard document patcher.
//!
//! The dashboard is a hand-authored HTML file with one embedded
//! JavaScript object mapping display tickers to research fields. Only the
//! `pe` and `down_52w` values of fetched tickers are rewritten, by scoped
//! in-place substitution; a full parse-and-regenerate of the block would
//! risk reformatting unrelated hand-written content, so every byte outside
//! the targeted values must survive untouched.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::{declare::TickerRecord, util};

static REG_PE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bpe:\s*[\d.]+").expect("Failed to compile pe field regex"));

static REG_DOWN_52W: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bdown_52w:\s*-?[\d.]+").expect("Failed to compile down_52w field regex")
});

/// Matches both the hand-authored stamp and our own previous output, so a
/// rerun keeps refreshing the stamp it wrote last time.
static REG_STAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Data (?:researched as of|auto-updated:) [^•<"]+"#)
        .expect("Failed to compile stamp regex")
});

/// Applies fetched records to the document text.
///
/// Returns the new text and whether anything qualified for patching. Pure
/// over the text; reading and writing the file is the orchestrator's
/// concern. With zero fetched records the input comes back byte-identical
/// and `changed` is false, and the stamp is left alone too.
pub fn patch(
    document: &str,
    records: &[TickerRecord],
    now: DateTime<FixedOffset>,
) -> (String, bool) {
    let fetched: Vec<&TickerRecord> = records.iter().filter(|r| r.fetched).collect();

    if fetched.is_empty() {
        return (document.to_string(), false);
    }

    let mut html = document.to_string();

    for record in &fetched {
        if let Some(pe) = record.pe_ratio {
            replace_field(&mut html, &record.ticker, &REG_PE, "pe", pe);
        }

        if let Some(down) = record.percent_below_52w_high {
            replace_field(&mut html, &record.ticker, &REG_DOWN_52W, "down_52w", down);
        }
    }

    let stamp = format!(
        "Data auto-updated: {}",
        util::datetime::format_stamp(now)
    );
    html = REG_STAMP.replace_all(&html, stamp.as_str()).into_owned();

    (html, true)
}

/// Replaces one field's value inside one ticker's sub-object.
///
/// The sub-object is located by the literal quoted key (so "M&M" matches
/// its ampersand as-is) and scoped from its opening brace to its own first
/// closing brace. Precondition: ticker sub-objects do not nest and field
/// order inside them is stable. A missing key or a missing field inside
/// the scope skips this one update silently.
fn replace_field(html: &mut String, ticker: &str, field_regex: &Regex, field: &str, value: Decimal) {
    let key = format!("\"{}\":", ticker);
    let Some(key_pos) = html.find(&key) else {
        return;
    };
    let after_key = key_pos + key.len();
    let Some(open_offset) = html[after_key..].find('{') else {
        return;
    };

    // Only whitespace may sit between the key and its opening brace;
    // anything else means the brace belongs to someone else.
    if !html[after_key..after_key + open_offset]
        .chars()
        .all(char::is_whitespace)
    {
        return;
    }

    let open = after_key + open_offset;
    let Some(close_offset) = html[open..].find('}') else {
        return;
    };
    let close = open + close_offset;

    let Some(found) = field_regex.find(&html[open..close]) else {
        return;
    };

    let start = open + found.start();
    let end = open + found.end();
    html.replace_range(start..end, &format!("{}: {}", field, value));
}

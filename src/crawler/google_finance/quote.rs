//! Quote-page field extraction.
//!
//! Each field has an ordered list of recognition patterns; the first match
//! wins and later entries exist only as fallbacks for markup variations.
//! A field miss is not an error: the record just carries `None` there. A
//! record is marked not fetched only when the network step itself fails.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    config::SETTINGS,
    crawler::google_finance::{EXCHANGE, HOST},
    declare::TickerRecord,
    util,
};

/// Last-traded-price patterns, in preference order. The data attribute is
/// the most stable; the price element class variants cover pages where the
/// attribute is absent, with and without the currency prefix.
static LAST_PRICE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"data-last-price="([0-9,.]+)""#,
        r#"class="YMlKec fxKbKc"[^>]*>₹([0-9,.]+)"#,
        r#"class="YMlKec fxKbKc"[^>]*>([0-9,.]+)"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Failed to compile last price regex"))
    .collect()
});

static REG_PREVIOUS_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Previous close.*?>([\d,.]+)").expect("Failed to compile previous close regex")
});

/// Captures low then high from the combined "low - high" range text.
static REG_YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Year range.*?([\d,.]+)\s*-\s*([\d,.]+)")
        .expect("Failed to compile year range regex")
});

static REG_PE_RATIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)P/E ratio.*?([\d,.]+)").expect("Failed to compile P/E ratio regex")
});

static REG_MARKET_CAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Market cap.*?([\d,.]+[BMT]?)").expect("Failed to compile market cap regex")
});

static REG_AVG_VOLUME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Avg Volume.*?([\d,.]+[KMB]?)").expect("Failed to compile avg volume regex")
});

/// Retrieves the raw quote page for a lookup symbol.
pub async fn visit(stock_symbol: &str) -> Result<String> {
    let url = format!(
        "https://{host}/finance/quote/{symbol}:{exchange}",
        host = HOST,
        symbol = stock_symbol,
        exchange = EXCHANGE
    );

    util::http::get(&url, None).await
}

/// Fetches and parses one holding's quote.
///
/// Never fails: a network or decode error comes back as a record with
/// `fetched` false and the error message attached. The returned record is
/// keyed by the display name, which is what the dashboard document and the
/// run summary use.
pub async fn fetch(stock_symbol: &str) -> TickerRecord {
    let display = SETTINGS.portfolio.display_name(stock_symbol).to_string();

    match visit(stock_symbol).await {
        Ok(body) => parse(display, &body),
        Err(why) => TickerRecord::failed(display, format!("{:?}", why)),
    }
}

/// Extracts the quote fields from raw page markup.
///
/// Pure over the body text so the extraction logic is testable without
/// network access.
pub fn parse(display_ticker: String, body: &str) -> TickerRecord {
    let mut record = TickerRecord::new(display_ticker);
    record.fetched = true;

    for pattern in LAST_PRICE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(body) {
            record.last_price = capture_decimal(&captures, 1);
            if record.last_price.is_some() {
                break;
            }
        }
    }

    if let Some(captures) = REG_PREVIOUS_CLOSE.captures(body) {
        record.previous_close = capture_decimal(&captures, 1);
    }

    if let Some(captures) = REG_YEAR_RANGE.captures(body) {
        record.low_52w = capture_decimal(&captures, 1);
        record.high_52w = capture_decimal(&captures, 2);
    }

    if let Some(captures) = REG_PE_RATIO.captures(body) {
        record.pe_ratio = capture_decimal(&captures, 1);
    }

    if let Some(captures) = REG_MARKET_CAP.captures(body) {
        record.market_cap = captures.get(1).map(|m| m.as_str().to_string());
    }

    if let Some(captures) = REG_AVG_VOLUME.captures(body) {
        record.avg_volume = captures.get(1).map(|m| m.as_str().to_string());
    }

    record.percent_below_52w_high = percent_below_52w_high(record.last_price, record.high_52w);

    record
}

/// `(last_price - high_52w) / high_52w * 100`, rounded to one decimal
/// place; present only when both inputs are known and the high is nonzero.
fn percent_below_52w_high(
    last_price: Option<Decimal>,
    high_52w: Option<Decimal>,
) -> Option<Decimal> {
    match (last_price, high_52w) {
        (Some(ltp), Some(high)) if !high.is_zero() => {
            Some(((ltp - high) / high * dec!(100)).round_dp(1))
        }
        _ => None,
    }
}

fn capture_decimal(captures: &regex::Captures, group: usize) -> Option<Decimal> {
    captures
        .get(group)
        .and_then(|m| util::text::parse_decimal(m.as_str(), None).ok())
}

#[cfg(test)]
mod tests {
    use crate::logging;

    use super::*;

    const PAGE: &str = r#"
        <div class="AHmHk"><div data-last-price="1,234.50" data-currency-code="INR"></div></div>
        <main><span class="YMlKec fxKbKc">₹1,234.50</span></main>
        <div>Previous close</div><div>1,220.10</div>
        <div>Year range</div><div>980.00 - 1,450.75</div>
        <div>Market cap</div><div>1.53T INR</div>
        <div>Avg Volume</div><div>2.41M</div>
        <div>P/E ratio</div><div>24.18</div>
    "#;

    #[test]
    fn test_parse() {
        let record = parse("ICICIBANK".to_string(), PAGE);

        assert!(record.fetched);
        assert_eq!(record.last_price, Some(dec!(1234.50)));
        assert_eq!(record.previous_close, Some(dec!(1220.10)));
        assert_eq!(record.low_52w, Some(dec!(980.00)));
        assert_eq!(record.high_52w, Some(dec!(1450.75)));
        assert_eq!(record.pe_ratio, Some(dec!(24.18)));
        assert_eq!(record.market_cap.as_deref(), Some("1.53T"));
        assert_eq!(record.avg_volume.as_deref(), Some("2.41M"));
        // (1234.50 - 1450.75) / 1450.75 * 100 = -14.906...
        assert_eq!(record.percent_below_52w_high, Some(dec!(-14.9)));
    }

    #[test]
    fn test_parse_price_fallback_patterns() {
        let body = r#"<span class="YMlKec fxKbKc">₹712.45</span>"#;
        let record = parse("AUBANK".to_string(), body);
        assert_eq!(record.last_price, Some(dec!(712.45)));

        let body = r#"<span class="YMlKec fxKbKc">712.45</span>"#;
        let record = parse("AUBANK".to_string(), body);
        assert_eq!(record.last_price, Some(dec!(712.45)));
    }

    #[test]
    fn test_parse_missing_fields_is_not_an_error() {
        let body = r#"<div data-last-price="55.20"></div>"#;
        let record = parse("KPEL".to_string(), body);

        assert!(record.fetched);
        assert_eq!(record.last_price, Some(dec!(55.20)));
        assert!(record.pe_ratio.is_none());
        assert!(record.market_cap.is_none());
        assert!(record.percent_below_52w_high.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_percent_below_52w_high_requires_both_inputs() {
        assert_eq!(percent_below_52w_high(None, Some(dec!(100))), None);
        assert_eq!(percent_below_52w_high(Some(dec!(90)), None), None);
        assert_eq!(percent_below_52w_high(Some(dec!(90)), Some(dec!(0))), None);
        assert_eq!(
            percent_below_52w_high(Some(dec!(90)), Some(dec!(100))),
            Some(dec!(-10.0))
        );
    }

    #[test]
    fn test_parse_strips_thousand_separators() {
        let body = r#"
            <div data-last-price="12,345.67"></div>
            <div>Year range</div>9,876.00 - 15,000.00
        "#;
        let record = parse("BSE".to_string(), body);

        assert_eq!(record.last_price, Some(dec!(12345.67)));
        assert_eq!(record.low_52w, Some(dec!(9876.00)));
        assert_eq!(record.high_52w, Some(dec!(15000.00)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_fetch() {
        dotenv::dotenv().ok();
        logging::debug_file_async("fetch start".to_string());

        let record = fetch("ICICIBANK").await;
        dbg!(&record);

        logging::debug_file_async("fetch end".to_string());
    }
}

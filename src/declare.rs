use chrono::{DateTime, FixedOffset, SecondsFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One quote record per holding per run.
///
/// Field absence is expected when the source page's markup did not match any
/// known pattern for that field; only a network-level failure marks the whole
/// record as not fetched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TickerRecord {
    /// Display symbol, after the display-name mapping (e.g. "M%26M" → "M&M").
    pub ticker: String,
    /// True iff page retrieval and decode succeeded.
    pub fetched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_52w: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_52w: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,
    /// (last_price - high_52w) / high_52w * 100, rounded to one decimal place.
    /// Present iff last_price and high_52w are present and high_52w is nonzero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_below_52w_high: Option<Decimal>,
    /// Raw text with its unit suffix (K/M/B/T) kept as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<String>,
    /// Raw text with its unit suffix kept as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<String>,
    /// Set only when `fetched` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TickerRecord {
    pub fn new(ticker: String) -> Self {
        TickerRecord {
            ticker,
            ..Default::default()
        }
    }

    /// Builds a record for a holding whose page retrieval failed.
    pub fn failed(ticker: String, error: String) -> Self {
        TickerRecord {
            ticker,
            fetched: false,
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Per-ticker subset carried in the run summary.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SummaryStock {
    pub ticker: String,
    pub status: String,
    pub ltp: Option<Decimal>,
    pub pe: Option<Decimal>,
    pub down_52w: Option<Decimal>,
}

/// Machine-readable summary written once per run; overwrites the previous
/// one, no history kept.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunSummary {
    /// Run timestamp in the dashboard's fixed-offset zone, ISO-8601.
    pub run_time: String,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub stocks: Vec<SummaryStock>,
}

impl RunSummary {
    pub fn new(records: &[TickerRecord], run_time: DateTime<FixedOffset>) -> Self {
        let success = records.iter().filter(|r| r.fetched).count();
        let stocks = records
            .iter()
            .map(|r| SummaryStock {
                ticker: r.ticker.clone(),
                status: if r.fetched { "ok" } else { "failed" }.to_string(),
                ltp: r.last_price,
                pe: r.pe_ratio,
                down_52w: r.percent_below_52w_high,
            })
            .collect();

        RunSummary {
            run_time: run_time.to_rfc3339_opts(SecondsFormat::Secs, false),
            total: records.len(),
            success,
            failed: records.len() - success,
            stocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::util;

    use super::*;

    #[test]
    fn test_run_summary_counts() {
        let records = vec![
            TickerRecord {
                ticker: "AUBANK".to_string(),
                fetched: true,
                last_price: Some(dec!(712.45)),
                pe_ratio: Some(dec!(12.8)),
                percent_below_52w_high: Some(dec!(-6.1)),
                ..Default::default()
            },
            TickerRecord::failed("KPEL".to_string(), "timed out".to_string()),
        ];

        let summary = RunSummary::new(&records, util::datetime::ist_now());

        assert_eq!(summary.total, 2);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.stocks[0].status, "ok");
        assert_eq!(summary.stocks[0].ltp, Some(dec!(712.45)));
        assert_eq!(summary.stocks[1].status, "failed");
        assert_eq!(summary.stocks[1].ltp, None);
    }

    #[test]
    fn test_failed_record_carries_error() {
        let record = TickerRecord::failed("BSE".to_string(), "connect timeout".to_string());

        assert!(!record.fetched);
        assert_eq!(record.error.as_deref(), Some("connect timeout"));
        assert!(record.last_price.is_none());
    }
}

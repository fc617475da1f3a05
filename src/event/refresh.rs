//! Run orchestrator.
//!
//! One sequential pass over the holdings: fetch each quote, patch the
//! dashboard document when anything came back, and write the run summary.
//! Fetches are strictly one at a time, in list order; overlapping requests
//! get the source to start blocking.

use std::fs;

use anyhow::{anyhow, Result};

use crate::{
    config::SETTINGS,
    crawler::google_finance::quote,
    dashboard,
    declare::{RunSummary, TickerRecord},
    logging, util,
};

/// Executes one refresh run and returns its summary.
///
/// The summary file is written even when every fetch failed; the document
/// is only touched when at least one record qualified and the patcher
/// reported a change.
pub async fn execute() -> Result<RunSummary> {
    let holdings = &SETTINGS.portfolio.holdings;
    let total = holdings.len();
    let mut records: Vec<TickerRecord> = Vec::with_capacity(total);

    logging::info_console(format!(
        "Portfolio refresh started at {}",
        util::datetime::ist_now().format("%Y-%m-%d %H:%M IST")
    ));

    for (index, symbol) in holdings.iter().enumerate() {
        let record = quote::fetch(symbol).await;
        logging::info_console(progress_line(index + 1, total, &record));
        records.push(record);
    }

    let success = records.iter().filter(|r| r.fetched).count();
    let status = format!("Fetched {}/{} stocks successfully", success, total);
    logging::info_console(status.clone());
    logging::info_file_async(status);

    if success > 0 {
        patch_document(&records)?;
    }

    let summary = RunSummary::new(&records, util::datetime::ist_now());
    write_summary(&summary)?;

    Ok(summary)
}

/// Reads the dashboard, applies the fetched records, and overwrites it in
/// place when the patcher changed anything. Full read then full rewrite;
/// there is no partial write to roll back.
fn patch_document(records: &[TickerRecord]) -> Result<()> {
    let path = &SETTINGS.portfolio.document_path;
    let document = fs::read_to_string(path)
        .map_err(|why| anyhow!("Failed to read {} because {:?}", path, why))?;

    let (patched, changed) = dashboard::patch(&document, records, util::datetime::ist_now());

    if changed {
        fs::write(path, patched)
            .map_err(|why| anyhow!("Failed to write {} because {:?}", path, why))?;
        logging::info_console(format!("{} updated successfully", path));
    } else {
        logging::info_console(format!("No changes made to {}", path));
    }

    Ok(())
}

fn write_summary(summary: &RunSummary) -> Result<()> {
    let path = &SETTINGS.portfolio.summary_path;
    let json = serde_json::to_string_pretty(summary)
        .map_err(|why| anyhow!("Failed to serialize run summary because {:?}", why))?;

    fs::write(path, json)
        .map_err(|why| anyhow!("Failed to write {} because {:?}", path, why))?;
    logging::info_console(format!("Summary written to {}", path));

    Ok(())
}

/// One console line per ticker, e.g.
/// `[3/28] AUBANK OK — ₹712.45, PE=12.8, 52W: -6.1%`.
fn progress_line(position: usize, total: usize, record: &TickerRecord) -> String {
    if record.fetched {
        let ltp = record
            .last_price
            .map(|v| format!("₹{}", v))
            .unwrap_or_else(|| "N/A".to_string());
        let pe = record
            .pe_ratio
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let down = record
            .percent_below_52w_high
            .map(|v| format!("{}%", v))
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "[{}/{}] {} OK — {}, PE={}, 52W: {}",
            position, total, record.ticker, ltp, pe, down
        )
    } else {
        format!(
            "[{}/{}] {} FAILED — {}",
            position,
            total,
            record.ticker,
            record.error.as_deref().unwrap_or("unknown")
        )
    }
}

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::HistoryRecord;
use crate::utils::validate_file_size;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Parse a history export and return its records in file order.
///
/// Two layouts are accepted: a JSON array of records (what `chrome.history.search`
/// hands back) or JSON Lines with one record per line.
/// Gracefully handles malformed records by logging and skipping them.
/// Returns an error if more than 50% of records fail to parse or >100 consecutive errors
pub fn parse_history_file(path: &Path) -> Result<Vec<HistoryRecord>> {
    // Open file and validate size to avoid TOCTOU race condition
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open history file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;

    parse_history_str(&content)
}

/// Parse history export content (see [`parse_history_file`])
pub fn parse_history_str(content: &str) -> Result<Vec<HistoryRecord>> {
    if content.trim_start().starts_with('[') {
        let values: Vec<Value> =
            serde_json::from_str(content).context("History file is not a valid JSON array")?;
        let mut tally = ParseTally::default();
        let mut records = Vec::with_capacity(values.len());
        for (idx, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<HistoryRecord>(value) {
                Ok(record) => {
                    records.push(record);
                    tally.success();
                }
                Err(e) => {
                    warn!("Failed to parse history record {}: {}", idx + 1, e);
                    tally.failure()?;
                }
            }
        }
        tally.finish(records.len())?;
        return Ok(records);
    }

    let mut tally = ParseTally::default();
    let mut records = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<HistoryRecord>(line) {
            Ok(record) => {
                records.push(record);
                tally.success();
            }
            Err(e) => {
                warn!("Failed to parse line {} in history file: {}", line_num + 1, e);
                tally.failure()?;
            }
        }
    }
    tally.finish(records.len())?;

    Ok(records)
}

/// Success/failure bookkeeping shared by both layouts
#[derive(Default)]
struct ParseTally {
    total: usize,
    skipped: usize,
    consecutive_errors: usize,
}

impl ParseTally {
    fn success(&mut self) {
        self.total += 1;
        self.consecutive_errors = 0;
    }

    fn failure(&mut self) -> Result<()> {
        self.total += 1;
        self.skipped += 1;
        self.consecutive_errors += 1;

        // Bail if too many consecutive errors
        if self.consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
            bail!(
                "Too many consecutive parse errors ({}) in history file - file may be corrupted",
                self.consecutive_errors
            );
        }
        Ok(())
    }

    fn finish(&self, parsed: usize) -> Result<()> {
        if self.total > 0 {
            let failure_rate = (self.skipped as f64) / (self.total as f64);
            if failure_rate > 0.5 {
                bail!(
                    "Too many parse failures in history file: {} of {} records failed ({:.1}%)",
                    self.skipped,
                    self.total,
                    failure_rate * 100.0
                );
            }
        }

        if self.skipped > 0 {
            info!("Parsed history file: {} records ({} skipped)", parsed, self.skipped);
        }
        Ok(())
    }
}

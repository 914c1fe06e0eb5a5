pub mod row;

use scraper::Html;
use tracing::{debug, warn};

use crate::model::Record;
use row::{derive_record, ROW_SEL};

/// Parse a league page into records, in document order. Rows that fault are
/// logged and dropped; the rest of the batch is kept.
pub fn extract(markup: &str) -> Vec<Record> {
    let document = Html::parse_document(markup);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, row) in document.select(&ROW_SEL).enumerate() {
        match derive_record(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!("Skipping row {}: {}", idx, e);
            }
        }
    }

    debug!("Extracted {} records ({} skipped)", records.len(), skipped);
    records
}

// ── Tests ──

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::splitter::BillSummary;

#[derive(Debug, Serialize)]
struct SettlementRow<'a> {
    participant: &'a str,
    items: usize,
    subtotal: f64,
    tax: f64,
    total: f64,
    paid: bool,
}

/// Write one CSV row per participant with what they owe.
///
/// Amounts are written at full precision; rounding is left to the reader.
pub fn write_settlement_csv<P: AsRef<Path>>(path: P, summary: &BillSummary) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;

    for participant in &summary.participants {
        writer.serialize(SettlementRow {
            participant: &participant.name,
            items: participant.claims.len(),
            subtotal: participant.totals.subtotal,
            tax: participant.totals.tax,
            total: participant.totals.total,
            paid: participant.has_paid,
        })?;
    }

    writer.flush()?;
    Ok(summary.participants.len())
}

use tabled::{settings::Style, Table, Tabled};

use crate::ingest::ImportReport;
use crate::lot::LotRecord;

#[derive(Tabled)]
struct LotRow {
    #[tabled(rename = "Lot")]
    lot: String,
    #[tabled(rename = "Part")]
    part: String,
    #[tabled(rename = "Expiration")]
    expiration: String,
    #[tabled(rename = "On hand")]
    on_hand: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
}

impl From<&LotRecord> for LotRow {
    fn from(record: &LotRecord) -> Self {
        Self {
            lot: record.lot.clone(),
            part: record.part.clone(),
            expiration: record.expiration.clone(),
            on_hand: record.on_hand.clone().unwrap_or_else(|| "-".to_string()),
            allocated: record.allocated.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: usize,
}

/// Render lots as a table; empty string when there are none
pub fn lots_table(lots: &[LotRecord]) -> String {
    if lots.is_empty() {
        return String::new();
    }

    Table::new(lots.iter().map(LotRow::from))
        .with(Style::rounded())
        .to_string()
}

pub fn report_table(report: &ImportReport) -> String {
    let rows = [
        SummaryRow { metric: "Inserted", value: report.updates.len() },
        SummaryRow { metric: "Duplicates", value: report.constraint_errors_count },
        SummaryRow { metric: "Total lots", value: report.count },
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

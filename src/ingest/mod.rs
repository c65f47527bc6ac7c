//! Import pipeline - turns an exported CSV into stored lots
//!
//! Row-level problems are soft: short rows and rows without a usable
//! expiration are skipped, duplicate lot ids are counted. Anything else
//! (undecodable input, a failing store) aborts the whole import.

pub mod fields;
pub mod layout;

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::lot::NewLot;
use crate::storage::LotStore;
use crate::{Error, Result};

pub use fields::{normalize_expiration, parse_lot_id};
pub use layout::ImportLayout;

/// Summary of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Lots inserted by this run, in file order
    pub updates: Vec<NewLot>,
    /// Rows rejected because their lot id was already stored
    pub constraint_errors_count: usize,
    /// Total lots in the store after the run
    pub count: usize,
}

/// Runs exported rows through a layout decoder into the store
pub struct Importer<'a> {
    store: &'a LotStore,
    layout: ImportLayout,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a LotStore, layout: ImportLayout) -> Self {
        Self { store, layout }
    }

    /// Import CSV bytes held in memory
    pub fn ingest_bytes(&self, bytes: &[u8]) -> Result<ImportReport> {
        self.ingest(bytes)
    }

    /// Import CSV rows from a reader.
    ///
    /// Each lot is inserted on its own; rows stored before a fatal error stay
    /// committed.
    pub fn ingest<R: Read>(&self, reader: R) -> Result<ImportReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut report = ImportReport::default();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let record = result?;

            let Some(lot) = self.layout.decode(&record) else {
                skipped += 1;
                tracing::debug!(
                    line = record.position().map(|p| p.line()),
                    "Skipping row without lot/part or expiration"
                );
                continue;
            };

            match self.store.insert(&lot) {
                Ok(()) => report.updates.push(lot),
                Err(Error::DuplicateLot(id)) => {
                    tracing::debug!(lot = %id, "Lot already stored, skipping");
                    report.constraint_errors_count += 1;
                }
                Err(e) => return Err(e),
            }
        }

        report.count = self.store.count()?;

        tracing::info!(
            layout = %self.layout,
            inserted = report.updates.len(),
            duplicates = report.constraint_errors_count,
            skipped,
            total = report.count,
            "Import complete"
        );

        Ok(report)
    }
}

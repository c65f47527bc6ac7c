//! # Lotkeeper - Inventory lot tracking
//!
//! Keeps inventory lot records (lot id, part number, expiration date and
//! optional quantities) in a single SQLite table.
//!
//! Lotkeeper provides:
//! - A storage gateway over the `lots` table
//! - A CSV import pipeline that normalizes exported rows into lot records
//! - An HTTP API for lookup, listing, counting, upload and delete

pub mod lot;
pub mod storage;
pub mod ingest;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use lot::{LotLookup, LotRecord, NewLot};
pub use storage::LotStore;
pub use ingest::{ImportLayout, ImportReport, Importer};

/// Result type alias for Lotkeeper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Lotkeeper operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Lot already exists: {0}")]
    DuplicateLot(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Import error: {0}")]
    Import(#[from] csv::Error),

    #[error("Unknown import layout: {0}")]
    UnknownLayout(String),
}

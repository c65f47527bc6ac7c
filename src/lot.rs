//! Lot record types

use serde::{Deserialize, Serialize};

/// A lot row as stored in the `lots` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotRecord {
    pub lot: String,
    pub part: String,
    /// Normalized `YYYY-MM-DD`
    pub expiration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_hand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated: Option<String>,
}

/// A lot decoded from an import row, ready to be inserted
pub type NewLot = LotRecord;

impl LotRecord {
    pub fn new(lot: impl Into<String>, part: impl Into<String>, expiration: impl Into<String>) -> Self {
        Self {
            lot: lot.into(),
            part: part.into(),
            expiration: expiration.into(),
            on_hand: None,
            allocated: None,
        }
    }

    /// Attach on-hand and allocated quantities (passed through unvalidated)
    pub fn with_quantities(mut self, on_hand: Option<String>, allocated: Option<String>) -> Self {
        self.on_hand = on_hand;
        self.allocated = allocated;
        self
    }
}

/// Response body of a single-lot lookup.
///
/// The part number is exposed under `item` for existing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotLookup {
    pub lot: String,
    pub item: String,
    pub expiration: String,
}

impl From<LotRecord> for LotLookup {
    fn from(record: LotRecord) -> Self {
        Self {
            lot: record.lot,
            item: record.part,
            expiration: record.expiration,
        }
    }
}

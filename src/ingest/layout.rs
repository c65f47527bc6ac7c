//! Import layouts - named-field decoders for exported CSV rows

use std::fmt;
use std::str::FromStr;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use super::fields::{normalize_expiration, parse_lot_id};
use crate::lot::{LotRecord, NewLot};
use crate::Error;

/// Column positions of an export variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportLayout {
    /// `lot[|suffix], part, ..., MM-DD-YY` - expiration is the last column
    #[default]
    Base,
    /// `lot[|suffix], part, MM-DD-YY, on_hand, allocated`
    Extended,
}

const LOT_COLUMN: usize = 0;
const PART_COLUMN: usize = 1;
const EXTENDED_EXPIRATION_COLUMN: usize = 2;
const EXTENDED_ON_HAND_COLUMN: usize = 3;
const EXTENDED_ALLOCATED_COLUMN: usize = 4;

impl ImportLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportLayout::Base => "base",
            ImportLayout::Extended => "extended",
        }
    }

    /// Decode one exported row into a lot.
    ///
    /// Returns `None` for rows that should be skipped: fewer than two
    /// columns, or no usable expiration date.
    pub fn decode(&self, record: &StringRecord) -> Option<NewLot> {
        if record.len() < 2 {
            return None;
        }

        let lot = parse_lot_id(&record[LOT_COLUMN]);
        let part = &record[PART_COLUMN];
        let expiration = normalize_expiration(self.expiration_field(record)?)?;

        let decoded = LotRecord::new(lot, part, expiration);
        Some(match self {
            ImportLayout::Base => decoded,
            ImportLayout::Extended => decoded.with_quantities(
                record.get(EXTENDED_ON_HAND_COLUMN).map(str::to_string),
                record.get(EXTENDED_ALLOCATED_COLUMN).map(str::to_string),
            ),
        })
    }

    fn expiration_field<'r>(&self, record: &'r StringRecord) -> Option<&'r str> {
        match self {
            ImportLayout::Base => record.get(record.len().checked_sub(1)?),
            ImportLayout::Extended => record.get(EXTENDED_EXPIRATION_COLUMN),
        }
    }
}

impl FromStr for ImportLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(ImportLayout::Base),
            "extended" => Ok(ImportLayout::Extended),
            _ => Err(Error::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for ImportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

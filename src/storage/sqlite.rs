//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, params, OptionalExtension};
use crate::{Result, Error};
use crate::lot::{LotRecord, NewLot};
use super::schema;

const SELECT_LOT: &str = "SELECT lot, part, expiration, on_hand, allocated FROM lots";

/// SQLite-backed storage for lot records
pub struct LotStore {
    conn: Connection,
}

impl LotStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the lots table and its indexes if they are missing
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Insert a new lot.
    ///
    /// Fails with [`Error::DuplicateLot`] when the lot id is already stored;
    /// the existing row is left untouched.
    pub fn insert(&self, lot: &NewLot) -> Result<()> {
        let result = self.conn.execute(
            r#"
            INSERT INTO lots (lot, part, expiration, on_hand, allocated)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                lot.lot,
                lot.part,
                lot.expiration,
                lot.on_hand,
                lot.allocated,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::DuplicateLot(lot.lot.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Get a lot by id
    pub fn get(&self, lot: &str) -> Result<Option<LotRecord>> {
        self.conn
            .query_row(
                &format!("{SELECT_LOT} WHERE lot = ?1"),
                [lot],
                |row| self.row_to_lot(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find all lots for a part number
    pub fn get_by_part(&self, part: &str) -> Result<Vec<LotRecord>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_LOT} WHERE part = ?1"))?;

        let lots = stmt
            .query_map([part], |row| self.row_to_lot(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(lots)
    }

    /// Get every stored lot
    pub fn get_all(&self) -> Result<Vec<LotRecord>> {
        let mut stmt = self.conn.prepare(SELECT_LOT)?;

        let lots = stmt
            .query_map([], |row| self.row_to_lot(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(lots)
    }

    /// Delete a lot by id.
    ///
    /// Returns whether a row was removed. Deleting an unknown lot is a no-op.
    pub fn delete(&self, lot: &str) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM lots WHERE lot = ?1", [lot])?;
        Ok(removed > 0)
    }

    /// Count all lots
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM lots", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a LotRecord
    fn row_to_lot(&self, row: &rusqlite::Row) -> rusqlite::Result<LotRecord> {
        Ok(LotRecord {
            lot: row.get(0)?,
            part: row.get(1)?,
            expiration: row.get(2)?,
            on_hand: row.get(3)?,
            allocated: row.get(4)?,
        })
    }
}

//! Storage Layer - SQLite-backed persistence
//!
//! A single table holds every lot:
//! - lots(lot, part, expiration, on_hand, allocated)

pub mod schema;
pub mod sqlite;

pub use sqlite::LotStore;

//! Database schema definitions

/// SQL to create the lots table.
///
/// Quantities are kept as text exactly as exported; the base import layout
/// leaves them NULL.
pub const CREATE_LOTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS lots (
    lot TEXT PRIMARY KEY,
    part TEXT NOT NULL,
    expiration VARCHAR(10) NOT NULL,
    on_hand TEXT,
    allocated TEXT
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_lots_part ON lots(part)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_LOTS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

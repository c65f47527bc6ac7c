//! Terminal output for the CLI

pub mod output;
pub mod table;

pub use output::{deleted, error, header, info, palette, success, warn, Icons, Palette};
pub use table::{lots_table, report_table};

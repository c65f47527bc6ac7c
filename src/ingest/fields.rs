//! Field-level normalization for exported lot rows

/// Extract the lot id from the first column.
///
/// Exports may append `|`-separated suffixes to the id; only the part before
/// the first `|` identifies the lot.
pub fn parse_lot_id(field: &str) -> &str {
    field.split('|').next().unwrap_or(field)
}

/// Normalize an `MM-DD-YY` export date into `YYYY-MM-DD`.
///
/// Returns `None` when the field holds no `-` or does not split into exactly
/// three non-empty parts. Such rows are not ready to import.
pub fn normalize_expiration(field: &str) -> Option<String> {
    if !field.contains('-') {
        return None;
    }

    let mut parts = field.split('-');
    let (month, day, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(d), Some(y), None) if !m.is_empty() && !d.is_empty() && !y.is_empty() => {
            (m, d, y)
        }
        _ => return None,
    };

    Some(format!("20{year}-{month}-{day}"))
}

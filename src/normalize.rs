//! Text normalization shared by every analyzer.

/// Lowercase and trim surrounding whitespace. Idempotent.
pub fn normalize_text(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalize a declared spec value for comparison.
///
/// Lowercases, drops internal spaces, then strips the unit suffixes
/// `gb`, `mp`, `mah` in that fixed order. Each unit is removed in a single
/// non-recursive pass, so `"16gbgb"` becomes `"16"` because the one pass
/// removes both occurrences.
pub fn normalize_spec_value(s: &str) -> String {
    let mut value = normalize_text(s).replace(' ', "");
    for unit in ["gb", "mp", "mah"] {
        value = value.replace(unit, "");
    }
    value
}

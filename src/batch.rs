//! Helpers for pages that show several products at once.

/// Turn a `barcodes=` query value into the list to look up.
///
/// Entries are split on commas and trimmed; blank entries are dropped and
/// order is kept. When the parameter is absent or yields no entries, `defaults`
/// is used as given.
pub fn parse_barcodes(param: Option<&str>, defaults: &[String]) -> Vec<String> {
    let parsed: Vec<String> = param
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(|b| b.to_string())
        .collect();

    if parsed.is_empty() {
        defaults.to_vec()
    } else {
        parsed
    }
}

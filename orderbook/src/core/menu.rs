//! Reading the `Menu_Items` pseudo-list.
//!
//! The column stores text such as `['nasi minyak, ayam masak merah']`: a
//! bracketed, single-quoted string rather than a real list. It is written in
//! that shape for compatibility and only taken apart for reporting.

/// Individual dishes named in a `Menu_Items` cell.
///
/// Brackets and quotes are dropped, the text is split on commas, and
/// fragments of two characters or fewer are discarded.
pub fn parse_menu_items(cell: &str) -> Vec<String> {
    let cleaned: String = cell
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect();
    cleaned
        .split(',')
        .map(str::trim)
        .filter(|item| item.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

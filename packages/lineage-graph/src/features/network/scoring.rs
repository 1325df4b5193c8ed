//! Primary-fact name matching
//!
//! The subject area "Sales Orders" should pick `DW_NS_SALES_ORDER_F` over
//! `DW_NS_SALES_ORDER_LINES_F` and over unrelated facts. Both sides are
//! reduced to normalized tokens and compared:
//!
//! - identical token lists              → 100
//! - every subject-area token present,
//!   or one joined name contains the other → 60 + overlap
//! - partial overlap                    → 10 per shared token
//!
//! Heuristic, tuned against one export; see DESIGN.md.

/// Tokens carrying no table-identifying meaning in subject area names
const SUBJECT_AREA_NOISE: &[&str] = &["NETSUITE", "NS", "NSAW", "AND", "THE", "OF"];

/// Light plural folding: `ORDERS` → `ORDER`, `ADDRESS` stays
fn singular(token: &str) -> String {
    if token.len() > 3 && token.ends_with('S') && !token.ends_with("SS") {
        token[..token.len() - 1].to_string()
    } else {
        token.to_string()
    }
}

/// Uppercase, split on non-alphanumerics, drop noise, fold plurals
pub(crate) fn subject_area_tokens(subject_area: &str) -> Vec<String> {
    subject_area
        .to_uppercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty() && !SUBJECT_AREA_NOISE.contains(t))
        .map(singular)
        .collect()
}

/// A physical table name reduced to its business tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CleanedTable {
    pub tokens: Vec<String>,
    /// Table carried the line-level marker before the role suffix
    pub is_lines: bool,
}

/// Strip the first matching prefix, one role suffix and the line marker
pub(crate) fn clean_table_name(
    table: &str,
    prefixes: &[&str],
    role_suffixes: &[String],
    lines_marker: &str,
) -> CleanedTable {
    let upper = table.trim().to_uppercase();
    let mut name = upper.as_str();

    if let Some(rest) = prefixes.iter().find_map(|p| name.strip_prefix(*p)) {
        name = rest;
    }
    if let Some(rest) = role_suffixes
        .iter()
        .find_map(|s| name.strip_suffix(s.as_str()))
    {
        name = rest;
    }

    let mut is_lines = false;
    if !lines_marker.is_empty() {
        if let Some(rest) = name.strip_suffix(lines_marker) {
            name = rest;
            is_lines = true;
        }
    }

    let tokens = name
        .split('_')
        .filter(|t| !t.is_empty())
        .map(singular)
        .collect();

    CleanedTable { tokens, is_lines }
}

/// Match score of a cleaned table against subject-area tokens; 0 = no match
pub(crate) fn match_score(subject_tokens: &[String], table: &CleanedTable) -> u32 {
    if subject_tokens.is_empty() || table.tokens.is_empty() {
        return 0;
    }
    if subject_tokens == table.tokens.as_slice() {
        return 100;
    }

    let overlap = subject_tokens
        .iter()
        .filter(|t| table.tokens.contains(*t))
        .count() as u32;

    let subject_joined = subject_tokens.concat();
    let table_joined = table.tokens.concat();
    let contained =
        table_joined.contains(&subject_joined) || subject_joined.contains(&table_joined);

    if overlap as usize == subject_tokens.len() || contained {
        60 + overlap
    } else {
        10 * overlap
    }
}

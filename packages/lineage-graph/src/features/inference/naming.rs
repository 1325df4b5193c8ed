//! Identifier re-casing

/// `SALES_ORDER` → `salesOrder`
///
/// Splits on `_`, skips empty segments, lowercases the first segment and
/// title-cases the rest.
pub fn to_lower_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for (i, segment) in s.split('_').filter(|seg| !seg.is_empty()).enumerate() {
        let lower = segment.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }

        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

/// Field name of a physical column; `None` when nothing survives re-casing
pub(crate) fn infer_field_name(column: &str) -> Option<String> {
    let camel = to_lower_camel(&column.to_lowercase());

    // First character is always lowercase, even for non-ASCII input
    let mut chars = camel.chars();
    let first = chars.next()?;
    let mut out: String = first.to_lowercase().collect();
    out.push_str(chars.as_str());
    Some(out)
}

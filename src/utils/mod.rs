//! Utility functions and helpers.

use crate::engine::Record;

/// Fill a row template from a record.
///
/// Placeholders are field names in braces (`{rollNo}`, `{status}`). Absent
/// fields render as `-`; unknown placeholders are left as written.
pub fn render<R: Record>(record: &R, template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if R::has_field(&after[..close]) => {
                let value = record
                    .field(&after[..close])
                    .map(|v| v.display())
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

//! Acceptance check for provider results.

use idforged_common::Metadata;

/// Placeholder some sources emit for missing values.
const NULL_PLACEHOLDER: &str = "null";

/// Why a record was rejected, or `None` when it is acceptable.
pub fn rejection(data: &Metadata) -> Option<&'static str> {
    if is_blank(&data.title) {
        return Some("missing title");
    }
    if is_blank(&data.number) {
        return Some("missing number");
    }
    None
}

/// A record is acceptable when both `title` and `number` are present and
/// neither is the literal `"null"`.
pub fn is_acceptable(data: &Metadata) -> bool {
    rejection(data).is_none()
}

fn is_blank(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NULL_PLACEHOLDER
}

//! Token comparison for deletion ownership.

use subtle::ConstantTimeEq;

/// Whether the presented token proves ownership of a post.
///
/// Missing or empty tokens on either side never match. The comparison runs
/// in constant time with respect to the token contents.
#[must_use]
pub fn tokens_match(stored: Option<&str>, presented: Option<&str>) -> bool {
    match (stored, presented) {
        (Some(stored), Some(presented)) if !stored.is_empty() && !presented.is_empty() => {
            stored.as_bytes().ct_eq(presented.as_bytes()).into()
        }
        _ => false,
    }
}

//! Shared SemVer 2.0 label rules
//!
//! Release labels and build metadata share the `[0-9A-Za-z-]+` identifier
//! grammar. Release labels additionally forbid leading zeros on numeric
//! identifiers because they take part in precedence.

use std::cmp::Ordering;

/// Check a single build metadata identifier.
pub fn is_valid_metadata_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Check a single prerelease identifier.
///
/// Examples:
/// - "alpha", "rc-1", "0", "10" -> valid
/// - "", "beta_1", "01" -> invalid
pub fn is_valid_release_label(label: &str) -> bool {
    is_valid_metadata_label(label) && !(label.len() > 1 && is_numeric(label) && label.starts_with('0'))
}

fn is_numeric(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two all-digit identifiers without parsing them, so arbitrarily
/// long identifiers cannot overflow.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two prerelease identifiers by SemVer 2.0 precedence.
///
/// Numeric identifiers compare numerically and sort below alphanumeric ones;
/// alphanumeric identifiers compare ordinally (case-sensitive).
pub fn compare_label(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Compare two release label sequences.
///
/// A version without labels sorts above any prerelease, and a sequence that
/// is a strict prefix of another sorts below it.
pub fn compare_release_labels<A, B>(a: &[A], b: &[B]) -> Ordering
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a
            .iter()
            .zip(b)
            .map(|(x, y)| compare_label(x.as_ref(), y.as_ref()))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
    }
}

//! Identifier normalization.
//!
//! Every lookup key in the index (course codes and course names alike) goes
//! through [`normalize`]. Only surrounding whitespace and letter case are
//! folded; internal whitespace is kept as-is, so `"CAS  CS 131"` and
//! `"CAS CS 131"` are different keys.

/// Returns the canonical lookup key for a raw course code or name.
///
/// Trims leading and trailing whitespace and upper-cases the rest.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Returns true when `key` is already in canonical form.
pub fn is_canonical(key: &str) -> bool {
    normalize(key) == key
}

/// Extracts the department token of a course code (`"CAS CS 131"` -> `"CS"`).
///
/// Course codes are `<school> <department> <number>`; anything without a
/// second whitespace-separated token has no department.
pub fn department_of(code: &str) -> Option<String> {
    code.split_whitespace().nth(1).map(normalize)
}

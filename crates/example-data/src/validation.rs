//! School name validation.
//!
//! Generated names are shown verbatim in the page's result list and matched
//! by substring search, so they are kept short, printable and free of
//! surrounding whitespace.
//!
//! # Validation Rules
//!
//! - Length between 3 and 64 characters
//! - Allowed characters: ASCII letters and digits, spaces, hyphens, periods
//!   and apostrophes
//! - No leading or trailing whitespace

/// Minimum allowed length for a school name.
pub const SCHOOL_NAME_MIN: usize = 3;

/// Maximum allowed length for a school name.
pub const SCHOOL_NAME_MAX: usize = 64;

/// Validates a school name.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_school_name;
///
/// assert!(is_valid_school_name("Port St. Lucie High"));
/// assert!(is_valid_school_name("O'Fallon Academy"));
/// assert!(!is_valid_school_name("Hi"));
/// assert!(!is_valid_school_name(" Hialeah High"));
/// assert!(!is_valid_school_name("Zürich Middle"));
/// ```
#[must_use]
pub fn is_valid_school_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(SCHOOL_NAME_MIN..=SCHOOL_NAME_MAX).contains(&length) {
        return false;
    }
    if name.trim() != name {
        return false;
    }
    name.chars().all(is_valid_school_name_char)
}

const fn is_valid_school_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '.' | '\'')
}

/// Replaces characters outside the allowed set with spaces and collapses
/// runs of whitespace.
#[must_use]
pub(crate) fn sanitize_school_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if is_valid_school_name_char(c) { c } else { ' ' })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

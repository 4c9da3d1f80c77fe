//! Calendar-date well-formedness checks.
//!
//! # Responsibility
//! - Validate the ISO `YYYY-MM-DD` strings used as completion keys and
//!   event dates.
//!
//! # Invariants
//! - Accepts shape plus basic month/day range; no calendar arithmetic
//!   (`2024-02-31` passes, leap years are not modeled).

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex"));

/// Returns whether `value` is a well-formed ISO calendar date.
pub fn is_iso_date(value: &str) -> bool {
    let Some(caps) = ISO_DATE_RE.captures(value) else {
        return false;
    };

    let month: u32 = caps[2].parse().unwrap_or(0);
    let day: u32 = caps[3].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::is_iso_date;

    #[test]
    fn accepts_well_formed_dates() {
        assert!(is_iso_date("2024-01-01"));
        assert!(is_iso_date("1999-12-31"));
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(!is_iso_date(""));
        assert!(!is_iso_date("2024-1-1"));
        assert!(!is_iso_date("2024/01/01"));
        assert!(!is_iso_date("01-01-2024"));
        assert!(!is_iso_date("2024-01-01T00:00:00"));
    }

    #[test]
    fn rejects_out_of_range_month_and_day() {
        assert!(!is_iso_date("2024-00-10"));
        assert!(!is_iso_date("2024-13-10"));
        assert!(!is_iso_date("2024-06-00"));
        assert!(!is_iso_date("2024-06-32"));
    }
}

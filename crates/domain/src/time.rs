//! Time helpers and the clock payload format.

use chrono::{Local, NaiveDateTime};

/// Format used by [`clock_message`].
const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Return the current wall-clock time in the local timezone.
#[must_use]
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render the clock payload, e.g. `Current Time: 2024-05-01 13:37:00`.
#[must_use]
pub fn clock_message(at: NaiveDateTime) -> String {
    format!("Current Time: {}", at.format(CLOCK_FORMAT))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn should_format_clock_message() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 3, 7)
            .unwrap();
        assert_eq!(clock_message(at), "Current Time: 2024-05-01 09:03:07");
    }

    #[test]
    fn should_truncate_sub_second_precision() {
        let at = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        assert_eq!(clock_message(at), "Current Time: 1999-12-31 23:59:59");
    }
}

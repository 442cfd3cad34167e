use chrono::{Datelike, NaiveDate, Weekday};

/// Monday to Friday. Public holidays are not consulted.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of working days in `[start, end]`, both ends included.
///
/// An inverted range (`start > end`) yields 0 rather than an error; callers
/// that pass swapped dates rely on this.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    let mut count = 0;
    for day in start.iter_days() {
        if day > end {
            break;
        }
        if is_working_day(day) {
            count += 1;
        }
    }
    count
}

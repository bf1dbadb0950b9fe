//! Age-based registration eligibility.

use chrono::Datelike;

use crate::types::Date;

/// Students younger than this cannot register for any subject.
pub const MIN_ELIGIBLE_AGE: i32 = 15;

/// Age in whole years on `today`.
///
/// Calendar-year difference, minus one when `today`'s month/day falls before
/// the birth month/day. A 29 February birthday therefore only counts as
/// reached on 1 March in non-leap years.
pub fn age_on(birth_date: Date, today: Date) -> i32 {
    let had_birthday = (today.month(), today.day()) >= (birth_date.month(), birth_date.day());
    today.year() - birth_date.year() - i32::from(!had_birthday)
}

pub fn is_eligible_on(birth_date: Date, today: Date) -> bool {
    age_on(birth_date, today) >= MIN_ELIGIBLE_AGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_before_and_after_birthday() {
        assert_eq!(age_on(date(2008, 6, 15), date(2024, 6, 14)), 15);
        assert_eq!(age_on(date(2008, 6, 15), date(2024, 6, 15)), 16);
        assert_eq!(age_on(date(2008, 6, 15), date(2024, 12, 31)), 16);
    }

    #[test]
    fn exactly_fifteen_today_is_eligible() {
        assert!(is_eligible_on(date(2009, 3, 10), date(2024, 3, 10)));
    }

    #[test]
    fn one_day_short_of_fifteen_is_not_eligible() {
        assert!(!is_eligible_on(date(2009, 3, 11), date(2024, 3, 10)));
        assert_eq!(age_on(date(2009, 3, 11), date(2024, 3, 10)), 14);
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        assert_eq!(age_on(date(2008, 2, 29), date(2023, 2, 28)), 14);
        assert_eq!(age_on(date(2008, 2, 29), date(2023, 3, 1)), 15);
    }

    #[test]
    fn birth_date_in_the_future_gives_negative_age() {
        assert!(age_on(date(2030, 1, 1), date(2024, 1, 1)) < 0);
        assert!(!is_eligible_on(date(2030, 1, 1), date(2024, 1, 1)));
    }
}

//! Quarterly merge-window date policy.
//!
//! New checker versions are merged quarterly on the Monday after release
//! week. Release weeks open on the first Friday of January, April, July, and
//! October; the merge lands ten days later.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Months that open a merge window.
const MERGE_MONTHS: [u32; 4] = [1, 4, 7, 10];

/// The four merge Mondays for `year`.
#[must_use]
pub fn merge_dates(year: i32) -> Vec<NaiveDate> {
    MERGE_MONTHS
        .iter()
        .filter_map(|&month| NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Fri, 1))
        .map(|release_friday| release_friday + Duration::days(10))
        .collect()
}

/// The next merge Monday on or after `today`.
///
/// Rolls over to the following year when `today` is past the October window.
#[must_use]
pub fn next_merge_date(today: NaiveDate) -> NaiveDate {
    let upcoming = |year: i32| {
        merge_dates(year)
            .into_iter()
            .filter(|date| *date >= today)
            .min()
    };

    upcoming(today.year())
        .or_else(|| upcoming(today.year() + 1))
        .expect("the following year always has an upcoming merge window")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_merge_dates_2024() {
        assert_eq!(
            merge_dates(2024),
            vec![
                date(2024, 1, 15),
                date(2024, 4, 15),
                date(2024, 7, 15),
                date(2024, 10, 14),
            ]
        );
    }

    #[test]
    fn test_merge_dates_are_mondays() {
        for year in 2023..2030 {
            for merge_date in merge_dates(year) {
                assert_eq!(merge_date.weekday(), Weekday::Mon, "{merge_date}");
            }
        }
    }

    #[test]
    fn test_before_january_window_returns_january() {
        assert_eq!(next_merge_date(date(2024, 1, 1)), date(2024, 1, 15));
    }

    #[test]
    fn test_merge_day_itself_qualifies() {
        assert_eq!(next_merge_date(date(2024, 1, 15)), date(2024, 1, 15));
    }

    #[test]
    fn test_mid_quarter_picks_next_window() {
        // 2024-03-10 is past January's window, so April's Monday is next.
        assert_eq!(next_merge_date(date(2024, 3, 10)), date(2024, 4, 15));
    }

    #[test]
    fn test_after_october_window_rolls_over() {
        assert_eq!(next_merge_date(date(2024, 10, 15)), date(2025, 1, 13));
        assert_eq!(next_merge_date(date(2024, 12, 31)), date(2025, 1, 13));
    }

    #[test]
    fn test_year_boundaries_for_all_years() {
        for year in 2023..2030 {
            let from_new_year = next_merge_date(date(year, 1, 1));
            assert_eq!(from_new_year.year(), year);
            assert_eq!(from_new_year.month(), 1);

            let from_year_end = next_merge_date(date(year, 12, 31));
            assert_eq!(from_year_end.year(), year + 1);
            assert_eq!(from_year_end.month(), 1);
        }
    }
}

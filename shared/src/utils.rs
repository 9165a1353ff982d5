// Calendar helpers shared by the engine and any front-end that has to
// pre-validate a (month, day) query before sending it.

pub mod calendar {
    use chrono::{Datelike, NaiveDate};

    /// Week of the month, counting the Monday-to-Sunday week that contains the
    /// 1st as week 1 (even when that week started in the previous month).
    ///
    /// Within one ISO year this equals `iso_week(date) - iso_week(first_of_month) + 1`.
    /// Counting Monday boundaries directly keeps the result positive in early
    /// January and late December, where the ISO week number wraps.
    pub fn week_of_month(date: NaiveDate) -> u32 {
        let first_weekday_offset = date
            .with_day(1)
            .map(|first| first.weekday().num_days_from_monday())
            .unwrap_or(0);
        (date.day() - 1 + first_weekday_offset) / 7 + 1
    }

    /// Returns the date if (month, day) exists in `year`, `None` otherwise (e.g. 31 April).
    pub fn query_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

}

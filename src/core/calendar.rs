use chrono::{Datelike, NaiveDate, Weekday};

/// Whether `date` falls Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every weekday in the inclusive range `start..=end`, ascending.
///
/// Weekend dates are excluded entirely. Returns an empty vector when
/// `start > end`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fx_forecast::core::calendar::weekday_calendar;
///
/// // Friday 2023-01-06 through Monday 2023-01-09
/// let days = weekday_calendar(
///     NaiveDate::from_ymd_opt(2023, 1, 6).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
/// );
/// assert_eq!(days.len(), 2);
/// ```
pub fn weekday_calendar(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = Some(start);
    while let Some(date) = current {
        if date > end {
            break;
        }
        if is_weekday(date) {
            days.push(date);
        }
        current = date.succ_opt();
    }
    days
}

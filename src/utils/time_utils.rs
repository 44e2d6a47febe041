use chrono::{Datelike, Duration, Local, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const CLOCK_FORMAT: &str = "%H:%M:%S";
    pub const SECONDS_IN_MINUTE: i64 = 60;
    pub const SECONDS_IN_HOUR: i64 = Self::SECONDS_IN_MINUTE * 60;
}

/// `num_days_from_ce` of 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Plot x coordinate of a date: days since the Unix epoch.
pub fn date_to_x(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE) as f64
}

/// Inverse of `date_to_x`, rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    let days = i32::try_from(x.round() as i64).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` configuration constant.
pub fn parse_config_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, TimeUtils::STANDARD_TIME_FORMAT).ok()
}

/// Today's date in the local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Wall-clock time for the status bar.
pub fn local_clock_now() -> String {
    Local::now().format(TimeUtils::CLOCK_FORMAT).to_string()
}

/// First day of the year containing `date`.
pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// `date` moved back by whole calendar months, clamped to month end.
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(chrono::Months::new(months))
        .unwrap_or(date - Duration::days(30 * i64::from(months)))
}

/// Human "time ago" for an elapsed number of seconds.
pub fn how_long_ago(seconds: i64) -> String {
    match seconds {
        s if s < TimeUtils::SECONDS_IN_MINUTE => format!("{}s ago", s.max(0)),
        s if s < TimeUtils::SECONDS_IN_HOUR => format!("{}m ago", s / TimeUtils::SECONDS_IN_MINUTE),
        s => format!("{}h ago", s / TimeUtils::SECONDS_IN_HOUR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn x_axis_round_trips_dates() {
        assert_eq!(date_to_x(day(1970, 1, 1)), 0.0);
        assert_eq!(date_to_x(day(2024, 1, 2)), 19_724.0);
        assert_eq!(x_to_date(19_724.4), Some(day(2024, 1, 2)));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn calendar_helpers() {
        assert_eq!(parse_config_date("2018-01-01"), Some(day(2018, 1, 1)));
        assert_eq!(parse_config_date("01/01/2018"), None);
        assert_eq!(start_of_year(day(2024, 7, 9)), day(2024, 1, 1));
        assert_eq!(months_before(day(2024, 3, 31), 1), day(2024, 2, 29));
        assert_eq!(months_before(day(2024, 7, 9), 6), day(2024, 1, 9));
        assert_eq!(format_date(day(2024, 7, 9)), "2024-07-09");
    }

    #[test]
    fn elapsed_is_humanized() {
        assert_eq!(how_long_ago(5), "5s ago");
        assert_eq!(how_long_ago(125), "2m ago");
        assert_eq!(how_long_ago(7300), "2h ago");
    }
}

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc, Weekday};

const HOME_OFFSET_HOURS: i32 = 8;

/// The application's home timezone (UTC+8, no DST). Every check-in day and
/// every chart bucket is computed here, never in the server's local zone.
pub fn home_offset() -> FixedOffset {
    FixedOffset::east_opt(HOME_OFFSET_HOURS * 3600).expect("offset within range")
}

/// Current calendar date as perceived in the home timezone.
pub fn today() -> NaiveDate {
    home_date_of(Utc::now())
}

pub fn today_string() -> String {
    date_key(today())
}

/// Calendar date of an instant, projected into the home timezone.
pub fn home_date_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&home_offset()).date_naive()
}

/// Decimal hour-of-day of an instant in the home timezone, rounded to
/// two decimals (07:50 -> 7.83).
pub fn hour_of(instant: DateTime<Utc>) -> f64 {
    let local = instant.with_timezone(&home_offset());
    let raw = f64::from(local.hour()) + f64::from(local.minute()) / 60.0;
    (raw * 100.0).round() / 100.0
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short weekday label in the app's locale, used for the week chart axis.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "周一",
        Weekday::Tue => "周二",
        Weekday::Wed => "周三",
        Weekday::Thu => "周四",
        Weekday::Fri => "周五",
        Weekday::Sat => "周六",
        Weekday::Sun => "周日",
    }
}

/// MM-DD label used for the month and year chart axes.
pub fn month_day_label(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

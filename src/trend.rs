use crate::clock;
use crate::errors::AppError;
use crate::models::{CheckInRow, TrendPoint, TrendResponse};
use crate::store::Database;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::warn;

/// Aggregation lookback selector. The year window is capped at 90 raw
/// points to keep the chart renderable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    Week,
    Month,
    Year,
}

impl Window {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn day_count(self) -> usize {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 90,
        }
    }
}

/// Fetches a user's records for the window ending today and shapes them into
/// the chart series.
pub fn fetch_series(
    db: &Database,
    user_id: &str,
    window: Window,
) -> Result<TrendResponse, AppError> {
    fetch_series_at(db, user_id, window, clock::today())
}

pub fn fetch_series_at(
    db: &Database,
    user_id: &str,
    window: Window,
    today: NaiveDate,
) -> Result<TrendResponse, AppError> {
    let first = today - Duration::days(window.day_count() as i64 - 1);
    let rows = db.check_ins_between(user_id, &clock::date_key(first), &clock::date_key(today))?;
    let today_key = clock::date_key(today);
    let checked_in_today = rows.iter().any(|row| row.wake_date == today_key);
    Ok(TrendResponse {
        range: window.as_str().to_string(),
        points: build_series_at(today, window, &rows),
        checked_in_today,
    })
}

/// Emits exactly `window.day_count()` points, oldest first, one per canonical
/// date ending at `today`. Dates without a record are still emitted so the
/// chart shows a gap rather than a compressed timeline.
pub fn build_series_at(today: NaiveDate, window: Window, rows: &[CheckInRow]) -> Vec<TrendPoint> {
    let count = window.day_count();
    let mut points = Vec::with_capacity(count);
    for offset in (0..count).rev() {
        let date = today - Duration::days(offset as i64);
        let key = clock::date_key(date);
        let day = match window {
            Window::Week => clock::weekday_label(date).to_string(),
            Window::Month | Window::Year => clock::month_day_label(date),
        };
        let wake_hour = rows
            .iter()
            .find(|row| row.wake_date == key)
            .and_then(|row| match parse_instant(&row.wake_time) {
                Some(instant) => Some(clock::hour_of(instant)),
                None => {
                    warn!("unparseable wake_time for {key}: {}", row.wake_time);
                    None
                }
            });
        points.push(TrendPoint {
            day,
            date: key,
            has_data: wake_hour.is_some(),
            time: wake_hour,
        });
    }
    points
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

//! Calendar-day normalization and relative-age formatting.
//!
//! Every per-day computation (weekly histogram, streaks) goes through
//! [`calendar_day`] so that all of them agree on where a day starts.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};

/// Calendar date of `ts` as seen in `tz`.
pub fn calendar_day<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}

/// Short English weekday label ("Sun" .. "Sat").
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// The `days` calendar dates ending at `today`, oldest first.
pub fn trailing_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(chrono::Days::new(u64::from(offset))))
        .collect()
}

/// Relative age of `then` at `now`: "5 min ago", "3 hours ago", "2 days ago", "4 weeks ago".
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes().max(0);
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hours ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days} days ago");
    }
    format!("{} weeks ago", days / 7)
}

/// Relative age of a calendar date, taken at midnight UTC.
pub fn format_date_ago(date: NaiveDate, now: DateTime<Utc>) -> String {
    format_time_ago(date.and_time(chrono::NaiveTime::MIN).and_utc(), now)
}

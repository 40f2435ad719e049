use chrono::{NaiveDate, TimeZone};

use crate::calendar::{calendar_day, trailing_days, weekday_label};
use crate::config::CommitCounting;
use crate::model::{ActivityEvent, DayActivity};

/// Number of days in the histogram, today included.
pub const WEEK_DAYS: u32 = 7;

/// Commits per calendar day for the trailing week ending `today`, oldest first.
///
/// Only push events in `username`'s own repositories count.
pub fn weekly_histogram<Tz: TimeZone>(
    events: &[ActivityEvent],
    username: &str,
    counting: CommitCounting,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DayActivity> {
    let days = trailing_days(today, WEEK_DAYS);
    let mut buckets: Vec<u32> = vec![0; days.len()];

    for event in events
        .iter()
        .filter(|e| e.is_push() && e.is_owned_by(username))
    {
        let day = calendar_day(&event.created_at, tz);
        if let Some(idx) = days.iter().position(|d| *d == day) {
            buckets[idx] = buckets[idx].saturating_add(counting.contribution(event.commits));
        }
    }

    days.into_iter()
        .zip(buckets)
        .map(|(date, commits)| DayActivity {
            day: weekday_label(date).to_string(),
            date,
            commits,
        })
        .collect()
}

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, TimeZone};

use crate::calendar::calendar_day;
use crate::model::{ActivityEvent, Streak};

/// Distinct local days with at least one push to `username`'s repositories, newest first.
pub fn push_days<Tz: TimeZone>(events: &[ActivityEvent], username: &str, tz: &Tz) -> Vec<NaiveDate> {
    let days: BTreeSet<NaiveDate> = events
        .iter()
        .filter(|e| e.is_push() && e.is_owned_by(username))
        .map(|e| calendar_day(&e.created_at, tz))
        .collect();
    days.into_iter().rev().collect()
}

/// Current and longest runs of consecutive days.
///
/// `days` must be distinct and sorted newest first. The current streak only
/// counts when the newest day is `today` or the day before.
pub fn compute_streak(days: &[NaiveDate], today: NaiveDate) -> Streak {
    let Some(&latest) = days.first() else {
        return Streak::default();
    };

    let yesterday = today.checked_sub_days(Days::new(1));
    let current = if latest == today || Some(latest) == yesterday {
        run_length(days)
    } else {
        0
    };

    let mut longest = 0;
    let mut start = 0;
    while start < days.len() {
        let len = run_length(&days[start..]);
        longest = longest.max(len);
        start += len as usize;
    }

    Streak { current, longest }
}

/// Length of the run of consecutive days at the head of `days`.
fn run_length(days: &[NaiveDate]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let mut len = 1;
    for pair in days.windows(2) {
        if pair[1].checked_add_days(Days::new(1)) == Some(pair[0]) {
            len += 1;
        } else {
            break;
        }
    }
    len
}

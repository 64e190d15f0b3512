use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::DayMonth;

/// Next-fire bookkeeping for the daily announcer.
///
/// Targets are local calendar dates at a fixed wall-clock time, so a DST
/// change never shifts the run time or swallows a date. Each target is the
/// calendar day after the previous one, never derived from when a run
/// finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
    tz: Tz,
    date: NaiveDate,
    next: DateTime<Utc>,
}

impl DailySchedule {
    /// First local `at` strictly after `now`.
    pub fn starting_after(now: DateTime<Utc>, at: NaiveTime, tz: Tz) -> Self {
        let date = now.with_timezone(&tz).date_naive();
        let mut schedule = Self {
            at,
            tz,
            date,
            next: local_instant(date, at, tz),
        };
        while schedule.next <= now {
            schedule.step();
        }
        schedule
    }

    pub fn next_fire(&self) -> DateTime<Utc> {
        self.next
    }

    /// Local calendar date the next run announces.
    pub fn next_date(&self) -> NaiveDate {
        self.date
    }

    /// Day-month celebrated by the next run.
    pub fn today(&self) -> DayMonth {
        DayMonth::from_date(self.date)
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Move to the following calendar day. If the process was suspended
    /// past that target, whole days are skipped instead of firing repeatedly.
    pub fn advance(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.step();
        while self.next <= now {
            self.step();
        }
        self.next
    }

    fn step(&mut self) {
        self.date = self.date + Days::new(1);
        self.next = local_instant(self.date, self.at, self.tz);
    }
}

fn local_instant(date: NaiveDate, at: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(at);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // Skipped by a DST jump: fire one hour later.
        LocalResult::None => local_instant_shifted(naive + chrono::Duration::hours(1), tz),
    }
}

fn local_instant_shifted(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

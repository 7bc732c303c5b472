//! Holiday query engine
//!
//! Answers "am I on vacation", "what's next" and day-count queries over a
//! sorted sequence of vacation periods. "Today" is always computed in the
//! engine's configured timezone, never system-local time: a Réunion
//! (UTC+4) and a Guadeloupe (UTC-4) instance can legitimately disagree
//! about the current date near midnight, and holiday boundaries must
//! follow the local calendar.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::models::VacationPeriod;

/// Query engine over a sorted vacation period sequence
///
/// Rebuilt wholesale on every refresh cycle; all queries are read-only and
/// idempotent between refreshes.
#[derive(Debug, Clone)]
pub struct HolidayEngine {
    /// Periods sorted ascending by start date
    periods: Vec<VacationPeriod>,
    /// Timezone used to compute "today"
    timezone: Tz,
}

impl HolidayEngine {
    /// Create an engine over a period sequence
    ///
    /// The sequence is re-sorted defensively; the parser and static tables
    /// already emit sorted data.
    pub fn new(mut periods: Vec<VacationPeriod>, timezone: Tz) -> Self {
        periods.sort_by_key(|p| p.start);
        Self { periods, timezone }
    }

    /// An engine with no period data
    pub fn empty(timezone: Tz) -> Self {
        Self {
            periods: Vec::new(),
            timezone,
        }
    }

    /// The full sorted period sequence
    pub fn periods(&self) -> &[VacationPeriod] {
        &self.periods
    }

    /// The timezone this engine computes "today" in
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Today's date in the engine's timezone
    pub fn today(&self) -> NaiveDate {
        today_in(self.timezone, Utc::now())
    }

    /// The period containing today, if any
    pub fn current_period(&self) -> Option<&VacationPeriod> {
        self.current_period_on(self.today())
    }

    /// The first period starting after today, if any
    pub fn next_period(&self) -> Option<&VacationPeriod> {
        self.next_period_on(self.today())
    }

    /// Whole days from today until the next period starts
    pub fn days_until_next(&self) -> Option<i64> {
        let today = self.today();
        self.next_period_on(today)
            .map(|p| (p.start - today).num_days())
    }

    /// Remaining days of the current period, inclusive of its end date
    ///
    /// `None` when today is not inside any period.
    pub fn days_remaining_in_current(&self) -> Option<i64> {
        let today = self.today();
        self.current_period_on(today)
            .map(|p| ((p.end - today).num_days() + 1).max(0))
    }

    /// Whether today falls inside a vacation period
    pub fn is_on_vacation(&self) -> bool {
        self.current_period().is_some()
    }

    /// All periods overlapping the inclusive date range
    pub fn periods_overlapping(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Vec<&VacationPeriod> {
        self.periods
            .iter()
            .filter(|p| p.end >= range_start && p.start <= range_end)
            .collect()
    }

    /// The period containing `date`, via ordered search
    ///
    /// `partition_point` finds the insertion point for `date` among the
    /// start dates; the containing period, if any, is the one just before
    /// it. The candidate at the insertion point is checked as well to
    /// catch a period starting on `date` itself.
    pub fn current_period_on(&self, date: NaiveDate) -> Option<&VacationPeriod> {
        if self.periods.is_empty() {
            return None;
        }
        let idx = self.periods.partition_point(|p| p.start <= date);
        if idx > 0 && self.periods[idx - 1].contains(date) {
            return Some(&self.periods[idx - 1]);
        }
        if idx < self.periods.len() && self.periods[idx].contains(date) {
            return Some(&self.periods[idx]);
        }
        None
    }

    /// The first period with start strictly after `date`
    pub fn next_period_on(&self, date: NaiveDate) -> Option<&VacationPeriod> {
        let idx = self.periods.partition_point(|p| p.start <= date);
        self.periods.get(idx)
    }
}

/// Calendar date at instant `now` as seen from `tz`
fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

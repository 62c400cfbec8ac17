//! Clock primitives for injected time.
//!
//! Core business logic never reads the wall clock directly. Callers pass a
//! `&dyn Clock` (or an explicit `NaiveDate`) so overdue evaluation and
//! recurrence defaults stay deterministic under test.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" for the application.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in the user's local timezone.
    ///
    /// Business dates (invoice dates, due dates, recurrence anchors) are
    /// local dates; comparing a UTC date against a local due date shifts
    /// overdue evaluation by up to a day.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Creates a clock pinned to midnight UTC on the given date.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            instant: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Clock abstracts access to the current time so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in the user's time zone. Calendar-day logic uses this.
    fn now(&self) -> NaiveDateTime;

    /// Current instant, used to stamp `created_at`.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Returns the current calendar date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Midday on `date`, far from either day boundary.
    pub fn at_noon(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.now.and_utc()
    }
}

use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current civil date so schedules stay deterministic in tests.
pub trait Clock {
    /// Returns today's date in the user's local calendar.
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

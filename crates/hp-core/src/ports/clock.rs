use chrono::{DateTime, NaiveDate, Utc};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used for age checks.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

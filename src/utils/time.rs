use chrono::{Local, NaiveDate, Utc};

/// Seconds since the Unix epoch
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Local calendar date, used when the sales data has no dates to default to
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

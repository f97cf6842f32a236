use chrono::{DateTime, FixedOffset, TimeZone};

use crate::error::{Error, Result};

/// Layout of `performed_at`, `start_at` and `end_at`.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S %z";

/// Layout of a task's `shipment_date`.
pub const SHIPMENT_DATE_FORMAT: &str = "%d %b, %Y";

pub fn format_timestamp<Tz>(value: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_shipment_date<Tz>(value: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    value.format(SHIPMENT_DATE_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| Error::InvalidTimestamp(value.to_string()))
}

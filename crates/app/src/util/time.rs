use chrono::{SecondsFormat, Utc};

/// Current UTC time as an RFC 3339 string with microseconds and a `Z` suffix.
///
/// Fixed width, so stored timestamps sort lexically in time order.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

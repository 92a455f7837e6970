//! Wall-clock formatting for message timestamps.

use chrono::{Local, TimeZone};

/// Format an epoch-seconds timestamp as local `HH:MM:SS`.
pub fn clock_time(timestamp: u32) -> String {
    Local
        .timestamp_opt(i64::from(timestamp), 0)
        .single()
        .map_or_else(|| "--:--:--".to_string(), |t| t.format("%H:%M:%S").to_string())
}

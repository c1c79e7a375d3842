const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Round seconds to whole milliseconds, half away from zero
///
/// Negative offsets saturate to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

/// Render `seconds` as `[HH:]MM:SS<marker>mmm`
///
/// The hours field is dropped when it is zero unless `always_include_hours`
/// is set; it is never capped at two digits.
pub fn format_timestamp(seconds: f64, always_include_hours: bool, decimal_marker: &str) -> String {
    let mut millis = to_millis(seconds);

    let hours = millis / MS_PER_HOUR;
    millis -= hours * MS_PER_HOUR;

    let minutes = millis / MS_PER_MINUTE;
    millis -= minutes * MS_PER_MINUTE;

    let secs = millis / MS_PER_SECOND;
    millis -= secs * MS_PER_SECOND;

    if always_include_hours || hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}{decimal_marker}{millis:03}")
    } else {
        format!("{minutes:02}:{secs:02}{decimal_marker}{millis:03}")
    }
}

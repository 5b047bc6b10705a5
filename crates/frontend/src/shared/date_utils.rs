/// Wall-clock formatting of UTC instants in the browser's time zone
use chrono::{DateTime, Local, Utc};

/// "14:02"
pub fn format_time(instant: &DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%H:%M").to_string()
}

/// "14:02:26", for logs of quick successive changes
pub fn format_time_precise(instant: &DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_shapes() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        let short = format_time(&instant);
        let precise = format_time_precise(&instant);
        assert_eq!(short.len(), 5);
        assert_eq!(precise.len(), 8);
        assert!(precise.starts_with(&short));
        assert!(precise.ends_with(":26"));
    }
}

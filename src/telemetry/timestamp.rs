use chrono::{DateTime, NaiveDateTime};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Series are ordered by the raw string. That order is only chronological when
/// timestamps share an ISO-8601 layout, which this check reports on.
pub fn is_iso8601(ts: &str) -> bool {
    DateTime::parse_from_rfc3339(ts).is_ok()
        || NAIVE_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(ts, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_layouts() {
        assert!(is_iso8601("2024-08-30T10:15:42.123+03:00"));
        assert!(is_iso8601("2024-08-30T10:15:42Z"));
        assert!(is_iso8601("2024-08-30T10:15:42.123456"));
        assert!(is_iso8601("2024-08-30 10:15:42"));
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(!is_iso8601("t1"));
        assert!(!is_iso8601("30/08/2024 10:15"));
        assert!(!is_iso8601("1725012942"));
    }
}

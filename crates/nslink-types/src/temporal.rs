use chrono::{DateTime, Utc};

/// Wall-clock timestamp recorded on groups and links.
///
/// Serializes as an RFC 3339 string.
pub type Timestamp = DateTime<Utc>;

/// The current time.
pub fn now() -> Timestamp {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough() {
        let a = now();
        let b = now();
        assert!(b >= a);
    }

    #[test]
    fn serializes_as_rfc3339() {
        let ts: Timestamp = "2024-05-01T12:00:00Z".parse().unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-05-01T12:00:00Z\"");
    }
}

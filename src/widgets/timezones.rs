use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::TimezoneClock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    pub city: String,
    pub code: String,
    pub tz: String,
    /// 24h `HH:MM`
    pub time: String,
}

/// Wall-clock `HH:MM` in `tz`. Unknown zone names read `00:00`.
pub fn clock_time(tz: &str, now: DateTime<Utc>) -> String {
    match tz.parse::<Tz>() {
        Ok(zone) => now.with_timezone(&zone).format("%H:%M").to_string(),
        Err(_) => {
            tracing::debug!(tz, "Unknown timezone in clock list");
            "00:00".to_string()
        }
    }
}

pub fn read_clocks(clocks: &[TimezoneClock], now: DateTime<Utc>) -> Vec<ClockReading> {
    clocks
        .iter()
        .map(|clock| ClockReading {
            city: clock.city.clone(),
            code: clock.code.clone(),
            tz: clock.tz.clone(),
            time: clock_time(&clock.tz, now),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_zone() {
        // 2024-01-15 12:05 UTC, winter: Toronto is UTC-5, Tokyo UTC+9.
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 5, 0).unwrap();
        assert_eq!(clock_time("America/Toronto", now), "07:05");
        assert_eq!(clock_time("Asia/Tokyo", now), "21:05");
        assert_eq!(clock_time("Europe/London", now), "12:05");
    }

    #[test]
    fn unknown_zone_reads_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 5, 0).unwrap();
        assert_eq!(clock_time("Mars/Olympus_Mons", now), "00:00");
    }

    #[test]
    fn keeps_configured_order() {
        let clocks = vec![
            TimezoneClock {
                city: "Sydney".to_string(),
                tz: "Australia/Sydney".to_string(),
                code: "SYD".to_string(),
            },
            TimezoneClock {
                city: "Toronto".to_string(),
                tz: "America/Toronto".to_string(),
                code: "TOR".to_string(),
            },
        ];
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 5, 0).unwrap();
        let codes: Vec<_> = read_clocks(&clocks, now).into_iter().map(|c| c.code).collect();
        assert_eq!(codes, ["SYD", "TOR"]);
    }
}

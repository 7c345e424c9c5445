//! Pure derivations the landing page renders on top of the cached data.

mod fear_greed;
mod timezones;

pub use fear_greed::{FearGreedBand, FearGreedView, band_for, display_value, needle_rotation};
pub use timezones::{ClockReading, clock_time, read_clocks};

use chrono::{DateTime, Utc};

use crate::db::DbStreamStatus;

/// Seconds the stream has been live, or `None` while offline.
pub fn stream_elapsed_secs(status: &DbStreamStatus, now: DateTime<Utc>) -> Option<i64> {
    if !status.is_live {
        return None;
    }
    let started_at = status.started_at?;
    Some((now - started_at).num_seconds().max(0))
}

/// How many repositories a client should render. Mobile gets two thirds.
pub fn repo_display_limit(limit: u32, mobile: bool) -> u32 {
    if mobile {
        u32::try_from(u64::from(limit) * 67 / 100).unwrap_or(limit)
    } else {
        limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn elapsed_only_while_live() {
        let started = Utc.with_ymd_and_hms(2024, 11, 15, 18, 0, 0).unwrap();
        let now = started + chrono::Duration::seconds(3725);

        let live = DbStreamStatus {
            id: Some(1),
            is_live: true,
            timestamp: started,
            started_at: Some(started),
        };
        assert_eq!(stream_elapsed_secs(&live, now), Some(3725));
        assert_eq!(stream_elapsed_secs(&DbStreamStatus::offline(now), now), None);
    }

    #[test]
    fn mobile_shows_two_thirds() {
        assert_eq!(repo_display_limit(40, false), 40);
        assert_eq!(repo_display_limit(40, true), 26);
        assert_eq!(repo_display_limit(3, true), 2);
        assert_eq!(repo_display_limit(0, true), 0);
        assert_eq!(repo_display_limit(u32::MAX, true), 2_877_628_087);
    }
}

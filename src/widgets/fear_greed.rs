use serde::Serialize;

use crate::db::DbFearGreed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FearGreedBand {
    pub range: [u8; 2],
    pub label: String,
    pub color: &'static str,
}

impl FearGreedBand {
    fn new(range: [u8; 2], label: impl Into<String>, color: &'static str) -> Self {
        Self {
            range,
            label: label.into(),
            color,
        }
    }
}

/// Maps Alternative.me's classification text onto the gauge band.
///
/// `None` means there is no reading at all.
pub fn band_for(classification: Option<&str>) -> FearGreedBand {
    let Some(classification) = classification else {
        return FearGreedBand::new([0, 100], "----", "white");
    };

    let lower = classification.to_lowercase();
    if lower.contains("extreme fear") {
        FearGreedBand::new([0, 25], "EXTREME FEAR", "red")
    } else if lower.contains("fear") {
        FearGreedBand::new([25, 45], "FEAR", "red")
    } else if lower.contains("neutral") {
        FearGreedBand::new([45, 55], "NEUTRAL", "gray")
    } else if lower.contains("extreme greed") {
        FearGreedBand::new([75, 100], "EXTREME GREED", "green")
    } else if lower.contains("greed") {
        FearGreedBand::new([55, 75], "GREED", "green")
    } else {
        FearGreedBand::new([0, 100], classification.to_uppercase(), "white")
    }
}

/// Gauge needle angle in degrees: 0 points straight up, -90 is 0, +90 is 100.
pub fn needle_rotation(value: Option<f64>) -> f64 {
    value.map_or(0.0, |v| (v - 50.0) * 1.8)
}

#[allow(clippy::cast_possible_truncation)]
pub fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{}", v.round() as i64))
}

/// Everything the gauge needs, serialized as-is by `/api/fear-greed`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FearGreedView {
    pub reading: Option<DbFearGreed>,
    pub band: FearGreedBand,
    pub needle_rotation: f64,
    pub display_value: String,
}

impl FearGreedView {
    pub fn new(reading: Option<DbFearGreed>) -> Self {
        let value = reading
            .as_ref()
            .and_then(|r| r.data.value.trim().parse::<f64>().ok());
        let band = band_for(reading.as_ref().map(|r| r.data.value_classification.as_str()));

        Self {
            band,
            needle_rotation: needle_rotation(value),
            display_value: display_value(value),
            reading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FearGreedData;
    use chrono::Utc;

    #[test]
    fn bands_follow_classification() {
        assert_eq!(band_for(Some("Extreme Fear")).label, "EXTREME FEAR");
        assert_eq!(band_for(Some("Extreme Fear")).range, [0, 25]);
        assert_eq!(band_for(Some("Fear")).range, [25, 45]);
        assert_eq!(band_for(Some("Neutral")).color, "gray");
        assert_eq!(band_for(Some("Greed")).range, [55, 75]);
        assert_eq!(band_for(Some("Extreme Greed")).range, [75, 100]);
        assert_eq!(band_for(Some("Extreme Greed")).color, "green");

        let odd = band_for(Some("Euphoria"));
        assert_eq!(odd.label, "EUPHORIA");
        assert_eq!(odd.range, [0, 100]);
        assert_eq!(odd.color, "white");

        assert_eq!(band_for(None).label, "----");
    }

    #[test]
    fn needle_and_display() {
        assert!((needle_rotation(Some(50.0))).abs() < f64::EPSILON);
        assert!((needle_rotation(Some(100.0)) - 90.0).abs() < f64::EPSILON);
        assert!((needle_rotation(Some(0.0)) + 90.0).abs() < f64::EPSILON);
        assert!(needle_rotation(None).abs() < f64::EPSILON);

        assert_eq!(display_value(Some(72.4)), "72");
        assert_eq!(display_value(None), "--");
    }

    #[test]
    fn view_tolerates_garbage_value() {
        let view = FearGreedView::new(Some(DbFearGreed {
            data: FearGreedData {
                value: "n/a".to_string(),
                value_classification: "Greed".to_string(),
                timestamp: "0".to_string(),
                time_until_update: None,
            },
            updated: Utc::now(),
        }));
        assert_eq!(view.display_value, "--");
        assert_eq!(view.band.label, "GREED");

        let empty = FearGreedView::new(None);
        assert_eq!(empty.band.label, "----");
    }
}

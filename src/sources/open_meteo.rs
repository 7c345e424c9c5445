use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use super::Sources;
use super::retry::{get_json, with_linear_backoff};
use crate::db::WeatherDay;
use crate::error::OnairError;

const SOURCE: &str = "open_meteo";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct Daily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    weather_code: Vec<Option<i64>>,
}

/// Placeholder week shown when Open-Meteo is unreachable.
const FALLBACK_WEEK: &[(&str, i64, &str)] = &[
    ("SUN", 24, "⛅"),
    ("MON", 22, "🌤️"),
    ("TUE", 26, "☀️"),
    ("WED", 23, "🌧️"),
    ("THU", 21, "⛈️"),
    ("FRI", 25, "🌤️"),
    ("SAT", 27, "☀️"),
];

pub fn fallback_weather() -> Vec<WeatherDay> {
    FALLBACK_WEEK
        .iter()
        .map(|(day, temp, condition)| WeatherDay {
            day: (*day).to_string(),
            temp: *temp,
            condition: (*condition).to_string(),
        })
        .collect()
}

/// WMO weather interpretation code to an emoji.
pub fn weather_condition(code: i64) -> &'static str {
    match code {
        0 => "☀️",
        1..=3 => "🌤️",
        45 | 48 => "☁️",
        51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 => "🌧️",
        71 | 73 | 75 | 77 | 85 | 86 => "🌨️",
        80..=82 => "🌦️",
        95 | 96 | 99 => "⛈️",
        _ => "⛅",
    }
}

/// `2025-03-10 -> "MON"`.
pub fn day_abbreviation(date: &str) -> Result<&'static str, OnairError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| OnairError::UpstreamPayload(format!("bad forecast date {date:?}: {e}")))?;
    Ok(match date.weekday() {
        Weekday::Sun => "SUN",
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
    })
}

/// Rounds half up, the way the widget has always displayed temperatures (-2.5 -> -2).
fn round_temp(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

fn into_days(daily: Daily) -> Result<Vec<WeatherDay>, OnairError> {
    daily
        .time
        .iter()
        .zip(daily.temperature_2m_max)
        .zip(daily.weather_code)
        .map(|((date, max), code)| {
            let max = max.ok_or_else(|| {
                OnairError::UpstreamPayload(format!("missing max temperature for {date}"))
            })?;
            Ok(WeatherDay {
                day: day_abbreviation(date)?.to_string(),
                temp: round_temp(max),
                condition: weather_condition(code.unwrap_or(-1)).to_string(),
            })
        })
        .collect()
}

/// Seven-day forecast (daily max + condition) for the configured location.
pub async fn fetch_forecast(sources: &Sources) -> Result<Vec<WeatherDay>, OnairError> {
    let widgets = &sources.widgets;
    let mut url = sources.upstreams.open_meteo_url.join("v1/forecast")?;
    url.query_pairs_mut()
        .append_pair("latitude", &widgets.latitude.to_string())
        .append_pair("longitude", &widgets.longitude.to_string())
        .append_pair("daily", "temperature_2m_max,weather_code")
        .append_pair("timezone", &widgets.weather_timezone)
        .append_pair("forecast_days", "7");

    with_linear_backoff(SOURCE, sources.retry_policy(), || async {
        let forecast: ForecastResponse = get_json(SOURCE, &sources.client, &url, None).await?;
        let days = into_days(forecast.daily)?;
        if days.is_empty() {
            return Err(OnairError::UpstreamPayload("empty forecast".to_string()));
        }
        Ok(days)
    })
    .await
}

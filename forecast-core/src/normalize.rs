//! Reshaping of timeline JSON into forecast rows.
//!
//! Response variants disagree on a few field names: the day date may arrive as
//! `datetime` or `date`, and the rain figure as `precipprob` or only `precip`.
//! Everything is reconciled here into one row schema.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::{
    error::ForecastError,
    model::{CurrentConditions, DailyRow, Forecast, HourlyRow, Units},
};

/// How much of the response to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeLimits {
    /// Keep at most this many days. `None` keeps all of them.
    pub max_days: Option<usize>,
    /// Hourly rows are taken from this many leading days.
    pub hourly_days: usize,
}

impl Default for NormalizeLimits {
    fn default() -> Self {
        Self { max_days: None, hourly_days: 2 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeline {
    resolved_address: Option<String>,
    current_conditions: Option<RawCurrent>,
    days: Option<Vec<RawDay>>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    datetime: Option<String>,
    date: Option<String>,
    tempmax: Option<f64>,
    tempmin: Option<f64>,
    conditions: Option<String>,
    precipprob: Option<f64>,
    precip: Option<f64>,
    windspeed: Option<f64>,
    description: Option<String>,
    hours: Option<Vec<RawHour>>,
}

#[derive(Debug, Deserialize)]
struct RawHour {
    datetime: Option<String>,
    temp: Option<f64>,
    precipprob: Option<f64>,
    precip: Option<f64>,
    windspeed: Option<f64>,
    conditions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    datetime: Option<String>,
    temp: Option<f64>,
    feelslike: Option<f64>,
    windspeed: Option<f64>,
    precipprob: Option<f64>,
    precip: Option<f64>,
    humidity: Option<f64>,
    conditions: Option<String>,
}

/// Parse a timeline response body into a [`Forecast`].
///
/// `fallback_address` is used when the response carries no `resolvedAddress`.
pub fn normalize(
    body: &str,
    units: Units,
    fallback_address: &str,
    limits: NormalizeLimits,
) -> Result<Forecast, ForecastError> {
    let raw: RawTimeline = serde_json::from_str(body)
        .map_err(|e| ForecastError::InvalidResponse(format!("malformed JSON: {e}")))?;

    let Some(mut raw_days) = raw.days else {
        tracing::warn!("timeline response has no 'days' field");
        return Err(ForecastError::InvalidResponse("missing 'days'".to_string()));
    };

    if let Some(max) = limits.max_days {
        raw_days.truncate(max);
    }

    let hours = raw_days
        .iter()
        .take(limits.hourly_days)
        .flat_map(|day| {
            let parent = day_date(day);
            day.hours.iter().flatten().map(move |h| hourly_row(h, parent))
        })
        .collect();

    let days = raw_days.iter().map(daily_row).collect();

    Ok(Forecast {
        resolved_address: raw
            .resolved_address
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| fallback_address.to_string()),
        units,
        current: raw.current_conditions.map(current_conditions),
        days,
        hours,
    })
}

fn day_date(day: &RawDay) -> Option<NaiveDate> {
    day.datetime
        .as_deref()
        .or(day.date.as_deref())
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

fn daily_row(day: &RawDay) -> DailyRow {
    DailyRow {
        date: day_date(day),
        temp_max: day.tempmax,
        temp_min: day.tempmin,
        conditions: day.conditions.clone(),
        precip_prob: day.precipprob.or(day.precip),
        wind_speed: day.windspeed,
        description: day.description.clone(),
    }
}

fn hourly_row(hour: &RawHour, parent_date: Option<NaiveDate>) -> HourlyRow {
    HourlyRow {
        timestamp: hour_timestamp(hour.datetime.as_deref(), parent_date),
        parent_date,
        temp: hour.temp,
        precip_prob: hour.precipprob.or(hour.precip),
        wind_speed: hour.windspeed,
        conditions: hour.conditions.clone(),
    }
}

/// Combine the parent day with the hour's clock time. Some variants send a
/// full `YYYY-MM-DDTHH:MM:SS` instead, which is accepted as is.
fn hour_timestamp(datetime: Option<&str>, parent: Option<NaiveDate>) -> Option<NaiveDateTime> {
    let raw = datetime?.trim();

    if let Ok(full) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(full);
    }

    let time = NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()?;
    parent.map(|date| date.and_time(time))
}

fn current_conditions(raw: RawCurrent) -> CurrentConditions {
    CurrentConditions {
        observed_at: raw.datetime,
        temp: raw.temp,
        feels_like: raw.feelslike,
        wind_speed: raw.windspeed,
        precip_prob: raw.precipprob.or(raw.precip),
        precip: raw.precip,
        humidity: raw.humidity,
        conditions: raw.conditions,
    }
}

/// Pictogram for a free-text conditions string.
pub fn icon_for(conditions: Option<&str>) -> &'static str {
    let c = conditions.unwrap_or_default().to_lowercase();
    if c.contains("snow") {
        "❄️"
    } else if c.contains("rain") {
        "🌧️"
    } else if c.contains("storm") || c.contains("thunder") {
        "⛈️"
    } else if c.contains("overcast") {
        "☁️"
    } else if c.contains("cloud") {
        "⛅️"
    } else if c.contains("fog") || c.contains("mist") {
        "🌫️"
    } else if c.contains("clear") {
        "☀️"
    } else {
        "🌡️"
    }
}

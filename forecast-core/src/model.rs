use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit system requested from the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Us,
}

impl Units {
    /// Value sent as the `unitGroup` query parameter.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Us => "us",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Us => "°F",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Us => "mph",
        }
    }

    pub fn precip_label(&self) -> &'static str {
        match self {
            Units::Metric => "mm",
            Units::Us => "in",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Us,
            Units::Us => Units::Metric,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "metric" | "c" => Ok(Units::Metric),
            "us" | "imperial" | "f" => Ok(Units::Us),
            _ => Err(anyhow::anyhow!(
                "Unknown unit group '{value}'. Supported values: metric, us."
            )),
        }
    }
}

impl std::str::FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::try_from(s)
    }
}

/// Sections of the timeline response to request via the `include` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Include {
    pub days: bool,
    pub hours: bool,
    pub current: bool,
}

impl Include {
    pub const fn days_only() -> Self {
        Self { days: true, hours: false, current: false }
    }

    pub const fn all() -> Self {
        Self { days: true, hours: true, current: true }
    }

    /// Comma-joined list, always in `days,hours,current` order.
    pub fn as_query_value(&self) -> String {
        [(self.days, "days"), (self.hours, "hours"), (self.current, "current")]
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for Include {
    fn default() -> Self {
        Self::days_only()
    }
}

/// A single user lookup: what to fetch and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastQuery {
    pub location: String,
    pub units: Units,
    /// Forecast window in days, sent as a `next{N}days` path segment.
    pub window: Option<u32>,
    pub include: Include,
}

impl ForecastQuery {
    pub fn new(location: impl Into<String>, units: Units) -> Self {
        Self { location: location.into(), units, window: None, include: Include::default() }
    }

    pub fn with_window(mut self, days: u32) -> Self {
        self.window = Some(days);
        self
    }

    pub fn with_include(mut self, include: Include) -> Self {
        self.include = include;
        self
    }

    /// Path segment for the forecast window, e.g. `next7days`.
    pub fn window_segment(&self) -> Option<String> {
        self.window.map(|n| format!("next{n}days"))
    }

    /// Memoization key. Locations differing only in case or surrounding
    /// whitespace share an entry.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.location.trim().to_lowercase(),
            self.units.as_query_value(),
            self.window.map(|n| n.to_string()).unwrap_or_default(),
            self.include.as_query_value(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: Option<NaiveDate>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub conditions: Option<String>,
    pub precip_prob: Option<f64>,
    pub wind_speed: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRow {
    pub timestamp: Option<NaiveDateTime>,
    pub parent_date: Option<NaiveDate>,
    pub temp: Option<f64>,
    pub precip_prob: Option<f64>,
    pub wind_speed: Option<f64>,
    pub conditions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub observed_at: Option<String>,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precip_prob: Option<f64>,
    /// Precipitation amount, in `Units::precip_label` units.
    pub precip: Option<f64>,
    pub humidity: Option<f64>,
    pub conditions: Option<String>,
}

/// Normalized result of one timeline lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub resolved_address: String,
    pub units: Units,
    pub current: Option<CurrentConditions>,
    pub days: Vec<DailyRow>,
    pub hours: Vec<HourlyRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_parse_aliases() {
        assert_eq!(Units::try_from("METRIC").unwrap(), Units::Metric);
        assert_eq!(Units::try_from("imperial").unwrap(), Units::Us);
        assert_eq!(" f ".parse::<Units>().unwrap(), Units::Us);
        assert!(Units::try_from("kelvin").is_err());
    }

    #[test]
    fn unit_labels_follow_unit_group() {
        assert_eq!(Units::Metric.as_query_value(), "metric");
        assert_eq!(Units::Metric.temperature_label(), "°C");
        assert_eq!(Units::Metric.speed_label(), "km/h");

        assert_eq!(Units::Us.as_query_value(), "us");
        assert_eq!(Units::Us.temperature_label(), "°F");
        assert_eq!(Units::Us.speed_label(), "mph");
        assert_eq!(Units::Metric.toggled(), Units::Us);
    }

    #[test]
    fn include_keeps_canonical_order() {
        assert_eq!(Include::days_only().as_query_value(), "days");
        assert_eq!(Include::all().as_query_value(), "days,hours,current");
        let inc = Include { days: false, hours: true, current: true };
        assert_eq!(inc.as_query_value(), "hours,current");
    }

    #[test]
    fn cache_key_ignores_case_and_padding() {
        let a = ForecastQuery::new("  Lisbon ", Units::Metric);
        let b = ForecastQuery::new("lisbon", Units::Metric);
        let c = ForecastQuery::new("lisbon", Units::Us);
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(b.cache_key(), c.cache_key());
        assert_ne!(b.cache_key(), b.clone().with_window(7).cache_key());
    }

    #[test]
    fn window_segment_format() {
        let q = ForecastQuery::new("Porto", Units::Metric).with_window(7);
        assert_eq!(q.window_segment().as_deref(), Some("next7days"));
        assert_eq!(ForecastQuery::new("Porto", Units::Metric).window_segment(), None);
    }
}

//! Terminal rendering of normalized forecasts.

use forecast_core::{CurrentConditions, DailyRow, Forecast, HourlyRow, Units, icon_for};
use tabled::{Style, Table, Tabled};

const PLACEHOLDER: &str = "-";

#[derive(Tabled)]
struct DailyLine {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "Max")]
    temp_max: String,
    #[tabled(rename = "Min")]
    temp_min: String,
    #[tabled(rename = "Conditions")]
    conditions: String,
    #[tabled(rename = "Rain")]
    precip_prob: String,
    #[tabled(rename = "Wind")]
    wind: String,
}

#[derive(Tabled)]
struct HourlyLine {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "Temp")]
    temp: String,
    #[tabled(rename = "Rain")]
    precip_prob: String,
    #[tabled(rename = "Conditions")]
    conditions: String,
}

fn temperature(value: Option<f64>, units: Units) -> String {
    value
        .map(|v| format!("{v:.1} {}", units.temperature_label()))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn speed(value: Option<f64>, units: Units) -> String {
    value
        .map(|v| format!("{v:.0} {}", units.speed_label()))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn amount(value: Option<f64>, units: Units) -> String {
    value
        .map(|v| format!("{v:.1} {}", units.precip_label()))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn percent(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.0}%")).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn text(value: Option<&str>) -> String {
    value.filter(|s| !s.is_empty()).unwrap_or(PLACEHOLDER).to_string()
}

fn daily_line(row: &DailyRow, units: Units) -> DailyLine {
    DailyLine {
        day: row
            .date
            .map(|d| d.format("%a, %d/%m").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        icon: icon_for(row.conditions.as_deref()),
        temp_max: temperature(row.temp_max, units),
        temp_min: temperature(row.temp_min, units),
        conditions: text(row.conditions.as_deref()),
        precip_prob: percent(row.precip_prob),
        wind: speed(row.wind_speed, units),
    }
}

fn hourly_line(row: &HourlyRow, units: Units) -> HourlyLine {
    HourlyLine {
        time: row
            .timestamp
            .map(|ts| ts.format("%a %H:%M").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        icon: icon_for(row.conditions.as_deref()),
        temp: temperature(row.temp, units),
        precip_prob: percent(row.precip_prob),
        conditions: text(row.conditions.as_deref()),
    }
}

pub fn daily_table(forecast: &Forecast) -> String {
    if forecast.days.is_empty() {
        return "No daily data available.".to_string();
    }

    let lines: Vec<DailyLine> =
        forecast.days.iter().map(|row| daily_line(row, forecast.units)).collect();
    Table::new(lines).with(Style::modern()).to_string()
}

pub fn hourly_table(forecast: &Forecast) -> String {
    if forecast.hours.is_empty() {
        return "No hourly data available.".to_string();
    }

    let lines: Vec<HourlyLine> =
        forecast.hours.iter().map(|row| hourly_line(row, forecast.units)).collect();
    Table::new(lines).with(Style::modern()).to_string()
}

pub fn current_summary(address: &str, current: &CurrentConditions, units: Units) -> String {
    let mut out = format!(
        "{} {} - updated {}\n",
        icon_for(current.conditions.as_deref()),
        address,
        text(current.observed_at.as_deref()),
    );
    out.push_str(&format!("  Temperature: {}\n", temperature(current.temp, units)));
    out.push_str(&format!("  Feels like:  {}\n", temperature(current.feels_like, units)));
    out.push_str(&format!("  Wind:        {}\n", speed(current.wind_speed, units)));
    out.push_str(&format!("  Rain:        {}\n", percent(current.precip_prob.or(Some(0.0)))));
    out.push_str(&format!("  Precip:      {}\n", amount(current.precip, units)));
    out.push_str(&format!("  Conditions:  {}", text(current.conditions.as_deref())));
    out
}

/// Full human-readable report.
pub fn report(forecast: &Forecast, show_hourly: bool) -> String {
    let mut sections = vec![format!("Forecast for {}", forecast.resolved_address)];

    if let Some(current) = &forecast.current {
        sections.push(current_summary(&forecast.resolved_address, current, forecast.units));
    }

    sections.push(daily_table(forecast));

    if show_hourly {
        sections.push(hourly_table(forecast));
    }

    sections.join("\n\n")
}

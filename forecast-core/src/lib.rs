//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The timeline weather source and its HTTP implementation
//! - Status-code diagnostics and response normalization
//! - A small time-boxed lookup cache
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod service;
pub mod source;

pub use config::Config;
pub use error::{Diagnostic, ForecastError, diagnose};
pub use model::{
    CurrentConditions, DailyRow, Forecast, ForecastQuery, HourlyRow, Include, Units,
};
pub use normalize::{NormalizeLimits, icon_for, normalize};
pub use service::ForecastService;
pub use source::{TimelineClient, WeatherSource};

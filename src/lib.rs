//! Electricity price clock.
//!
//! Fetches a day of hourly spot prices, bands them from "very cheap" to
//! "very expensive" around the day's mean, lays the bands out on a 24-hour
//! clock face and adds an optional usage advisory from a text-generation
//! provider.

pub mod advisor;
pub mod analyzer;
pub mod config;
pub mod dashboard;
pub mod fetcher;
pub mod model;
pub mod normalizer;
pub mod render;
pub mod state;
pub mod utils;

#[cfg(test)]
mod testing;

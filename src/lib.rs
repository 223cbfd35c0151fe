//! Stazione Meteo dashboard - polls the weather station API and keeps the
//! dashboard regions (value cards, risk badge, charts, rainfall, data time)
//! up to date.
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod error;
pub mod refresh;
pub mod routes;
pub mod station;
pub mod view;

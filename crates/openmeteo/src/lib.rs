//! Open-Meteo provider adapter.
//!
//! Two read-only lookups against the public Open-Meteo services: a
//! geocoding search (city name → coordinates) and a single-day daily
//! forecast (coordinates + date → one [`DailyWeatherRecord`]), plus the
//! canonical text rendering of a record. Response shapes are validated on
//! arrival; a lookup with no match or a malformed body is a typed failure,
//! never a default value.

mod client;
mod error;
mod summary;
mod types;

pub use client::OpenMeteo;
pub use error::{Error, Result};
pub use summary::format_summary;
pub use types::{DailyWeatherRecord, GeocodeResult};

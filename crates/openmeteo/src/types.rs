//! Wire shapes of the two provider responses and the record derived from
//! them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The single best geocoding match for a city query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Geocoding response body. A missing or empty `results` array means no
/// match, not an empty result.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodeResult>>,
}

/// Forecast response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub daily: DailySeries,
}

/// The provider's parallel daily arrays. For a single-day window each
/// carries exactly one element, but the shape is validated rather than
/// assumed.
#[derive(Debug, Deserialize)]
pub(crate) struct DailySeries {
    #[allow(dead_code)]
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub weather_code: Vec<i64>,
}

/// One day of weather, taken from index 0 of the provider's arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeatherRecord {
    pub date: String,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub precipitation_mm: f64,
    pub weather_code: i64,
}

impl DailyWeatherRecord {
    /// Derive the record for `date` from the provider's series.
    ///
    /// The four metric arrays must share the same non-zero length;
    /// anything else is an [`Error::InvalidRecord`].
    pub(crate) fn from_series(date: &str, series: &DailySeries) -> Result<Self> {
        let len = series.temperature_2m_max.len();
        if len == 0 {
            return Err(Error::InvalidRecord("daily arrays are empty".to_string()));
        }
        if series.temperature_2m_min.len() != len
            || series.precipitation_sum.len() != len
            || series.weather_code.len() != len
        {
            return Err(Error::InvalidRecord(format!(
                "daily arrays have mismatched lengths: max={} min={} precipitation={} code={}",
                series.temperature_2m_max.len(),
                series.temperature_2m_min.len(),
                series.precipitation_sum.len(),
                series.weather_code.len(),
            )));
        }

        Ok(Self {
            date: date.to_string(),
            temperature_max_c: series.temperature_2m_max[0],
            temperature_min_c: series.temperature_2m_min[0],
            precipitation_mm: series.precipitation_sum[0],
            weather_code: series.weather_code[0],
        })
    }
}

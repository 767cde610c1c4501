//! Canonical text rendering of a daily record.

use crate::types::DailyWeatherRecord;

/// Render a record as the fixed-field Turkish summary.
///
/// Pure and deterministic: field labels and order are stable across
/// versions, because the rendered text is both a user-visible artifact and
/// the structured input the answer synthesis stage reads.
pub fn format_summary(city: &str, date: &str, record: &DailyWeatherRecord) -> String {
    format!(
        "Şehir: {city}\nTarih: {date}\nEn yüksek: {max}°C\nEn düşük: {min}°C\nYağış toplamı: {precipitation} mm\nKod: {code}",
        max = record.temperature_max_c,
        min = record.temperature_min_c,
        precipitation = record.precipitation_mm,
        code = record.weather_code,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DailyWeatherRecord {
        DailyWeatherRecord {
            date: "2025-08-29".to_string(),
            temperature_max_c: 28.0,
            temperature_min_c: 19.0,
            precipitation_mm: 0.0,
            weather_code: 1,
        }
    }

    #[test]
    fn summary_layout_is_stable() {
        let summary = format_summary("İstanbul", "2025-08-29", &record());
        assert_eq!(
            summary,
            "Şehir: İstanbul\nTarih: 2025-08-29\nEn yüksek: 28°C\nEn düşük: 19°C\nYağış toplamı: 0 mm\nKod: 1"
        );
    }

    #[test]
    fn summary_is_deterministic() {
        let first = format_summary("Ankara", "2025-01-02", &record());
        let second = format_summary("Ankara", "2025-01-02", &record());
        assert_eq!(first, second);
    }

    #[test]
    fn fractional_values_are_rendered_as_given() {
        let record = DailyWeatherRecord {
            date: "2025-11-03".to_string(),
            temperature_max_c: 11.4,
            temperature_min_c: 6.8,
            precipitation_mm: 12.7,
            weather_code: 61,
        };
        let summary = format_summary("Rize", "2025-11-03", &record);
        assert!(summary.contains("En yüksek: 11.4°C"));
        assert!(summary.contains("Yağış toplamı: 12.7 mm"));
    }
}

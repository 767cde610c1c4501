//! The two tools this server registers.

use std::future::Future;
use std::pin::Pin;

use mcp::{CallToolResult, Tool, ToolDescriptor, ToolError};
use openmeteo::{format_summary, OpenMeteo};
use serde::Deserialize;
use serde_json::{json, Value};

/// No-argument health probe returning a constant token, independent of
/// provider state.
pub struct HealthCheckTool;

impl Tool for HealthCheckTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "health_check".to_string(),
            title: Some("Health Check".to_string()),
            description: Some("Sunucunun çalıştığını doğrular".to_string()),
            input_schema: json!({"type": "object", "properties": {}}),
        }
    }

    fn call(
        &self,
        _arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send + '_>> {
        Box::pin(async { Ok(CallToolResult::text("OK")) })
    }
}

/// A validated weather query as the handler sees it. The registry has
/// already checked the arguments against the declared schema.
#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: String,
    #[serde(default)]
    country: Option<String>,
    date: String,
}

/// Daily weather summary for a city and date: geocode, fetch the one-day
/// record, render the canonical summary. No retries; one provider
/// failure is one tool failure.
pub struct WeatherTool {
    provider: OpenMeteo,
}

impl WeatherTool {
    pub fn new(provider: OpenMeteo) -> Self {
        Self { provider }
    }
}

impl Tool for WeatherTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_weather_by_date".to_string(),
            title: Some("Günlük hava durumu (tarihe göre)".to_string()),
            description: Some(
                "Belirli bir şehir ve tarih için günlük özet döndürür".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Şehir adı. Örn: İstanbul"
                    },
                    "country": {
                        "type": "string",
                        "description": "Ülke kodu ya da adı. Örn: TR"
                    },
                    "date": {
                        "type": "string",
                        "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
                        "description": "Tarih YYYY-MM-DD"
                    }
                },
                "required": ["city", "date"]
            }),
        }
    }

    fn call(
        &self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let query: WeatherQuery = serde_json::from_value(arguments)
                .map_err(|err| ToolError::InvalidParams(err.to_string()))?;

            tracing::info!(city = %query.city, date = %query.date, "weather tool call");

            let geo = self
                .provider
                .geocode(&query.city, query.country.as_deref())
                .await
                .map_err(|err| ToolError::Execution(err.to_string()))?;

            let record = self
                .provider
                .daily_weather(geo.latitude, geo.longitude, &query.date)
                .await
                .map_err(|err| ToolError::Execution(err.to_string()))?;

            let text = format_summary(&geo.name, &query.date, &record);
            tracing::debug!(summary = %text, "weather tool done");

            Ok(CallToolResult::text(text))
        })
    }
}

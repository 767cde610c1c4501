//! Client-side parameter schema for the weather tool.
//!
//! The tool server validates arguments against its own registered schema
//! on every call; this copy exists so the selector can reject a bad model
//! response before anything crosses the wire. The two checks are
//! deliberately independent.

use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};

use crate::error::{Error, Result};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Parameter schema of `get_weather_by_date`: required non-empty city,
/// optional country, date constrained lexically to `YYYY-MM-DD` (calendar
/// validity is the provider's concern).
pub fn weather_parameters_schema() -> Value {
    json!({
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
    })
}

/// Validate selected parameters against the weather schema, collecting the
/// underlying diagnostics into the error.
pub fn validate_weather_parameters(parameters: &Value) -> Result<()> {
    let schema = weather_parameters_schema();
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|err| Error::SchemaValidation(format!("unusable schema: {err}")))?;

    if let Err(errors) = compiled.validate(parameters) {
        let mut details = Vec::new();
        for (idx, error) in errors.enumerate() {
            if idx >= MAX_SCHEMA_ERRORS {
                details.push("additional errors truncated".to_string());
                break;
            }
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{path}: {error}"));
        }
        return Err(Error::SchemaValidation(details.join("; ")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_complete_query() {
        let params = json!({"city": "İstanbul", "country": "TR", "date": "2025-08-29"});
        assert!(validate_weather_parameters(&params).is_ok());
    }

    #[test]
    fn country_is_optional() {
        let params = json!({"city": "İstanbul", "date": "2025-08-29"});
        assert!(validate_weather_parameters(&params).is_ok());
    }

    #[test]
    fn rejects_wrong_date_order() {
        let params = json!({"city": "İstanbul", "date": "29-08-2025"});
        let err = validate_weather_parameters(&params).unwrap_err();
        let Error::SchemaValidation(details) = err else {
            panic!("expected schema validation failure");
        };
        assert!(details.contains("/date"));
    }

    #[test]
    fn rejects_empty_city() {
        let params = json!({"city": "", "date": "2025-08-29"});
        assert!(validate_weather_parameters(&params).is_err());
    }

    #[test]
    fn rejects_missing_date() {
        let params = json!({"city": "İstanbul"});
        assert!(validate_weather_parameters(&params).is_err());
    }

    #[test]
    fn impossible_calendar_dates_pass_the_lexical_check() {
        let params = json!({"city": "İstanbul", "date": "2025-02-30"});
        assert!(validate_weather_parameters(&params).is_ok());
    }
}

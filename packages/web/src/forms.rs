//! Form payloads and their parsing rules.

use api::AppError;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Goal fields arrive as raw strings; parsing is deliberately lenient (see
/// [`parse_optional_f64`]) except for the date, whose failure is reported.
#[derive(Deserialize)]
pub struct SettingsForm {
    pub height_cm: Option<String>,
    pub start_weight: Option<String>,
    pub target_weight: Option<String>,
    pub goal_start: Option<String>,
}

#[derive(Deserialize)]
pub struct WeightForm {
    pub day: String,
    pub kg: String,
}

/// Lenient float coercion for the settings form: empty or unparseable
/// input clears the field rather than failing the whole submission.
pub fn parse_optional_f64(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strict `YYYY-MM-DD` parse for the add/edit forms.
pub fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput(format!("not a valid date: {raw}")))
}

/// Strict weight parse for the add/edit forms; rejects NaN and infinities,
/// which `f64::from_str` would otherwise accept.
pub fn parse_kg(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::InvalidInput(format!("not a valid number: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_float_clears_on_garbage() {
        assert_eq!(parse_optional_f64(Some("180")), Some(180.0));
        assert_eq!(parse_optional_f64(Some(" 72.5 ")), Some(72.5));
        assert_eq!(parse_optional_f64(Some("")), None);
        assert_eq!(parse_optional_f64(Some("tall")), None);
        assert_eq!(parse_optional_f64(Some("inf")), None);
        assert_eq!(parse_optional_f64(None), None);
    }

    #[test]
    fn day_parses_iso_dates_only() {
        assert!(parse_day("2024-01-08").is_ok());
        assert!(parse_day("08.01.2024").is_err());
        assert!(parse_day("2024-13-01").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn kg_rejects_non_numbers_and_non_finite_values() {
        assert_eq!(parse_kg("76.4").unwrap(), 76.4);
        assert!(parse_kg("heavy").is_err());
        assert!(parse_kg("NaN").is_err());
        assert!(parse_kg("inf").is_err());
        assert!(parse_kg("").is_err());
    }
}

//! Wire types for the prediction API.
//!
//! Numeric fields are coerced the way a lenient form handler would: JSON
//! integers pass through, floats are truncated toward zero, numeric strings
//! are parsed and booleans become 0/1. Anything else is a malformed request.

use super::dataset::{DeviceProfile, Recommendation};
use crate::error::{AdvisorError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Device age used when the request omits `edad_dispositivo`; fails validation.
const MISSING_DEVICE_AGE: i64 = -1;

fn missing_device_age() -> i64 {
    MISSING_DEVICE_AGE
}

fn default_battery_state() -> i64 {
    DeviceProfile::DEFAULT_BATTERY_STATE
}

fn default_performance() -> i64 {
    DeviceProfile::DEFAULT_PERFORMANCE
}

fn default_repair_frequency() -> i64 {
    DeviceProfile::DEFAULT_REPAIR_FREQUENCY
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Device age in years
    #[serde(
        rename = "edad_dispositivo",
        default = "missing_device_age",
        deserialize_with = "coerce_int"
    )]
    pub device_age: i64,
    /// Battery health percentage
    #[serde(
        rename = "estado_bateria",
        default = "default_battery_state",
        deserialize_with = "coerce_int"
    )]
    pub battery_state: i64,
    /// Performance percentage
    #[serde(
        rename = "rendimiento",
        default = "default_performance",
        deserialize_with = "coerce_int"
    )]
    pub performance: i64,
    /// Repair count
    #[serde(
        rename = "frecuencia_reparacion",
        default = "default_repair_frequency",
        deserialize_with = "coerce_int"
    )]
    pub repair_frequency: i64,
}

impl PredictRequest {
    /// Decodes a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::MalformedRequest`] if the body is not a JSON
    /// object or a field cannot be coerced to an integer.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Validates the request and turns it into a profile.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidDeviceAge`] if the age is negative or
    /// was not supplied.
    pub fn into_profile(self) -> Result<DeviceProfile> {
        if self.device_age < 0 {
            return Err(AdvisorError::InvalidDeviceAge(self.device_age));
        }
        Ok(DeviceProfile {
            device_age: self.device_age,
            battery_state: self.battery_state,
            performance: self.performance,
            repair_frequency: self.repair_frequency,
        })
    }
}

impl From<DeviceProfile> for PredictRequest {
    fn from(profile: DeviceProfile) -> Self {
        Self {
            device_age: profile.device_age,
            battery_state: profile.battery_state,
            performance: profile.performance,
            repair_frequency: profile.repair_frequency,
        }
    }
}

/// Successful prediction body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted label
    #[serde(rename = "recomendacion")]
    pub recommendation: Recommendation,
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

impl ErrorResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

fn coerce_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_value(&value).map_err(de::Error::custom)
}

fn coerce_value(value: &Value) -> std::result::Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.trunc().abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                _ => Err(format!("integer out of range: {n}")),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("invalid integer literal: {s:?}")),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Null => Err("expected an integer, found null".to_string()),
        Value::Array(_) => Err("expected an integer, found an array".to_string()),
        Value::Object(_) => Err("expected an integer, found an object".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<PredictRequest> {
        PredictRequest::from_json(body.as_bytes())
    }

    #[test]
    fn test_full_request() {
        let req = parse(
            r#"{"edad_dispositivo": 1, "estado_bateria": 80, "rendimiento": 90, "frecuencia_reparacion": 0}"#,
        )
        .expect("valid body");
        assert_eq!(
            req.into_profile().expect("valid age"),
            DeviceProfile {
                device_age: 1,
                battery_state: 80,
                performance: 90,
                repair_frequency: 0,
            }
        );
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let req = parse(r#"{"edad_dispositivo": 2}"#).expect("valid body");
        assert_eq!(
            req.into_profile().expect("valid age"),
            DeviceProfile::with_age(2)
        );
    }

    #[test]
    fn test_missing_age_is_invalid() {
        let req = parse("{}").expect("empty object parses");
        assert!(matches!(
            req.into_profile(),
            Err(AdvisorError::InvalidDeviceAge(-1))
        ));
    }

    #[test]
    fn test_negative_age_is_invalid() {
        let req = parse(r#"{"edad_dispositivo": -4}"#).expect("valid body");
        let err = req.into_profile().expect_err("negative age");
        assert_eq!(err.to_string(), "Edad del dispositivo no válida.");
    }

    #[test]
    fn test_field_coercion_precedes_age_check() {
        let err = parse(r#"{"edad_dispositivo": -4, "estado_bateria": "nope"}"#)
            .expect_err("uncoercible battery");
        assert!(matches!(err, AdvisorError::MalformedRequest(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_coercion_rules() {
        let req = parse(
            r#"{"edad_dispositivo": "3", "estado_bateria": 55.9, "rendimiento": " 61 ", "frecuencia_reparacion": true}"#,
        )
        .expect("coercible body");
        assert_eq!(req.device_age, 3);
        assert_eq!(req.battery_state, 55);
        assert_eq!(req.performance, 61);
        assert_eq!(req.repair_frequency, 1);
    }

    #[test]
    fn test_negative_float_truncates_toward_zero() {
        let req = parse(r#"{"edad_dispositivo": -0.5}"#).expect("coercible body");
        assert_eq!(req.device_age, 0);
        assert!(req.into_profile().is_ok());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let req = parse(r#"{"edad_dispositivo": 1, "marca": "x"}"#).expect("valid body");
        assert_eq!(req.device_age, 1);
    }

    #[test]
    fn test_malformed_bodies() {
        for body in [
            "",
            "{not json",
            "[1, 2]",
            "42",
            r#"{"edad_dispositivo": null}"#,
            r#"{"edad_dispositivo": "tres"}"#,
            r#"{"edad_dispositivo": [1]}"#,
            r#"{"edad_dispositivo": 1, "rendimiento": {}}"#,
            r#"{"edad_dispositivo": 1e300}"#,
        ] {
            match parse(body) {
                Err(AdvisorError::MalformedRequest(msg)) => assert!(!msg.is_empty(), "{body}"),
                other => panic!("expected malformed request for {body:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_response_wire_format() {
        let body = serde_json::to_value(PredictResponse {
            recommendation: Recommendation::Keep,
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({"recomendacion": "mantener"}));

        let err = serde_json::to_value(ErrorResponse::new("boom")).expect("serialize");
        assert_eq!(err, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn test_request_from_profile() {
        let req = PredictRequest::from(DeviceProfile::with_age(4));
        assert_eq!(req.into_profile().expect("valid"), DeviceProfile::with_age(4));
    }
}

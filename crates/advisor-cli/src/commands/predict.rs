//! Predict command implementation
//!
//! One-shot recommendation from the command line, using the same trained
//! model and validation as `POST /predict`.

use crate::error::Result;
use crate::output;
use device_advisor::advisor::{DeviceAdvisor, PredictRequest, PredictResponse, TrainerConfig};

/// Run the predict command
pub(crate) fn run(request: PredictRequest, trainer: &TrainerConfig, json: bool) -> Result<()> {
    let advisor = DeviceAdvisor::train(trainer)?;
    let recommendation = advisor.predict(request)?;

    if json {
        let body = serde_json::to_string(&PredictResponse { recommendation })
            .map_err(std::io::Error::from)?;
        println!("{body}");
        return Ok(());
    }

    output::section("Device");
    output::kv("edad_dispositivo", request.device_age);
    output::kv("estado_bateria", request.battery_state);
    output::kv("rendimiento", request.performance);
    output::kv("frecuencia_reparacion", request.repair_frequency);

    output::section("Recommendation");
    output::kv("recomendacion", output::label(recommendation));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use device_advisor::advisor::DeviceProfile;

    #[test]
    fn test_run_training_row() {
        let request = PredictRequest {
            device_age: 1,
            battery_state: 80,
            performance: 90,
            repair_frequency: 0,
        };
        assert!(run(request, &TrainerConfig::default(), true).is_ok());
    }

    #[test]
    fn test_run_negative_age() {
        let request = PredictRequest::from(DeviceProfile::with_age(-3));
        let err = run(request, &TrainerConfig::default(), false).expect_err("negative age");
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert_eq!(err.status(), 2);
    }
}

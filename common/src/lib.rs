pub mod allocation;
pub mod estimator;
pub mod forecast;
pub mod narrative;
pub mod projection;
pub mod skill;
pub mod stats;

use std::fmt::Display;
use log::error;
use serde::{Deserialize, Serialize};

pub use forecast::{compute_skill_projection, SkillProjection};
pub use stats::PlayerStats;

/// Tolerance for the recommended hours summing to the weekly practice budget.
pub const FLOAT_EPSILON: f64 = 0.01;

pub const ENGINE_VERSION: &str = "0.1.0";

#[derive(Serialize, Deserialize)]
pub struct EngineVersionInfo {
    pub version: String,
}

#[derive(Serialize, Deserialize)]
pub struct APIPredictedRate {
    pub predicted_fargo_rate_lr: f64,
}

#[derive(Serialize, Deserialize)]
pub struct APIResponse<T: Serialize> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> APIResponse<T> {
    pub fn new(code: i32, message: String, data: Option<T>) -> Self {
        APIResponse {
            code,
            message,
            data,
        }
    }

    pub fn ok(data: T) -> Self {
        APIResponse {
            code: 200,
            message: "Rack 'em up!".to_string(),
            data: Some(data),
        }
    }

    pub fn from_result<E: Display>(data: Result<T, E>, error_log_info: impl Display) -> Self {
        match data {
            Ok(x) => APIResponse::ok(x),
            Err(e) => {
                error!("{}: {}", error_log_info, e);
                APIResponse::internal_error(&e.to_string())
            }
        }
    }

    pub fn bad_request(message: &str) -> Self {
        APIResponse {
            code: 400,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        APIResponse {
            code: 500,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_result_maps_error_to_internal_error() {
        let response: APIResponse<f64> = APIResponse::from_result(Err::<f64, _>("model exploded"), "cannot predict");
        assert_eq!(response.code, 500);
        assert_eq!(response.message, "model exploded");
        assert!(response.data.is_none());

        let response = APIResponse::from_result(Ok::<_, String>(1.5), "cannot predict");
        assert!(response.is_ok());
        assert_eq!(response.data, Some(1.5));
    }
}

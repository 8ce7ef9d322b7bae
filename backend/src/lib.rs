pub mod rate;
pub mod skill;

use std::path::PathBuf;
use actix_web::http::StatusCode;
use actix_web::middleware::DefaultHeaders;
use actix_web::web::{self, Bytes, Json};
use actix_web::{get, HttpResponse};
use common::{APIResponse, EngineVersionInfo, ENGINE_VERSION};
use derive_more::{Display, Error};
use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_MODEL_PATH: &str = "fargo_model.json";

pub const BIND_ADDRESS_ENV: &str = "SKILL_FORECAST_BIND";
pub const MODEL_PATH_ENV: &str = "SKILL_FORECAST_MODEL_PATH";
pub const WORKERS_ENV: &str = "SKILL_FORECAST_WORKERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub model_path: PathBuf,
    pub workers: Option<usize>,
}

impl ServerConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let workers = lookup(WORKERS_ENV).and_then(|value| match value.trim().parse::<usize>() {
            Ok(workers) if workers > 0 => Some(workers),
            _ => {
                warn!("ignoring invalid {}: {}", WORKERS_ENV, value);
                None
            }
        });

        ServerConfig {
            bind_address: lookup(BIND_ADDRESS_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            model_path: lookup(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            workers,
        }
    }
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    #[display("Invalid or missing JSON data in request body")]
    InvalidBody,
    #[display("All inputs must be valid numbers")]
    NonNumericInput,
    #[display("Missing required feature: {feature}")]
    MissingFeature { feature: &'static str },
    #[display("Invalid data type for one or more features. Ensure all are numeric.")]
    InvalidFeatureType,
}

/// Body must be a non-empty JSON object.
pub fn parse_json_object(body: &Bytes) -> Result<Map<String, Value>, RequestError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(payload)) if !payload.is_empty() => Ok(payload),
        Ok(_) => Err(RequestError::InvalidBody),
        Err(e) => {
            warn!("cannot parse payload body as json: {}", e);
            Err(RequestError::InvalidBody)
        }
    }
}

/// Sends the envelope with the HTTP status matching its code.
pub fn api_respond<T: Serialize>(response: APIResponse<T>) -> HttpResponse {
    let status = u16::try_from(response.code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    HttpResponse::build(status).json(response)
}

pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}

pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[get("/heartbeat")]
pub async fn echo_heartbeat() -> Json<APIResponse<()>> {
    Json(APIResponse::ok(()))
}

#[get("/version")]
pub async fn get_version() -> Json<APIResponse<EngineVersionInfo>> {
    Json(APIResponse::ok(EngineVersionInfo {
        version: ENGINE_VERSION.to_string(),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(echo_heartbeat);
    cfg.service(get_version);

    skill::scoped_config(cfg);
    rate::scoped_config(cfg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.workers, None);
    }

    #[test]
    fn server_config_from_lookup() {
        let env = HashMap::from([
            (BIND_ADDRESS_ENV, "127.0.0.1:8081"),
            (MODEL_PATH_ENV, "/srv/models/fargo.json"),
            (WORKERS_ENV, "4"),
        ]);
        let config = ServerConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.bind_address, "127.0.0.1:8081");
        assert_eq!(config.model_path, PathBuf::from("/srv/models/fargo.json"));
        assert_eq!(config.workers, Some(4));

        let config = ServerConfig::from_lookup(|key| (key == WORKERS_ENV).then(|| "zero".to_string()));
        assert_eq!(config.workers, None);
    }

    #[test]
    fn json_object_body() {
        assert!(parse_json_object(&Bytes::from_static(br#"{"bu_total": 10}"#)).is_ok());
        assert_eq!(parse_json_object(&Bytes::new()), Err(RequestError::InvalidBody));
        assert_eq!(parse_json_object(&Bytes::from_static(b"{}")), Err(RequestError::InvalidBody));
        assert_eq!(parse_json_object(&Bytes::from_static(b"[1, 2]")), Err(RequestError::InvalidBody));
        assert_eq!(parse_json_object(&Bytes::from_static(b"fargo")), Err(RequestError::InvalidBody));
    }

    #[test]
    fn request_error_messages() {
        assert_eq!(
            RequestError::MissingFeature { feature: "bu_drill_3" }.to_string(),
            "Missing required feature: bu_drill_3"
        );
        assert_eq!(RequestError::NonNumericInput.to_string(), "All inputs must be valid numbers");
    }
}

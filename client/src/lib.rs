use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::path::{Path, PathBuf};
use clio::Input;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use common::estimator::{RateFeatures, RateModel};
use common::{compute_skill_projection, PlayerStats};
use crate::api::{APIResult, SkillForecastClient};
use crate::drills::DrillSheet;
use crate::forecast::print_skill_projection;

pub mod api;
pub mod drills;
pub mod formatter;
pub mod forecast;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
    pub api_endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "http://localhost:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientError {
    InputError(String),
    ParseError(String),
    NetworkError(String),
    APIError(String),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::InputError(msg) => write!(f, "Input error: {}", msg),
            ClientError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ClientError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ClientError::APIError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl<T: DeserializeOwned> From<APIResult<T>> for Result<T, ClientError> {
    fn from(value: APIResult<T>) -> Self {
        match value {
            APIResult::Success(x) => Ok(x),
            APIResult::APIError(code, message) => Err(ClientError::APIError(format!("{}: {}", code, message))),
            APIResult::NetworkError(e) => Err(ClientError::NetworkError(e.to_string())),
        }
    }
}

impl Error for ClientError {}

pub fn parse_json_input<T: DeserializeOwned>(content: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(content).map_err(|e| ClientError::ParseError(format!("cannot parse input as json: {}", e)))
}

fn read_json_input<T: DeserializeOwned>(mut input: Input) -> Result<T, ClientError> {
    let mut content = Vec::new();
    input
        .read_to_end(&mut content)
        .map_err(|e| ClientError::InputError(format!("cannot read input: {}", e)))?;

    parse_json_input(&content)
}

pub fn cli_heartbeat(client_config: ClientConfig) -> Result<(), ClientError> {
    let mut client = SkillForecastClient::new(client_config.api_endpoint.clone());

    Result::from(client.heartbeat())?;
    let version = Result::from(client.version())?;

    println!("{} is up, engine version {}", client_config.api_endpoint, version.version);

    Ok(())
}

fn predict_rate_locally(model_path: &Path, features: &RateFeatures) -> Result<f64, ClientError> {
    let model = RateModel::load(model_path)
        .map_err(|e| ClientError::InputError(format!("{}: {}", model_path.display(), e)))?;

    model
        .predict(&features.to_vec())
        .map_err(|e| ClientError::ParseError(e.to_string()))
}

fn predict_rate_remotely(client: &mut SkillForecastClient, features: &RateFeatures) -> Result<f64, ClientError> {
    let predicted = Result::from(client.predict_fargo_rate(features))?;

    Ok(predicted.predicted_fargo_rate_lr)
}

/// With `drills`, the input is a `DrillSheet`; a missing rating is predicted from `model_path`
/// when `local`, or by the server otherwise.
pub fn cli_skill(client_config: ClientConfig, input: Input, local: bool, drills: bool, model_path: PathBuf) -> Result<(), ClientError> {
    let mut client = SkillForecastClient::new(client_config.api_endpoint);

    let stats: PlayerStats = if !drills {
        read_json_input(input)?
    } else {
        let sheet: DrillSheet = read_json_input(input)?;
        if local {
            sheet.into_player_stats(|features| predict_rate_locally(&model_path, features))?
        } else {
            sheet.into_player_stats(|features| predict_rate_remotely(&mut client, features))?
        }
    };

    let projection = if local {
        compute_skill_projection(&stats)
    } else {
        Result::from(client.calculate_skill(&stats))?
    };

    print_skill_projection(&projection);

    Ok(())
}

pub fn cli_predict_fargo(client_config: ClientConfig, input: Input) -> Result<(), ClientError> {
    let features: RateFeatures = read_json_input(input)?;

    let mut client = SkillForecastClient::new(client_config.api_endpoint);
    let predicted = Result::from(client.predict_fargo_rate(&features))?;

    println!("Predicted FargoRate: {:.1}", predicted.predicted_fargo_rate_lr);

    Ok(())
}

pub fn cli_update_config(mut client_config: ClientConfig, config_path: Option<PathBuf>, api_endpoint: Option<String>) -> Result<(), ClientError> {
    if let Some(api_endpoint) = api_endpoint {
        client_config.api_endpoint = api_endpoint;
    }

    if let Some(config_path) = config_path {
        confy::store_path(config_path, client_config).map_err(|e| ClientError::InputError(e.to_string()))?;
    } else {
        confy::store(APP_NAME, None, client_config).map_err(|e| ClientError::InputError(e.to_string()))?;
    }

    Ok(())
}

pub fn cli_print_config(client_config: ClientConfig) -> Result<(), ClientError> {
    println!("API endpoint: {}", client_config.api_endpoint);

    Ok(())
}

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use common::estimator::RateFeatures;
use common::{APIPredictedRate, APIResponse, EngineVersionInfo, PlayerStats, SkillProjection};

pub enum API {
    CalculateSkill,
    PredictFargoRate,
    Heartbeat,
    Version,
}

impl API {
    pub fn get_url(&self, api_endpoint: &str) -> String {
        let api_endpoint = api_endpoint.trim_end_matches('/');
        match self {
            API::CalculateSkill => format!("{}/calculate_skill", api_endpoint),
            API::PredictFargoRate => format!("{}/predict_fargo_lr", api_endpoint),
            API::Heartbeat => format!("{}/heartbeat", api_endpoint),
            API::Version => format!("{}/version", api_endpoint),
        }
    }
}

pub enum APIResult<T: DeserializeOwned> {
    Success(T),
    APIError(i32, String),
    NetworkError(Box<dyn Error>),
}

impl<T: DeserializeOwned> APIResult<T> {
    pub fn from_body(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<APIResponse<Value>>(bytes) {
            Ok(api_response) => {
                if api_response.code != 200 {
                    return APIResult::APIError(api_response.code, api_response.message);
                }

                // unit payloads arrive as null
                match serde_json::from_value(api_response.data.unwrap_or(Value::Null)) {
                    Ok(data) => APIResult::Success(data),
                    Err(decode_error) => APIResult::NetworkError(Box::new(decode_error)),
                }
            }
            Err(decode_error) => APIResult::NetworkError(Box::new(decode_error)),
        }
    }
}

impl<T> From<reqwest::Result<reqwest::blocking::Response>> for APIResult<T>
where
    T: DeserializeOwned,
{
    fn from(response: reqwest::Result<reqwest::blocking::Response>) -> Self {
        match response {
            Ok(response) => match response.bytes() {
                Ok(bytes) => APIResult::from_body(&bytes[..]),
                Err(ne) => APIResult::NetworkError(Box::new(ne)),
            },
            Err(ne) => APIResult::NetworkError(Box::new(ne)),
        }
    }
}

pub struct SkillForecastClient {
    client: Client,
    api_endpoint: String,
}

impl SkillForecastClient {
    pub fn new(api_endpoint: String) -> SkillForecastClient {
        SkillForecastClient {
            client: Client::new(),
            api_endpoint,
        }
    }

    fn get_url_for_api(&self, api: API) -> String {
        api.get_url(&self.api_endpoint)
    }

    fn get<Return>(&mut self, api: API) -> APIResult<Return>
    where
        Return: DeserializeOwned,
    {
        self.client.get(self.get_url_for_api(api)).send().into()
    }

    fn post<Data, Return>(&mut self, api: API, data: &Data) -> APIResult<Return>
    where
        Data: Serialize,
        Return: DeserializeOwned,
    {
        self.client
            .post(self.get_url_for_api(api))
            .json(data)
            .send()
            .into()
    }

    pub fn heartbeat(&mut self) -> APIResult<()> {
        self.get(API::Heartbeat)
    }

    pub fn version(&mut self) -> APIResult<EngineVersionInfo> {
        self.get(API::Version)
    }

    pub fn calculate_skill(&mut self, stats: &PlayerStats) -> APIResult<SkillProjection> {
        self.post(API::CalculateSkill, stats)
    }

    pub fn predict_fargo_rate(&mut self, features: &RateFeatures) -> APIResult<APIPredictedRate> {
        self.post(API::PredictFargoRate, features)
    }
}

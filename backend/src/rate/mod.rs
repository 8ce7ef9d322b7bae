use actix_web::web::{self, Bytes, Data};
use actix_web::{options, post, HttpResponse};
use common::estimator::{is_integral_feature, RateModel, RATE_FEATURE_COUNT, RATE_FEATURE_INDEX, RATE_FEATURE_NAMES};
use common::{APIPredictedRate, APIResponse};
use log::{debug, warn};
use serde_json::{Map, Value};
use crate::{api_respond, parse_json_object, preflight, RequestError};

pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

fn integral_feature_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(|x| x as f64)
            .or_else(|| number.as_f64().map(f64::trunc)),
        Value::String(text) => text.trim().parse::<i64>().ok().map(|x| x as f64),
        _ => None,
    }
}

fn real_feature_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

/// Collects the model features in order. Numeric strings are accepted, `mental_drills` is
/// truncated to an integer.
pub fn extract_rate_features(payload: &Map<String, Value>) -> Result<Vec<f64>, RequestError> {
    for unknown in payload.keys().filter(|key| !RATE_FEATURE_INDEX.contains_key(key.as_str())) {
        debug!("ignoring unknown rate feature: {}", unknown);
    }

    let mut features = Vec::with_capacity(RATE_FEATURE_COUNT);

    for feature in RATE_FEATURE_NAMES {
        let value = match payload.get(feature) {
            None | Some(Value::Null) => return Err(RequestError::MissingFeature { feature }),
            Some(value) => value,
        };

        let parsed = if is_integral_feature(feature) {
            integral_feature_value(value)
        } else {
            real_feature_value(value)
        };

        features.push(parsed.ok_or(RequestError::InvalidFeatureType)?);
    }

    Ok(features)
}

#[post("/predict_fargo_lr")]
async fn predict_fargo_lr(rate_model: Data<RateModel>, body: Bytes) -> HttpResponse {
    let features = match parse_json_object(&body).and_then(|payload| extract_rate_features(&payload)) {
        Ok(features) => features,
        Err(e) => {
            warn!("rejected rate prediction request: {}", e);
            return api_respond(APIResponse::<APIPredictedRate>::bad_request(&e.to_string()));
        }
    };

    let result = rate_model
        .predict(&features)
        .map(|predicted| APIPredictedRate {
            predicted_fargo_rate_lr: round_to_one_decimal(predicted),
        });

    api_respond(APIResponse::from_result(result, "cannot predict fargo rate"))
}

#[options("/predict_fargo_lr")]
async fn predict_fargo_lr_preflight() -> HttpResponse {
    preflight().await
}

pub fn scoped_config(cfg: &mut web::ServiceConfig) {
    cfg.service(predict_fargo_lr);
    cfg.service(predict_fargo_lr_preflight);
}

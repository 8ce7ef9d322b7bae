use actix_web::web::{self, Bytes};
use actix_web::{options, post, HttpResponse};
use common::{compute_skill_projection, APIResponse, PlayerStats, SkillProjection};
use log::{debug, warn};
use serde_json::Value;
use crate::{api_respond, parse_json_object, preflight, RequestError};

/// Extra keys are ignored, every engine input must be present and numeric.
pub fn parse_player_stats(body: &Bytes) -> Result<PlayerStats, RequestError> {
    let payload = parse_json_object(body)?;

    serde_json::from_value(Value::Object(payload)).map_err(|e| {
        debug!("cannot read player stats: {}", e);
        RequestError::NonNumericInput
    })
}

#[post("/calculate_skill")]
async fn calculate_skill(body: Bytes) -> HttpResponse {
    let stats = match parse_player_stats(&body) {
        Ok(stats) => stats,
        Err(e) => {
            warn!("rejected skill request: {}", e);
            return api_respond(APIResponse::<SkillProjection>::bad_request(&e.to_string()));
        }
    };

    let result = compute_skill_projection(&stats);

    debug!(
        "skill level {} -> {} with {}h/week",
        result.current_skill_level, result.projected_skill_level, stats.practice_hours_per_week
    );

    api_respond(APIResponse::ok(result))
}

#[options("/calculate_skill")]
async fn calculate_skill_preflight() -> HttpResponse {
    preflight().await
}

pub fn scoped_config(cfg: &mut web::ServiceConfig) {
    cfg.service(calculate_skill);
    cfg.service(calculate_skill_preflight);
}

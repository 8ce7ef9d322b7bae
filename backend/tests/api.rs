use actix_web::http::{Method, StatusCode};
use actix_web::web::Data;
use actix_web::{test, App};
use common::estimator::{RateModel, RATE_FEATURE_COUNT, RATE_FEATURE_INDEX, RATE_FEATURE_NAMES};
use common::{APIPredictedRate, APIResponse, EngineVersionInfo, SkillProjection, ENGINE_VERSION};
use serde_json::{json, Map, Value};
use skill_forecast_backend::{configure, cors_headers};

fn rate_model() -> RateModel {
    let mut coefficients = vec![0.0; RATE_FEATURE_COUNT];
    coefficients[RATE_FEATURE_INDEX["bu_total"]] = 5.0;
    coefficients[RATE_FEATURE_INDEX["years_of_experience_playing"]] = 3.0;
    RateModel::new(coefficients, 150.0).unwrap()
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .wrap(cors_headers())
                .app_data(Data::new(rate_model()))
                .configure(configure),
        )
        .await
    };
}

fn reference_player() -> Value {
    json!({
        "fargorate": 500,
        "bu_total": 50,
        "win_percentage": 0.5,
        "years_of_experience": 5,
        "bu_drill_2": 10,
        "bu_drill_6": 5,
        "bu_drill_7": 10,
        "bu_drill_8": 10,
        "practice_hours_per_week": 10
    })
}

fn rate_payload() -> Map<String, Value> {
    let mut payload: Map<String, Value> = RATE_FEATURE_NAMES
        .iter()
        .map(|name| (name.to_string(), json!(1)))
        .collect();
    payload.insert("bu_total".to_string(), json!(60));
    payload.insert("years_of_experience_playing".to_string(), json!("8"));
    payload
}

#[actix_web::test]
async fn calculate_skill_returns_projection() {
    let app = init_app!();

    let request = test::TestRequest::post()
        .uri("/calculate_skill")
        .set_json(reference_player())
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap().to_str().unwrap(),
        "*"
    );

    let body: APIResponse<SkillProjection> = test::read_body_json(response).await;
    assert_eq!(body.code, 200);

    let projection = body.data.unwrap();
    assert_eq!(projection.projected_skill_level, 7);
    assert_eq!(projection.projected_improvement, 2);
    assert_eq!(projection.recommended_hours.to_array(), [3.0, 2.5, 2.5, 2.0]);
}

#[actix_web::test]
async fn calculate_skill_rejects_bad_bodies() {
    let app = init_app!();

    let request = test::TestRequest::post()
        .uri("/calculate_skill")
        .set_payload("definitely not json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: APIResponse<SkillProjection> = test::read_body_json(response).await;
    assert_eq!(body.message, "Invalid or missing JSON data in request body");

    let request = test::TestRequest::post().uri("/calculate_skill").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut player = reference_player();
    player["bu_drill_6"] = json!("five");
    let request = test::TestRequest::post()
        .uri("/calculate_skill")
        .set_json(player)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: APIResponse<SkillProjection> = test::read_body_json(response).await;
    assert_eq!(body.code, 400);
    assert_eq!(body.message, "All inputs must be valid numbers");
    assert!(body.data.is_none());
}

#[actix_web::test]
async fn predict_fargo_rate() {
    let app = init_app!();

    let request = test::TestRequest::post()
        .uri("/predict_fargo_lr")
        .set_json(rate_payload())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    // 150 + 5 * 60 + 3 * 8
    let body: APIResponse<APIPredictedRate> = test::read_body_json(response).await;
    assert_eq!(body.data.unwrap().predicted_fargo_rate_lr, 474.0);
}

#[actix_web::test]
async fn predict_fargo_rate_reports_missing_feature() {
    let app = init_app!();

    let mut payload = rate_payload();
    payload.remove("table_difficulty_total");
    let request = test::TestRequest::post()
        .uri("/predict_fargo_lr")
        .set_json(payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: APIResponse<APIPredictedRate> = test::read_body_json(response).await;
    assert_eq!(body.message, "Missing required feature: table_difficulty_total");

    let mut payload = rate_payload();
    payload.insert("bu_drill_4".to_string(), json!({"score": 3}));
    let request = test::TestRequest::post()
        .uri("/predict_fargo_lr")
        .set_json(payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    let body: APIResponse<APIPredictedRate> = test::read_body_json(response).await;
    assert_eq!(body.code, 400);
    assert_eq!(
        body.message,
        "Invalid data type for one or more features. Ensure all are numeric."
    );
}

#[actix_web::test]
async fn preflight_carries_cors_headers() {
    let app = init_app!();

    for uri in ["/calculate_skill", "/predict_fargo_lr"] {
        let request = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri(uri)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get("access-control-allow-methods").unwrap().to_str().unwrap(), "POST, OPTIONS");
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap().to_str().unwrap(),
            "Content-Type, Authorization"
        );
    }
}

#[actix_web::test]
async fn heartbeat_and_version() {
    let app = init_app!();

    let request = test::TestRequest::get().uri("/heartbeat").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 200);
    assert!(body["data"].is_null());

    let request = test::TestRequest::get().uri("/version").to_request();
    let body: APIResponse<EngineVersionInfo> = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body.data.unwrap().version, ENGINE_VERSION);
}

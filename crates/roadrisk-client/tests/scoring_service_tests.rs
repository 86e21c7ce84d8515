//! Integration tests against an in-process fake scoring service
//!
//! Each test binds an axum app to an ephemeral loopback port and points a
//! real `PredictionClient` at it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use roadrisk_client::{
    BooleanEncoding, PredictionClient, PredictionError, RiskWorkflow, SubmissionState, WorkflowError,
    CONNECTIVITY_MESSAGE, MALFORMED_MESSAGE,
};
use roadrisk_domain::{FormField, FormInput, RiskTier};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// What the fake service does with every request
#[derive(Clone)]
enum Behavior {
    Respond(StatusCode, String),
    Stall(Duration),
}

#[derive(Clone)]
struct FakeService {
    behavior: Behavior,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn predict(State(service): State<FakeService>, Json(body): Json<Value>) -> Response {
    service.received.lock().unwrap().push(body);
    match service.behavior {
        Behavior::Respond(status, body) => {
            (status, [("content-type", "application/json")], body).into_response()
        }
        Behavior::Stall(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "accident_risk": 0.5 })).into_response()
        }
    }
}

/// Start a fake service and return its base URL and request log
async fn spawn_service(behavior: Behavior) -> (String, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let service = FakeService {
        behavior,
        received: received.clone(),
    };
    let app = Router::new().route("/predict", post(predict)).with_state(service);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn respond(status: StatusCode, body: Value) -> Behavior {
    Behavior::Respond(status, body.to_string())
}

/// rural / 2 lanes / 0.5 / 60 / night / foggy / no signs / public / evening / 1 accident
fn scenario_form() -> FormInput {
    let mut form = FormInput::new();
    form.set_field(FormField::RoadType, "rural");
    form.set_field(FormField::NumLanes, "2");
    form.set_field(FormField::Curvature, "0.5");
    form.set_field(FormField::SpeedLimit, "60");
    form.set_field(FormField::Lighting, "night");
    form.set_field(FormField::Weather, "foggy");
    form.set_field(FormField::RoadSignsPresent, "false");
    form.set_field(FormField::PublicRoad, "true");
    form.set_field(FormField::TimeOfDay, "evening");
    form.set_field(FormField::Holiday, "false");
    form.set_field(FormField::SchoolSeason, "false");
    form.set_field(FormField::NumReportedAccidents, "1");
    form
}

#[tokio::test]
async fn test_high_risk_assessment() {
    let (base_url, received) = spawn_service(respond(StatusCode::OK, json!({ "accident_risk": 0.82 }))).await;
    let client = PredictionClient::new(&base_url).unwrap();
    let mut workflow = RiskWorkflow::with_form(client, scenario_form());

    let assessment = workflow.submit().await.unwrap();

    assert_eq!(assessment.result.accident_risk(), 0.82);
    assert_eq!(assessment.tier, RiskTier::High);
    assert_eq!(workflow.state(), SubmissionState::Succeeded);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0],
        json!({
            "road_type": "rural",
            "num_lanes": 2,
            "curvature": 0.5,
            "speed_limit": 60,
            "lighting": "night",
            "weather": "foggy",
            "road_signs_present": false,
            "public_road": true,
            "time_of_day": "evening",
            "holiday": false,
            "school_season": false,
            "num_reported_accidents": 1
        })
    );
}

#[tokio::test]
async fn test_timeout_produces_no_result() {
    let (base_url, _received) = spawn_service(Behavior::Stall(Duration::from_secs(5))).await;
    let timeout = Duration::from_millis(200);
    let client = PredictionClient::new(&base_url).unwrap().with_timeout(timeout);
    let mut workflow = RiskWorkflow::with_form(client, scenario_form());

    let err = workflow.submit().await.unwrap_err();

    assert!(matches!(err, WorkflowError::Scoring(PredictionError::Timeout(t)) if t == timeout));
    assert!(workflow.assessment().is_none());
    assert_eq!(workflow.state(), SubmissionState::Failed);
    assert!(workflow.can_submit());
}

#[tokio::test]
async fn test_incomplete_form_sends_nothing() {
    let (base_url, received) = spawn_service(respond(StatusCode::OK, json!({ "accident_risk": 0.1 }))).await;
    let client = PredictionClient::new(&base_url).unwrap();
    let mut form = scenario_form();
    form.clear(FormField::RoadType);
    let mut workflow = RiskWorkflow::with_form(client, form);

    let err = workflow.submit().await.unwrap_err();

    assert!(matches!(err, WorkflowError::Incomplete { ref missing } if missing == &vec![FormField::RoadType]));
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(workflow.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_service_error_uses_body_message() {
    let (base_url, _received) = spawn_service(respond(
        StatusCode::BAD_REQUEST,
        json!({ "error": "Curvature must be between 0 and 1" }),
    ))
    .await;
    let client = PredictionClient::new(&base_url).unwrap();
    let mut workflow = RiskWorkflow::with_form(client, scenario_form());

    let err = workflow.submit().await.unwrap_err();

    match &err {
        WorkflowError::Scoring(PredictionError::Service { status, message }) => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Curvature must be between 0 and 1");
        }
        other => panic!("Expected Service failure, got {:?}", other),
    }
    assert_eq!(workflow.last_error(), Some("Curvature must be between 0 and 1"));
}

#[tokio::test]
async fn test_service_error_without_message() {
    let (base_url, _received) =
        spawn_service(Behavior::Respond(StatusCode::INTERNAL_SERVER_ERROR, String::new())).await;
    let client = PredictionClient::new(&base_url).unwrap();

    let request = roadrisk_domain::normalize(&scenario_form()).unwrap();
    let err = client.submit(&request).await.unwrap_err();

    assert_eq!(err, PredictionError::service(500, None));
    assert_eq!(err.to_string(), "Server error: 500");
}

#[tokio::test]
async fn test_malformed_success_bodies() {
    for body in [
        json!({ "risk": 0.4 }).to_string(),
        json!({ "accident_risk": "high" }).to_string(),
        json!({ "accident_risk": 2.5 }).to_string(),
        "not json".to_string(),
    ] {
        let (base_url, _received) = spawn_service(Behavior::Respond(StatusCode::OK, body.clone())).await;
        let client = PredictionClient::new(&base_url).unwrap();
        let request = roadrisk_domain::normalize(&scenario_form()).unwrap();

        let err = client.submit(&request).await.unwrap_err();
        assert!(
            matches!(err, PredictionError::MalformedResponse(_)),
            "body {body} gave {err:?}"
        );
        assert!(err.to_string().starts_with(MALFORMED_MESSAGE));
    }
}

#[tokio::test]
async fn test_unreachable_service() {
    // Reserve a port, then free it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PredictionClient::new(&format!("http://{}", addr)).unwrap();
    let mut workflow = RiskWorkflow::with_form(client, scenario_form());

    let err = workflow.submit().await.unwrap_err();

    assert!(matches!(err, WorkflowError::Scoring(PredictionError::Connectivity(_))));
    assert!(err.user_message().starts_with(CONNECTIVITY_MESSAGE));
}

#[tokio::test]
async fn test_integer_boolean_encoding() {
    let (base_url, received) = spawn_service(respond(StatusCode::OK, json!({ "accident_risk": 0.3 }))).await;
    let client = PredictionClient::new(&base_url)
        .unwrap()
        .with_boolean_encoding(BooleanEncoding::Integer);
    let mut workflow = RiskWorkflow::with_form(client, scenario_form());

    let assessment = workflow.submit().await.unwrap();
    assert_eq!(assessment.tier, RiskTier::Moderate);

    let received = received.lock().unwrap();
    assert_eq!(received[0]["road_signs_present"], json!(0));
    assert_eq!(received[0]["public_road"], json!(1));
    assert_eq!(received[0]["holiday"], json!(0));
    assert_eq!(received[0]["school_season"], json!(0));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let service = FakeService {
        behavior: respond(StatusCode::OK, json!({ "accident_risk": 0.05 })),
        received: received.clone(),
    };
    let app = Router::new()
        .nest("/api", Router::new().route("/predict", post(predict)))
        .with_state(service);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = PredictionClient::new(&format!("http://{}/api/", addr)).unwrap();
    let request = roadrisk_domain::normalize(&scenario_form()).unwrap();
    let result = client.submit(&request).await.unwrap();

    assert_eq!(result.tier(), RiskTier::Low);
    assert_eq!(received.lock().unwrap().len(), 1);
}

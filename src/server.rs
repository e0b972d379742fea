use axum::extract::State;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::assembler::now_timestamp;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::{
    ChemoFrequency, CmvStatus, Nurse, OptimizeRequest, OptimizeRequestInput, Patient,
    PregnancyStatus, Weights, YesNo,
};
use crate::pipeline::{self, Outcome};
use crate::validator;

pub fn build_router(config: Config) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/test", get(test_sample))
        .route("/optimize", post(optimize))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(config)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: String,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: "BMT Assignment Optimizer",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now_timestamp(),
    })
}

/// The canned roster/census used to exercise the pipeline without a
/// caller-supplied body, carried over verbatim from the original
/// sample dataset.
fn sample_request() -> OptimizeRequest {
    let nurse = |nurse_id: &str, name: &str, skill_level: u8, iv_cert: bool, phone: &str| Nurse {
        nurse_id: nurse_id.to_string(),
        name: name.to_string(),
        role: "RN".to_string(),
        skill_level,
        iv_cert: if iv_cert { YesNo::Yes } else { YesNo::No },
        max_patients: 4,
        pod_pref: None,
        pregnancy_status: PregnancyStatus::N,
        phone: phone.to_string(),
    };

    let patient = |patient_id: &str, initials: &str, base_acuity: u8, chemo_type: &str, last_nurse: &str| Patient {
        patient_id: patient_id.to_string(),
        initials: initials.to_string(),
        pod: None,
        base_acuity,
        new_admit: YesNo::No,
        chemo_type: chemo_type.to_string(),
        chemo_frequency: ChemoFrequency::Single,
        chemo_time: String::new(),
        central_line: "none".to_string(),
        iv_medications: String::new(),
        isolation: String::new(),
        cmv_status: CmvStatus::Unknown,
        last_nurse: last_nurse.to_string(),
    };

    OptimizeRequest {
        nurses: vec![
            nurse("N001", "Johnson, Sarah", 3, true, "+1234567890"),
            nurse("N002", "Martinez, Lisa", 2, true, "+1234567891"),
            nurse("N003", "Chen, Michael", 3, true, "+1234567892"),
            nurse("N004", "Brown, James", 2, false, "+1234567893"),
        ],
        patients: vec![
            patient("301A", "J.D.", 8, "IV", "N001"),
            patient("302A", "M.K.", 5, "oral", "N001"),
            patient("303A", "R.L.", 3, "none", "N004"),
            patient("304A", "S.B.", 6, "IV", "N002"),
            patient("305B", "T.M.", 9, "IV", "N003"),
            patient("306B", "K.W.", 4, "oral", "N002"),
        ],
        config: Weights::default(),
    }
}

async fn test_sample(State(config): State<Config>) -> impl IntoResponse {
    run_pipeline(sample_request(), config)
}

async fn optimize(
    State(config): State<Config>,
    body: Result<Json<OptimizeRequestInput>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // Only a non-JSON body or a missing top-level `nurses`/`patients` key
    // fails extraction itself; a missing per-nurse/per-patient required
    // field deserializes fine and is caught below as a validation error.
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return ApiError::MalformedRequest(rejection.to_string()).into_response();
        }
    };

    let (nurses, patients) = match validator::validate_presence(&input.nurses, &input.patients) {
        Ok(built) => built,
        Err(details) => return ApiError::Validation(details).into_response(),
    };

    let request = OptimizeRequest {
        nurses,
        patients,
        config: input.config,
    };
    run_pipeline(request, config)
}

fn run_pipeline(request: OptimizeRequest, config: Config) -> axum::response::Response {
    info!("running optimize pipeline");
    match pipeline::run(&request, config.solver_time_limit_secs) {
        Outcome::ValidationError(details) => ApiError::Validation(details).into_response(),
        Outcome::NoFeasibleSolution => ApiError::NoFeasibleSolution.into_response(),
        Outcome::Success(result) => Json(result).into_response(),
    }
}

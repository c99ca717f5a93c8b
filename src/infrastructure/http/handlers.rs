use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::application::verification::{
    ApproveVerification, CreateVerification, DeclineVerification, GetVerificationByUuid,
};

use super::dto::{
    CreateVerificationRequest, DeclineVerificationRequest, VerificationResponse,
    VerificationUuidResponse,
};
use super::error::ApiError;
use super::AppState;

/// Request bodies above 1 MiB are rejected
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Mount every route on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(MAX_BODY_BYTES)
            .error_handler(|err, _req| ApiError::MalformedBody(err.to_string()).into()),
    )
    .route("/verifications", web::post().to(create_verification))
    .route("/verifications/{uuid}", web::get().to(get_verification))
    .route("/verifications/{uuid}/approve", web::patch().to(approve_verification))
    .route("/verifications/{uuid}/decline", web::patch().to(decline_verification))
    .route("/health", web::get().to(health))
    .route("/metrics", web::get().to(metrics));
}

async fn create_verification(
    state: web::Data<AppState>,
    body: web::Json<CreateVerificationRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let uuid = Uuid::new_v4().to_string();
    let command = CreateVerification {
        uuid: uuid.clone(),
        description: request.description,
        kind: request.kind,
    };

    state.command_bus.dispatch(&state.context(), command.into()).await?;

    Ok(HttpResponse::Created().json(VerificationUuidResponse { uuid }))
}

async fn get_verification(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let query = GetVerificationByUuid { uuid: path.into_inner() };
    let verification = state.query_bus.ask(&state.context(), query.into()).await?;

    Ok(HttpResponse::Ok().json(VerificationResponse::from(&verification)))
}

async fn approve_verification(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let uuid = path.into_inner();
    let command = ApproveVerification { uuid: uuid.clone() };

    state.command_bus.dispatch(&state.context(), command.into()).await?;

    Ok(HttpResponse::Ok().json(VerificationUuidResponse { uuid }))
}

async fn decline_verification(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<DeclineVerificationRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let uuid = path.into_inner();
    let command = DeclineVerification {
        uuid: uuid.clone(),
        reason: request.decline_reason,
    };

    state.command_bus.dispatch(&state.context(), command.into()).await?;

    Ok(HttpResponse::Ok().json(VerificationUuidResponse { uuid }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "verification-service"
    }))
}

async fn metrics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let buffer = state.metrics.render()?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}

//! HTTP request handlers for the eligibility API.
//!
//! This module contains the handler functions for all API endpoints. Service
//! calls run on the blocking pool because catalog sources may read files.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::service::EligibilityService;

use super::request::{
    EligibilityRequest, ExplainRequest, NewApplicationRequest, OwnerQuery, ProgramsQuery,
    UpdateApplicationRequest,
};
use super::response::{ApiError, ApiErrorResponse, EligibilityResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/eligibility/check", post(check_handler))
        .route("/eligibility/explain", post(explain_handler))
        .route("/eligibility/programs", get(programs_handler))
        .route("/eligibility/history", get(history_handler))
        .route("/eligibility/statistics", get(statistics_handler))
        .route(
            "/eligibility/applications",
            get(list_applications_handler).post(create_application_handler),
        )
        .route(
            "/eligibility/applications/:id",
            get(get_application_handler)
                .patch(update_application_handler)
                .delete(delete_application_handler),
        )
        .with_state(state)
}

/// Runs `call` against the service on the blocking thread pool.
async fn call_service<T, F>(state: &AppState, call: F) -> EngineResult<T>
where
    F: FnOnce(&EligibilityService) -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    let service = state.shared_service();
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(std::io::Error::from)?
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn bad_request(error: ApiError) -> Response {
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

/// Converts a JSON body rejection into a 400 response.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    bad_request(error)
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    bad_request(ApiError::validation_error(body_text))
}

fn path_rejection_response(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Path parameter error"
    );
    bad_request(ApiError::validation_error(format!(
        "Invalid application id: {}",
        body_text
    )))
}

/// Handler for POST /eligibility/check.
///
/// Evaluates the profile, stores the check and returns it. A storage failure
/// is reported in `storage_error` alongside a 200 response.
async fn check_handler(
    State(state): State<AppState>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing eligibility check");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let owner_id = request.owner_id.clone();
    let result = call_service(&state, move |service| {
        service.check_eligibility(&request.owner_id, request.profile)
    })
    .await;

    match result {
        Ok(outcome) => {
            let storage_error = outcome.storage_error.as_ref().map(ApiError::from);
            info!(
                correlation_id = %correlation_id,
                owner_id = %owner_id,
                eligible = outcome.record.eligible_count(),
                stored = storage_error.is_none(),
                "Eligibility check completed"
            );
            json_response(
                StatusCode::OK,
                EligibilityResponse::new(outcome.record, storage_error),
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /eligibility/explain.
async fn explain_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing eligibility explanation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    match call_service(&state, move |service| service.explain(&request.profile)).await {
        Ok(assessments) => json_response(StatusCode::OK, assessments),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /eligibility/programs.
async fn programs_handler(
    State(state): State<AppState>,
    query: Result<Query<ProgramsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let category = query.category.clone();
    let result = call_service(&state, move |service| {
        service.list_programs(query.category.as_deref())
    })
    .await;

    match result {
        Ok(programs) => {
            info!(
                correlation_id = %correlation_id,
                category = category.as_deref().unwrap_or("all"),
                count = programs.len(),
                "Listed programs"
            );
            json_response(StatusCode::OK, programs)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /eligibility/history.
async fn history_handler(
    State(state): State<AppState>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    match call_service(&state, move |service| service.list_history(&query.owner_id)).await {
        Ok(records) => json_response(StatusCode::OK, records),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /eligibility/statistics.
async fn statistics_handler(State(state): State<AppState>) -> Response {
    match call_service(&state, |service| service.statistics()).await {
        Ok(stats) => json_response(StatusCode::OK, stats),
        Err(err) => engine_error_response(Uuid::new_v4(), err),
    }
}

/// Handler for GET /eligibility/applications.
async fn list_applications_handler(
    State(state): State<AppState>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    match call_service(&state, move |service| {
        service.list_applications(&query.owner_id)
    })
    .await
    {
        Ok(applications) => json_response(StatusCode::OK, applications),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /eligibility/applications.
///
/// Returns 201 with the stored application, 409 if the owner already tracks
/// the program.
async fn create_application_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    match call_service(&state, move |service| {
        service.create_application(request.into())
    })
    .await
    {
        Ok(application) => json_response(StatusCode::CREATED, application),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /eligibility/applications/:id.
async fn get_application_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    match call_service(&state, move |service| {
        service.get_application(&query.owner_id, id)
    })
    .await
    {
        Ok(application) => json_response(StatusCode::OK, application),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for PATCH /eligibility/applications/:id.
async fn update_application_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let (owner_id, update) = match payload {
        Ok(Json(req)) => req.into_parts(),
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    match call_service(&state, move |service| {
        service.update_application(&owner_id, id, update)
    })
    .await
    {
        Ok(application) => json_response(StatusCode::OK, application),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for DELETE /eligibility/applications/:id.
async fn delete_application_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    match call_service(&state, move |service| {
        service.delete_application(&query.owner_id, id)
    })
    .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

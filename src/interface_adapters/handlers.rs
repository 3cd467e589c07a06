use axum::{Json, extract::State, response::Response};

use crate::domain::entities::{NewUser, User};
use crate::domain::envelope::ServiceReply;
use crate::domain::errors::{OperationError, ServiceError};
use crate::domain::request::ServiceRequest;
use crate::interface_adapters::error_pipeline::{self, PipelineNext, ResponseSlot};
use crate::interface_adapters::protocol::HealthResponse;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{RequestHandler, async_handler};

// Handler for listing every known user.
#[tracing::instrument(name = "list_users", skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    request: ServiceRequest,
) -> ServiceReply<Vec<User>> {
    let handler = RequestHandler::new(
        state.validators.list_users.clone(),
        state.logger.clone(),
        &*state.service_name,
    );
    let service = state.user_service();

    handler
        .handle(request, |_| async move { service.list_users().await })
        .await
}

// Handler for fetching one user by path id.
#[tracing::instrument(name = "get_user", skip_all, fields(id = ?request.params.get("id")))]
pub async fn get_user(
    State(state): State<AppState>,
    request: ServiceRequest,
) -> ServiceReply<User> {
    let handler = RequestHandler::new(
        state.validators.get_user.clone(),
        state.logger.clone(),
        &*state.service_name,
    );
    let service = state.user_service();

    handler
        .handle(request, |request| async move {
            let user_id = parse_user_id(&request)?;
            service.get_user(user_id).await
        })
        .await
}

// Handler for registering a user from a JSON body.
#[tracing::instrument(name = "create_user", skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    request: ServiceRequest,
) -> ServiceReply<User> {
    let handler = RequestHandler::new(
        state.validators.create_user.clone(),
        state.logger.clone(),
        &*state.service_name,
    );
    let service = state.user_service();

    handler
        .handle(request, |request| async move {
            let user: NewUser =
                serde_json::from_value(request.body).map_err(OperationError::unexpected)?;
            service.create_user(user).await
        })
        .await
}

// Liveness probe, bound through the forwarding wrapper.
pub async fn health(State(state): State<AppState>, request: ServiceRequest) -> Response {
    error_pipeline::dispatch(async_handler(health_route), request, &state.logger).await
}

async fn health_route(
    _request: ServiceRequest,
    res: ResponseSlot,
    _next: PipelineNext,
) -> Result<(), OperationError> {
    res.send(Json(HealthResponse { status: "ok" }));
    Ok(())
}

fn parse_user_id(request: &ServiceRequest) -> Result<u64, OperationError> {
    request
        .params
        .get("id")
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .ok_or_else(|| {
            OperationError::from(ServiceError::new("Invalid user ID").with_code("INVALID_USER_ID"))
        })
}

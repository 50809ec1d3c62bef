use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use super::contract::{
    EndpointContract, HISTORY_HOUSE, HISTORY_LOAN, HISTORY_SUMMARY, INTERNAL_ERROR_MESSAGE,
    PREDICT_HOUSE, PREDICT_LOAN,
};
use super::domain::UserId;
use super::repository::PredictionRepository;
use super::service::{PredictionService, PredictionServiceError};
use super::validation::{HousePredictionRequest, LoanPredictionRequest, ValidationError};
use crate::auth::{authenticate_headers, SessionAuthenticator};
use crate::error::AppError;

/// Shared handler state: the service plus the session seam.
pub struct PredictionState<R> {
    pub service: Arc<PredictionService<R>>,
    pub authenticator: Arc<dyn SessionAuthenticator>,
}

impl<R> Clone for PredictionState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

impl<R> PredictionState<R> {
    fn authenticate(&self, headers: &HeaderMap) -> Option<UserId> {
        authenticate_headers(self.authenticator.as_ref(), headers)
    }
}

/// Router builder exposing the prediction and history endpoints.
pub fn prediction_router<R>(
    service: Arc<PredictionService<R>>,
    authenticator: Arc<dyn SessionAuthenticator>,
) -> Router
where
    R: PredictionRepository + 'static,
{
    Router::new()
        .route(
            PREDICT_HOUSE.path,
            on(method_filter(&PREDICT_HOUSE), predict_house_handler::<R>),
        )
        .route(
            PREDICT_LOAN.path,
            on(method_filter(&PREDICT_LOAN), predict_loan_handler::<R>),
        )
        .route(
            HISTORY_HOUSE.path,
            on(method_filter(&HISTORY_HOUSE), house_history_handler::<R>),
        )
        .route(
            HISTORY_LOAN.path,
            on(method_filter(&HISTORY_LOAN), loan_history_handler::<R>),
        )
        .route(
            HISTORY_SUMMARY.path,
            on(method_filter(&HISTORY_SUMMARY), summary_handler::<R>),
        )
        .with_state(PredictionState {
            service,
            authenticator,
        })
}

/// Prediction endpoints are either reads or submissions.
fn method_filter(endpoint: &EndpointContract) -> MethodFilter {
    if endpoint.method == Method::POST {
        MethodFilter::POST
    } else {
        MethodFilter::GET
    }
}

pub(crate) async fn predict_house_handler<R>(
    State(state): State<PredictionState<R>>,
    headers: HeaderMap,
    payload: Result<Json<HousePredictionRequest>, JsonRejection>,
) -> Response
where
    R: PredictionRepository + 'static,
{
    let Some(user) = state.authenticate(&headers) else {
        return unauthorized();
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return malformed_body(rejection),
    };

    match state.service.predict_house(&user, request) {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn predict_loan_handler<R>(
    State(state): State<PredictionState<R>>,
    headers: HeaderMap,
    payload: Result<Json<LoanPredictionRequest>, JsonRejection>,
) -> Response
where
    R: PredictionRepository + 'static,
{
    let Some(user) = state.authenticate(&headers) else {
        return unauthorized();
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return malformed_body(rejection),
    };

    match state.service.predict_loan(&user, request) {
        Ok(verdict) => (StatusCode::OK, Json(verdict)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn house_history_handler<R>(
    State(state): State<PredictionState<R>>,
    headers: HeaderMap,
) -> Response
where
    R: PredictionRepository + 'static,
{
    match state.authenticate(&headers) {
        Some(user) => respond(state.service.house_history(&user)),
        None => unauthorized(),
    }
}

pub(crate) async fn loan_history_handler<R>(
    State(state): State<PredictionState<R>>,
    headers: HeaderMap,
) -> Response
where
    R: PredictionRepository + 'static,
{
    match state.authenticate(&headers) {
        Some(user) => respond(state.service.loan_history(&user)),
        None => unauthorized(),
    }
}

pub(crate) async fn summary_handler<R>(
    State(state): State<PredictionState<R>>,
    headers: HeaderMap,
) -> Response
where
    R: PredictionRepository + 'static,
{
    match state.authenticate(&headers) {
        Some(user) => respond(state.service.summary(&user)),
        None => unauthorized(),
    }
}

fn respond<T: Serialize>(result: Result<T, PredictionServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => service_error(err),
    }
}

fn unauthorized() -> Response {
    StatusCode::UNAUTHORIZED.into_response()
}

fn malformed_body(rejection: JsonRejection) -> Response {
    let error = ValidationError::body(rejection.body_text());
    warn!(message = %error, "rejected malformed prediction body");
    AppError::from(error).into_response()
}

fn service_error(err: PredictionServiceError) -> Response {
    match err {
        PredictionServiceError::Validation(error) => {
            warn!(field = error.field.as_deref(), message = %error, "prediction input rejected");
            AppError::from(error).into_response()
        }
        PredictionServiceError::Repository(error) => {
            error!(error = %error, "prediction repository failure");
            let payload = json!({ "message": INTERNAL_ERROR_MESSAGE });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

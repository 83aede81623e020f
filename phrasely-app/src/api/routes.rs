use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use phrasely_core::{apply_rating, compute_previews, CoreError};

use crate::api::dto::{ApiError, ApplyOk, ApplyRequest, PreviewOk, PreviewRequest};

pub async fn schedule_preview(
    headers: HeaderMap,
    body: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    if let Some(resp) = require_auth(&headers) {
        return resp;
    }
    let request = match body {
        Ok(Json(r)) => r,
        Err(rejection) => return malformed(rejection.body_text()),
    };
    let (card, now, config) = match request.into_parts() {
        Ok(parts) => parts,
        Err(e) => return core_error(e),
    };
    match compute_previews(&card, now, &config) {
        Ok(previews) => (StatusCode::OK, Json(PreviewOk::new(previews))).into_response(),
        Err(e) => core_error(e),
    }
}

pub async fn schedule_apply(
    headers: HeaderMap,
    body: Result<Json<ApplyRequest>, JsonRejection>,
) -> Response {
    if let Some(resp) = require_auth(&headers) {
        return resp;
    }
    let request = match body {
        Ok(Json(r)) => r,
        Err(rejection) => return malformed(rejection.body_text()),
    };
    let (card, now, config, rating) = match request.into_parts() {
        Ok(parts) => parts,
        Err(e) => return core_error(e),
    };
    match apply_rating(&card, rating, now, &config) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApplyOk::new(outcome.updated_card, outcome.applied)),
        )
            .into_response(),
        Err(e) => core_error(e),
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

// Presence check only; credential content is validated upstream.
fn require_auth(headers: &HeaderMap) -> Option<Response> {
    if headers.contains_key(header::AUTHORIZATION) {
        None
    } else {
        Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiError::new("missing authorization header")),
            )
                .into_response(),
        )
    }
}

fn malformed(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(message))).into_response()
}

fn core_error(err: CoreError) -> Response {
    let status = match err {
        CoreError::InvalidDuration(_) | CoreError::InvalidRating(_) | CoreError::MissingField(_) => {
            StatusCode::BAD_REQUEST
        }
        CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError::new(err.to_string()))).into_response()
}

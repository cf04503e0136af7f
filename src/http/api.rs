//! JSON API handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    error::ApiError,
    extract::{AdminSession, PresentedToken},
    state::SharedState,
};
use crate::access::domain::{Role, Session, SessionToken};
use crate::issue::{
    domain::{Coordinates, Issue, IssueCategory, IssueId, IssueStatus},
    flows::CREATE_FAILED_NOTICE,
    services::{CreateIssueRequest, IssueStoreError},
};

/// Message returned when a status change cannot be persisted.
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update status";

// ── Request payload types ─────────────────────────────────────────────

/// Body of `POST /api/issues`. A status field, if sent, is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueBody {
    /// Issue title.
    pub title: String,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Location text.
    #[serde(default)]
    pub location: String,
    /// Category display name.
    pub category: String,
    /// Optional photo reference.
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Body of `PATCH /api/issues/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    /// Target status name.
    pub status: String,
}

/// Query of `GET /api/geocode/reverse`.
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Body of `POST /api/sessions`.
#[derive(Debug, Deserialize)]
pub struct SignInBody {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Password; only checked for the admin account.
    #[serde(default)]
    pub password: String,
}

// ── Response payload types ────────────────────────────────────────────

/// Envelope returned by write operations.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    /// Always `true`; failures use [`ApiError`].
    pub success: bool,
    /// The written record.
    pub data: T,
}

impl<T> ActionResponse<T> {
    const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Session details handed to API clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token.
    pub token: SessionToken,
    /// Granted role.
    pub role: Role,
    /// Signed-in email.
    pub email: String,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token().clone(),
            role: session.role(),
            email: session.email().to_owned(),
            expires_at: session.expires_at(),
        }
    }
}

/// Body of `GET /api/geocode/reverse`.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    /// Resolved address or formatted coordinates.
    pub location: String,
}

// ── Router ────────────────────────────────────────────────────────────

/// Routes under `/api` plus `/health`.
#[must_use]
pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/issues", get(list_issues).post(create_issue))
        .route("/api/issues/{id}", get(get_issue))
        .route("/api/issues/{id}/status", patch(update_status))
        .route("/api/categories", get(list_categories))
        .route("/api/geocode/reverse", get(reverse_geocode))
        .route("/api/sessions", post(sign_in).delete(sign_out))
        .route("/api/sessions/guest", post(continue_as_guest))
        .route("/health", get(health_check))
}

fn parse_issue_id(raw: &str) -> Result<IssueId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid issue id: {raw}")))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn list_issues(State(state): State<SharedState>) -> Json<Vec<Issue>> {
    Json(state.store.list().await)
}

async fn create_issue(
    State(state): State<SharedState>,
    payload: Result<Json<CreateIssueBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let mut request = CreateIssueRequest::new(body.title, body.category)
        .with_description(body.description)
        .with_location(body.location);
    if let Some(url) = body.photo_url {
        request = request.with_photo_url(url);
    }

    match state.store.create(request).await {
        Ok(issue) => Ok((StatusCode::CREATED, Json(ActionResponse::ok(issue)))),
        Err(err @ (IssueStoreError::Domain(_) | IssueStoreError::Category(_))) => {
            Err(ApiError::BadRequest(err.to_string()))
        }
        Err(IssueStoreError::Repository(_)) => {
            Err(ApiError::Internal(CREATE_FAILED_NOTICE.to_owned()))
        }
    }
}

async fn get_issue(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Issue>, ApiError> {
    let issue_id = parse_issue_id(&id)?;
    match state.store.get(issue_id).await {
        Ok(issue) => Ok(Json(issue)),
        Err(err) if err.is_not_found() => Err(ApiError::NotFound(err.to_string())),
        Err(err) => {
            tracing::error!(issue_id = %issue_id, error = %err, "failed to fetch issue");
            Err(ApiError::Internal("Failed to fetch issue".to_owned()))
        }
    }
}

async fn update_status(
    AdminSession(session): AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> Result<Json<ActionResponse<Issue>>, ApiError> {
    let issue_id = parse_issue_id(&id)?;
    let Json(body) = payload?;
    let status = IssueStatus::try_from(body.status.as_str())
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    tracing::debug!(
        issue_id = %issue_id,
        admin = session.email(),
        %status,
        "status change requested"
    );
    match state.store.update_status(issue_id, status).await {
        Ok(issue) => Ok(Json(ActionResponse::ok(issue))),
        Err(err) if err.is_not_found() => Err(ApiError::NotFound(err.to_string())),
        Err(_) => Err(ApiError::Internal(UPDATE_FAILED_MESSAGE.to_owned())),
    }
}

async fn list_categories() -> Json<Vec<&'static str>> {
    Json(IssueCategory::ALL.iter().map(|category| category.as_str()).collect())
}

async fn reverse_geocode(
    State(state): State<SharedState>,
    query: Result<Query<ReverseQuery>, QueryRejection>,
) -> Result<Json<LocationResponse>, ApiError> {
    let Query(query) = query?;
    let coordinates = Coordinates::new(query.lat, query.lng)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let location = state.locations.resolve(coordinates).await;
    Ok(Json(LocationResponse { location }))
}

async fn sign_in(
    State(state): State<SharedState>,
    payload: Result<Json<SignInBody>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(body) = payload?;
    let session = state.auth.sign_in(&body.email, &body.password).await?;
    Ok(Json(session.into()))
}

async fn continue_as_guest(
    State(state): State<SharedState>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.auth.continue_as_guest().await?;
    Ok(Json(session.into()))
}

async fn sign_out(
    State(state): State<SharedState>,
    PresentedToken(token): PresentedToken,
) -> Result<StatusCode, ApiError> {
    let presented =
        token.ok_or_else(|| ApiError::Unauthorized("authentication required".to_owned()))?;
    state.auth.sign_out(&presented).await?;
    Ok(StatusCode::NO_CONTENT)
}

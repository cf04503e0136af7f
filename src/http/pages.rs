//! Server-rendered HTML pages.
//!
//! The pages share services with the JSON API. Sessions travel in the
//! `civic_session` cookie; admin pages send anyone else back to `/`.

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    extract::{AdminPage, MaybeSession, PresentedToken, SESSION_COOKIE},
    state::SharedState,
};
use crate::access::{domain::Session, services::AccessError};
use crate::issue::{
    domain::{Coordinates, Issue, IssueCategory, IssueId, IssueStatus},
    flows::{
        AdminBoard, AdminFilter, CategoryFilter, ListingFilter, ListingPage, StatusFilter,
        SubmissionForm, SubmissionOutcome,
    },
};

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("report.html", include_str!("../../templates/report.html")),
    ("issues.html", include_str!("../../templates/issues.html")),
    ("admin.html", include_str!("../../templates/admin.html")),
];

/// Template compilation or rendering failure.
#[derive(Debug, Error)]
#[error("page template failure: {0}")]
pub struct PageError(#[from] minijinja::Error);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "failed to render page");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1>"),
        )
            .into_response()
    }
}

/// Compiled page templates.
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    /// Compiles the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when a template does not parse.
    pub fn new() -> Result<Self, PageError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when the template is unknown or rendering fails.
    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<Html<String>, PageError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}

#[derive(Debug, Serialize)]
struct SessionView<'a> {
    email: &'a str,
    admin: bool,
}

fn session_view(session: Option<&Session>) -> Option<SessionView<'_>> {
    session.map(|current| SessionView {
        email: current.email(),
        admin: current.role().is_admin(),
    })
}

fn category_names() -> Vec<&'static str> {
    IssueCategory::ALL.iter().map(|category| category.as_str()).collect()
}

fn status_names() -> Vec<&'static str> {
    IssueStatus::ALL.iter().map(|status| status.as_str()).collect()
}

fn session_cookie(session: &Session) -> String {
    let max_age = (session.expires_at() - session.issued_at())
        .num_seconds()
        .max(0);
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        session.token().as_str()
    )
}

fn cleared_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn redirect_with_cookie(to: &str, cookie: &str) -> Response {
    let mut response = Redirect::to(to).into_response();
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        Err(err) => tracing::error!(error = %err, "session cookie is not a valid header"),
    }
    response
}

/// Routes for the HTML pages.
#[must_use]
pub fn pages_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(sign_in_page))
        .route("/login", post(sign_in))
        .route("/guest", post(continue_as_guest))
        .route("/logout", post(sign_out))
        .route("/report", get(report_page).post(submit_report))
        .route("/issues", get(issues_page))
        .route("/admin", get(admin_page))
        .route("/admin/issues/{id}/status", post(admin_update_status))
}

// ── Sign-in ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct SignInForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn sign_in_page(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, PageError> {
    state.pages.render(
        "login.html",
        context! { session => session_view(session.as_ref()), email => "" },
    )
}

async fn sign_in(
    State(state): State<SharedState>,
    Form(form): Form<SignInForm>,
) -> Result<Response, PageError> {
    match state.auth.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            let landing = if session.role().is_admin() {
                "/admin"
            } else {
                "/report"
            };
            Ok(redirect_with_cookie(landing, &session_cookie(&session)))
        }
        Err(err) => {
            let (status, notice) = match &err {
                AccessError::EmptyEmail => (StatusCode::BAD_REQUEST, err.to_string()),
                AccessError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
                _ => {
                    tracing::error!(error = %err, "sign-in failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Sign-in is unavailable right now.".to_owned(),
                    )
                }
            };
            let page = state.pages.render(
                "login.html",
                context! { notice => notice, email => form.email },
            )?;
            Ok((status, page).into_response())
        }
    }
}

async fn continue_as_guest(State(state): State<SharedState>) -> Result<Response, PageError> {
    match state.auth.continue_as_guest().await {
        Ok(session) => Ok(redirect_with_cookie("/report", &session_cookie(&session))),
        Err(err) => {
            tracing::error!(error = %err, "guest sign-in failed");
            let page = state.pages.render(
                "login.html",
                context! { notice => "Sign-in is unavailable right now.", email => "" },
            )?;
            Ok((StatusCode::INTERNAL_SERVER_ERROR, page).into_response())
        }
    }
}

async fn sign_out(
    State(state): State<SharedState>,
    PresentedToken(token): PresentedToken,
) -> Response {
    if let Some(presented) = token
        && let Err(err) = state.auth.sign_out(&presented).await
    {
        tracing::warn!(error = %err, "failed to revoke session");
    }
    redirect_with_cookie("/", &cleared_cookie())
}

// ── Report ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Serialize)]
struct ReportForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    photo_url: String,
    #[serde(default)]
    lat: String,
    #[serde(default)]
    lng: String,
}

impl ReportForm {
    fn pin(&self) -> Result<Option<Coordinates>, &'static str> {
        let (lat, lng) = (self.lat.trim(), self.lng.trim());
        if lat.is_empty() && lng.is_empty() {
            return Ok(None);
        }
        let parsed = lat.parse::<f64>().ok().zip(lng.parse::<f64>().ok());
        parsed
            .and_then(|(latitude, longitude)| Coordinates::new(latitude, longitude).ok())
            .map(Some)
            .ok_or("Please pick a valid point on the map.")
    }

    fn to_submission(&self, pin: Option<Coordinates>) -> SubmissionForm {
        SubmissionForm {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            photo_url: Some(self.photo_url.clone()).filter(|url| !url.trim().is_empty()),
            pin,
        }
    }
}

fn render_report(
    state: &SharedState,
    session: Option<&Session>,
    form: &ReportForm,
    notice: Option<&str>,
) -> Result<Html<String>, PageError> {
    state.pages.render(
        "report.html",
        context! {
            session => session_view(session),
            form => form,
            categories => category_names(),
            notice => notice,
        },
    )
}

async fn report_page(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, PageError> {
    render_report(&state, session.as_ref(), &ReportForm::default(), None)
}

async fn submit_report(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
    Form(form): Form<ReportForm>,
) -> Result<Response, PageError> {
    let pin = match form.pin() {
        Ok(pin) => pin,
        Err(notice) => {
            let page = render_report(&state, session.as_ref(), &form, Some(notice))?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match state.submission.submit(form.to_submission(pin)).await {
        SubmissionOutcome::Submitted { redirect_to, .. } => {
            Ok(Redirect::to(redirect_to).into_response())
        }
        SubmissionOutcome::Rejected { notice } => {
            let page = render_report(&state, session.as_ref(), &form, Some(&notice))?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        SubmissionOutcome::Failed { notice } => {
            let page = render_report(&state, session.as_ref(), &form, Some(&notice))?;
            Ok((StatusCode::INTERNAL_SERVER_ERROR, page).into_response())
        }
    }
}

// ── Listing ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ListingQuery {
    #[serde(default)]
    search: String,
    #[serde(default)]
    category: String,
}

async fn issues_page(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
    Query(query): Query<ListingQuery>,
) -> Result<Html<String>, PageError> {
    let category: CategoryFilter = query.category.parse().unwrap_or_default();
    let filter = ListingFilter::new()
        .with_search(query.search)
        .with_category(category);
    let page = ListingPage::load(&state.store, filter).await;

    state.pages.render(
        "issues.html",
        context! {
            session => session_view(session.as_ref()),
            issues => page.visible(),
            total => page.total(),
            search => page.filter().search(),
            selected_category => page.filter().category().as_str(),
            categories => category_names(),
        },
    )
}

// ── Admin ─────────────────────────────────────────────────────────────

/// Admin board filter as sent in the query string. It is echoed back
/// through status-change forms so the redirect lands on the same view.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BoardQuery {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    search: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    status: String,
}

impl BoardQuery {
    fn filter(&self) -> AdminFilter {
        AdminFilter::new()
            .with_search(self.search.clone())
            .with_category(self.category.parse().unwrap_or_default())
            .with_status(self.status.parse::<StatusFilter>().unwrap_or_default())
    }

    /// Returns `?…` carrying this filter and the failure flag, or nothing.
    fn suffix(&self, failed: bool) -> String {
        let mut query = serde_urlencoded::to_string(self).unwrap_or_default();
        if failed {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str("failed=1");
        }
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }

    fn location(&self, failed: bool) -> String {
        format!("/admin{}", self.suffix(failed))
    }
}

#[derive(Debug, Default, Deserialize)]
struct NoticeQuery {
    #[serde(default)]
    failed: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusCount {
    status: &'static str,
    total: usize,
}

fn status_counts(issues: &[Issue]) -> Vec<StatusCount> {
    IssueStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.as_str(),
            total: issues.iter().filter(|issue| issue.status() == *status).count(),
        })
        .collect()
}

async fn admin_page(
    AdminPage(session): AdminPage,
    State(state): State<SharedState>,
    Query(board_query): Query<BoardQuery>,
    Query(flags): Query<NoticeQuery>,
) -> Result<Html<String>, PageError> {
    let filter = board_query.filter();
    let mut notice = flags
        .failed
        .is_some()
        .then_some(super::api::UPDATE_FAILED_MESSAGE);

    let (issues, visible) = match AdminBoard::load(Arc::new(state.store.clone())).await {
        Ok(board) => {
            board.set_filter(filter.clone());
            (board.issues(), board.visible())
        }
        Err(err) => {
            tracing::error!(error = %err, "admin board failed to load");
            notice = Some("Failed to load issues");
            (Vec::new(), Vec::new())
        }
    };

    state.pages.render(
        "admin.html",
        context! {
            session => session_view(Some(&session)),
            notice => notice,
            issues => visible,
            total => issues.len(),
            counts => status_counts(&issues),
            search => filter.search(),
            selected_category => filter.category().as_str(),
            selected_status => filter.status().as_str(),
            categories => category_names(),
            statuses => status_names(),
            board_query => board_query.suffix(false),
        },
    )
}

#[derive(Debug, Deserialize)]
struct StatusForm {
    status: String,
}

async fn admin_update_status(
    AdminPage(session): AdminPage,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(board_query): Query<BoardQuery>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let parsed = id
        .parse::<IssueId>()
        .ok()
        .zip(IssueStatus::try_from(form.status.as_str()).ok());
    let Some((issue_id, status)) = parsed else {
        return Redirect::to(&board_query.location(true));
    };

    match state.store.update_status(issue_id, status).await {
        Ok(_) => {
            tracing::info!(
                issue_id = %issue_id,
                admin = session.email(),
                %status,
                "status changed from admin page"
            );
            Redirect::to(&board_query.location(false))
        }
        Err(err) => {
            tracing::warn!(
                issue_id = %issue_id,
                error = %err,
                "admin page status change failed"
            );
            Redirect::to(&board_query.location(true))
        }
    }
}

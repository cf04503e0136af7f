//! Session extraction and the server-side admin guard.
//!
//! A token is read from `Authorization: Bearer <token>` first and from the
//! `civic_session` cookie otherwise.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use super::{error::ApiError, state::SharedState};
use crate::access::{
    domain::{Session, SessionToken},
    services::AccessError,
};

/// Name of the session cookie set by the HTML pages.
pub const SESSION_COOKIE: &str = "civic_session";

/// Returns the session token presented with a request, if any.
#[must_use]
pub fn presented_token(headers: &HeaderMap) -> Option<SessionToken> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let trimmed = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !trimmed.is_empty())
        .then(|| SessionToken::from_raw(trimmed))
}

fn cookie_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| SessionToken::from_raw(value))
}

/// The raw token presented with a request, if any.
#[derive(Debug, Clone)]
pub struct PresentedToken(pub Option<SessionToken>);

impl FromRequestParts<SharedState> for PresentedToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(presented_token(&parts.headers)))
    }
}

/// A live session of any role, if one was presented.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl FromRequestParts<SharedState> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = presented_token(&parts.headers);
        Ok(Self(state.auth.authorize(token.as_ref()).await.ok()))
    }
}

/// A live admin session; API requests without one are refused with 401 or
/// 403.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl FromRequestParts<SharedState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = presented_token(&parts.headers);
        let session = state.auth.require_admin(token.as_ref()).await?;
        Ok(Self(session))
    }
}

/// A live admin session; page requests without one are sent back to the
/// sign-in page.
#[derive(Debug, Clone)]
pub struct AdminPage(pub Session);

/// Rejection for [`AdminPage`].
#[derive(Debug)]
pub struct SignInRedirect;

impl IntoResponse for SignInRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl FromRequestParts<SharedState> for AdminPage {
    type Rejection = SignInRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = presented_token(&parts.headers);
        match state.auth.require_admin(token.as_ref()).await {
            Ok(session) => Ok(Self(session)),
            Err(err) => {
                if let AccessError::Store(source) = &err {
                    tracing::error!(error = %source, "session store failure");
                } else {
                    tracing::debug!(reason = %err, "admin page refused");
                }
                Err(SignInRedirect)
            }
        }
    }
}

//! [`IssueCatalog`] client for the Civic Connect JSON API.
//!
//! Lets an admin board run outside the server process. Requests carry the
//! admin session token as a bearer credential.

use crate::issue::{
    domain::{Issue, IssueId, IssueStatus},
    ports::{IssueCatalog, IssueCatalogError, IssueCatalogResult},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct StatusUpdateBody {
    status: IssueStatus,
}

#[derive(Debug, Deserialize)]
struct ActionEnvelope {
    #[serde(default)]
    data: Option<Issue>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP-backed catalog talking to `/api/issues`.
#[derive(Debug, Clone)]
pub struct ApiIssueCatalog {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiIssueCatalog {
    /// Creates a catalog for the server at `base_url` using an admin session
    /// token.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IssueCatalog for ApiIssueCatalog {
    async fn list_issues(&self) -> IssueCatalogResult<Vec<Issue>> {
        let response = self
            .client
            .get(self.url("/api/issues"))
            .send()
            .await
            .map_err(IssueCatalogError::transport)?;
        if !response.status().is_success() {
            return Err(IssueCatalogError::Rejected(format!(
                "listing failed with HTTP status {}",
                response.status().as_u16()
            )));
        }
        response
            .json::<Vec<Issue>>()
            .await
            .map_err(IssueCatalogError::transport)
    }

    async fn update_status(&self, id: IssueId, status: IssueStatus) -> IssueCatalogResult<Issue> {
        let response = self
            .client
            .patch(self.url(&format!("/api/issues/{id}/status")))
            .bearer_auth(&self.token)
            .json(&StatusUpdateBody { status })
            .send()
            .await
            .map_err(IssueCatalogError::transport)?;

        let http_status = response.status();
        let envelope = response
            .json::<ActionEnvelope>()
            .await
            .map_err(IssueCatalogError::transport)?;
        let reason = envelope
            .error
            .unwrap_or_else(|| format!("HTTP status {}", http_status.as_u16()));

        match (http_status, envelope.data) {
            (status_code, Some(issue)) if status_code.is_success() => Ok(issue),
            (StatusCode::NOT_FOUND, _) => Err(IssueCatalogError::NotFound(id)),
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                Err(IssueCatalogError::Unauthorized(reason))
            }
            _ => Err(IssueCatalogError::Rejected(reason)),
        }
    }
}

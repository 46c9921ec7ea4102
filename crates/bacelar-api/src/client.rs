//! Typed client for the deadline backend's `/api/v1` surface.

use bacelar_core::filter::FilterState;
use bacelar_core::model::{Classification, Deadline, DeadlineDraft, DeadlineStatus, User};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::session::Session;

/// Partial update payload; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeadlinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeadlineStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentRef {
    pub id: String,
    pub file_name: String,
    pub url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client over the backend base URL; routes live under `/api/v1`
/// except the auth endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url` is like `http://localhost:8000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(base_url: String, token: String) -> Self {
        let mut client = Self::new(base_url);
        client.token = Some(token);
        client
    }

    pub fn with_session(base_url: String, session: &Session) -> Self {
        Self::with_token(base_url, session.token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::from_status(status.as_u16(), body))
        }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        info!(url = %url, "logging in");
        let resp = self
            .client
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        let token: TokenResponse = Self::check(resp).await?.json().await?;
        Ok(token.access_token)
    }

    /// Current authenticated user.
    pub async fn me(&self) -> Result<User, ApiError> {
        let resp = self
            .request(reqwest::Method::GET, self.url("/users/me"))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Fetch the deadline collection with the given filters applied
    /// server-side.
    ///
    /// On failure the caller should keep the previously loaded collection
    /// visible and surface a page-level error, not clear the view.
    pub async fn list(&self, filters: &FilterState) -> Result<Vec<Deadline>, ApiError> {
        let params = filters.query_params();
        info!(filters = params.len(), "listing deadlines");
        let resp = self
            .request(reqwest::Method::GET, self.url("/deadlines"))
            .query(&params)
            .send()
            .await?;
        let deadlines: Vec<Deadline> = Self::check(resp).await?.json().await?;
        info!(count = deadlines.len(), "listed deadlines");
        Ok(deadlines)
    }

    pub async fn get(&self, id: &str) -> Result<Deadline, ApiError> {
        let resp = self
            .request(reqwest::Method::GET, self.url(&format!("/deadlines/{id}")))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create(&self, draft: &DeadlineDraft) -> Result<Deadline, ApiError> {
        let resp = self
            .request(reqwest::Method::POST, self.url("/deadlines"))
            .json(draft)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn update(&self, id: &str, patch: &DeadlinePatch) -> Result<Deadline, ApiError> {
        let resp = self
            .request(reqwest::Method::PATCH, self.url(&format!("/deadlines/{id}")))
            .json(patch)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .request(
                reqwest::Method::DELETE,
                self.url(&format!("/deadlines/{id}")),
            )
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let resp = self
            .request(reqwest::Method::GET, self.url("/users"))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn upload_attachment(
        &self,
        deadline_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachmentRef, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        info!(deadline_id, file_name, "uploading attachment");
        let resp = self
            .request(
                reqwest::Method::POST,
                self.url(&format!("/deadlines/{deadline_id}/attachments")),
            )
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn delete_attachment(
        &self,
        deadline_id: &str,
        attachment_id: &str,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(
                reqwest::Method::DELETE,
                self.url(&format!("/deadlines/{deadline_id}/attachments/{attachment_id}")),
            )
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/".into());
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.url("/deadlines"), "http://localhost:8000/api/v1/deadlines");
    }

    #[test]
    fn patch_serialises_only_set_fields() {
        let patch = DeadlinePatch {
            status: Some(DeadlineStatus::Completed),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "concluido" }));
    }

    #[test]
    fn patch_can_unassign_responsible() {
        let patch = DeadlinePatch {
            responsible_user_id: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "responsible_user_id": null }));
    }

    #[test]
    fn patch_renames_kind_to_type() {
        let patch = DeadlinePatch {
            kind: Some("Agravo".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Agravo" }));
    }
}

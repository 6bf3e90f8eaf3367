use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::traits::{AuthProvider, ProfileStore, SavedJobStore, StoreError, StoreResult};
use crate::models::{SavedJob, Session, UserProfile};

const PROFILES_TABLE: &str = "profiles";
const SAVED_JOBS_TABLE: &str = "saved_jobs";

/// Client for the hosted backend-as-a-service, speaking its
/// PostgREST-style row API. The store owns persistence, indexing and
/// the (user_id, job_id) uniqueness constraint; this client only
/// issues equality-filtered row operations.
pub struct HostedStore {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl HostedStore {
    pub fn new(base_url: &str, api_key: &str, access_token: &str) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    async fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(StoreError::Transport(format!("store returned {}", status)))
        }
    }

    /// GET current session from the auth endpoint
    async fn fetch_user(&self) -> StoreResult<Option<Session>> {
        let url = format!("{}/auth/v1/user", self.base_url);
        debug!("Fetching current auth user");

        let response = self.authed(self.client.get(&url)).send().await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let response = Self::check(response).await?;

        #[derive(serde::Deserialize)]
        struct AuthUser {
            id: String,
            email: String,
        }
        let body = response.text().await?;
        let user: AuthUser = serde_json::from_str(&body)?;
        Ok(Some(Session {
            user_id: user.id,
            email: user.email,
        }))
    }
}

#[async_trait]
impl AuthProvider for HostedStore {
    async fn current_session(&self) -> StoreResult<Option<Session>> {
        self.fetch_user().await
    }

    async fn sign_out(&self) -> StoreResult<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self.authed(self.client.post(&url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for HostedStore {
    async fn fetch(&self, user_id: &str) -> StoreResult<UserProfile> {
        debug!("Fetching profile for user {}", user_id);

        let response = self
            .authed(self.client.get(self.table_url(PROFILES_TABLE)))
            .query(&[
                ("user_id", format!("eq.{}", user_id).as_str()),
                ("select", "*"),
                ("limit", "1"),
            ])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body = response.text().await?;
        let mut rows: Vec<UserProfile> = serde_json::from_str(&body)?;
        rows.pop().ok_or(StoreError::NotFound)
    }

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        debug!("Updating display name for user {}", user_id);

        let response = self
            .authed(self.client.patch(self.table_url(PROFILES_TABLE)))
            .query(&[("user_id", format!("eq.{}", user_id).as_str())])
            .json(&json!({ "display_name": display_name }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl SavedJobStore for HostedStore {
    async fn list(&self, user_id: &str) -> StoreResult<Vec<SavedJob>> {
        debug!("Listing saved jobs for user {}", user_id);

        let response = self
            .authed(self.client.get(self.table_url(SAVED_JOBS_TABLE)))
            .query(&[
                ("user_id", format!("eq.{}", user_id).as_str()),
                ("select", "*"),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn remove(&self, user_id: &str, row_id: &str) -> StoreResult<()> {
        debug!("Deleting saved job {} for user {}", row_id, user_id);

        // Both filters, always: a row id alone must never delete
        // another user's bookmark
        let response = self
            .authed(self.client.delete(self.table_url(SAVED_JOBS_TABLE)))
            .query(&[
                ("id", format!("eq.{}", row_id).as_str()),
                ("user_id", format!("eq.{}", user_id).as_str()),
            ])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

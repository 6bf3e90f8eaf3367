use crate::models::{SavedJob, Session, UserProfile};
use async_trait::async_trait;
use thiserror::Error;

/// Failures at the hosted-store / auth-provider boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,
    #[error("store request failed: {0}")]
    Transport(String),
    #[error("malformed store payload: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The external auth provider, reduced to what the session flow consumes.
/// Sign-up/sign-in mechanics belong to the provider, not this layer.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The currently active session, if any
    async fn current_session(&self) -> StoreResult<Option<Session>>;

    async fn sign_out(&self) -> StoreResult<()>;
}

/// Profile rows in the hosted store, one per auth identity
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for a user. `NotFound` if no row exists.
    async fn fetch(&self, user_id: &str) -> StoreResult<UserProfile>;

    /// Update the display name, scoped to the owning user
    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()>;
}

/// Bookmark rows in the hosted store
#[async_trait]
pub trait SavedJobStore: Send + Sync {
    /// All bookmarks for a user, most recent first
    async fn list(&self, user_id: &str) -> StoreResult<Vec<SavedJob>>;

    /// Delete one row, scoped to BOTH the user and the row id so a
    /// stale id can never touch another user's data. Deleting an
    /// already-absent row is Ok.
    async fn remove(&self, user_id: &str, row_id: &str) -> StoreResult<()>;
}

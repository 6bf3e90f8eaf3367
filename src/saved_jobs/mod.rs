use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::SavedJob;
use crate::store::{SavedJobStore, StoreResult};

/// The displayed bookmark list for one signed-in user.
///
/// Creation of bookmarks happens elsewhere; this view only lists and
/// removes them.
pub struct SavedJobsView {
    store: Arc<dyn SavedJobStore>,
    user_id: String,
    jobs: Vec<SavedJob>,
}

impl SavedJobsView {
    pub fn new(store: Arc<dyn SavedJobStore>, user_id: &str) -> Self {
        Self {
            store,
            user_id: user_id.to_string(),
            jobs: Vec::new(),
        }
    }

    /// Most recent bookmark first, as loaded by [`refresh`](Self::refresh)
    pub fn jobs(&self) -> &[SavedJob] {
        &self.jobs
    }

    /// Reload the list from the store
    pub async fn refresh(&mut self) -> StoreResult<()> {
        self.jobs = self.store.list(&self.user_id).await?;
        debug!("Loaded {} saved jobs for {}", self.jobs.len(), self.user_id);
        Ok(())
    }

    /// Remove one bookmark. The displayed list only changes when the
    /// store confirms the delete; removing an id that is already gone
    /// is a no-op success.
    pub async fn remove(&mut self, row_id: &str) -> StoreResult<()> {
        if let Err(e) = self.store.remove(&self.user_id, row_id).await {
            warn!("Failed to remove saved job {}: {}", row_id, e);
            return Err(e);
        }
        self.jobs.retain(|job| job.id != row_id);
        Ok(())
    }
}

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::traits::{AuthProvider, ProfileStore, SavedJobStore, StoreError, StoreResult};
use crate::models::{SavedJob, Session, UserProfile};

/// In-memory auth provider for tests and the demo driver
#[derive(Default)]
pub struct MemoryAuthProvider {
    session: Mutex<Option<Session>>,
}

impl MemoryAuthProvider {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session;
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn current_session(&self) -> StoreResult<Option<Session>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_out(&self) -> StoreResult<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

/// In-memory profile rows keyed by user id
#[derive(Default)]
pub struct MemoryProfileStore {
    rows: Mutex<HashMap<String, UserProfile>>,
    /// When set, fetches fail with a transport error
    fail_fetches: Mutex<bool>,
}

impl MemoryProfileStore {
    pub fn with_profile(profile: UserProfile) -> Self {
        let store = Self::default();
        store
            .rows
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile);
        store
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        *self.fail_fetches.lock().unwrap() = fail;
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch(&self, user_id: &str) -> StoreResult<UserProfile> {
        if *self.fail_fetches.lock().unwrap() {
            return Err(StoreError::Transport("simulated outage".to_string()));
        }
        self.rows
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let profile = rows.get_mut(user_id).ok_or(StoreError::NotFound)?;
        profile.display_name = Some(display_name.to_string());
        profile.updated_at = chrono::Utc::now();
        Ok(())
    }
}

/// In-memory bookmark rows. Keyed by (user_id, job_id) so a duplicate
/// bookmark of the same listing cannot arise.
#[derive(Default)]
pub struct MemorySavedJobStore {
    rows: Mutex<HashMap<(String, String), SavedJob>>,
    fail_removes: Mutex<bool>,
}

impl MemorySavedJobStore {
    pub fn with_rows(rows: Vec<SavedJob>) -> Self {
        let store = Self::default();
        {
            let mut map = store.rows.lock().unwrap();
            for row in rows {
                map.insert((row.user_id.clone(), row.job_id.clone()), row);
            }
        }
        store
    }

    pub fn set_fail_removes(&self, fail: bool) {
        *self.fail_removes.lock().unwrap() = fail;
    }
}

#[async_trait]
impl SavedJobStore for MemorySavedJobStore {
    async fn list(&self, user_id: &str) -> StoreResult<Vec<SavedJob>> {
        let mut rows: Vec<SavedJob> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn remove(&self, user_id: &str, row_id: &str) -> StoreResult<()> {
        if *self.fail_removes.lock().unwrap() {
            return Err(StoreError::Transport("simulated outage".to_string()));
        }
        self.rows
            .lock()
            .unwrap()
            .retain(|_, row| !(row.user_id == user_id && row.id == row_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobType;
    use chrono::{Duration, Utc};

    fn saved(user: &str, job: &str, row: &str, days_ago: i64) -> SavedJob {
        SavedJob {
            id: row.to_string(),
            user_id: user.to_string(),
            job_id: job.to_string(),
            title: "Backend Developer".to_string(),
            company: "Volvo Cars".to_string(),
            location: "Göteborg".to_string(),
            deadline: "3 dagar kvar".to_string(),
            job_type: JobType::Heltid,
            time_posted: "2 dagar sedan".to_string(),
            tags: vec![],
            logo: None,
            created_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn list_is_scoped_and_newest_first() {
        let store = MemorySavedJobStore::with_rows(vec![
            saved("user-a", "job-1", "row-1", 3),
            saved("user-a", "job-2", "row-2", 1),
            saved("user-b", "job-1", "row-3", 0),
        ]);
        let rows = store.list("user-a").await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["row-2", "row-1"]);
    }

    #[tokio::test]
    async fn remove_requires_matching_user() {
        let store = MemorySavedJobStore::with_rows(vec![saved("user-a", "job-1", "row-1", 0)]);
        store.remove("user-b", "row-1").await.unwrap();
        assert_eq!(store.list("user-a").await.unwrap().len(), 1);
        store.remove("user-a", "row-1").await.unwrap();
        assert!(store.list("user-a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_bookmark_of_same_job_collapses() {
        let store = MemorySavedJobStore::with_rows(vec![
            saved("user-a", "job-1", "row-1", 1),
            saved("user-a", "job-1", "row-2", 0),
        ]);
        assert_eq!(store.list("user-a").await.unwrap().len(), 1);
    }
}

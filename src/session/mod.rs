use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::models::{AccountType, Session, UserProfile};
use crate::store::{AuthProvider, LocalStorage, ProfileStore, StoreResult, DEMO_AUTH_KEY};

/// Where the host should navigate when the flow decides to leave the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    AuthScreen,
    Landing,
}

/// Session-change notification from the auth provider, delivered by
/// the host for the lifetime of the view
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

/// State of the identity-gated view
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Checking,
    /// Local bypass of real authentication; immune to session events
    DemoMode { profile: UserProfile },
    /// Profile is `None` when the fetch failed; the view stays
    /// interactive, editing is just unavailable until a retry
    Authenticated {
        session: Session,
        profile: Option<UserProfile>,
    },
    Redirecting { target: RedirectTarget },
}

fn demo_profile() -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: "demo".to_string(),
        user_id: "demo".to_string(),
        account_type: AccountType::Private,
        company_name: None,
        display_name: Some("Demoanvändare".to_string()),
        created_at: now,
        updated_at: now,
    }
}

/// Session/profile bootstrap for the profile dashboard.
///
/// Every profile fetch is tagged with a generation counter; a result
/// whose generation no longer matches is discarded. That covers both a
/// sign-out racing an in-flight fetch and the view going away while a
/// request is outstanding.
pub struct SessionFlow {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    storage: Arc<dyn LocalStorage>,
    state: FlowState,
    generation: u64,
}

impl SessionFlow {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
        storage: Arc<dyn LocalStorage>,
    ) -> Self {
        Self {
            auth,
            profiles,
            storage,
            state: FlowState::Checking,
            generation: 0,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    fn demo_flag_set(&self) -> bool {
        self.storage.get(DEMO_AUTH_KEY).as_deref() == Some("true")
    }

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Resolve the viewer's identity on entering the view
    pub async fn bootstrap(&mut self) -> StoreResult<()> {
        let session = match self.auth.current_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Session lookup failed: {}", e);
                None
            }
        };

        match session {
            None if self.demo_flag_set() => {
                info!("No session, demo flag set - entering demo mode");
                self.state = FlowState::DemoMode {
                    profile: demo_profile(),
                };
            }
            None => {
                debug!("No session and no demo flag - redirecting to auth");
                self.state = FlowState::Redirecting {
                    target: RedirectTarget::AuthScreen,
                };
            }
            Some(session) => {
                self.enter_authenticated(session).await;
            }
        }
        Ok(())
    }

    async fn enter_authenticated(&mut self, session: Session) {
        let generation = self.bump_generation();
        let result = self.profiles.fetch(&session.user_id).await;
        self.apply_profile_result(generation, session, result);
    }

    /// Apply a fetch result only if it is still the current one
    fn apply_profile_result(
        &mut self,
        generation: u64,
        session: Session,
        result: StoreResult<UserProfile>,
    ) {
        if generation != self.generation {
            debug!("Discarding stale profile fetch for {}", session.user_id);
            return;
        }
        let profile = match result {
            Ok(profile) => Some(profile),
            Err(e) => {
                // Degraded but interactive; the host shows a transient
                // notice and the user can retry
                warn!("Profile fetch failed for {}: {}", session.user_id, e);
                None
            }
        };
        self.state = FlowState::Authenticated { session, profile };
    }

    /// React to a session-change notification from the provider
    pub async fn handle_session_event(&mut self, event: SessionEvent) {
        // Demo mode is immune to external session signals
        if matches!(self.state, FlowState::DemoMode { .. }) {
            return;
        }
        match event {
            SessionEvent::SignedOut => {
                // Already leaving; a late signal is a no-op
                if matches!(self.state, FlowState::Redirecting { .. }) {
                    return;
                }
                debug!("Session ended externally - redirecting to auth");
                self.bump_generation();
                self.state = FlowState::Redirecting {
                    target: RedirectTarget::AuthScreen,
                };
            }
            SessionEvent::SignedIn(session) => {
                self.enter_authenticated(session).await;
            }
        }
    }

    /// Commit a new display name, then re-read the row so the view
    /// reflects the store's committed state rather than a local guess
    pub async fn save_profile(&mut self, display_name: &str) -> StoreResult<()> {
        let session = match &self.state {
            FlowState::Authenticated { session, .. } => session.clone(),
            _ => return Ok(()),
        };

        self.profiles
            .update_display_name(&session.user_id, display_name)
            .await?;

        let generation = self.generation;
        match self.profiles.fetch(&session.user_id).await {
            Ok(profile) => {
                self.apply_profile_result(generation, session, Ok(profile));
                Ok(())
            }
            Err(e) => {
                // The write committed; keep the profile the view
                // already has and let the host surface the failed
                // re-read as a transient notice
                warn!(
                    "Profile re-read after save failed for {}: {}",
                    session.user_id, e
                );
                Err(e)
            }
        }
    }

    /// Retry a failed profile load without re-running the whole flow
    pub async fn retry_profile(&mut self) {
        if let FlowState::Authenticated { session, .. } = &self.state {
            let session = session.clone();
            self.enter_authenticated(session).await;
        }
    }

    /// Leave demo mode explicitly; clears the flag and goes home
    pub fn exit_demo(&mut self) {
        self.storage.remove(DEMO_AUTH_KEY);
        self.bump_generation();
        self.state = FlowState::Redirecting {
            target: RedirectTarget::Landing,
        };
    }

    /// Explicit sign-out. Navigation follows local intent even if the
    /// provider call fails.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.auth.sign_out().await {
            warn!("Sign-out call failed: {}", e);
        }
        self.bump_generation();
        self.state = FlowState::Redirecting {
            target: RedirectTarget::Landing,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryAuthProvider, MemoryProfileStore, MemoryStorage};

    fn profile_for(user_id: &str) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: format!("profile-{}", user_id),
            user_id: user_id.to_string(),
            account_type: AccountType::Private,
            company_name: None,
            display_name: Some("Anna".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn session_for(user_id: &str) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: format!("{}@example.se", user_id),
        }
    }

    fn flow(
        auth: MemoryAuthProvider,
        profiles: MemoryProfileStore,
        storage: MemoryStorage,
    ) -> SessionFlow {
        SessionFlow::new(Arc::new(auth), Arc::new(profiles), Arc::new(storage))
    }

    #[tokio::test]
    async fn visitor_without_session_or_flag_is_redirected() {
        let mut flow = flow(
            MemoryAuthProvider::signed_out(),
            MemoryProfileStore::default(),
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        assert_eq!(
            flow.state(),
            &FlowState::Redirecting {
                target: RedirectTarget::AuthScreen
            }
        );
    }

    #[tokio::test]
    async fn demo_flag_enters_demo_mode_without_fetching() {
        let storage = MemoryStorage::default();
        storage.set(DEMO_AUTH_KEY, "true");
        let mut flow = flow(
            MemoryAuthProvider::signed_out(),
            MemoryProfileStore::default(),
            storage,
        );
        flow.bootstrap().await.unwrap();
        match flow.state() {
            FlowState::DemoMode { profile } => {
                assert_eq!(profile.account_type, AccountType::Private);
                assert!(profile.display_name.is_some());
            }
            other => panic!("expected demo mode, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn session_bootstraps_into_authenticated_with_profile() {
        let mut flow = flow(
            MemoryAuthProvider::signed_in(session_for("user-1")),
            MemoryProfileStore::with_profile(profile_for("user-1")),
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        match flow.state() {
            FlowState::Authenticated { session, profile } => {
                assert_eq!(session.user_id, "user-1");
                assert_eq!(profile.as_ref().unwrap().display_name.as_deref(), Some("Anna"));
            }
            other => panic!("expected authenticated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn profile_fetch_failure_degrades_but_stays_authenticated() {
        let profiles = MemoryProfileStore::with_profile(profile_for("user-1"));
        profiles.set_fail_fetches(true);
        let mut flow = flow(
            MemoryAuthProvider::signed_in(session_for("user-1")),
            profiles,
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        match flow.state() {
            FlowState::Authenticated { profile, .. } => assert!(profile.is_none()),
            other => panic!("expected degraded authenticated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn demo_mode_is_immune_to_signed_out_events() {
        let storage = MemoryStorage::default();
        storage.set(DEMO_AUTH_KEY, "true");
        let mut flow = flow(
            MemoryAuthProvider::signed_out(),
            MemoryProfileStore::default(),
            storage,
        );
        flow.bootstrap().await.unwrap();
        flow.handle_session_event(SessionEvent::SignedOut).await;
        assert!(matches!(flow.state(), FlowState::DemoMode { .. }));
    }

    #[tokio::test]
    async fn external_sign_out_redirects_an_authenticated_view() {
        let mut flow = flow(
            MemoryAuthProvider::signed_in(session_for("user-1")),
            MemoryProfileStore::with_profile(profile_for("user-1")),
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        flow.handle_session_event(SessionEvent::SignedOut).await;
        assert_eq!(
            flow.state(),
            &FlowState::Redirecting {
                target: RedirectTarget::AuthScreen
            }
        );
        // A duplicate late signal converges to the same state
        flow.handle_session_event(SessionEvent::SignedOut).await;
        assert!(matches!(flow.state(), FlowState::Redirecting { .. }));
    }

    #[tokio::test]
    async fn stale_fetch_result_is_discarded() {
        let mut flow = flow(
            MemoryAuthProvider::signed_in(session_for("user-1")),
            MemoryProfileStore::with_profile(profile_for("user-1")),
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        // Simulate a result issued for an earlier generation arriving
        // after a sign-out already redirected the view
        flow.handle_session_event(SessionEvent::SignedOut).await;
        let stale_generation = flow.generation - 1;
        flow.apply_profile_result(
            stale_generation,
            session_for("user-1"),
            Ok(profile_for("user-1")),
        );
        assert!(matches!(flow.state(), FlowState::Redirecting { .. }));
    }

    #[tokio::test]
    async fn save_profile_rereads_the_committed_row() {
        let mut flow = flow(
            MemoryAuthProvider::signed_in(session_for("user-1")),
            MemoryProfileStore::with_profile(profile_for("user-1")),
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        flow.save_profile("Anna Andersson").await.unwrap();
        match flow.state() {
            FlowState::Authenticated { profile, .. } => {
                assert_eq!(
                    profile.as_ref().unwrap().display_name.as_deref(),
                    Some("Anna Andersson")
                );
            }
            other => panic!("expected authenticated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_reread_after_save_keeps_prior_profile_and_errors() {
        let profiles = Arc::new(MemoryProfileStore::with_profile(profile_for("user-1")));
        let mut flow = SessionFlow::new(
            Arc::new(MemoryAuthProvider::signed_in(session_for("user-1"))),
            profiles.clone(),
            Arc::new(MemoryStorage::default()),
        );
        flow.bootstrap().await.unwrap();

        // The update commits but the confirming re-read fails
        profiles.set_fail_fetches(true);
        let before = flow.state().clone();
        assert!(flow.save_profile("Anna Andersson").await.is_err());

        // The view still shows the profile it had, not a degraded one
        assert_eq!(flow.state(), &before);
        match flow.state() {
            FlowState::Authenticated { profile, .. } => {
                assert_eq!(profile.as_ref().unwrap().display_name.as_deref(), Some("Anna"));
            }
            other => panic!("expected authenticated, got {:?}", other),
        }

        // The write itself went through
        profiles.set_fail_fetches(false);
        let row = profiles.fetch("user-1").await.unwrap();
        assert_eq!(row.display_name.as_deref(), Some("Anna Andersson"));
    }

    #[tokio::test]
    async fn save_profile_failure_leaves_state_unchanged() {
        let profiles = MemoryProfileStore::default();
        let mut flow = flow(
            MemoryAuthProvider::signed_in(session_for("user-1")),
            profiles,
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        // Fetch already failed (no row), so we are degraded; the update
        // now fails too and must not panic or change state class
        let before = flow.state().clone();
        assert!(flow.save_profile("Anna").await.is_err());
        assert_eq!(flow.state(), &before);
    }

    #[tokio::test]
    async fn exit_demo_clears_flag_and_goes_home() {
        let storage = MemoryStorage::default();
        storage.set(DEMO_AUTH_KEY, "true");
        let storage = Arc::new(storage);
        let mut flow = SessionFlow::new(
            Arc::new(MemoryAuthProvider::signed_out()),
            Arc::new(MemoryProfileStore::default()),
            storage.clone(),
        );
        flow.bootstrap().await.unwrap();
        flow.exit_demo();
        assert_eq!(storage.get(DEMO_AUTH_KEY), None);
        assert_eq!(
            flow.state(),
            &FlowState::Redirecting {
                target: RedirectTarget::Landing
            }
        );
    }

    #[tokio::test]
    async fn sign_out_redirects_to_landing() {
        let mut flow = flow(
            MemoryAuthProvider::signed_in(session_for("user-1")),
            MemoryProfileStore::with_profile(profile_for("user-1")),
            MemoryStorage::default(),
        );
        flow.bootstrap().await.unwrap();
        flow.sign_out().await;
        assert_eq!(
            flow.state(),
            &FlowState::Redirecting {
                target: RedirectTarget::Landing
            }
        );
    }
}

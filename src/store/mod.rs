pub mod local;
pub mod memory;
pub mod rest;
pub mod traits;

pub use local::{FileStorage, LocalStorage, MemoryStorage, DEMO_AUTH_KEY, JOB_ALERTS_KEY};
pub use memory::{MemoryAuthProvider, MemoryProfileStore, MemorySavedJobStore};
pub use rest::HostedStore;
pub use traits::{AuthProvider, ProfileStore, SavedJobStore, StoreError, StoreResult};

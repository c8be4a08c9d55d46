//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use cohort::{PatientStore, Result};

/// Shared application state.
///
/// The store sits behind a mutex so an upload replaces the patient table to
/// completion before another request touches it. There is no other shared
/// mutable state; every analysis request runs its own full cycle.
#[derive(Clone)]
pub struct AppState {
    /// The persisted patient store.
    pub store: Arc<Mutex<PatientStore>>,
    /// Path of the store on disk (for display).
    pub db_path: PathBuf,
}

impl AppState {
    /// Open (or create) the store and wrap it for sharing.
    pub fn open(db_path: PathBuf) -> Result<Self> {
        let store = PatientStore::open(&db_path)?;
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            db_path,
        })
    }
}

//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It holds
//! one storage backend behind a trait object: `PgStore` when a database is
//! configured, `MemoryStore` otherwise. Handlers only see the relay store traits.

use std::sync::Arc;

use relay::memory::MemoryStore;
use relay::store::{PresentationCatalog, PresentationStore};
use sqlx::PgPool;

use crate::services::pg_store::PgStore;

// =============================================================================
// BACKEND
// =============================================================================

/// Everything the REST surface needs from storage.
pub trait Backend: PresentationStore + PresentationCatalog {}

impl<T: PresentationStore + PresentationCatalog> Backend for T {}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the backend is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Backend>,
    /// Short backend name for logs and `/healthz`.
    pub backend: &'static str,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Backend>, backend: &'static str) -> Self {
        Self { store, backend }
    }

    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PgStore::new(pool)), "postgres")
    }

    #[must_use]
    pub fn in_memory(store: MemoryStore) -> Self {
        Self::new(Arc::new(store), "memory")
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

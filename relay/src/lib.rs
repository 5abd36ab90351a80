//! Store contract and sync clients for slidecast.
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | `PresentationSource` / `PresentationStore` / `PresentationCatalog` traits and `StoreError` |
//! | [`memory`] | In-memory store (service fallback, tests) |
//! | [`http`] | reqwest client for the service's REST surface |
//! | [`author`] | Author sync: debounced geometry writes, in-flight tracking, polling |
//! | [`viewer`] | Read-only viewer sync: polling, countdown, scene derivation |
//! | [`debounce`] | Per-slide geometry debounce |
//! | [`retry`] | Write retry policy and poll backoff |
//! | [`config`] | `SyncConfig` from the environment |

pub mod author;
pub mod config;
pub mod debounce;
pub mod http;
pub mod memory;
pub mod retry;
pub mod store;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;

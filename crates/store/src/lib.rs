//! `sw-store` — management-store access for Sitewrench.
//!
//! Provides the [`ManagementStore`] trait that abstracts over one site's
//! object store, a production REST implementation ([`RestStore`]), an
//! in-memory test double ([`MemoryStore`]), the wire types shared by
//! both, and provider credential resolution ([`auth`]).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use sw_domain::config::ProviderConfig;
//! use sw_store::{ManagementStore, QueryRequest, RestStore};
//!
//! # async fn example() -> sw_domain::error::Result<()> {
//! let cfg = ProviderConfig::default();
//! let store = RestStore::new(&cfg)?;
//!
//! let members = store
//!     .query(QueryRequest::all("Computer").with("Domain", "LAB"))
//!     .await?;
//!
//! println!("found {} computers", members.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod memory;
pub mod provider;
pub mod rest;
pub mod types;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use memory::{MemoryStore, MethodCall};
pub use provider::ManagementStore;
pub use rest::{from_reqwest, RestStore};
pub use types::{
    ClassSchema, ExecRequest, ExecResponse, ManagedObject, PutResponse, QueryRequest,
    QueryResponse,
};

use std::sync::Arc;

use sw_domain::config::ProviderConfig;
use sw_domain::error::Result;

/// Create the production [`ManagementStore`] for a provider config.
///
/// Today this is always a [`RestStore`]; the indirection keeps callers
/// written against the trait so tests can hand them a [`MemoryStore`].
pub fn create_store(cfg: &ProviderConfig) -> Result<Arc<dyn ManagementStore>> {
    let store = RestStore::new(cfg)?;
    tracing::debug!(base_url = %cfg.base_url, site = %cfg.site, "management store ready");
    Ok(Arc::new(store))
}

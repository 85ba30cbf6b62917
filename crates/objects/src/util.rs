//! Small shared helpers for the pass-through modules.

use sw_domain::error::{Error, Result};
use sw_store::{ManagedObject, ManagementStore, QueryRequest};

/// Run a query that is expected to match exactly one object.
pub(crate) async fn find_one(
    store: &dyn ManagementStore,
    req: QueryRequest,
    what: impl Into<String>,
) -> Result<ManagedObject> {
    store
        .query(req)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(what.into()))
}

/// Persist a new object and read back the store's copy, which carries
/// the assigned path and identity properties.
pub(crate) async fn save_and_fetch(
    store: &dyn ManagementStore,
    obj: &ManagedObject,
) -> Result<ManagedObject> {
    let saved = store.put(obj).await?;
    store.get(&saved.path).await
}

/// Set a property only when a value was supplied.
pub(crate) fn set_opt(obj: &mut ManagedObject, name: &str, value: Option<&str>) {
    if let Some(v) = value {
        obj.set(name, v);
    }
}

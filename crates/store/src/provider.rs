//! The `ManagementStore` trait defines the interface for all site-store
//! backends (REST, in-memory test double).

use async_trait::async_trait;

use sw_domain::error::Result;

use crate::types::{ExecRequest, ExecResponse, ManagedObject, PutResponse, QueryRequest};

/// Abstraction over one site's object store.
///
/// Implementations may talk to the real REST provider or an in-memory
/// test double. Every method is a single attempt: a failure surfaces
/// immediately and the caller owns any retry policy. All methods return
/// `sw_domain::error::Result`.
#[async_trait]
pub trait ManagementStore: Send + Sync {
    /// Obtain an empty, writable instance of a provider class
    /// (GET /sites/{site}/schema/{class}).
    ///
    /// The instance exists only in this process; persisting it is a
    /// separate, caller-driven `put`. An unknown class, like any
    /// connectivity failure, is [`StoreUnavailable`] — the store could
    /// not hand out an instance.
    ///
    /// [`StoreUnavailable`]: sw_domain::error::Error::StoreUnavailable
    async fn create_instance(&self, class: &str) -> Result<ManagedObject>;

    /// Exact-match query over one class (POST /sites/{site}/query).
    ///
    /// No matches is an empty vector, not an error.
    async fn query(&self, req: QueryRequest) -> Result<Vec<ManagedObject>>;

    /// Fetch one object by store path (GET /sites/{site}/objects/{path}).
    ///
    /// An absent path is [`NotFound`](sw_domain::error::Error::NotFound).
    async fn get(&self, path: &str) -> Result<ManagedObject>;

    /// Persist an object (PUT /sites/{site}/objects).
    ///
    /// Inserts when `path` is `None`, updates in place otherwise. On
    /// insert the store also fills identity properties the caller left
    /// unset (`CollectionID`, `PackageID`, ...). The assigned path comes
    /// back in the response; the caller's handle is not mutated.
    async fn put(&self, object: &ManagedObject) -> Result<PutResponse>;

    /// Delete one object by store path (DELETE /sites/{site}/objects/{path}).
    async fn delete(&self, path: &str) -> Result<()>;

    /// Invoke a provider method on a persisted object
    /// (POST /sites/{site}/objects/{path}/exec/{method}).
    async fn exec_method(
        &self,
        path: &str,
        method: &str,
        req: ExecRequest,
    ) -> Result<ExecResponse>;

    /// Liveness probe for the configured site (GET /sites/{site}/ping).
    async fn ping(&self) -> Result<()>;
}

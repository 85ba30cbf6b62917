//! In-memory [`ManagementStore`] used by tests and offline tooling.
//!
//! `MemoryStore` honors the same contract as [`RestStore`]: schema-based
//! instance creation, exact-match queries, path-keyed CRUD, and a method
//! invocation log that tests can inspect. Which classes it serves is
//! fixed at construction; a store built with [`MemoryStore::new`] serves
//! none at all, which makes it a convenient stand-in for an unreachable
//! provider.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use sw_domain::error::{Error, Result};

use crate::provider::ManagementStore;
use crate::types::{
    ClassSchema, ExecRequest, ExecResponse, ManagedObject, PutResponse, QueryRequest,
};

/// One recorded `exec_method` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub path: String,
    pub method: String,
    pub params: Map<String, Value>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Default)]
pub struct MemoryStore {
    schemas: HashMap<String, Vec<String>>,
    instances: Mutex<BTreeMap<String, ManagedObject>>,
    seq: AtomicU64,
    created: AtomicU64,
    calls: Mutex<Vec<MethodCall>>,
}

impl MemoryStore {
    /// An empty store serving no classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one class schema (builder-style, used in test setup).
    pub fn with_schema(mut self, class: &str, properties: &[&str]) -> Self {
        self.schemas.insert(
            class.to_owned(),
            properties.iter().map(|p| (*p).to_owned()).collect(),
        );
        self
    }

    /// A store serving the full provider class vocabulary.
    pub fn with_provider_classes() -> Self {
        Self::new()
            .with_schema(
                "Site",
                &["SiteCode", "SiteName", "ServerName", "Version", "BuildNumber"],
            )
            .with_schema(
                "Collection",
                &["CollectionID", "Name", "Comment", "OwnedByThisSite", "MemberCount"],
            )
            .with_schema(
                "CollectionMember",
                &["CollectionID", "ResourceID", "Name", "Domain"],
            )
            .with_schema(
                "Computer",
                &["ResourceID", "Name", "Domain", "ClientVersion", "MACAddress", "LastLogonTime"],
            )
            .with_schema(
                "Package",
                &["PackageID", "Name", "Version", "Manufacturer", "Description", "SourcePath"],
            )
            .with_schema(
                "Program",
                &["PackageID", "ProgramName", "CommandLine", "Comment", "Duration"],
            )
            .with_schema(
                "Advertisement",
                &[
                    "AdvertisementID",
                    "Name",
                    "Comment",
                    "PackageID",
                    "ProgramName",
                    "CollectionID",
                    "PresentTime",
                    "AssignedSchedule",
                    "AssignedScheduleEnabled",
                ],
            )
            .with_schema(
                "Folder",
                &["ContainerNodeID", "Name", "ObjectType", "ParentContainerNodeID"],
            )
            .with_schema(
                "FolderMember",
                &["ContainerNodeID", "InstanceKey", "ObjectType"],
            )
            .with_schema(
                "ScheduleNonRecurring",
                &["DayDuration", "HourDuration", "MinuteDuration", "IsGMT", "StartTime"],
            )
            .with_schema(
                "ScheduleInterval",
                &[
                    "DayDuration",
                    "DaySpan",
                    "HourDuration",
                    "HourSpan",
                    "MinuteDuration",
                    "MinuteSpan",
                    "IsGMT",
                    "StartTime",
                ],
            )
            .with_schema(
                "ScheduleMonthlyByDate",
                &[
                    "DayDuration",
                    "ForNumberOfMonths",
                    "HourDuration",
                    "MinuteDuration",
                    "MonthDay",
                    "IsGMT",
                    "StartTime",
                ],
            )
            .with_schema(
                "ScheduleMonthlyByWeekday",
                &[
                    "Day",
                    "DayDuration",
                    "ForNumberOfMonths",
                    "HourDuration",
                    "MinuteDuration",
                    "WeekOrder",
                    "IsGMT",
                    "StartTime",
                ],
            )
            .with_schema(
                "ScheduleWeekly",
                &[
                    "Day",
                    "DayDuration",
                    "ForNumberOfWeeks",
                    "HourDuration",
                    "MinuteDuration",
                    "IsGMT",
                    "StartTime",
                ],
            )
    }

    // ── test inspection ──────────────────────────────────────────────

    /// Insert a fixture object, assigning a path (and identity
    /// properties, like an insert through `put`) when it has none.
    /// Returns the path the object lives under.
    pub fn seed(&self, mut object: ManagedObject) -> String {
        let path = match object.path.clone() {
            Some(p) => p,
            None => {
                let n = self.next_seq();
                assign_identity(&mut object, n);
                format!("{}/{n}", object.class)
            }
        };
        object.path = Some(path.clone());
        self.instances
            .lock()
            .expect("MemoryStore lock poisoned")
            .insert(path.clone(), object);
        path
    }

    /// How many instances `create_instance` has handed out.
    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }

    /// Every `exec_method` invocation so far, in call order.
    pub fn method_calls(&self) -> Vec<MethodCall> {
        self.calls.lock().expect("MemoryStore lock poisoned").clone()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// The live provider assigns identity properties at insert time; mirror
/// that for the classes whose identity the caller never supplies.
fn assign_identity(obj: &mut ManagedObject, n: u64) {
    let id_property = match obj.class.as_str() {
        "Collection" => "CollectionID",
        "Package" => "PackageID",
        "Advertisement" => "AdvertisementID",
        "Computer" => "ResourceID",
        "Folder" => "ContainerNodeID",
        _ => return,
    };
    if obj.get(id_property).is_some() {
        return;
    }
    match id_property {
        "ResourceID" | "ContainerNodeID" => obj.set(id_property, n),
        _ => obj.set(id_property, format!("SW{n:05}")),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl ManagementStore for MemoryStore {
    async fn create_instance(&self, class: &str) -> Result<ManagedObject> {
        let properties = self
            .schemas
            .get(class)
            .ok_or_else(|| Error::StoreUnavailable(format!("class {class} not served")))?;

        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(ManagedObject::from_schema(&ClassSchema {
            class: class.to_owned(),
            properties: properties.clone(),
        }))
    }

    async fn query(&self, req: QueryRequest) -> Result<Vec<ManagedObject>> {
        let instances = self.instances.lock().expect("MemoryStore lock poisoned");
        Ok(instances
            .values()
            .filter(|obj| obj.class == req.class)
            .filter(|obj| {
                req.filter
                    .iter()
                    .all(|(k, v)| obj.properties.get(k) == Some(v))
            })
            .cloned()
            .collect())
    }

    async fn get(&self, path: &str) -> Result<ManagedObject> {
        self.instances
            .lock()
            .expect("MemoryStore lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no object at {path}")))
    }

    async fn put(&self, object: &ManagedObject) -> Result<PutResponse> {
        let mut stored = object.clone();
        let path = match stored.path.clone() {
            Some(p) => p,
            None => {
                let n = self.next_seq();
                assign_identity(&mut stored, n);
                format!("{}/{n}", stored.class)
            }
        };
        stored.path = Some(path.clone());
        self.instances.lock().expect("MemoryStore lock poisoned").insert(path.clone(), stored);
        Ok(PutResponse { path })
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.instances
            .lock()
            .expect("MemoryStore lock poisoned")
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("no object at {path}")))
    }

    async fn exec_method(
        &self,
        path: &str,
        method: &str,
        req: ExecRequest,
    ) -> Result<ExecResponse> {
        if !self.instances.lock().expect("MemoryStore lock poisoned").contains_key(path) {
            return Err(Error::NotFound(format!("no object at {path}")));
        }
        self.calls.lock().expect("MemoryStore lock poisoned").push(MethodCall {
            path: path.to_owned(),
            method: method.to_owned(),
            params: req.params,
        });
        Ok(ExecResponse {
            return_value: 0,
            out: Map::new(),
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_instance_rejects_unserved_classes() {
        let store = MemoryStore::new();
        let err = store.create_instance("Package").await.unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn create_instance_hands_out_schema_shaped_objects() {
        let store = MemoryStore::new().with_schema("Package", &["PackageID", "Name"]);
        let obj = store.create_instance("Package").await.unwrap();
        assert!(obj.path.is_none());
        assert_eq!(obj.properties.len(), 2);
        assert_eq!(store.created_count(), 1);
    }

    #[tokio::test]
    async fn put_assigns_paths_and_get_returns_them() {
        let store = MemoryStore::with_provider_classes();
        let mut obj = store.create_instance("Package").await.unwrap();
        obj.set("PackageID", "LAB00001");

        let saved = store.put(&obj).await.unwrap();
        assert_eq!(saved.path, "Package/1");

        let fetched = store.get(&saved.path).await.unwrap();
        assert_eq!(fetched.get_str("PackageID"), Some("LAB00001"));
        assert_eq!(fetched.path.as_deref(), Some("Package/1"));
    }

    #[tokio::test]
    async fn put_with_a_path_updates_in_place() {
        let store = MemoryStore::with_provider_classes();
        let mut obj = ManagedObject::new("Package");
        obj.set("Name", "Office");
        let path = store.seed(obj);

        let mut edited = store.get(&path).await.unwrap();
        edited.set("Name", "Office 2024");
        store.put(&edited).await.unwrap();

        let fetched = store.get(&path).await.unwrap();
        assert_eq!(fetched.get_str("Name"), Some("Office 2024"));

        let all = store.query(QueryRequest::all("Package")).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn insert_assigns_identity_properties_like_the_live_provider() {
        let store = MemoryStore::with_provider_classes();

        let mut c = store.create_instance("Collection").await.unwrap();
        c.set("Name", "All Lab PCs");
        let saved = store.put(&c).await.unwrap();
        let fetched = store.get(&saved.path).await.unwrap();
        assert_eq!(fetched.get_str("CollectionID"), Some("SW00001"));

        let pc = store.create_instance("Computer").await.unwrap();
        let saved = store.put(&pc).await.unwrap();
        let fetched = store.get(&saved.path).await.unwrap();
        assert_eq!(fetched.get_u32("ResourceID"), Some(2));
    }

    #[tokio::test]
    async fn get_and_delete_miss_with_not_found() {
        let store = MemoryStore::with_provider_classes();
        assert!(matches!(
            store.get("Package/99").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            store.delete("Package/99").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn query_filters_on_exact_property_values() {
        let store = MemoryStore::with_provider_classes();
        for (id, domain) in [(1, "LAB"), (2, "LAB"), (3, "HQ")] {
            let mut c = ManagedObject::new("Computer");
            c.set("ResourceID", id);
            c.set("Domain", domain);
            store.seed(c);
        }

        let lab = store
            .query(QueryRequest::all("Computer").with("Domain", "LAB"))
            .await
            .unwrap();
        assert_eq!(lab.len(), 2);

        let none = store
            .query(QueryRequest::all("Computer").with("Domain", "MISSING"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn exec_method_requires_the_object_and_logs_the_call() {
        let store = MemoryStore::with_provider_classes();
        assert!(matches!(
            store
                .exec_method("Computer/1", "RequestRefresh", ExecRequest::default())
                .await
                .unwrap_err(),
            Error::NotFound(_)
        ));

        let mut c = ManagedObject::new("Computer");
        c.set("ResourceID", 42);
        let path = store.seed(c);

        let resp = store
            .exec_method(&path, "RequestRefresh", ExecRequest::default().with("Full", true))
            .await
            .unwrap();
        assert_eq!(resp.return_value, 0);

        let calls = store.method_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "RequestRefresh");
        assert_eq!(calls[0].params["Full"], serde_json::json!(true));
    }
}

//! Collections — named groups of managed computers, the unit every
//! advertisement targets.

use serde::Serialize;

use sw_domain::error::Result;
use sw_store::{ExecRequest, ManagedObject, ManagementStore, QueryRequest};

use crate::computers;
use crate::util::{find_one, save_and_fetch, set_opt};

const CLASS: &str = "Collection";
const MEMBER_CLASS: &str = "CollectionMember";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub collection_id: String,
    pub name: String,
    pub comment: Option<String>,
    pub member_count: Option<u32>,
}

impl Collection {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        Ok(Self {
            collection_id: obj.require_str("CollectionID")?.to_owned(),
            name: obj.require_str("Name")?.to_owned(),
            comment: obj.get_str("Comment").map(str::to_owned),
            member_count: obj.get_u32("MemberCount"),
        })
    }
}

/// One direct membership record inside a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionMember {
    pub resource_id: u32,
    pub name: Option<String>,
    pub domain: Option<String>,
}

impl CollectionMember {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        Ok(Self {
            resource_id: obj.require_u32("ResourceID")?,
            name: obj.get_str("Name").map(str::to_owned),
            domain: obj.get_str("Domain").map(str::to_owned),
        })
    }
}

// ── queries ──────────────────────────────────────────────────────────

pub async fn list_collections(store: &dyn ManagementStore) -> Result<Vec<Collection>> {
    let objs = store.query(QueryRequest::all(CLASS)).await?;
    objs.iter().map(Collection::from_object).collect()
}

pub async fn get_collection(store: &dyn ManagementStore, id: &str) -> Result<Collection> {
    let obj = collection_object(store, id).await?;
    Collection::from_object(&obj)
}

/// Collections whose `Name` matches exactly. Names are not unique in
/// the provider, so this can return more than one.
pub async fn find_collections_by_name(
    store: &dyn ManagementStore,
    name: &str,
) -> Result<Vec<Collection>> {
    let objs = store
        .query(QueryRequest::all(CLASS).with("Name", name))
        .await?;
    objs.iter().map(Collection::from_object).collect()
}

pub async fn collection_members(
    store: &dyn ManagementStore,
    id: &str,
) -> Result<Vec<CollectionMember>> {
    // Look the collection up first so an unknown ID reads as NotFound
    // rather than an empty membership.
    collection_object(store, id).await?;
    let objs = store
        .query(QueryRequest::all(MEMBER_CLASS).with("CollectionID", id))
        .await?;
    objs.iter().map(CollectionMember::from_object).collect()
}

// ── mutations ────────────────────────────────────────────────────────

pub async fn create_collection(
    store: &dyn ManagementStore,
    name: &str,
    comment: Option<&str>,
) -> Result<Collection> {
    let mut obj = store.create_instance(CLASS).await?;
    obj.set("Name", name);
    obj.set("OwnedByThisSite", true);
    set_opt(&mut obj, "Comment", comment);

    let stored = save_and_fetch(store, &obj).await?;
    let view = Collection::from_object(&stored)?;
    tracing::debug!(collection_id = %view.collection_id, name, "collection created");
    Ok(view)
}

pub async fn delete_collection(store: &dyn ManagementStore, id: &str) -> Result<()> {
    let obj = collection_object(store, id).await?;
    store.delete(obj.require_path()?).await
}

/// Add a computer to a collection with a direct membership rule.
///
/// When `rule_name` is omitted the rule is named after the computer,
/// which costs one extra lookup.
pub async fn add_direct_rule(
    store: &dyn ManagementStore,
    collection_id: &str,
    resource_id: u32,
    rule_name: Option<&str>,
) -> Result<CollectionMember> {
    collection_object(store, collection_id).await?;

    let mut member = store.create_instance(MEMBER_CLASS).await?;
    member.set("CollectionID", collection_id);
    member.set("ResourceID", resource_id);
    match rule_name {
        Some(name) => member.set("Name", name),
        None => {
            let computer = computers::get_computer(store, resource_id).await?;
            member.set("Name", computer.name.as_str());
            set_opt(&mut member, "Domain", computer.domain.as_deref());
        }
    }

    let stored = save_and_fetch(store, &member).await?;
    CollectionMember::from_object(&stored)
}

/// Remove a computer's direct membership record from a collection.
pub async fn remove_direct_rule(
    store: &dyn ManagementStore,
    collection_id: &str,
    resource_id: u32,
) -> Result<()> {
    let member = find_one(
        store,
        QueryRequest::all(MEMBER_CLASS)
            .with("CollectionID", collection_id)
            .with("ResourceID", resource_id),
        format!("resource {resource_id} in collection {collection_id}"),
    )
    .await?;
    store.delete(member.require_path()?).await
}

/// Ask the site to re-evaluate the collection's membership. Returns the
/// provider's return code unchanged.
pub async fn request_refresh(store: &dyn ManagementStore, id: &str) -> Result<i64> {
    let obj = collection_object(store, id).await?;
    let resp = store
        .exec_method(obj.require_path()?, "RequestRefresh", ExecRequest::default())
        .await?;
    Ok(resp.return_value)
}

async fn collection_object(store: &dyn ManagementStore, id: &str) -> Result<ManagedObject> {
    find_one(
        store,
        QueryRequest::all(CLASS).with("CollectionID", id),
        format!("collection {id}"),
    )
    .await
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use sw_domain::error::Error;
    use sw_store::MemoryStore;

    fn seeded_computer(store: &MemoryStore, id: u32, name: &str) {
        let mut c = ManagedObject::new("Computer");
        c.set("ResourceID", id);
        c.set("Name", name);
        c.set("Domain", "LAB");
        store.seed(c);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::with_provider_classes();
        let created = create_collection(&store, "All Lab PCs", Some("lab room 2"))
            .await
            .unwrap();

        let fetched = get_collection(&store, &created.collection_id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.comment.as_deref(), Some("lab room 2"));
    }

    #[tokio::test]
    async fn find_by_name_can_match_several() {
        let store = MemoryStore::with_provider_classes();
        create_collection(&store, "Pilot", None).await.unwrap();
        create_collection(&store, "Pilot", None).await.unwrap();
        create_collection(&store, "Everyone", None).await.unwrap();

        let found = find_collections_by_name(&store, "Pilot").await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn membership_rules_add_and_remove() {
        let store = MemoryStore::with_provider_classes();
        seeded_computer(&store, 42, "LAB-PC-07");
        let coll = create_collection(&store, "Pilot", None).await.unwrap();

        let member = add_direct_rule(&store, &coll.collection_id, 42, None)
            .await
            .unwrap();
        assert_eq!(member.resource_id, 42);
        assert_eq!(member.name.as_deref(), Some("LAB-PC-07"));

        let members = collection_members(&store, &coll.collection_id).await.unwrap();
        assert_eq!(members.len(), 1);

        remove_direct_rule(&store, &coll.collection_id, 42).await.unwrap();
        let members = collection_members(&store, &coll.collection_id).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn explicit_rule_names_skip_the_computer_lookup() {
        let store = MemoryStore::with_provider_classes();
        let coll = create_collection(&store, "Pilot", None).await.unwrap();

        // Resource 900 does not exist; the explicit name keeps this from
        // needing a lookup.
        let member = add_direct_rule(&store, &coll.collection_id, 900, Some("imported"))
            .await
            .unwrap();
        assert_eq!(member.name.as_deref(), Some("imported"));
    }

    #[tokio::test]
    async fn members_of_an_unknown_collection_is_not_found() {
        let store = MemoryStore::with_provider_classes();
        assert!(matches!(
            collection_members(&store, "SW99999").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn refresh_surfaces_the_provider_return_code() {
        let store = MemoryStore::with_provider_classes();
        let coll = create_collection(&store, "Pilot", None).await.unwrap();

        let rc = request_refresh(&store, &coll.collection_id).await.unwrap();
        assert_eq!(rc, 0);

        let calls = store.method_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "RequestRefresh");
    }

    #[tokio::test]
    async fn delete_removes_the_collection_object() {
        let store = MemoryStore::with_provider_classes();
        let coll = create_collection(&store, "Pilot", None).await.unwrap();

        delete_collection(&store, &coll.collection_id).await.unwrap();
        assert!(matches!(
            get_collection(&store, &coll.collection_id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}

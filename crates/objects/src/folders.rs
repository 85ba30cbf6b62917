//! Console folders — the organizational tree objects live under.
//!
//! A folder holds objects of one type (`"Package"`, `"Advertisement"`,
//! ...); membership is a separate `FolderMember` record keyed by the
//! object's instance key.

use serde::Serialize;

use sw_domain::error::Result;
use sw_store::{ManagedObject, ManagementStore, QueryRequest};

use crate::util::{find_one, save_and_fetch};

const CLASS: &str = "Folder";
const MEMBER_CLASS: &str = "FolderMember";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub container_node_id: u32,
    pub name: String,
    pub object_type: String,
    pub parent_node_id: Option<u32>,
}

impl Folder {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        Ok(Self {
            container_node_id: obj.require_u32("ContainerNodeID")?,
            name: obj.require_str("Name")?.to_owned(),
            object_type: obj.require_str("ObjectType")?.to_owned(),
            parent_node_id: obj.get_u32("ParentContainerNodeID"),
        })
    }
}

/// List folders, optionally only those holding one object type.
pub async fn list_folders(
    store: &dyn ManagementStore,
    object_type: Option<&str>,
) -> Result<Vec<Folder>> {
    let mut req = QueryRequest::all(CLASS);
    if let Some(ty) = object_type {
        req = req.with("ObjectType", ty);
    }
    let objs = store.query(req).await?;
    objs.iter().map(Folder::from_object).collect()
}

pub async fn create_folder(
    store: &dyn ManagementStore,
    name: &str,
    object_type: &str,
    parent: Option<u32>,
) -> Result<Folder> {
    let mut obj = store.create_instance(CLASS).await?;
    obj.set("Name", name);
    obj.set("ObjectType", object_type);
    if let Some(p) = parent {
        folder_object(store, p).await?;
        obj.set("ParentContainerNodeID", p);
    }

    let stored = save_and_fetch(store, &obj).await?;
    Folder::from_object(&stored)
}

/// File an object under a folder, replacing any previous placement.
pub async fn move_to_folder(
    store: &dyn ManagementStore,
    instance_key: &str,
    object_type: &str,
    target_folder: u32,
) -> Result<()> {
    let folder_obj = folder_object(store, target_folder).await?;
    let folder = Folder::from_object(&folder_obj)?;
    if folder.object_type != object_type {
        return Err(sw_domain::error::Error::Validation {
            field: "object_type",
            value: i64::from(target_folder),
            expected: "a folder holding this object type",
        });
    }

    let existing = store
        .query(
            QueryRequest::all(MEMBER_CLASS)
                .with("InstanceKey", instance_key)
                .with("ObjectType", object_type),
        )
        .await?;

    let mut member = match existing.into_iter().next() {
        Some(m) => m,
        None => {
            let mut m = store.create_instance(MEMBER_CLASS).await?;
            m.set("InstanceKey", instance_key);
            m.set("ObjectType", object_type);
            m
        }
    };
    member.set("ContainerNodeID", target_folder);
    store.put(&member).await?;
    Ok(())
}

pub async fn delete_folder(store: &dyn ManagementStore, container_node_id: u32) -> Result<()> {
    let obj = folder_object(store, container_node_id).await?;
    store.delete(obj.require_path()?).await
}

async fn folder_object(store: &dyn ManagementStore, id: u32) -> Result<ManagedObject> {
    find_one(
        store,
        QueryRequest::all(CLASS).with("ContainerNodeID", id),
        format!("folder {id}"),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_domain::error::Error;
    use sw_store::MemoryStore;

    #[tokio::test]
    async fn folders_nest_by_parent_id() {
        let store = MemoryStore::with_provider_classes();
        let top = create_folder(&store, "Rollouts", "Package", None).await.unwrap();
        let child = create_folder(&store, "2024", "Package", Some(top.container_node_id))
            .await
            .unwrap();

        assert_eq!(child.parent_node_id, Some(top.container_node_id));
        assert!(matches!(
            create_folder(&store, "orphan", "Package", Some(999)).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn list_filters_by_object_type() {
        let store = MemoryStore::with_provider_classes();
        create_folder(&store, "Rollouts", "Package", None).await.unwrap();
        create_folder(&store, "Campaigns", "Advertisement", None).await.unwrap();

        assert_eq!(list_folders(&store, None).await.unwrap().len(), 2);
        let pkg_only = list_folders(&store, Some("Package")).await.unwrap();
        assert_eq!(pkg_only.len(), 1);
        assert_eq!(pkg_only[0].name, "Rollouts");
    }

    #[tokio::test]
    async fn moving_twice_replaces_the_placement() {
        let store = MemoryStore::with_provider_classes();
        let a = create_folder(&store, "A", "Package", None).await.unwrap();
        let b = create_folder(&store, "B", "Package", None).await.unwrap();

        move_to_folder(&store, "SW00001", "Package", a.container_node_id)
            .await
            .unwrap();
        move_to_folder(&store, "SW00001", "Package", b.container_node_id)
            .await
            .unwrap();

        let members = store
            .query(QueryRequest::all("FolderMember").with("InstanceKey", "SW00001"))
            .await
            .unwrap();
        assert_eq!(members.len(), 1, "placement must be replaced, not duplicated");
        assert_eq!(
            members[0].get_u32("ContainerNodeID"),
            Some(b.container_node_id)
        );
    }

    #[tokio::test]
    async fn moving_into_a_mismatched_folder_is_rejected() {
        let store = MemoryStore::with_provider_classes();
        let ads = create_folder(&store, "Campaigns", "Advertisement", None).await.unwrap();

        assert!(matches!(
            move_to_folder(&store, "SW00001", "Package", ads.container_node_id)
                .await
                .unwrap_err(),
            Error::Validation { .. }
        ));
    }
}

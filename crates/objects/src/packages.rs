//! Packages — distributable software and its source location.

use serde::Serialize;

use sw_domain::error::Result;
use sw_store::{ManagedObject, ManagementStore, QueryRequest};

use crate::util::{find_one, save_and_fetch, set_opt};

const CLASS: &str = "Package";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub package_id: String,
    pub name: String,
    pub version: Option<String>,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
    pub source_path: Option<String>,
}

impl Package {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        Ok(Self {
            package_id: obj.require_str("PackageID")?.to_owned(),
            name: obj.require_str("Name")?.to_owned(),
            version: obj.get_str("Version").map(str::to_owned),
            manufacturer: obj.get_str("Manufacturer").map(str::to_owned),
            description: obj.get_str("Description").map(str::to_owned),
            source_path: obj.get_str("SourcePath").map(str::to_owned),
        })
    }
}

/// Fields for a new package; only the name is mandatory.
#[derive(Debug, Clone, Default)]
pub struct NewPackage<'a> {
    pub name: &'a str,
    pub version: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub description: Option<&'a str>,
    pub source_path: Option<&'a str>,
}

pub async fn list_packages(store: &dyn ManagementStore) -> Result<Vec<Package>> {
    let objs = store.query(QueryRequest::all(CLASS)).await?;
    objs.iter().map(Package::from_object).collect()
}

pub async fn get_package(store: &dyn ManagementStore, id: &str) -> Result<Package> {
    let obj = package_object(store, id).await?;
    Package::from_object(&obj)
}

pub async fn find_packages_by_name(
    store: &dyn ManagementStore,
    name: &str,
) -> Result<Vec<Package>> {
    let objs = store
        .query(QueryRequest::all(CLASS).with("Name", name))
        .await?;
    objs.iter().map(Package::from_object).collect()
}

pub async fn create_package(
    store: &dyn ManagementStore,
    new: NewPackage<'_>,
) -> Result<Package> {
    let mut obj = store.create_instance(CLASS).await?;
    obj.set("Name", new.name);
    set_opt(&mut obj, "Version", new.version);
    set_opt(&mut obj, "Manufacturer", new.manufacturer);
    set_opt(&mut obj, "Description", new.description);
    set_opt(&mut obj, "SourcePath", new.source_path);

    let stored = save_and_fetch(store, &obj).await?;
    let view = Package::from_object(&stored)?;
    tracing::debug!(package_id = %view.package_id, name = new.name, "package created");
    Ok(view)
}

pub async fn delete_package(store: &dyn ManagementStore, id: &str) -> Result<()> {
    let obj = package_object(store, id).await?;
    store.delete(obj.require_path()?).await
}

async fn package_object(store: &dyn ManagementStore, id: &str) -> Result<ManagedObject> {
    find_one(
        store,
        QueryRequest::all(CLASS).with("PackageID", id),
        format!("package {id}"),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_domain::error::Error;
    use sw_store::MemoryStore;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::with_provider_classes();
        let created = create_package(
            &store,
            NewPackage {
                name: "Office",
                version: Some("2024"),
                manufacturer: Some("Contoso"),
                source_path: Some(r"\\lab-srv-01\sources\office"),
                ..NewPackage::default()
            },
        )
        .await
        .unwrap();

        let fetched = get_package(&store, &created.package_id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.version.as_deref(), Some("2024"));
        assert!(fetched.description.is_none());
    }

    #[tokio::test]
    async fn list_and_find_see_created_packages() {
        let store = MemoryStore::with_provider_classes();
        create_package(&store, NewPackage { name: "Office", ..NewPackage::default() })
            .await
            .unwrap();
        create_package(&store, NewPackage { name: "Reader", ..NewPackage::default() })
            .await
            .unwrap();

        assert_eq!(list_packages(&store).await.unwrap().len(), 2);
        let found = find_packages_by_name(&store, "Reader").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Reader");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryStore::with_provider_classes();
        let pkg = create_package(&store, NewPackage { name: "Office", ..NewPackage::default() })
            .await
            .unwrap();

        delete_package(&store, &pkg.package_id).await.unwrap();
        assert!(matches!(
            get_package(&store, &pkg.package_id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}

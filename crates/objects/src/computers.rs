//! Computer records — the managed endpoints themselves.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use sw_domain::error::Result;
use sw_schedule::timestamp;
use sw_store::{ManagedObject, ManagementStore, QueryRequest};

use crate::util::{find_one, save_and_fetch};

const CLASS: &str = "Computer";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computer {
    pub resource_id: u32,
    pub name: String,
    pub domain: Option<String>,
    pub client_version: Option<String>,
    pub mac_address: Option<String>,
    /// Parsed from the store's timestamp encoding; `None` for machines
    /// that never reported a logon.
    pub last_logon: Option<DateTime<FixedOffset>>,
}

impl Computer {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        let last_logon = match obj.get_str("LastLogonTime") {
            Some(text) => Some(timestamp::from_store_timestamp(text)?),
            None => None,
        };
        Ok(Self {
            resource_id: obj.require_u32("ResourceID")?,
            name: obj.require_str("Name")?.to_owned(),
            domain: obj.get_str("Domain").map(str::to_owned),
            client_version: obj.get_str("ClientVersion").map(str::to_owned),
            mac_address: obj.get_str("MACAddress").map(str::to_owned),
            last_logon,
        })
    }
}

pub async fn get_computer(store: &dyn ManagementStore, resource_id: u32) -> Result<Computer> {
    let obj = find_one(
        store,
        QueryRequest::all(CLASS).with("ResourceID", resource_id),
        format!("computer {resource_id}"),
    )
    .await?;
    Computer::from_object(&obj)
}

/// Computers whose `Name` matches exactly. Rebuilt machines can leave
/// several records behind, so this returns every match.
pub async fn find_computers_by_name(
    store: &dyn ManagementStore,
    name: &str,
) -> Result<Vec<Computer>> {
    let objs = store
        .query(QueryRequest::all(CLASS).with("Name", name))
        .await?;
    objs.iter().map(Computer::from_object).collect()
}

/// Pre-create a computer record ahead of its first client contact, so
/// it can be collected and targeted immediately.
pub async fn import_computer(
    store: &dyn ManagementStore,
    name: &str,
    mac_address: &str,
) -> Result<Computer> {
    let mut obj = store.create_instance(CLASS).await?;
    obj.set("Name", name);
    obj.set("MACAddress", mac_address);

    let stored = save_and_fetch(store, &obj).await?;
    let view = Computer::from_object(&stored)?;
    tracing::debug!(resource_id = view.resource_id, name, "computer imported");
    Ok(view)
}

pub async fn delete_computer(store: &dyn ManagementStore, resource_id: u32) -> Result<()> {
    let obj = find_one(
        store,
        QueryRequest::all(CLASS).with("ResourceID", resource_id),
        format!("computer {resource_id}"),
    )
    .await?;
    store.delete(obj.require_path()?).await
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sw_domain::error::Error;
    use sw_store::MemoryStore;

    #[tokio::test]
    async fn import_then_get_round_trips() {
        let store = MemoryStore::with_provider_classes();
        let imported = import_computer(&store, "LAB-PC-07", "00:1A:2B:3C:4D:5E")
            .await
            .unwrap();

        let fetched = get_computer(&store, imported.resource_id).await.unwrap();
        assert_eq!(fetched, imported);
        assert_eq!(fetched.mac_address.as_deref(), Some("00:1A:2B:3C:4D:5E"));
        assert!(fetched.last_logon.is_none());
    }

    #[tokio::test]
    async fn last_logon_is_decoded_from_the_store_format() {
        let store = MemoryStore::with_provider_classes();
        let mut obj = ManagedObject::new("Computer");
        obj.set("ResourceID", 42);
        obj.set("Name", "LAB-PC-07");
        obj.set("LastLogonTime", "20240301093000.000000+000");
        store.seed(obj);

        let c = get_computer(&store, 42).await.unwrap();
        let expected = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .unwrap();
        assert_eq!(c.last_logon, Some(expected));
    }

    #[tokio::test]
    async fn a_corrupt_last_logon_surfaces_as_a_parse_error() {
        let store = MemoryStore::with_provider_classes();
        let mut obj = ManagedObject::new("Computer");
        obj.set("ResourceID", 42);
        obj.set("Name", "LAB-PC-07");
        obj.set("LastLogonTime", "not-a-timestamp");
        store.seed(obj);

        assert!(matches!(
            get_computer(&store, 42).await.unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[tokio::test]
    async fn find_by_name_returns_every_record() {
        let store = MemoryStore::with_provider_classes();
        import_computer(&store, "LAB-PC-07", "00:00:00:00:00:01").await.unwrap();
        import_computer(&store, "LAB-PC-07", "00:00:00:00:00:02").await.unwrap();

        let found = find_computers_by_name(&store, "LAB-PC-07").await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn delete_misses_with_not_found() {
        let store = MemoryStore::with_provider_classes();
        assert!(matches!(
            delete_computer(&store, 999).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}

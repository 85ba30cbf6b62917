//! Site discovery — which deployment sites the provider serves.

use serde::Serialize;

use sw_domain::error::Result;
use sw_store::{ManagedObject, ManagementStore, QueryRequest};

use crate::util::find_one;

const CLASS: &str = "Site";

/// One deployment site as the provider reports it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub site_code: String,
    pub site_name: Option<String>,
    pub server_name: Option<String>,
    pub version: Option<String>,
}

impl Site {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        Ok(Self {
            site_code: obj.require_str("SiteCode")?.to_owned(),
            site_name: obj.get_str("SiteName").map(str::to_owned),
            server_name: obj.get_str("ServerName").map(str::to_owned),
            version: obj.get_str("Version").map(str::to_owned),
        })
    }
}

pub async fn list_sites(store: &dyn ManagementStore) -> Result<Vec<Site>> {
    let objs = store.query(QueryRequest::all(CLASS)).await?;
    objs.iter().map(Site::from_object).collect()
}

pub async fn get_site(store: &dyn ManagementStore, code: &str) -> Result<Site> {
    let obj = find_one(
        store,
        QueryRequest::all(CLASS).with("SiteCode", code),
        format!("site {code}"),
    )
    .await?;
    Site::from_object(&obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_domain::error::Error;
    use sw_store::MemoryStore;

    fn site(code: &str, name: &str) -> ManagedObject {
        let mut obj = ManagedObject::new("Site");
        obj.set("SiteCode", code);
        obj.set("SiteName", name);
        obj.set("ServerName", format!("{code}-SRV-01"));
        obj.set("Version", "5.0.9128.1000");
        obj
    }

    #[tokio::test]
    async fn lists_every_site() {
        let store = MemoryStore::with_provider_classes();
        store.seed(site("LAB", "Lab site"));
        store.seed(site("HQ", "Headquarters"));

        let sites = list_sites(&store).await.unwrap();
        assert_eq!(sites.len(), 2);
        assert!(sites.iter().any(|s| s.site_code == "LAB"));
    }

    #[tokio::test]
    async fn gets_one_site_by_code() {
        let store = MemoryStore::with_provider_classes();
        store.seed(site("LAB", "Lab site"));

        let s = get_site(&store, "LAB").await.unwrap();
        assert_eq!(s.site_name.as_deref(), Some("Lab site"));
        assert_eq!(s.server_name.as_deref(), Some("LAB-SRV-01"));

        assert!(matches!(
            get_site(&store, "NOPE").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}

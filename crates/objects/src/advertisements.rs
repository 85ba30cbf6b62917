//! Advertisements — the assignment of a program to a collection,
//! optionally on a recurrence schedule.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use sw_domain::error::Result;
use sw_schedule::{timestamp, ScheduleBuilder, ScheduleToken};
use sw_store::{ManagedObject, ManagementStore, QueryRequest};

use crate::util::{find_one, save_and_fetch, set_opt};

const CLASS: &str = "Advertisement";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advertisement {
    pub advertisement_id: String,
    pub name: String,
    pub package_id: String,
    pub program_name: String,
    pub collection_id: String,
    /// When the advertisement becomes visible to clients.
    pub present_time: Option<DateTime<FixedOffset>>,
    pub has_schedule: bool,
}

impl Advertisement {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        let present_time = match obj.get_str("PresentTime") {
            Some(text) => Some(timestamp::from_store_timestamp(text)?),
            None => None,
        };
        Ok(Self {
            advertisement_id: obj.require_str("AdvertisementID")?.to_owned(),
            name: obj.require_str("Name")?.to_owned(),
            package_id: obj.require_str("PackageID")?.to_owned(),
            program_name: obj.require_str("ProgramName")?.to_owned(),
            collection_id: obj.require_str("CollectionID")?.to_owned(),
            present_time,
            has_schedule: obj.get_bool("AssignedScheduleEnabled").unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewAdvertisement<'a> {
    pub name: &'a str,
    pub package_id: &'a str,
    pub program_name: &'a str,
    pub collection_id: &'a str,
    pub comment: Option<&'a str>,
    pub present_time: Option<DateTime<FixedOffset>>,
}

pub async fn list_advertisements(store: &dyn ManagementStore) -> Result<Vec<Advertisement>> {
    let objs = store.query(QueryRequest::all(CLASS)).await?;
    objs.iter().map(Advertisement::from_object).collect()
}

pub async fn get_advertisement(store: &dyn ManagementStore, id: &str) -> Result<Advertisement> {
    let obj = advertisement_object(store, id).await?;
    Advertisement::from_object(&obj)
}

pub async fn find_advertisements_by_name(
    store: &dyn ManagementStore,
    name: &str,
) -> Result<Vec<Advertisement>> {
    let objs = store
        .query(QueryRequest::all(CLASS).with("Name", name))
        .await?;
    objs.iter().map(Advertisement::from_object).collect()
}

/// Create an advertisement, optionally pinned to a recurrence schedule.
///
/// A supplied token goes through the schedule builder first — the
/// populated schedule instance is embedded under `AssignedSchedule` —
/// so an invalid token fails the whole operation before the
/// advertisement instance is ever requested.
pub async fn create_advertisement(
    store: &dyn ManagementStore,
    new: NewAdvertisement<'_>,
    schedule: Option<&ScheduleToken>,
) -> Result<Advertisement> {
    let schedule_instance = match schedule {
        Some(token) => Some(ScheduleBuilder::new(store).instantiate(token).await?),
        None => None,
    };

    let mut obj = store.create_instance(CLASS).await?;
    obj.set("Name", new.name);
    obj.set("PackageID", new.package_id);
    obj.set("ProgramName", new.program_name);
    obj.set("CollectionID", new.collection_id);
    set_opt(&mut obj, "Comment", new.comment);
    if let Some(t) = new.present_time {
        obj.set("PresentTime", timestamp::to_store_timestamp(t)?);
    }
    match schedule_instance {
        Some(instance) => {
            obj.set("AssignedSchedule", serde_json::to_value(&instance)?);
            obj.set("AssignedScheduleEnabled", true);
        }
        None => obj.set("AssignedScheduleEnabled", false),
    }

    let stored = save_and_fetch(store, &obj).await?;
    let view = Advertisement::from_object(&stored)?;
    tracing::debug!(
        advertisement_id = %view.advertisement_id,
        name = new.name,
        scheduled = view.has_schedule,
        "advertisement created"
    );
    Ok(view)
}

pub async fn delete_advertisement(store: &dyn ManagementStore, id: &str) -> Result<()> {
    let obj = advertisement_object(store, id).await?;
    store.delete(obj.require_path()?).await
}

async fn advertisement_object(store: &dyn ManagementStore, id: &str) -> Result<ManagedObject> {
    find_one(
        store,
        QueryRequest::all(CLASS).with("AdvertisementID", id),
        format!("advertisement {id}"),
    )
    .await
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

    fn start() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .unwrap()
    }

    fn new_advert<'a>() -> NewAdvertisement<'a> {
        NewAdvertisement {
            name: "Office rollout",
            package_id: "SW00001",
            program_name: "Silent Install",
            collection_id: "SW00002",
            comment: None,
            present_time: Some(start()),
        }
    }

    #[tokio::test]
    async fn create_without_a_schedule() {
        let store = MemoryStore::with_provider_classes();
        let ad = create_advertisement(&store, new_advert(), None).await.unwrap();

        assert!(!ad.has_schedule);
        assert_eq!(ad.present_time, Some(start()));

        let fetched = get_advertisement(&store, &ad.advertisement_id).await.unwrap();
        assert_eq!(fetched, ad);
    }

    #[tokio::test]
    async fn create_embeds_the_populated_schedule_instance() {
        let store = MemoryStore::with_provider_classes();
        let token = ScheduleToken::recur_weekly(3, 1, 2, 8, 0, true, start()).unwrap();

        let ad = create_advertisement(&store, new_advert(), Some(&token))
            .await
            .unwrap();
        assert!(ad.has_schedule);

        // The raw object carries the full schedule instance.
        let raw = find_one(
            &store,
            QueryRequest::all("Advertisement").with("AdvertisementID", ad.advertisement_id.as_str()),
            "advert",
        )
        .await
        .unwrap();
        let embedded = raw.get("AssignedSchedule").unwrap();
        assert_eq!(embedded["class"], "ScheduleWeekly");
        assert_eq!(embedded["properties"]["Day"], 3);
        assert_eq!(
            embedded["properties"]["StartTime"],
            "20240301093000.000000+000"
        );
    }

    #[tokio::test]
    async fn an_invalid_token_fails_before_any_instance_exists() {
        let store = MemoryStore::with_provider_classes();
        let raw = serde_json::json!({
            "kind": "recur_weekly",
            "day": 8,
            "day_duration": 1,
            "for_number_of_weeks": 2,
            "hour_duration": 8,
            "minute_duration": 0,
            "is_gmt": false,
            "start_time": "2024-03-01T09:30:00+00:00",
        });
        let token: ScheduleToken = serde_json::from_value(raw).unwrap();

        let err = create_advertisement(&store, new_advert(), Some(&token))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { field: "day", .. }));
        assert_eq!(store.created_count(), 0);
        assert!(list_advertisements(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryStore::with_provider_classes();
        let ad = create_advertisement(&store, new_advert(), None).await.unwrap();

        delete_advertisement(&store, &ad.advertisement_id).await.unwrap();
        assert!(matches!(
            get_advertisement(&store, &ad.advertisement_id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}

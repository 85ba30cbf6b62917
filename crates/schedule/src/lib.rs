//! `sw-schedule` — recurrence descriptors for distribution scheduling.
//!
//! The provider times every distribution and maintenance window with a
//! schedule instance of one of five remote classes. This crate owns the
//! typed descriptors for those classes ([`ScheduleToken`]), the
//! validation of their field ranges, the fixed-width [`timestamp`]
//! format their `StartTime` fields use on the wire, and the
//! [`ScheduleBuilder`] that turns parameters into populated, un-persisted
//! store instances.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use sw_schedule::ScheduleBuilder;
//! use sw_store::MemoryStore;
//!
//! # async fn example() -> sw_domain::error::Result<()> {
//! let store = MemoryStore::with_provider_classes();
//! let builder = ScheduleBuilder::new(&store);
//!
//! // Every Wednesday at 08:00, valid for one day, repeating bi-weekly.
//! let start = "2024-03-06T08:00:00+00:00".parse().map_err(|e| {
//!     sw_domain::error::Error::Parse(format!("start time: {e}"))
//! })?;
//! let instance = builder.recur_weekly(4, 1, 2, 8, 0, true, start).await?;
//!
//! println!("built a {} instance", instance.class);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod timestamp;
pub mod token;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use builder::ScheduleBuilder;
pub use timestamp::{from_store_timestamp, to_store_timestamp};
pub use token::ScheduleToken;

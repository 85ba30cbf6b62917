//! `sw-objects` — typed pass-throughs over the provider's object model.
//!
//! Every module here is glue in the same shape: a serde-visible view
//! struct built from a [`ManagedObject`](sw_store::ManagedObject), plus
//! free async functions that each cost one store round-trip (plus
//! instance creation where something new is made). No caching, no local
//! state, no retry — a store failure surfaces to the caller unchanged.
//!
//! The one place with real coupling is [`advertisements`], which feeds
//! an optional schedule token through `sw-schedule`'s builder and embeds
//! the populated instance in the advertisement.

pub mod advertisements;
pub mod collections;
pub mod computers;
pub mod folders;
pub mod packages;
pub mod programs;
pub mod sites;
pub mod triggers;

mod util;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use advertisements::{Advertisement, NewAdvertisement};
pub use collections::{Collection, CollectionMember};
pub use computers::Computer;
pub use folders::Folder;
pub use packages::{NewPackage, Package};
pub use programs::{NewProgram, Program};
pub use sites::Site;
pub use triggers::ClientAction;

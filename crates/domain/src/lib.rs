//! Shared domain types for Sitewrench: the error taxonomy and the
//! configuration model. Everything else in the workspace depends on this
//! crate and nothing here depends on the store or the network.

pub mod config;
pub mod error;

//! Sitewrench command-line internals.
//!
//! The binary is a thin dispatch layer: [`cli`] holds the clap command
//! tree plus one module per command family, and [`context`] resolves
//! the effective configuration and opens the store connection. All
//! domain behavior lives in `sw-objects` and `sw-schedule`.

pub mod cli;
pub mod context;

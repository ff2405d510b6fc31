//! Armada - batch operations over an SSH host inventory
//!
//! Resolves label-filtered host inventories through an on-disk parse
//! cache, so unchanged inventory files are never re-parsed between
//! invocations.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod probe;
pub mod secret;

pub use error::{ArmadaError, ArmadaResult};

//! Core library for CraftSwap, a Minecraft instance switcher.
//!
//! An instance is a self-contained copy of a `.minecraft` directory tree.
//! Exactly one instance can be active at a time: activation points the live
//! Minecraft path at the instance via a symlink, after moving any real
//! directory found there into a single backup slot. The active instance is
//! never recorded anywhere; it is re-derived from the symlink on every
//! query, so the tool cannot drift out of sync with the filesystem.
//!
//! Components:
//! - [`settings`]: the three governing paths and their persistence
//! - [`instance`]: create/list/inspect/delete over the instances root
//! - [`activation`]: the symlink/backup/restore swap
//! - [`stats`]: derived per-instance counts and listings

pub mod activation;
pub mod error;
pub mod instance;
pub mod settings;
pub mod stats;

pub use activation::{Activation, DEFAULT_INSTANCE};
pub use error::{Error, Result};
pub use instance::{Instance, InstanceDetail, InstanceStore, ESSENTIAL_DIRS};
pub use settings::Settings;

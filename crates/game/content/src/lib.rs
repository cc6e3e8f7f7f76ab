//! Data-driven map content and loaders.
//!
//! This crate reads development and test data for the visibility core:
//! - Map layouts and observer placement (RON)
//! - Vision configuration (TOML)
//!
//! Loaded maps implement [`sight_core::RecordSource`], standing in for the
//! record store the surrounding application would normally provide.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader, MapRecords};

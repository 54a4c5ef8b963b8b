//! Lockfile types and persistence.
//!
//! Records which skills are installed in a scope and where they came from.

pub mod store;
pub mod types;

pub use store::LockfileStore;
pub use types::{
    INSTALLED_VERSION, MANIFEST_VERSION, Manifest, ManifestEntry, ManifestSource, SourceType,
};

//! On-disk cache of parsed inventories
//!
//! Re-parsing an unchanged inventory on every invocation is wasted work, so
//! parsed instance sequences are serialized to artifacts under the cache
//! dir and tracked by a single index document keyed on inventory path.
//!
//! # Decision flow
//!
//! | State | Condition | Action |
//! |-------|-----------|--------|
//! | Disabled | `use_cache` false | parse fresh; index untouched |
//! | Miss | path not in index | parse, write artifact, append entry |
//! | Fresh | stored mtime == current mtime | load artifact |
//! | Stale | mtimes differ, or artifact unusable | parse, write new artifact, update entry in place |
//!
//! Entries are never evicted; the index grows by one entry per distinct
//! inventory path. Artifact names carry a random token so refreshes never
//! overwrite a prior artifact.

pub mod index;
pub mod naming;
pub mod resolver;

pub use index::{Cache, CacheIndex, CacheLocator};
pub use naming::artifact_file_name;
pub use resolver::{file_mod_time, load_artifact, Resolver};

//! # Flatfile Records
//!
//! A small record-management backend: three related collections (people,
//! catalog items, and orders linking the two) each persisted as a JSON array
//! in its own flat file.
//!
//! ## Features
//!
//! - **One file per collection**: pretty-printed JSON arrays, replaced whole on every write
//! - **Stateless handles**: every operation reloads the file, nothing is cached between calls
//! - **Fail-open reads**: a missing or corrupt file is an empty collection plus a warning
//! - **Explicit partial updates**: a per-field policy table decides which supplied values overwrite
//! - **Swappable backends**: file storage for production, in-memory storage for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use flatfile_records::{AppStoreState, ItemPatch};
//!
//! let state = AppStoreState::in_memory();
//!
//! let pen = state.items.insert(ItemPatch {
//!     name: Some("Pen".to_string()),
//!     price: Some(1.5),
//!     ..Default::default()
//! })?;
//! assert_eq!(pen.id, 1);
//! assert_eq!(pen.stock, 0);
//!
//! let restocked = state.items.update_by_id(pen.id, ItemPatch {
//!     stock: Some(50),
//!     ..Default::default()
//! })?;
//! assert_eq!(restocked.stock, 50);
//! # Ok::<(), flatfile_records::AppResponse>(())
//! ```
//!
//! ## Operations
//!
//! Each collection handle ([`People`], [`Items`], [`Orders`]) is a
//! [`RecordStore`] and offers:
//!
//! - [`RecordStore::list`] - all records in stored order
//! - [`RecordStore::get`] - one record by id
//! - [`RecordStore::insert`] - create from a partial record, assigning the id and defaults
//! - [`RecordStore::update_by_id`] - merge a partial record into a stored one
//! - [`RecordStore::delete_by_id`] - remove a record, returning what was removed
//! - [`RecordStore::list_by_owner`] - orders of one person (orders only)
//!
//! ## Concurrency
//!
//! Handles hold no locks. Two mutations racing on one collection each load,
//! modify and write the full file; the second write silently replaces the
//! first. Callers that need stronger guarantees must serialize their writes.

pub mod app_response;
pub mod app_store_state;
pub mod field_policy;
pub mod items;
pub mod orders;
pub mod people;
pub mod record_model;
pub mod record_store;
pub mod snapshot_storage;
pub mod store_config;

pub use crate::app_response::AppResponse;
pub use crate::app_store_state::AppStoreState;
pub use crate::items::{Item, ItemPatch, Items};
pub use crate::orders::{Order, OrderPatch, Orders};
pub use crate::people::{People, Person, PersonPatch};
pub use crate::record_model::{Record, RecordId};
pub use crate::record_store::RecordStore;
pub use crate::snapshot_storage::{JsonFileStorage, MemoryStorage, SnapshotStorage};
pub use crate::store_config::StoreConfig;

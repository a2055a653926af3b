//! Generic CRUD over one file-backed collection.
//!
//! Every operation reads the current snapshot, works on an in-memory copy and,
//! for mutations, writes the whole collection back. Nothing is cached between
//! calls and nothing is locked: two mutations racing on the same collection
//! each write their own snapshot, and the later write wins.

use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::app_response::AppResponse;
use crate::field_policy::{merge_patch, missing_required};
use crate::record_model::{InsertContext, Record, RecordId};
use crate::snapshot_storage::{JsonFileStorage, MemoryStorage, SnapshotStorage};

pub struct RecordStore<R: Record> {
    storage: Arc<dyn SnapshotStorage>,
    clock: fn() -> NaiveDate,
    _record: PhantomData<fn() -> R>,
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

impl<R: Record> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            clock: self.clock,
            _record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("kind", &R::KIND)
            .field("location", &self.storage.location())
            .finish()
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self {
            storage,
            clock: utc_today,
            _record: PhantomData,
        }
    }

    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStorage::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Replaces the source of insert dates.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn storage(&self) -> &Arc<dyn SnapshotStorage> {
        &self.storage
    }

    /// Reads the whole collection.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty collection
    /// and a warning, never an error.
    pub fn load_all(&self) -> Vec<R> {
        let bytes = match self.storage.read_snapshot() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Error reading {} collection from {}: {e}", R::KIND, self.storage.location());
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<R>>(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!("Error parsing {} collection from {}: {e}", R::KIND, self.storage.location());
                Vec::new()
            }
        }
    }

    /// Overwrites the stored collection with `records` in one write.
    ///
    /// Returns `false` on any failure; the failure is logged, not raised.
    pub fn save_all(&self, records: &[R]) -> bool {
        let bytes = match serde_json::to_vec_pretty(records) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Error serializing {} collection: {e}", R::KIND);
                return false;
            }
        };

        match self.storage.write_snapshot(&bytes) {
            Ok(()) => true,
            Err(e) => {
                warn!("Error writing {} collection to {}: {e}", R::KIND, self.storage.location());
                false
            }
        }
    }

    pub fn list(&self) -> Vec<R> {
        self.load_all()
    }

    pub fn find_by_id(&self, id: RecordId) -> Option<R> {
        self.load_all().into_iter().find(|record| record.id() == id)
    }

    pub fn get(&self, id: RecordId) -> Result<R, AppResponse> {
        self.find_by_id(id).ok_or_else(|| AppResponse::not_found(R::KIND, id))
    }

    /// Records matching `predicate`, in stored order.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<R>
    where
        P: FnMut(&R) -> bool,
    {
        self.load_all().into_iter().filter(|record| predicate(record)).collect()
    }

    /// Deserializes caller JSON into a partial record.
    ///
    /// Type mismatches (a string price, a list owner id) are validation errors.
    pub fn parse_patch(&self, input: JsonValue) -> Result<R::Patch, AppResponse> {
        serde_json::from_value(input)
            .map_err(|e| AppResponse::ValidationError(format!("Invalid {} fields: {e}", R::KIND)))
    }

    pub fn insert(&self, patch: R::Patch) -> Result<R, AppResponse> {
        let input = to_object(&patch)?;
        let missing = missing_required(R::FIELDS, &input);
        if !missing.is_empty() {
            debug!("Rejected {} insert, missing {:?}", R::KIND, missing);
            return Err(R::required_fields_error());
        }

        let mut records = self.load_all();
        let id = next_id(&records).ok_or_else(|| {
            warn!("No {} id left above {}", R::KIND, RecordId::MAX);
            AppResponse::StorageError(format!("Error saving {}: id space exhausted", R::KIND))
        })?;
        let ctx = InsertContext {
            id,
            today: (self.clock)(),
        };
        let record = R::create(ctx, patch)?;

        records.push(record.clone());
        self.persist(&records, "saving")?;
        Ok(record)
    }

    /// Applies `patch` to the record with `id` following [`Record::FIELDS`].
    pub fn update_by_id(&self, id: RecordId, patch: R::Patch) -> Result<R, AppResponse> {
        let mut records = self.load_all();
        let index = position_of(&records, id).ok_or_else(|| AppResponse::not_found(R::KIND, id))?;

        let patch = to_object(&patch)?;
        let mut merged = to_object(&records[index])?;
        let applied = merge_patch(R::FIELDS, &mut merged, &patch);
        debug!("Updating {} {id}, fields {:?}", R::KIND, applied);

        let updated: R = serde_json::from_value(JsonValue::Object(merged))
            .map_err(|e| AppResponse::ValidationError(format!("Invalid {} update: {e}", R::KIND)))?;
        records[index] = updated.clone();

        self.persist(&records, "updating")?;
        Ok(updated)
    }

    /// Removes the record with `id` and returns it as it was before removal.
    pub fn delete_by_id(&self, id: RecordId) -> Result<R, AppResponse> {
        let mut records = self.load_all();
        let index = position_of(&records, id).ok_or_else(|| AppResponse::not_found(R::KIND, id))?;
        let removed = records.remove(index);

        self.persist(&records, "deleting")?;
        Ok(removed)
    }

    fn persist(&self, records: &[R], action: &str) -> Result<(), AppResponse> {
        if self.save_all(records) {
            Ok(())
        } else {
            Err(AppResponse::StorageError(format!("Error {action} {}", R::KIND)))
        }
    }
}

/// `1 + max(existing ids)`, or `1` for an empty collection.
///
/// Deleting the highest id makes it available again. `None` when the
/// highest id is already `RecordId::MAX`.
pub fn next_id<R: Record>(records: &[R]) -> Option<RecordId> {
    match records.iter().map(R::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

fn position_of<R: Record>(records: &[R], id: RecordId) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, JsonValue>, AppResponse> {
    match serde_json::to_value(value)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(AppResponse::ValidationError(format!("Expected a JSON object, got {other}"))),
    }
}

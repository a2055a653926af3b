//! Record model shared by every collection.
//!
//! This module defines the [`Record`] trait that a collection's record type
//! implements to be managed by a [`RecordStore`](crate::record_store::RecordStore).
//! A record is a serde-serializable struct carrying an integer `id` plus its
//! collection-specific fields; its partial counterpart ([`Record::Patch`])
//! carries the same fields as `Option`s and is used both to create and to
//! update records.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::field_policy::FieldRule;

/// Integer identifier of a record, unique within its collection.
pub type RecordId = u64;

/// Values the store supplies when a record is created.
///
/// Records never receive these from caller input; the store computes them for
/// each insert.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use flatfile_records::record_model::InsertContext;
///
/// let ctx = InsertContext {
///     id: 4,
///     today: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
/// };
/// assert_eq!(ctx.id, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertContext {
    /// Identifier assigned to the new record (`1 + max(existing ids)`, or `1`).
    pub id: RecordId,

    /// Calendar date (UTC) of the insert.
    pub today: NaiveDate,
}

/// A record type stored in one homogeneous collection.
///
/// Implementors describe their shape to the generic store:
///
/// - **KIND**: singular, human-readable name used in messages ("person", "item")
/// - **FIELDS**: the per-field policy table driving required-field checks and
///   partial-update merging
/// - **REQUIRED_MESSAGE**: the validation message returned when a required
///   field is missing
/// - **create**: builds a full record from a validated partial record,
///   filling defaults
///
/// # Serialization
///
/// Both the record and its patch serialize to JSON objects using the on-disk
/// field names. Patches must skip `None` fields when serializing, otherwise
/// the merge step would treat them as supplied.
pub trait Record: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    /// Partial record accepted by insert and update.
    type Patch: Serialize + DeserializeOwned + std::fmt::Debug;

    const KIND: &'static str;

    const FIELDS: &'static [FieldRule];

    const REQUIRED_MESSAGE: &'static str;

    fn id(&self) -> RecordId;

    /// Builds a new record from `patch`, applying insert-time defaults.
    ///
    /// Called only after the store has checked [`Record::FIELDS`]; the
    /// returned error covers the required fields regardless.
    fn create(ctx: InsertContext, patch: Self::Patch) -> Result<Self, AppResponse>;

    fn required_fields_error() -> AppResponse {
        AppResponse::ValidationError(Self::REQUIRED_MESSAGE.to_string())
    }
}

//! Orders linking a person to the items they bought.
//!
//! `status` is advisory: it starts as `"pending"` and any later string may
//! replace it. `createdDate` is stamped at insert and never read from input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::app_response::AppResponse;
use crate::field_policy::{FieldRule, Requirement, UpdateTrigger};
use crate::record_model::{InsertContext, Record, RecordId};
use crate::record_store::RecordStore;

pub type Orders = RecordStore<Order>;

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    /// Id of the owning person. Stored as given, not checked against People.
    pub owner_id: RecordId,
    /// `{itemId, quantity}` entries, kept opaque.
    pub line_items: Vec<JsonValue>,
    pub total_amount: f64,
    pub status: String,
    pub created_date: NaiveDate,
    #[serde(default)]
    pub shipping_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
}

const ORDER_FIELDS: &[FieldRule] = &[
    FieldRule::required("ownerId", Requirement::Present, UpdateTrigger::Presence),
    FieldRule::required("lineItems", Requirement::Present, UpdateTrigger::Presence),
    FieldRule::required("totalAmount", Requirement::Present, UpdateTrigger::Presence),
    FieldRule::optional("status", UpdateTrigger::Truthiness),
    FieldRule::optional("shippingAddress", UpdateTrigger::Truthiness),
];

impl Record for Order {
    type Patch = OrderPatch;

    const KIND: &'static str = "order";
    const FIELDS: &'static [FieldRule] = ORDER_FIELDS;
    const REQUIRED_MESSAGE: &'static str = "ownerId, lineItems, and totalAmount are required";

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(ctx: InsertContext, patch: OrderPatch) -> Result<Self, AppResponse> {
        let (Some(owner_id), Some(line_items), Some(total_amount)) =
            (patch.owner_id, patch.line_items, patch.total_amount)
        else {
            return Err(Self::required_fields_error());
        };
        // A caller-supplied status is ignored until the first update.
        Ok(Order {
            id: ctx.id,
            owner_id,
            line_items,
            total_amount,
            status: DEFAULT_STATUS.to_string(),
            created_date: ctx.today,
            shipping_address: patch.shipping_address.unwrap_or_default(),
        })
    }
}

impl RecordStore<Order> {
    /// Orders placed by `owner_id`, in stored order.
    pub fn list_by_owner(&self, owner_id: RecordId) -> Vec<Order> {
        self.filter(|order| order.owner_id == owner_id)
    }
}

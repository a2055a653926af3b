//! Catalog items.

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::field_policy::{FieldRule, Requirement, UpdateTrigger};
use crate::record_model::{InsertContext, Record, RecordId};
use crate::record_store::RecordStore;

pub type Items = RecordStore<Item>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

// A price of 0 is a real price, so it only has to be present.
const ITEM_FIELDS: &[FieldRule] = &[
    FieldRule::required("name", Requirement::NonEmpty, UpdateTrigger::Truthiness),
    FieldRule::optional("description", UpdateTrigger::Truthiness),
    FieldRule::required("price", Requirement::Present, UpdateTrigger::Presence),
    FieldRule::optional("stock", UpdateTrigger::Presence),
];

impl Record for Item {
    type Patch = ItemPatch;

    const KIND: &'static str = "item";
    const FIELDS: &'static [FieldRule] = ITEM_FIELDS;
    const REQUIRED_MESSAGE: &'static str = "name and price are required";

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(ctx: InsertContext, patch: ItemPatch) -> Result<Self, AppResponse> {
        let (Some(name), Some(price)) = (patch.name, patch.price) else {
            return Err(Self::required_fields_error());
        };
        Ok(Item {
            id: ctx.id,
            name,
            description: patch.description.unwrap_or_default(),
            price,
            stock: patch.stock.unwrap_or_default(),
        })
    }
}

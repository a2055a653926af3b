//! People: the users who place orders.

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::field_policy::{FieldRule, Requirement, UpdateTrigger};
use crate::record_model::{InsertContext, Record, RecordId};
use crate::record_store::RecordStore;

pub type People = RecordStore<Person>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

const PERSON_FIELDS: &[FieldRule] = &[
    FieldRule::required("name", Requirement::NonEmpty, UpdateTrigger::Truthiness),
    FieldRule::required("email", Requirement::NonEmpty, UpdateTrigger::Truthiness),
    FieldRule::optional("phone", UpdateTrigger::Truthiness),
    FieldRule::optional("address", UpdateTrigger::Truthiness),
];

impl Record for Person {
    type Patch = PersonPatch;

    const KIND: &'static str = "person";
    const FIELDS: &'static [FieldRule] = PERSON_FIELDS;
    const REQUIRED_MESSAGE: &'static str = "name and email are required";

    fn id(&self) -> RecordId {
        self.id
    }

    fn create(ctx: InsertContext, patch: PersonPatch) -> Result<Self, AppResponse> {
        let (Some(name), Some(email)) = (patch.name, patch.email) else {
            return Err(Self::required_fields_error());
        };
        Ok(Person {
            id: ctx.id,
            name,
            email,
            phone: patch.phone.unwrap_or_default(),
            address: patch.address.unwrap_or_default(),
        })
    }
}

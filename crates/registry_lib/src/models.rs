//! The representations of the categories and the events sent to the clients.
//!
//! The [`Category`] and [`Event`] types are generic over the type of the entries of their
//! list of references. By default, these are the internal IDs of the linked rows, but the
//! listing operations resolve them to the linked entities themselves.

use chrono::NaiveDateTime;
use entity::{category, event};
use serde::Serialize;

use crate::validation::ValidationError;

/// A category, with its list of events.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category<E = i32> {
    /// The internal ID of the category.
    #[serde(rename = "_id")]
    pub internal_id: i32,
    /// The human-readable ID of the category.
    pub id: String,
    /// The name of the category.
    pub name: String,
    /// The optional description of the category.
    pub description: Option<String>,
    /// The file name of the category image.
    pub image: String,
    /// When the category was created.
    pub created_at: NaiveDateTime,
    /// The events of the category.
    pub event_list: Vec<E>,
}

impl<E> Category<E> {
    /// Returns the category from its row and its list of events.
    pub fn from_model(model: category::Model, event_list: Vec<E>) -> Self {
        Self {
            internal_id: model.id,
            id: model.human_id,
            name: model.name,
            description: model.description,
            image: model.image,
            created_at: model.created_at,
            event_list,
        }
    }
}

/// An event, with its list of categories.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event<C = i32> {
    /// The internal ID of the event.
    #[serde(rename = "_id")]
    pub internal_id: i32,
    /// The human-readable ID of the event.
    pub id: String,
    /// The name of the event.
    pub name: String,
    /// The optional description of the event.
    pub description: Option<String>,
    /// The start date of the event.
    pub start_date_time: NaiveDateTime,
    /// The duration of the event, in minutes.
    pub duration_in_minutes: i32,
    /// The end date of the event.
    pub end_date_time: NaiveDateTime,
    /// Whether the event is active.
    pub is_active: bool,
    /// The file name of the event image.
    pub image: String,
    /// The maximum number of attendees.
    pub capacity: i32,
    /// The remaining tickets.
    pub tickets_available: i32,
    /// The categories of the event.
    pub category_list: Vec<C>,
}

impl<C> Event<C> {
    /// Returns the event from its row and its list of categories.
    pub fn from_model(model: event::Model, category_list: Vec<C>) -> Self {
        Self {
            internal_id: model.id,
            id: model.human_id,
            name: model.name,
            description: model.description,
            start_date_time: model.start_date_time,
            duration_in_minutes: model.duration_in_minutes,
            end_date_time: model.end_date_time,
            is_active: model.is_active,
            image: model.image,
            capacity: model.capacity,
            tickets_available: model.tickets_available,
            category_list,
        }
    }
}

/// The outcome of the deletion of a category or an event.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// Whether the deletion was executed.
    pub acknowledged: bool,
    /// The amount of deleted rows, `0` or `1`.
    pub deleted_count: u64,
}

impl DeleteOutcome {
    /// The outcome of a deletion with an unknown ID.
    pub const NOT_FOUND: Self = Self {
        acknowledged: false,
        deleted_count: 0,
    };
}

/// The outcome of the update of a category or an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row was updated.
    Updated,
    /// No row has the provided ID, or a field was rejected without a specific message.
    Rejected,
    /// The submitted fields are invalid, nothing was written.
    Invalid(ValidationError),
}

impl UpdateOutcome {
    /// Returns the status message sent back to the client.
    pub fn status(&self) -> String {
        match self {
            Self::Updated => "Update successfully".to_owned(),
            Self::Rejected => "Invalid field or ID not found".to_owned(),
            Self::Invalid(e) => e.to_string(),
        }
    }
}

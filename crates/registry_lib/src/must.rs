//! This module contains utility functions used to retrieve some objects from the database,
//! that must exist.
//!
//! When such an object doesn't exist, the returned value isn't `Option::None` but the corresponding
//! error (for example, [`RegistryError::CategoryNotFound`]), so the caller can propagate it
//! with the `?` operator.

use entity::{category as category_entity, event as event_entity};
use sea_orm::ConnectionTrait;

use crate::{
    category,
    error::{RegistryError, RegistryResult},
    event,
};

/// Returns the category in the database bound to the provided human-ID.
pub async fn have_category<C: ConnectionTrait>(
    conn: &C,
    human_id: &str,
) -> RegistryResult<category_entity::Model> {
    category::get_by_human_id(conn, human_id)
        .await?
        .ok_or_else(|| RegistryError::CategoryNotFound(human_id.to_owned()))
}

/// Returns the event in the database bound to the provided human-ID.
pub async fn have_event<C: ConnectionTrait>(
    conn: &C,
    human_id: &str,
) -> RegistryResult<event_entity::Model> {
    event::get_by_human_id(conn, human_id)
        .await?
        .ok_or_else(|| RegistryError::EventNotFound(human_id.to_owned()))
}

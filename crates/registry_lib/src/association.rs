//! The maintenance of the links between the categories and their events.
//!
//! A category and an event are linked by a single row of the `category_events` table, which is
//! both the entry of the event in the event list of the category, and the entry of the category
//! in the category list of the event. Both lists are thus always consistent with each other.
//!
//! This module contains the operations that write to this table alongside the category and event
//! rows: linking a new event to its categories, and the two delete operations. The deletion of a
//! category cascades to all of its events, while the deletion of an event only unlinks it from its
//! categories.

use std::collections::HashMap;

use entity::{category, category_events, event};
use sea_orm::{
    ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _,
    QueryOrder as _, QuerySelect as _, TransactionTrait,
};

use crate::{
    counter::{Counter, CounterKind},
    error::RegistryResult,
    models::DeleteOutcome,
    sync,
};

/// The links between all the categories and the events, loaded in memory.
///
/// The lists are ordered by the internal IDs, so by creation date.
#[derive(Debug, Default)]
pub struct Links {
    by_category: HashMap<i32, Vec<i32>>,
    by_event: HashMap<i32, Vec<i32>>,
}

impl Links {
    /// Loads all the links from the database.
    pub async fn load<C: ConnectionTrait>(conn: &C) -> RegistryResult<Self> {
        let rows = category_events::Entity::find()
            .order_by_asc(category_events::Column::EventId)
            .order_by_asc(category_events::Column::CategoryId)
            .all(conn)
            .await?;
        Ok(Self::from_rows(rows))
    }

    fn from_rows(rows: Vec<category_events::Model>) -> Self {
        let mut links = Self::default();
        for row in rows {
            links
                .by_category
                .entry(row.category_id)
                .or_default()
                .push(row.event_id);
            links
                .by_event
                .entry(row.event_id)
                .or_default()
                .push(row.category_id);
        }
        links
    }

    /// Returns the internal IDs of the events of the provided category.
    pub fn event_list(&self, category_id: i32) -> &[i32] {
        self.by_category
            .get(&category_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the internal IDs of the categories of the provided event.
    pub fn category_list(&self, event_id: i32) -> &[i32] {
        self.by_event
            .get(&event_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Returns the internal IDs of the events of the provided category.
pub async fn event_ids_of<C: ConnectionTrait>(conn: &C, category_id: i32) -> RegistryResult<Vec<i32>> {
    let ids = category_events::Entity::find()
        .select_only()
        .column(category_events::Column::EventId)
        .filter(category_events::Column::CategoryId.eq(category_id))
        .order_by_asc(category_events::Column::EventId)
        .into_tuple()
        .all(conn)
        .await?;
    Ok(ids)
}

/// Returns the internal IDs of the categories of the provided event.
pub async fn category_ids_of<C: ConnectionTrait>(conn: &C, event_id: i32) -> RegistryResult<Vec<i32>> {
    let ids = category_events::Entity::find()
        .select_only()
        .column(category_events::Column::CategoryId)
        .filter(category_events::Column::EventId.eq(event_id))
        .order_by_asc(category_events::Column::CategoryId)
        .into_tuple()
        .all(conn)
        .await?;
    Ok(ids)
}

/// Appends the provided event to the event list of each provided category.
///
/// The links are inserted with a single statement.
pub(crate) async fn link_event<C: ConnectionTrait>(
    conn: &C,
    event_id: i32,
    category_ids: &[i32],
) -> RegistryResult {
    if category_ids.is_empty() {
        return Ok(());
    }

    category_events::Entity::insert_many(category_ids.iter().map(|&category_id| {
        category_events::ActiveModel {
            category_id: Set(category_id),
            event_id: Set(event_id),
        }
    }))
    .exec_without_returning(conn)
    .await?;

    Ok(())
}

/// Deletes the category with the provided human-ID, with all of its events.
///
/// The deleted events are also removed from the event list of the other categories.
/// The delete count is incremented once if the category was deleted.
#[tracing::instrument(skip(conn, counter))]
pub async fn delete_category<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    counter: &Counter,
    human_id: &str,
) -> RegistryResult<DeleteOutcome> {
    sync::transaction(conn, async |txn| {
        let Some(category) = category::Entity::find()
            .filter(category::Column::HumanId.eq(human_id))
            .one(txn)
            .await?
        else {
            return Ok(DeleteOutcome::NOT_FOUND);
        };

        let event_ids = event_ids_of(txn, category.id).await?;

        if !event_ids.is_empty() {
            category_events::Entity::delete_many()
                .filter(category_events::Column::EventId.is_in(event_ids.iter().copied()))
                .exec(txn)
                .await?;
            let deleted = event::Entity::delete_many()
                .filter(event::Column::Id.is_in(event_ids.iter().copied()))
                .exec(txn)
                .await?;
            tracing::info!(
                "Deleted {} event(s) of category {human_id}",
                deleted.rows_affected
            );
        }

        category_events::Entity::delete_many()
            .filter(category_events::Column::CategoryId.eq(category.id))
            .exec(txn)
            .await?;
        let deleted = category::Entity::delete_by_id(category.id).exec(txn).await?;

        if deleted.rows_affected > 0 {
            counter.increment(txn, CounterKind::Delete).await?;
        }

        RegistryResult::Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: deleted.rows_affected,
        })
    })
    .await
}

/// Deletes the event with the provided human-ID, and removes it from the event list of its
/// categories.
///
/// The categories themselves are kept.
#[tracing::instrument(skip(conn, counter))]
pub async fn delete_event<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    counter: &Counter,
    human_id: &str,
) -> RegistryResult<DeleteOutcome> {
    sync::transaction(conn, async |txn| {
        let Some(event) = event::Entity::find()
            .filter(event::Column::HumanId.eq(human_id))
            .one(txn)
            .await?
        else {
            return Ok(DeleteOutcome::NOT_FOUND);
        };

        let unlinked = category_events::Entity::delete_many()
            .filter(category_events::Column::EventId.eq(event.id))
            .exec(txn)
            .await?;
        tracing::info!(
            "Removed event {human_id} from {} category(ies)",
            unlinked.rows_affected
        );

        let deleted = event::Entity::delete_by_id(event.id).exec(txn).await?;
        counter.increment(txn, CounterKind::Delete).await?;

        RegistryResult::Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: deleted.rows_affected,
        })
    })
    .await
}

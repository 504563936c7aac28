//! The store of the events.
//!
//! An event is linked at its creation to the categories given as a comma-separated list of
//! human-IDs. See the [`association`](crate::association) module for the deletion.

use std::collections::HashMap;

use chrono::{NaiveDateTime, TimeDelta};
use entity::{category, event};
use itertools::Itertools as _;
use mkenv::prelude::*;
use sea_orm::{
    ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _,
    ModelTrait as _, PaginatorTrait as _, QueryFilter as _, QueryOrder as _, QuerySelect as _,
    TransactionTrait, prelude::Expr,
};

use crate::{
    association::{self, Links},
    counter::{Counter, CounterKind},
    error::RegistryResult,
    human_id::{self, HumanIdKind},
    models::{Category, Event, UpdateOutcome},
    sync,
    validation::{self, ValidationError},
};

/// The fields submitted to create an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// The name of the event.
    pub name: String,
    /// The optional description.
    pub description: Option<String>,
    /// The start date of the event.
    pub start_date_time: NaiveDateTime,
    /// The duration of the event, in minutes.
    pub duration_in_minutes: i64,
    /// Whether the event is active, `true` by default.
    pub is_active: Option<bool>,
    /// The file name of the image. If it's missing or empty, the default image is used.
    pub image: Option<String>,
    /// The capacity, 1000 by default.
    pub capacity: Option<i64>,
    /// The available tickets, the capacity by default.
    pub tickets_available: Option<i64>,
}

/// Splits the provided comma-separated list of category human-IDs.
///
/// The surrounding whitespaces and the empty entries are ignored, and the duplicates are removed.
pub fn split_category_ids(csv: &str) -> Vec<&str> {
    csv.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unique()
        .collect()
}

/// Returns the event with the provided human-ID.
pub async fn get_by_human_id<C: ConnectionTrait>(
    conn: &C,
    human_id: &str,
) -> RegistryResult<Option<event::Model>> {
    let event = event::Entity::find()
        .filter(event::Column::HumanId.eq(human_id))
        .one(conn)
        .await?;
    Ok(event)
}

fn check_duration(start: NaiveDateTime, duration: i64) -> Result<(i32, NaiveDateTime), ValidationError> {
    let duration = i32::try_from(duration)
        .ok()
        .filter(|d| *d >= 0)
        .ok_or(ValidationError::InvalidDuration)?;
    let end = start
        .checked_add_signed(TimeDelta::minutes(duration as _))
        .ok_or(ValidationError::InvalidDuration)?;
    Ok((duration, end))
}

fn check_tickets(tickets: Option<i64>, capacity: i32) -> Result<i32, ValidationError> {
    match tickets {
        Some(tickets) => i32::try_from(tickets)
            .ok()
            .filter(|t| *t >= 0)
            .ok_or(ValidationError::InvalidTicketsAvailable),
        None => Ok(capacity),
    }
}

/// Creates a new event and links it to the provided categories, then returns its row.
///
/// The categories are provided as a comma-separated list of human-IDs. The unknown ones are
/// ignored.
#[tracing::instrument(skip(conn, counter, new), fields(name = %new.name))]
pub async fn create<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    counter: &Counter,
    new: NewEvent,
    categories: &str,
) -> RegistryResult<event::Model> {
    let NewEvent {
        name,
        description,
        start_date_time,
        duration_in_minutes,
        is_active,
        image,
        capacity,
        tickets_available,
    } = new;

    validation::check_name(&name)?;
    let capacity = match capacity {
        Some(capacity) => validation::check_capacity(capacity)?,
        None => validation::DEFAULT_CAPACITY,
    };
    let tickets_available = check_tickets(tickets_available, capacity)?;
    let (duration, end_date_time) = check_duration(start_date_time, duration_in_minutes)?;
    let image = image
        .filter(|image| !image.is_empty())
        .unwrap_or_else(|| crate::env().default_image.get());
    let category_human_ids = split_category_ids(categories);

    sync::transaction(conn, async move |txn| {
        let category_ids: Vec<i32> = if category_human_ids.is_empty() {
            Vec::new()
        } else {
            category::Entity::find()
                .select_only()
                .column(category::Column::Id)
                .filter(category::Column::HumanId.is_in(category_human_ids))
                .order_by_asc(category::Column::Id)
                .into_tuple()
                .all(txn)
                .await?
        };

        let human_id = human_id::generate_unused::<_, event::Entity>(
            txn,
            HumanIdKind::Event,
            event::Column::HumanId,
        )
        .await?;

        let event = event::ActiveModel {
            human_id: Set(human_id),
            name: Set(name),
            description: Set(description),
            start_date_time: Set(start_date_time),
            duration_in_minutes: Set(duration),
            end_date_time: Set(end_date_time),
            is_active: Set(is_active.unwrap_or(true)),
            image: Set(image),
            capacity: Set(capacity),
            tickets_available: Set(tickets_available),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        association::link_event(txn, event.id, &category_ids).await?;
        counter.increment(txn, CounterKind::Add).await?;

        tracing::info!(
            "Created event {} in {} category(ies)",
            event.human_id,
            category_ids.len()
        );

        RegistryResult::Ok(event)
    })
    .await
}

/// Returns all the events, with their category list resolved to the categories.
///
/// The categories themselves keep the internal IDs of their events.
pub async fn list<C: ConnectionTrait>(conn: &C) -> RegistryResult<Vec<Event<Category>>> {
    let events = event::Entity::find()
        .order_by_asc(event::Column::Id)
        .all(conn)
        .await?;
    let categories = category::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|category| (category.id, category))
        .collect::<HashMap<_, _>>();
    let links = Links::load(conn).await?;

    let out = events
        .into_iter()
        .map(|event| {
            let category_list = links
                .category_list(event.id)
                .iter()
                .filter_map(|id| categories.get(id))
                .map(|category| {
                    Category::from_model(category.clone(), links.event_list(category.id).to_vec())
                })
                .collect();
            Event::from_model(event, category_list)
        })
        .collect();

    Ok(out)
}

async fn with_category_ids<C: ConnectionTrait>(
    conn: &C,
    events: Vec<event::Model>,
) -> RegistryResult<Vec<Event>> {
    let links = Links::load(conn).await?;
    Ok(events
        .into_iter()
        .map(|event| {
            let category_list = links.category_list(event.id).to_vec();
            Event::from_model(event, category_list)
        })
        .collect())
}

/// Returns all the events, with the internal IDs of their categories.
pub async fn all<C: ConnectionTrait>(conn: &C) -> RegistryResult<Vec<Event>> {
    let events = event::Entity::find()
        .order_by_asc(event::Column::Id)
        .all(conn)
        .await?;
    with_category_ids(conn, events).await
}

/// Returns the events with no ticket available anymore.
pub async fn sold_out<C: ConnectionTrait>(conn: &C) -> RegistryResult<Vec<Event>> {
    let events = event::Entity::find()
        .filter(event::Column::TicketsAvailable.eq(0))
        .order_by_asc(event::Column::Id)
        .all(conn)
        .await?;
    with_category_ids(conn, events).await
}

/// Replaces the name and the capacity of the event with the provided human-ID.
///
/// The capacity is `None` if the client didn't send an integer. Both fields are validated before
/// touching the database. The available tickets aren't changed.
#[tracing::instrument(skip(conn, counter))]
pub async fn update<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    counter: &Counter,
    human_id: &str,
    name: String,
    capacity: Option<i64>,
) -> RegistryResult<UpdateOutcome> {
    if let Err(e) = validation::check_name(&name) {
        return Ok(UpdateOutcome::Invalid(e));
    }
    let capacity = match capacity.map(validation::check_capacity) {
        Some(Ok(capacity)) => capacity,
        Some(Err(e)) => return Ok(UpdateOutcome::Invalid(e)),
        None => return Ok(UpdateOutcome::Invalid(ValidationError::InvalidCapacity)),
    };

    sync::transaction(conn, async move |txn| {
        let updated = event::Entity::update_many()
            .col_expr(event::Column::Name, Expr::value(name))
            .col_expr(event::Column::Capacity, Expr::value(capacity))
            .filter(event::Column::HumanId.eq(human_id))
            .exec(txn)
            .await?;

        if updated.rows_affected == 0 {
            return Ok(UpdateOutcome::Rejected);
        }

        counter.increment(txn, CounterKind::Update).await?;

        RegistryResult::Ok(UpdateOutcome::Updated)
    })
    .await
}

/// Returns the total amount of events.
pub async fn count<C: ConnectionTrait>(conn: &C) -> RegistryResult<u64> {
    let count = event::Entity::find().count(conn).await?;
    Ok(count)
}

/// Returns the categories of the provided event, in their creation order.
pub async fn categories_of<C: ConnectionTrait>(
    conn: &C,
    event: &event::Model,
) -> RegistryResult<Vec<category::Model>> {
    let categories = event
        .find_related(category::Entity)
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await?;
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn split_ids() {
        assert_eq!(split_category_ids("CAB-1234"), ["CAB-1234"]);
        assert_eq!(
            split_category_ids(" CAB-1234 ,, CDE-5678,CAB-1234, "),
            ["CAB-1234", "CDE-5678"]
        );
        assert!(split_category_ids("").is_empty());
        assert!(split_category_ids(" , ").is_empty());
    }

    #[test]
    fn end_date_time() {
        let start = NaiveDate::from_ymd_opt(2023, 10, 8)
            .and_then(|d| d.and_hms_opt(23, 30, 0))
            .unwrap();
        let (duration, end) = check_duration(start, 45).unwrap();
        assert_eq!(duration, 45);
        assert_eq!(end.to_string(), "2023-10-09 00:15:00");

        assert_eq!(check_duration(start, 0).map(|(_, end)| end), Ok(start));
        assert_eq!(check_duration(start, -1), Err(ValidationError::InvalidDuration));
        assert_eq!(
            check_duration(start, i64::from(i32::MAX) + 1),
            Err(ValidationError::InvalidDuration)
        );
    }

    #[test]
    fn tickets_default_to_capacity() {
        assert_eq!(check_tickets(None, 300), Ok(300));
        assert_eq!(check_tickets(Some(0), 300), Ok(0));
        assert_eq!(check_tickets(Some(500), 300), Ok(500));
        assert_eq!(
            check_tickets(Some(-3), 300),
            Err(ValidationError::InvalidTicketsAvailable)
        );
    }
}

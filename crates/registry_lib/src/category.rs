//! The store of the categories.

use std::collections::HashMap;

use chrono::Utc;
use entity::{category, event};
use mkenv::prelude::*;
use sea_orm::{
    ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _,
    ModelTrait as _, PaginatorTrait as _, QueryFilter as _, QueryOrder as _, TransactionTrait,
    prelude::Expr,
    sea_query::{ExprTrait as _, Func, LikeExpr},
};

use crate::{
    association::Links,
    counter::{Counter, CounterKind},
    error::RegistryResult,
    human_id::{self, HumanIdKind},
    models::{Category, Event, UpdateOutcome},
    sync, validation,
};

/// The fields submitted to create a category.
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    /// The name of the category.
    pub name: String,
    /// The optional description.
    pub description: Option<String>,
    /// The file name of the image. If it's missing or empty, the default image is used.
    pub image: Option<String>,
}

/// Returns the category with the provided human-ID.
pub async fn get_by_human_id<C: ConnectionTrait>(
    conn: &C,
    human_id: &str,
) -> RegistryResult<Option<category::Model>> {
    let category = category::Entity::find()
        .filter(category::Column::HumanId.eq(human_id))
        .one(conn)
        .await?;
    Ok(category)
}

/// Creates a new category and returns its row.
///
/// The category has no event at its creation.
#[tracing::instrument(skip(conn, counter))]
pub async fn create<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    counter: &Counter,
    new: NewCategory,
) -> RegistryResult<category::Model> {
    let NewCategory {
        name,
        description,
        image,
    } = new;

    validation::check_name(&name)?;

    let image = image
        .filter(|image| !image.is_empty())
        .unwrap_or_else(|| crate::env().default_image.get());

    sync::transaction(conn, async move |txn| {
        let human_id = human_id::generate_unused::<_, category::Entity>(
            txn,
            HumanIdKind::Category,
            category::Column::HumanId,
        )
        .await?;

        let category = category::ActiveModel {
            human_id: Set(human_id),
            name: Set(name),
            description: Set(description),
            image: Set(image),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        counter.increment(txn, CounterKind::Add).await?;

        tracing::info!("Created category {}", category.human_id);

        RegistryResult::Ok(category)
    })
    .await
}

/// Returns all the categories, with their event list resolved to the events.
///
/// The events themselves keep the internal IDs of their categories.
pub async fn list<C: ConnectionTrait>(conn: &C) -> RegistryResult<Vec<Category<Event>>> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await?;
    let events = event::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|event| (event.id, event))
        .collect::<HashMap<_, _>>();
    let links = Links::load(conn).await?;

    let out = categories
        .into_iter()
        .map(|category| {
            let event_list = links
                .event_list(category.id)
                .iter()
                .filter_map(|id| events.get(id))
                .map(|event| Event::from_model(event.clone(), links.category_list(event.id).to_vec()))
                .collect();
            Category::from_model(category, event_list)
        })
        .collect();

    Ok(out)
}

async fn with_event_ids<C: ConnectionTrait>(
    conn: &C,
    categories: Vec<category::Model>,
) -> RegistryResult<Vec<Category>> {
    let links = Links::load(conn).await?;
    Ok(categories
        .into_iter()
        .map(|category| {
            let event_list = links.event_list(category.id).to_vec();
            Category::from_model(category, event_list)
        })
        .collect())
}

/// Returns all the categories, with the internal IDs of their events.
pub async fn all<C: ConnectionTrait>(conn: &C) -> RegistryResult<Vec<Category>> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await?;
    with_event_ids(conn, categories).await
}

/// The escape character of the `LIKE` patterns.
const LIKE_ESCAPE: char = '\\';

/// Escapes the wildcards of a `LIKE` pattern, so the keyword is matched literally.
fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Returns the categories with a description containing the provided keyword, ignoring the case.
///
/// The keyword is matched literally, `%` and `_` included.
pub async fn search<C: ConnectionTrait>(conn: &C, keyword: &str) -> RegistryResult<Vec<Category>> {
    let pattern = format!("%{}%", escape_like(&keyword.to_lowercase()));
    let categories = category::Entity::find()
        .filter(
            Func::lower(Expr::col(category::Column::Description))
                .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
        )
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await?;
    with_event_ids(conn, categories).await
}

/// Replaces the name and the description of the category with the provided human-ID.
///
/// A missing description leaves the stored one untouched.
/// If the name is invalid, or if the category doesn't exist, nothing is written.
#[tracing::instrument(skip(conn, counter))]
pub async fn update<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    counter: &Counter,
    human_id: &str,
    name: String,
    description: Option<String>,
) -> RegistryResult<UpdateOutcome> {
    if validation::check_name(&name).is_err() {
        return Ok(UpdateOutcome::Rejected);
    }

    sync::transaction(conn, async move |txn| {
        let mut update = category::Entity::update_many()
            .col_expr(category::Column::Name, Expr::value(name))
            .filter(category::Column::HumanId.eq(human_id));
        if let Some(description) = description {
            update = update.col_expr(category::Column::Description, Expr::value(description));
        }
        let updated = update.exec(txn).await?;

        if updated.rows_affected == 0 {
            return Ok(UpdateOutcome::Rejected);
        }

        counter.increment(txn, CounterKind::Update).await?;

        RegistryResult::Ok(UpdateOutcome::Updated)
    })
    .await
}

/// Returns the total amount of categories.
pub async fn count<C: ConnectionTrait>(conn: &C) -> RegistryResult<u64> {
    let count = category::Entity::find().count(conn).await?;
    Ok(count)
}

/// Returns the events of the provided category, in their creation order.
pub async fn events_of<C: ConnectionTrait>(
    conn: &C,
    category: &category::Model,
) -> RegistryResult<Vec<event::Model>> {
    let events = category
        .find_related(event::Entity)
        .order_by_asc(event::Column::Id)
        .all(conn)
        .await?;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("live music"), "live music");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\d"), "c:\\\\d");
    }
}

//! The counter of the operations made on the categories and the events.
//!
//! The counts are stored in a single row of the `counters` table, identified by its name.
//! Each successful creation, update and deletion increments its count by exactly one,
//! inside the same transaction as the operation itself.

use entity::counters;
use mkenv::prelude::*;
use sea_orm::{
    ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _,
    prelude::Expr, sea_query::ExprTrait as _,
};
use serde::Serialize;

use crate::{error::RegistryResult, internal};

/// The kind of operation counted by the [`Counter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterKind {
    /// A category or an event was created.
    Add,
    /// A category or an event was updated.
    Update,
    /// A category or an event was deleted.
    Delete,
}

impl CounterKind {
    fn column(self) -> counters::Column {
        match self {
            Self::Add => counters::Column::AddCount,
            Self::Update => counters::Column::UpdateCount,
            Self::Delete => counters::Column::DeleteCount,
        }
    }
}

/// The current values of the [`Counter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    /// The amount of created categories and events.
    pub add_count: i64,
    /// The amount of updated categories and events.
    pub update_count: i64,
    /// The amount of deleted categories and events.
    pub delete_count: i64,
}

impl From<counters::Model> for Counts {
    fn from(row: counters::Model) -> Self {
        Self {
            add_count: row.add_count,
            update_count: row.update_count,
            delete_count: row.delete_count,
        }
    }
}

/// A handle to the counter row with a specific name.
///
/// This is shared between the request handlers as application data.
#[derive(Clone, Debug)]
pub struct Counter {
    name: String,
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(counters::DEFAULT_COUNTER_NAME)
    }
}

impl Counter {
    /// Returns a handle to the counter with the provided name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    /// Returns a handle to the counter configured in the environment.
    ///
    /// The library environment must have been initialized with [`init_env()`](crate::init_env).
    pub fn from_env() -> Self {
        Self::new(crate::env().counter_name.get())
    }

    /// Returns the name of the counter row.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates the counter row with all of its counts to zero, if it doesn't exist yet.
    pub async fn ensure<C: ConnectionTrait>(&self, conn: &C) -> RegistryResult {
        let exists = counters::Entity::find_by_id(self.name.clone())
            .one(conn)
            .await?
            .is_some();

        if !exists {
            tracing::info!("Creating counter `{}`", self.name);
            counters::Entity::insert(counters::ActiveModel {
                name: Set(self.name.clone()),
                add_count: Set(0),
                update_count: Set(0),
                delete_count: Set(0),
            })
            .exec_without_returning(conn)
            .await?;
        }

        Ok(())
    }

    /// Increments the count of the provided operation kind by one.
    ///
    /// This is a single `UPDATE` statement, so concurrent increments are never lost.
    #[tracing::instrument(skip(self, conn), fields(counter = %self.name))]
    pub async fn increment<C: ConnectionTrait>(&self, conn: &C, kind: CounterKind) -> RegistryResult {
        let col = kind.column();
        let res = counters::Entity::update_many()
            .col_expr(col, Expr::col(col).add(1))
            .filter(counters::Column::Name.eq(&self.name))
            .exec(conn)
            .await?;

        if res.rows_affected == 0 {
            return Err(internal!("counter `{}` doesn't exist", self.name));
        }

        Ok(())
    }

    /// Returns the current counts.
    ///
    /// If the counter row doesn't exist, all the counts are zero.
    pub async fn get<C: ConnectionTrait>(&self, conn: &C) -> RegistryResult<Counts> {
        let counts = counters::Entity::find_by_id(self.name.clone())
            .one(conn)
            .await?
            .map(From::from)
            .unwrap_or_default();
        Ok(counts)
    }
}

use sea_orm::entity::prelude::*;

/// A named counter of the operations made on the categories and the events.
///
/// In practice, there is a single row, but its name is configurable.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "counters")]
pub struct Model {
    /// The name of the counter.
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    /// The amount of created categories and events.
    pub add_count: i64,
    /// The amount of updated categories and events.
    pub update_count: i64,
    /// The amount of deleted categories and events.
    pub delete_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The name of the counter row created with the database schema.
pub const DEFAULT_COUNTER_NAME: &str = "Category-Event counter";

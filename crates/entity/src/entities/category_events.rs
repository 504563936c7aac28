use sea_orm::entity::prelude::*;

/// The association between categories and their events.
///
/// A row is both the entry of the event in the event list of the category, and the entry
/// of the category in the category list of the event.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "category_events")]
pub struct Model {
    /// The internal ID of the category.
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: i32,
    /// The internal ID of the event.
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

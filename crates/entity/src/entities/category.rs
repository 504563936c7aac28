use sea_orm::entity::prelude::*;

/// A category grouping events.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "category")]
pub struct Model {
    /// The internal ID of the category, used to link it with its events.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The human-readable ID of the category, like `CAB-1234`.
    #[sea_orm(unique)]
    pub human_id: String,
    /// The name of the category.
    pub name: String,
    /// The optional description of the category.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// The file name of the category image.
    pub image: String,
    /// When the category was created.
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::category_events::Entity")]
    CategoryEvents,
}

impl Related<super::category_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryEvents.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        super::category_events::Relation::Event.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::category_events::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

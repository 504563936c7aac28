use sea_orm::entity::prelude::*;

/// An event, belonging to zero or more categories.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "event")]
pub struct Model {
    /// The internal ID of the event, used to link it with its categories.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The human-readable ID of the event, like `EAB-1234`.
    #[sea_orm(unique)]
    pub human_id: String,
    /// The name of the event.
    pub name: String,
    /// The optional description of the event.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// The UTC start date of the event.
    pub start_date_time: DateTime,
    /// The duration of the event, in minutes.
    pub duration_in_minutes: i32,
    /// The UTC end date of the event.
    ///
    /// This is always the start date added with the duration.
    pub end_date_time: DateTime,
    /// Whether the event is active or not.
    pub is_active: bool,
    /// The file name of the event image.
    pub image: String,
    /// The maximum number of attendees.
    pub capacity: i32,
    /// The remaining tickets.
    ///
    /// This defaults to the capacity when the event is created, and isn't updated
    /// when the capacity changes.
    pub tickets_available: i32,
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

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::category_events::Relation::Category.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::category_events::Relation::Event.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

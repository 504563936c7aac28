use entity::counters;
use sea_orm::{ActiveValue::Set, ColumnTrait as _, EntityTrait, QueryFilter as _};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        counters::Entity::insert(counters::ActiveModel {
            name: Set(counters::DEFAULT_COUNTER_NAME.to_owned()),
            add_count: Set(0),
            update_count: Set(0),
            delete_count: Set(0),
        })
        .exec_without_returning(manager.get_connection())
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        counters::Entity::delete_many()
            .filter(counters::Column::Name.eq(counters::DEFAULT_COUNTER_NAME))
            .exec(manager.get_connection())
            .await?;

        Ok(())
    }
}

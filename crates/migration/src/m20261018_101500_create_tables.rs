use entity::{category, category_events, counters, event};
use sea_orm::EntityTrait;
use sea_orm_migration::{prelude::*, sea_orm::Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        create_entity_table(manager, &schema, category::Entity).await?;
        create_entity_table(manager, &schema, event::Entity).await?;
        create_entity_table(manager, &schema, category_events::Entity).await?;
        create_entity_table(manager, &schema, counters::Entity).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        drop_entity_table(manager, &schema, counters::Entity).await?;
        drop_entity_table(manager, &schema, category_events::Entity).await?;
        drop_entity_table(manager, &schema, event::Entity).await?;
        drop_entity_table(manager, &schema, category::Entity).await?;

        Ok(())
    }
}

async fn create_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(schema.create_table_from_entity(entity))
        .await
}

async fn drop_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let Some(table_name) = schema
        .create_table_from_entity(entity)
        .get_table_name()
        .cloned()
    else {
        return Err(DbErr::Migration("entity without table name".to_owned()));
    };

    manager
        .drop_table(Table::drop().table(table_name).take())
        .await
}

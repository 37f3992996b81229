//! Migration: Create the documents table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::RowId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Collection).string().not_null())
                    .col(ColumnDef::new(Documents::DocId).string().not_null())
                    .col(ColumnDef::new(Documents::Body).json_binary().not_null())
                    .to_owned(),
            )
            .await?;

        // Point lookups by logical id within a collection
        manager
            .create_index(
                Index::create()
                    .name("idx_documents_collection_doc_id")
                    .table(Documents::Table)
                    .col(Documents::Collection)
                    .col(Documents::DocId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Containment filters on body
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_documents_body ON documents USING GIN (body jsonb_path_ops)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Documents {
    Table,
    RowId,
    Collection,
    DocId,
    Body,
}

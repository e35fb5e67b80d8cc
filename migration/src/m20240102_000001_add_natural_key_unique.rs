use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title_unique")
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(Movies::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actors_name_unique")
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(Actors::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tv_shows_name_unique")
                    .table(TvShows::Table)
                    .if_not_exists()
                    .col(TvShows::TvShowName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_tv_shows_name_unique").table(TvShows::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_actors_name_unique").table(Actors::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movies_title_unique").table(Movies::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Title,
}

#[derive(DeriveIden)]
enum Actors {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum TvShows {
    Table,
    TvShowName,
}

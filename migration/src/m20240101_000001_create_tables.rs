use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Names::Table)
                    .if_not_exists()
                    .col(pk_auto(Names::Id))
                    .col(string_len(Names::Name, 64))
                    .col(string_len(Names::SearchTerm, 64))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_len(Movies::Title, 64))
                    .col(string_len(Movies::ReleaseDate, 10))
                    .col(string_len(Movies::Description, 2000))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(pk_auto(Actors::Id))
                    .col(string_len(Actors::Name, 32))
                    .col(integer(Actors::Popularity))
                    .col(integer_null(Actors::TopMovieId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actors_top_movie_id")
                            .from(Actors::Table, Actors::TopMovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actors_top_movie_id")
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(Actors::TopMovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TvShows::Table)
                    .if_not_exists()
                    .col(pk_auto(TvShows::Id))
                    .col(string_len(TvShows::TvShowName, 64))
                    .col(string_len(TvShows::FirstAirDate, 10))
                    .col(string_len(TvShows::Overview, 2000))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TvShows::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Actors::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Names::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Names {
    Table,
    Id,
    Name,
    SearchTerm,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    ReleaseDate,
    Description,
}

#[derive(DeriveIden)]
enum Actors {
    Table,
    Id,
    Name,
    Popularity,
    TopMovieId,
}

#[derive(DeriveIden)]
enum TvShows {
    Table,
    Id,
    TvShowName,
    FirstAirDate,
    Overview,
}

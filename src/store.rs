use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, sea_query::OnConflict,
};
use tracing::{debug, info};

use crate::entities::{actor, movie, name, tv_show};

pub const NAME_MAX: usize = 64;
pub const SEARCH_TERM_MAX: usize = 64;
pub const MOVIE_TITLE_MAX: usize = 64;
pub const ACTOR_NAME_MAX: usize = 32;
pub const TV_NAME_MAX: usize = 64;
pub const DATE_MAX: usize = 10;
pub const TEXT_MAX: usize = 2000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no movie titled {title:?} has been stored")]
    MovieNotFound { title: String },
    #[error("{entity} {key:?} missing after insert")]
    MissingAfterInsert { entity: &'static str, key: String },
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the relational store. Cheap to clone; shares the connection pool.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Inserts unconditionally; repeated submissions produce repeated rows.
    pub async fn add_name(&self, name: &str, search_term: &str) -> StoreResult<name::Model> {
        let model = name::ActiveModel {
            id: Default::default(),
            name: Set(clip(name, NAME_MAX).to_string()),
            search_term: Set(clip(search_term, SEARCH_TERM_MAX).to_string()),
        };

        let saved = model.insert(&self.db).await?;
        info!(id = saved.id, name = %saved.name, search_term = %saved.search_term, "created name");
        Ok(saved)
    }

    pub async fn list_names(&self) -> StoreResult<Vec<name::Model>> {
        Ok(name::Entity::find().order_by_asc(name::Column::Id).all(&self.db).await?)
    }

    /// One trimmed search term per stored name, in id order. Blank terms are
    /// skipped; repeats are kept.
    pub async fn search_terms(&self) -> StoreResult<Vec<String>> {
        let names = self.list_names().await?;
        Ok(names
            .into_iter()
            .map(|n| n.search_term.trim().to_string())
            .filter(|term| !term.is_empty())
            .collect())
    }

    pub async fn list_movies_with_actors(
        &self,
    ) -> StoreResult<Vec<(movie::Model, Vec<actor::Model>)>> {
        Ok(movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .find_with_related(actor::Entity)
            .all(&self.db)
            .await?)
    }

    pub async fn list_actors_with_movies(
        &self,
    ) -> StoreResult<Vec<(actor::Model, Option<movie::Model>)>> {
        Ok(actor::Entity::find()
            .find_also_related(movie::Entity)
            .order_by_asc(actor::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_tv_shows(&self) -> StoreResult<Vec<tv_show::Model>> {
        Ok(tv_show::Entity::find().order_by_asc(tv_show::Column::Id).all(&self.db).await?)
    }
}

/// Returns the movie stored under `title`, inserting it when absent. Fields other
/// than the title are ignored once a row exists.
pub async fn get_or_create_movie<C: ConnectionTrait>(
    conn: &C,
    title: &str,
    release_date: &str,
    description: &str,
) -> StoreResult<movie::Model> {
    let title = clip(title, MOVIE_TITLE_MAX);

    if let Some(movie) = find_movie(conn, title).await? {
        debug!(id = movie.id, title = %movie.title, "found movie");
        return Ok(movie);
    }

    let model = movie::ActiveModel {
        id: Default::default(),
        title: Set(title.to_string()),
        release_date: Set(clip(release_date, DATE_MAX).to_string()),
        description: Set(clip(description, TEXT_MAX).to_string()),
    };

    let inserted = movie::Entity::insert(model)
        .on_conflict(OnConflict::column(movie::Column::Title).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;

    let movie = find_movie(conn, title).await?.ok_or_else(|| StoreError::MissingAfterInsert {
        entity: "movie",
        key: title.to_string(),
    })?;

    if inserted > 0 {
        info!(
            id = movie.id,
            title = %movie.title,
            release_date = %movie.release_date,
            "created movie"
        );
    } else {
        debug!(id = movie.id, title = %movie.title, "found movie after insert conflict");
    }
    Ok(movie)
}

/// Returns the actor stored under `name`, inserting it when absent. A new actor's
/// top movie is resolved by `movie_title`, which must already be stored.
pub async fn get_or_create_actor<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    popularity: i32,
    movie_title: &str,
) -> StoreResult<actor::Model> {
    let name = clip(name, ACTOR_NAME_MAX);

    if let Some(actor) = find_actor(conn, name).await? {
        debug!(id = actor.id, name = %actor.name, "found actor");
        return Ok(actor);
    }

    let movie_title = clip(movie_title, MOVIE_TITLE_MAX);
    let movie = find_movie(conn, movie_title)
        .await?
        .ok_or_else(|| StoreError::MovieNotFound { title: movie_title.to_string() })?;

    let model = actor::ActiveModel {
        id: Default::default(),
        name: Set(name.to_string()),
        popularity: Set(popularity),
        top_movie_id: Set(Some(movie.id)),
    };

    let inserted = actor::Entity::insert(model)
        .on_conflict(OnConflict::column(actor::Column::Name).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;

    let actor = find_actor(conn, name).await?.ok_or_else(|| StoreError::MissingAfterInsert {
        entity: "actor",
        key: name.to_string(),
    })?;

    if inserted > 0 {
        info!(
            id = actor.id,
            name = %actor.name,
            popularity = actor.popularity,
            top_movie_id = ?actor.top_movie_id,
            "created actor"
        );
    } else {
        debug!(id = actor.id, name = %actor.name, "found actor after insert conflict");
    }
    Ok(actor)
}

/// Returns the show stored under `tv_show_name`, inserting it when absent.
pub async fn get_or_create_tv<C: ConnectionTrait>(
    conn: &C,
    tv_show_name: &str,
    first_air_date: &str,
    overview: &str,
) -> StoreResult<tv_show::Model> {
    let tv_show_name = clip(tv_show_name, TV_NAME_MAX);

    if let Some(show) = find_tv(conn, tv_show_name).await? {
        debug!(id = show.id, tv_show_name = %show.tv_show_name, "found tv show");
        return Ok(show);
    }

    let model = tv_show::ActiveModel {
        id: Default::default(),
        tv_show_name: Set(tv_show_name.to_string()),
        first_air_date: Set(clip(first_air_date, DATE_MAX).to_string()),
        overview: Set(clip(overview, TEXT_MAX).to_string()),
    };

    let inserted = tv_show::Entity::insert(model)
        .on_conflict(OnConflict::column(tv_show::Column::TvShowName).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;

    let show = find_tv(conn, tv_show_name).await?.ok_or_else(|| {
        StoreError::MissingAfterInsert { entity: "tv show", key: tv_show_name.to_string() }
    })?;

    if inserted > 0 {
        info!(
            id = show.id,
            tv_show_name = %show.tv_show_name,
            first_air_date = %show.first_air_date,
            "created tv show"
        );
    } else {
        debug!(id = show.id, tv_show_name = %show.tv_show_name, "found tv show after insert conflict");
    }
    Ok(show)
}

async fn find_movie<C: ConnectionTrait>(
    conn: &C,
    title: &str,
) -> StoreResult<Option<movie::Model>> {
    Ok(movie::Entity::find().filter(movie::Column::Title.eq(title)).one(conn).await?)
}

async fn find_actor<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> StoreResult<Option<actor::Model>> {
    Ok(actor::Entity::find().filter(actor::Column::Name.eq(name)).one(conn).await?)
}

async fn find_tv<C: ConnectionTrait>(
    conn: &C,
    tv_show_name: &str,
) -> StoreResult<Option<tv_show::Model>> {
    Ok(tv_show::Entity::find()
        .filter(tv_show::Column::TvShowName.eq(tv_show_name))
        .one(conn)
        .await?)
}

/// Truncates to at most `max_chars` characters.
pub fn clip(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

use futures::{StreamExt, stream};
use sea_orm::TransactionTrait;
use tracing::{debug, warn};

use crate::{
    entities::{actor, movie},
    error::AppResult,
    store::{self, Store},
    tmdb::{TmdbClient, TvResult},
};

#[derive(Debug)]
pub enum ActorLookup {
    Found { movie: movie::Model, actor: actor::Model },
    /// TMDB had no person, or the person has no `known_for` entries.
    NoMatch,
}

/// Resolves `actor_name` to its best-known title and stores both. Movie and actor
/// are written in one transaction.
pub async fn lookup_actor(
    store: &Store,
    tmdb: &TmdbClient,
    actor_name: &str,
) -> AppResult<ActorLookup> {
    let search = tmdb.search_person(actor_name).await?;
    debug!(actor = %actor_name, total_results = ?search.total_results, "person search returned");

    let Some(found) = search.best_match() else {
        debug!(actor = %actor_name, "no person with known_for entries");
        return Ok(ActorLookup::NoMatch);
    };

    let txn = store.db().begin().await?;
    let movie = store::get_or_create_movie(
        &txn,
        found.movie.title(),
        found.movie.release_date(),
        found.movie.overview(),
    )
    .await?;
    let actor =
        store::get_or_create_actor(&txn, &found.name, found.popularity_score(), &movie.title)
            .await?;
    txn.commit().await?;

    Ok(ActorLookup::Found { movie, actor })
}

/// Runs one TV search per stored name with a non-blank search term and stores the
/// first match of each. Searches run concurrently; writes happen in name order.
/// Returns how many searches resolved to a show.
pub async fn refresh_tv_shows(
    store: &Store,
    tmdb: &TmdbClient,
    max_concurrent: usize,
) -> AppResult<usize> {
    let terms = store.search_terms().await?;
    debug!(terms = terms.len(), "refreshing tv shows");

    let results: Vec<(String, AppResult<Option<TvResult>>)> = stream::iter(terms)
        .map(|term| async move {
            let result = tmdb.search_tv(&term).await;
            (term, result)
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    let mut resolved = 0;
    for (term, result) in results {
        match result {
            Ok(Some(show)) => {
                store::get_or_create_tv(
                    store.db(),
                    show.name(),
                    show.first_air_date(),
                    show.overview(),
                )
                .await?;
                resolved += 1;
            },
            Ok(None) => warn!(term = %term, "no tv results"),
            Err(err) => warn!(term = %term, error = %err, "tv search failed"),
        }
    }

    debug!(resolved = resolved, "completed tv refresh");
    Ok(resolved)
}

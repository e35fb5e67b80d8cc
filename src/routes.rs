use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::{
    AppState,
    error::AppResult,
    flash,
    forms::{MovieForm, NameForm},
    lookup::{self, ActorLookup},
    templates,
};

const INVALID_QUERY: &str = "Invalid query! Try again.";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/names", get(all_names))
        .route("/movies", get(all_movies).post(lookup_movie))
        .route("/actors", get(popular_actors))
        .route("/tv_shows", get(tv_shows))
        .fallback(not_found)
        .with_state(state)
}

pub async fn home() -> Html<String> {
    Html(templates::home_page(None, &NameForm::default()))
}

pub async fn all_names(
    State(state): State<Arc<AppState>>,
    Query(form): Query<NameForm>,
) -> AppResult<Html<String>> {
    if !form.is_empty() {
        match form.validate() {
            Ok(valid) => {
                state.store.add_name(&valid.name, &valid.search_term).await?;
            },
            Err(errors) => {
                debug!(fields = errors.errors().len(), errors = %errors, "rejected name submission");
                return Ok(Html(templates::home_page(Some(&errors.to_string()), &form)));
            },
        }
    }

    let names = state.store.list_names().await?;
    Ok(Html(templates::names_page(&names)))
}

pub async fn all_movies(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, message) = flash::take(jar);
    let movies = state.store.list_movies_with_actors().await?;
    Ok((jar, Html(templates::movies_page(message.as_deref(), "", &movies))))
}

pub async fn lookup_movie(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    let actor_name = match form.validate() {
        Ok(actor_name) => actor_name,
        Err(errors) => {
            debug!(fields = errors.errors().len(), errors = %errors, "rejected movie lookup");
            let movies = state.store.list_movies_with_actors().await?;
            let body =
                templates::movies_page(Some(&errors.to_string()), form.actor.trim(), &movies);
            return Ok(Html(body).into_response());
        },
    };

    match lookup::lookup_actor(&state.store, &state.tmdb, &actor_name).await? {
        ActorLookup::NoMatch => {
            let jar = flash::set(jar, INVALID_QUERY, state.config.cookie_secure);
            Ok((jar, Redirect::to("/movies")).into_response())
        },
        ActorLookup::Found { movie, actor } => {
            debug!(actor = %actor.name, movie = %movie.title, "actor lookup stored");
            let movies = state.store.list_movies_with_actors().await?;
            Ok(Html(templates::movies_page(None, "", &movies)).into_response())
        },
    }
}

pub async fn popular_actors(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let actors = state.store.list_actors_with_movies().await?;
    Ok(Html(templates::actors_page(&actors)))
}

pub async fn tv_shows(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    lookup::refresh_tv_shows(&state.store, &state.tmdb, state.config.max_concurrent).await?;
    let shows = state.store.list_tv_shows().await?;
    Ok(Html(templates::tv_shows_page(&shows)))
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(templates::not_found_page(uri.path())))
}

use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::AppResult;

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided; metadata lookups will be rejected upstream");
        }

        let quota = Quota::per_second(NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { client, api_key, base_url, limiter }
    }

    pub async fn search_person(&self, query: &str) -> AppResult<PersonSearch> {
        debug!(query = %query, "searching TMDB people");
        self.search("search/person", query).await
    }

    /// First TV result for `query`. A first result without a name counts as none.
    pub async fn search_tv(&self, query: &str) -> AppResult<Option<TvResult>> {
        debug!(query = %query, "searching TMDB tv");
        let resp: TvSearch = self.search("search/tv", query).await?;
        Ok(resp.results.into_iter().next().filter(|r| !r.name().trim().is_empty()))
    }

    async fn search<T: DeserializeOwned>(&self, path: &str, query: &str) -> AppResult<T> {
        self.limiter.until_ready().await;

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let resp = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PersonSearch {
    #[serde(default)]
    pub total_results: Option<i64>,
    #[serde(default)]
    pub results: Vec<Person>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub known_for: Vec<KnownFor>,
}

/// An entry of a person's `known_for` list. TV entries carry `name` and
/// `first_air_date` in place of `title` and `release_date`.
#[derive(Clone, Debug, Deserialize)]
pub struct KnownFor {
    #[serde(default, alias = "name")]
    title: Option<String>,
    #[serde(default, alias = "first_air_date")]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

impl KnownFor {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn release_date(&self) -> &str {
        self.release_date.as_deref().unwrap_or_default()
    }

    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct ActorMatch {
    pub name: String,
    pub popularity: f64,
    pub movie: KnownFor,
}

impl ActorMatch {
    pub fn popularity_score(&self) -> i32 {
        // `as` saturates and maps NaN to zero.
        self.popularity.round() as i32
    }
}

impl PersonSearch {
    /// The first person and their first `known_for` entry, or `None` when the
    /// search came back empty or that person has nothing listed.
    pub fn best_match(self) -> Option<ActorMatch> {
        if self.total_results == Some(0) {
            return None;
        }

        let person = self.results.into_iter().next()?;
        let movie = person.known_for.into_iter().next()?;
        let name = person.name.filter(|n| !n.trim().is_empty())?;

        if movie.title().trim().is_empty() {
            return None;
        }

        Some(ActorMatch { name, popularity: person.popularity.unwrap_or_default(), movie })
    }
}

#[derive(Debug, Deserialize)]
struct TvSearch {
    #[serde(default)]
    results: Vec<TvResult>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TvResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

impl TvResult {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn first_air_date(&self) -> &str {
        self.first_air_date.as_deref().unwrap_or_default()
    }

    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{FakeTmdb, TEST_API_KEY, forrest_gump_person};

    fn parse(value: serde_json::Value) -> PersonSearch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn best_match_takes_first_person_and_first_known_for() {
        let search = parse(json!({
            "total_results": 2,
            "results": [
                {
                    "name": "Tom Hanks",
                    "popularity": 31.6,
                    "known_for": [
                        { "title": "Forrest Gump", "release_date": "1994-06-23", "overview": "Run." },
                        { "title": "Big", "release_date": "1988-06-03", "overview": "Wish." }
                    ]
                },
                { "name": "Colin Hanks", "popularity": 9.0, "known_for": [] }
            ]
        }));

        let m = search.best_match().unwrap();
        assert_eq!(m.name, "Tom Hanks");
        assert_eq!(m.popularity_score(), 32);
        assert_eq!(m.movie.title(), "Forrest Gump");
        assert_eq!(m.movie.release_date(), "1994-06-23");
    }

    #[test]
    fn zero_results_or_empty_known_for_is_no_match() {
        assert!(parse(json!({ "total_results": 0, "results": [] })).best_match().is_none());
        assert!(
            parse(json!({
                "total_results": 1,
                "results": [{ "name": "Unknown Person", "popularity": 0.6, "known_for": [] }]
            }))
            .best_match()
            .is_none()
        );
        assert!(parse(json!({ "results": [] })).best_match().is_none());
    }

    #[test]
    fn tv_known_for_entries_read_through_aliases() {
        let search = parse(json!({
            "total_results": 1,
            "results": [{
                "name": "Bryan Cranston",
                "popularity": 12.2,
                "known_for": [{
                    "media_type": "tv",
                    "name": "Breaking Bad",
                    "first_air_date": "2008-01-20",
                    "overview": null
                }]
            }]
        }));

        let m = search.best_match().unwrap();
        assert_eq!(m.movie.title(), "Breaking Bad");
        assert_eq!(m.movie.release_date(), "2008-01-20");
        assert_eq!(m.movie.overview(), "");
    }

    #[tokio::test]
    async fn client_sends_key_and_query() {
        let fake = FakeTmdb::builder()
            .person("Tom Hanks", forrest_gump_person())
            .tv(
                "The Office",
                json!({ "results": [
                    { "name": "The Office", "first_air_date": "2005-03-24", "overview": "Paper." }
                ]}),
            )
            .spawn()
            .await;
        let client =
            TmdbClient::new(reqwest::Client::new(), TEST_API_KEY.to_string(), fake.base_url(), 100);

        let person = client.search_person("Tom Hanks").await.unwrap();
        assert_eq!(person.best_match().unwrap().name, "Tom Hanks");

        let show = client.search_tv("The Office").await.unwrap().unwrap();
        assert_eq!(show.first_air_date(), "2005-03-24");

        assert!(client.search_tv("Nothing Here").await.unwrap().is_none());
        assert_eq!(fake.calls(), vec!["person:Tom Hanks", "tv:The Office", "tv:Nothing Here"]);
    }

    #[tokio::test]
    async fn tv_search_only_considers_first_result() {
        let fake = FakeTmdb::builder()
            .tv(
                "Blank",
                json!({ "results": [
                    { "name": "", "first_air_date": "1999-01-01" },
                    { "name": "Fallback", "first_air_date": "2000-01-01" }
                ]}),
            )
            .spawn()
            .await;
        let client =
            TmdbClient::new(reqwest::Client::new(), TEST_API_KEY.to_string(), fake.base_url(), 100);

        assert!(client.search_tv("Blank").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejected_key_is_an_error() {
        let fake = FakeTmdb::builder().spawn().await;
        let client =
            TmdbClient::new(reqwest::Client::new(), "wrong".to_string(), fake.base_url(), 100);

        let err = client.search_person("Tom Hanks").await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_GATEWAY);
    }
}

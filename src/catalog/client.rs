use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{MovieDetails, MoviePage, TimeWindow};

/// Read-only client for the third-party movie catalog API. Carries no auth
/// state; the API key rides along as a query parameter on every request.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("build catalog http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "catalog request");
        let resp = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .query(query)
            .send()
            .await
            .with_context(|| format!("catalog request {}", path))?
            .error_for_status()
            .with_context(|| format!("catalog status {}", path))?;
        resp.json::<T>()
            .await
            .with_context(|| format!("catalog decode {}", path))
    }

    pub async fn trending(&self, time_window: TimeWindow) -> anyhow::Result<MoviePage> {
        self.get_json(&format!("/trending/movie/{}", time_window.as_str()), &[])
            .await
    }

    pub async fn popular(&self, page: u32) -> anyhow::Result<MoviePage> {
        self.get_json("/movie/popular", &[("page", page.to_string())])
            .await
    }

    pub async fn top_rated(&self, page: u32) -> anyhow::Result<MoviePage> {
        self.get_json("/movie/top_rated", &[("page", page.to_string())])
            .await
    }

    pub async fn now_playing(&self, page: u32) -> anyhow::Result<MoviePage> {
        self.get_json("/movie/now_playing", &[("page", page.to_string())])
            .await
    }

    pub async fn upcoming(&self, page: u32) -> anyhow::Result<MoviePage> {
        self.get_json("/movie/upcoming", &[("page", page.to_string())])
            .await
    }

    pub async fn search(&self, query: &str, page: u32) -> anyhow::Result<MoviePage> {
        self.get_json(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    pub async fn details(&self, movie_id: i64) -> anyhow::Result<MovieDetails> {
        self.get_json(&format!("/movie/{}", movie_id), &[]).await
    }
}

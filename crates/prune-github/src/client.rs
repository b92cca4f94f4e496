use crate::models;
use anyhow::Context;
use async_trait::async_trait;
use prune_config::constants;
use prune_core::{SourceControl, SourceError};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: String) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("prune/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(constants::HTTP_TIMEOUT)
            .build()
            .context("failed to build GitHub HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn page_url(&self, path: &str, extra_query: &str, page: usize) -> String {
        format!(
            "{}{}?{}per_page={}&page={}",
            self.api_url,
            path,
            extra_query,
            constants::GITHUB_PAGE_SIZE,
            page
        )
    }

    async fn get_page(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read response from {}", url))?;

        Ok(body.to_vec())
    }

    /// Walks pages until one comes back short.
    async fn collect_pages<T>(
        &self,
        path: &str,
        extra_query: &str,
        parse: fn(&[u8]) -> serde_json::Result<Vec<T>>,
    ) -> Result<Vec<T>, SourceError> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = self.page_url(path, extra_query, page);
            let body = self.get_page(&url).await?;
            let batch =
                parse(&body).with_context(|| format!("unexpected response body from {}", url))?;

            let done = batch.len() < constants::GITHUB_PAGE_SIZE;
            items.extend(batch);

            if done {
                return Ok(items);
            }
            page += 1;
        }
    }
}

#[async_trait]
impl SourceControl for GitHubClient {
    async fn list_branches(
        &self,
        organization: &str,
        repository: &str,
    ) -> Result<Vec<String>, SourceError> {
        let path = format!("/repos/{}/{}/branches", organization, repository);
        self.collect_pages(&path, "", models::parse_branches).await
    }

    async fn list_open_pull_requests(
        &self,
        organization: &str,
        repository: &str,
    ) -> Result<Vec<u64>, SourceError> {
        let path = format!("/repos/{}/{}/pulls", organization, repository);
        self.collect_pages(&path, "state=open&", models::parse_pull_requests)
            .await
    }
}

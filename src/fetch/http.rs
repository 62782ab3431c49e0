// src/fetch/http.rs
// =============================================================================
// reqwest-backed Fetcher.
//
// One Client is built per crawl and reused for every request, so connections
// to the same host are pooled. Each request is bounded by the client timeout;
// redirects follow reqwest's default policy.
// =============================================================================

use super::Fetch;
use crate::error::FetchError;
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    // Sends a GET and turns non-2xx answers into FetchError::Status
    async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::transport(url.as_str(), &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

impl Fetch for HttpFetcher {
    fn fetch_page<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<String, FetchError>> {
        async move {
            let response = self.get(url).await?;
            response
                .text()
                .await
                .map_err(|e| FetchError::transport(url.as_str(), &e))
        }
        .boxed()
    }

    fn fetch_bytes<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        async move {
            let response = self.get(url).await?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| FetchError::transport(url.as_str(), &e))?;
            Ok(bytes.to_vec())
        }
        .boxed()
    }
}

//! HTTP text source.

use async_trait::async_trait;
use reqwest::Url;

use super::{ServiceConfig, TextSource};
use crate::error::{Error, Result};
use crate::model::Language;

/// Retrieves raw markup from a remote text service over HTTP.
///
/// Requests are `GET {endpoint}?selector=..&language=..`; the response body
/// is the markup.
#[derive(Debug, Clone)]
pub struct TextClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl TextClient {
    /// Build a client from a validated configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let endpoint_url = config.endpoint_url();
        let endpoint = Url::parse(&endpoint_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", endpoint_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// URL requested for a selector and language.
    pub fn request_url(&self, selector: &str, language: &Language) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("selector", selector)
            .append_pair("language", language.as_str());
        url
    }
}

#[async_trait]
impl TextSource for TextClient {
    async fn fetch_text(&self, selector: &str, language: &Language) -> Result<String> {
        let url = self.request_url(selector, language);
        log::debug!("GET {}", url);

        let response = self.http.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;

        log::debug!(
            "received {} bytes for {} ({})",
            text.len(),
            selector,
            language
        );
        Ok(text)
    }
}

//! This module provides a client to fetch task suggestions from a remote service

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use url::Url;

use crate::suggestion::Suggestion;
use crate::traits::SuggestionSource;


#[derive(Serialize)]
struct SuggestionRequest<'a> {
    prompt: &'a str,
}

/// Services either answer with a list of suggestions, or with a single one
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SuggestionResponse {
    Many(Vec<Suggestion>),
    One(Suggestion),
}

impl From<SuggestionResponse> for Vec<Suggestion> {
    fn from(response: SuggestionResponse) -> Self {
        match response {
            SuggestionResponse::Many(list) => list,
            SuggestionResponse::One(single) => vec![single],
        }
    }
}


/// A [`SuggestionSource`] that POSTs the prompt to an HTTP endpoint, as `{"prompt": "..."}`
pub struct HttpSuggestionSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSuggestionSource {
    /// Create a source. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self, Box<dyn Error>> {
        let url = Url::parse(url.as_ref())?;
        Ok(Self {
            url,
            client: reqwest::Client::new(),
        })
    }

    /// Create a source for the endpoint set in [`config::SUGGESTION_ENDPOINT`](crate::config::SUGGESTION_ENDPOINT)
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        let endpoint = crate::config::suggestion_endpoint();
        Self::new(endpoint)
    }

    pub fn url(&self) -> &Url { &self.url }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn suggest(&self, prompt: &str) -> Result<Vec<Suggestion>, Box<dyn Error>> {
        log::debug!("Requesting suggestions from {}", self.url);

        let res = self.client
            .post(self.url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(&SuggestionRequest { prompt })
            .send()
            .await?;

        let status = res.status();
        if status.is_success() == false {
            return Err(format!("Suggestion service at {} answered with status {}", self.url, status).into());
        }

        let text = res.text().await?;
        let response: SuggestionResponse = serde_json::from_str(&text)?;
        let suggestions: Vec<Suggestion> = response.into();
        log::debug!("Got {} suggestions", suggestions.len());
        Ok(suggestions)
    }
}

use crate::api::models::SearchResults;
use crate::api::query::{self, SearchRequest};
use crate::api::response;
use crate::error::{NixSearchError, Result};
use crate::user_agent;
use attohttpc::Session;
use log::{debug, trace};
use retry::{OperationResult, delay::Exponential, retry_with_index};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str =
    "https://nixos-search-7-1733963800.us-east-1.bonsaisearch.net:443";

// Public frontend credentials, fixed upstream:
// https://github.com/NixOS/nixos-search/blob/main/frontend/src/index.js
const ES_USERNAME: &str = "aWVSALXpZv";
const ES_PASSWORD: &str = "X8gPHnzL52wFEekuxsfQ9cSh";

const DEFAULT_TIMEOUT: u64 = 30;
const MAX_RETRIES: usize = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) session: Session,
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        let mut session = Session::new();
        session.header("User-Agent", user_agent::api_client());
        session.header("Accept", "application/json");
        session.timeout(Duration::from_secs(DEFAULT_TIMEOUT));
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self
    }

    /// Run one search call: build the channel's index URL and the query
    /// payload, POST them to the backend, and interpret the response.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let url = query::index_url(&self.base_url, &request.channel)?;
        let payload = query::search_payload(&request.query)?;
        debug!("Searching {url} for '{}'", request.query);

        let (status, body) = self.execute_with_retry(&url, &payload)?;
        trace!("Search response status={status}: {body}");

        let packages = response::interpret(status, &body, request)?;

        Ok(SearchResults {
            request: request.clone(),
            packages,
        })
    }

    /// POST the payload, retrying transient transport failures. Responses
    /// with a non-success status are not retried; the caller classifies
    /// them from the returned status and body.
    fn execute_with_retry(&self, url: &str, payload: &str) -> Result<(u16, String)> {
        let result = retry_with_index(
            Exponential::from_millis(INITIAL_BACKOFF_MS).take(MAX_RETRIES),
            |current_try| {
                let response = match self
                    .session
                    .post(url)
                    .basic_auth(ES_USERNAME, Some(ES_PASSWORD))
                    .text(payload)
                    .header("Content-Type", "application/json")
                    .send()
                {
                    Ok(resp) => resp,
                    Err(e) => {
                        if current_try < (MAX_RETRIES - 1) as u64 {
                            debug!("Search request failed (try {current_try}): {e}");
                            return OperationResult::Retry(NixSearchError::Http(e));
                        }
                        return OperationResult::Err(NixSearchError::Http(e));
                    }
                };

                let status = response.status().as_u16();
                match response.text() {
                    Ok(body) => OperationResult::Ok((status, body)),
                    Err(e) => OperationResult::Err(NixSearchError::Http(e)),
                }
            },
        );

        result.map_err(|e| e.error)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

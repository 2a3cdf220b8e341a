use reqwest::blocking::Client;
use tracing::info;

use crate::config::{CMR_HITS_HEADER, CMR_SEARCH_AFTER_HEADER};
use crate::error::HarvestError;

/// Walks a paginated search endpoint, yielding one raw response body per page.
///
/// The server signals "more pages" by echoing a continuation token in a
/// response header; the walker carries that token into the next request's
/// headers. A response without the token header is the last page and is still
/// yielded before iteration ends. The next request is only issued from the
/// next `next()` call, so a consumer that breaks early never costs an extra
/// round trip.
pub struct PageWalker {
    client: Client,
    url: String,
    params: Vec<(String, String)>,
    search_after: Option<String>,
    first_page: bool,
    finished: bool,
}

impl PageWalker {
    pub fn new(client: Client, url: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            client,
            url: url.into(),
            params,
            search_after: None,
            first_page: true,
            finished: false,
        }
    }

    fn fetch_page(&mut self) -> Result<String, HarvestError> {
        let mut request = self.client.get(&self.url).query(&self.params);
        if let Some(token) = &self.search_after {
            request = request.header(CMR_SEARCH_AFTER_HEADER, token.as_str());
        }
        let response = request
            .send()
            .map_err(|err| HarvestError::CatalogHttp(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "granule search failed".to_string());
            return Err(HarvestError::Search {
                status: status.as_u16(),
                body,
            });
        }

        if self.first_page {
            self.first_page = false;
            // Observability only; termination is driven by the token header.
            if let Some(hits) = response
                .headers()
                .get(CMR_HITS_HEADER)
                .and_then(|value| value.to_str().ok())
            {
                info!(hits, url = %self.url, "search reported total hits");
            }
        }

        let next_token = match response.headers().get(CMR_SEARCH_AFTER_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|err| HarvestError::ContinuationToken(err.to_string()))?
                    .to_string(),
            ),
            None => None,
        };
        self.finished = next_token.is_none();
        self.search_after = next_token;

        response
            .text()
            .map_err(|err| HarvestError::CatalogHttp(err.to_string()))
    }
}

impl Iterator for PageWalker {
    type Item = Result<String, HarvestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.fetch_page() {
            Ok(body) => Some(Ok(body)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

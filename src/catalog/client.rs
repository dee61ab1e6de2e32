//! HTTP catalog client.
//!
//! One blocking GET against the configured endpoint returns the whole
//! catalog. The server is never trusted to filter; when query parameters
//! are forwarded they are a hint only and ranking still runs locally.

use crate::model::{parse_catalog, FetchError, Product};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// What a fetch is for. Mirrors the committed query and page counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogRequest {
    /// Committed query.
    pub query: String,
    /// Page counter, starting at 1.
    pub page: u32,
}

/// Source of catalog data.
///
/// Implemented by [`HttpCatalog`] for real use and by in-memory fakes in
/// tests. Implementations are called from fetch worker threads.
pub trait CatalogClient: Send + Sync {
    /// Fetch the product list for `request`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` for transport failures, non-success statuses,
    /// and bodies that are not a product array.
    fn fetch(&self, request: &CatalogRequest) -> Result<Vec<Product>, FetchError>;
}

/// Settings for [`HttpCatalog`].
#[derive(Debug, Clone)]
pub struct HttpCatalogOptions {
    /// Catalog endpoint.
    pub endpoint: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a retryable failure.
    pub retries: u32,
    /// `limit` parameter sent when forwarding query params.
    pub page_size: u32,
    /// Send `search`, `page` and `limit` as query parameters.
    pub forward_query_params: bool,
}

/// Blocking HTTP implementation of [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::blocking::Client,
    options: HttpCatalogOptions,
}

impl HttpCatalog {
    /// Build a client for the given options.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be
    /// initialised (e.g. the TLS backend fails to load).
    pub fn new(options: HttpCatalogOptions) -> Result<Self, FetchError> {
        let builder = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("prodfind/", env!("CARGO_PKG_VERSION")));
        // Loopback test servers must not be routed through an env proxy
        #[cfg(test)]
        let builder = builder.no_proxy();

        let client = builder
            .build()
            .map_err(|e| FetchError::Transport {
                url: options.endpoint.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, options })
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.options.endpoint
    }

    fn fetch_once(&self, request: &CatalogRequest) -> Result<Vec<Product>, FetchError> {
        let url = self.options.endpoint.to_string();

        let mut builder = self.client.get(self.options.endpoint.clone());
        if self.options.forward_query_params {
            builder = builder.query(&[
                ("search", request.query.clone()),
                ("page", request.page.to_string()),
                ("limit", self.options.page_size.to_string()),
            ]);
        }

        let response = builder.send().map_err(|e| FetchError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| FetchError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        parse_catalog(&body).map_err(|e| FetchError::Decode {
            reason: e.to_string(),
        })
    }
}

impl CatalogClient for HttpCatalog {
    fn fetch(&self, request: &CatalogRequest) -> Result<Vec<Product>, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(request) {
                Ok(products) => {
                    debug!(
                        query = %request.query,
                        page = request.page,
                        count = products.len(),
                        "Catalog fetched"
                    );
                    return Ok(products);
                }
                Err(err) if err.is_retryable() && attempt < self.options.retries => {
                    attempt += 1;
                    warn!(error = %err, attempt, "Catalog fetch failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}

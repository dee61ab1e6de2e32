//! Catalog access (impure): HTTP client, response cache, background fetches.

pub mod cache;
pub mod client;
pub mod pool;

pub use cache::{CatalogCache, DEFAULT_CAPACITY, DEFAULT_EVICT_AFTER, DEFAULT_STALE_AFTER};
pub use client::{CatalogClient, CatalogRequest, HttpCatalog, HttpCatalogOptions};
pub use pool::{FetchOutcome, FetchPool};

mod client;
mod models;
mod query;
mod response;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use models::{ApiError, Hit, Hits, License, Package, SearchResponse, SearchResults};
pub use query::{INDEX_PREFIX, SearchRequest, index_url, search_payload};
pub use response::interpret;

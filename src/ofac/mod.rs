pub mod client;
pub mod types;

pub use client::{OfacClient, OfacClientError, OFAC_API_BASE};
pub use types::{ApiMatch, SearchRequest, SearchResponse};

pub mod matcher;
pub mod screener;

pub use matcher::evaluate;
pub use screener::Screener;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{Candidate, SanctionRecord};

/// External lookup returning candidate sanction records for a person.
#[async_trait]
pub trait SanctionsSource: Send + Sync {
    async fn search(&self, candidate: &Candidate) -> Result<Vec<SanctionRecord>, AppError>;
}

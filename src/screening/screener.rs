use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use uuid::Uuid;

use super::{matcher, SanctionsSource};
use crate::errors::AppError;
use crate::models::{Candidate, SanctionRecord, ScreeningDecision, SCREENING_FAILED_MESSAGE};

/// Runs one screening: upstream lookup, evaluation, audit log.
///
/// Never fails outward. Upstream and internal errors become a `Clear`
/// decision with the error flag set. There is no retry.
#[derive(Clone)]
pub struct Screener {
    source: Arc<dyn SanctionsSource>,
    upstream_timeout: Duration,
}

impl Screener {
    pub fn new(source: Arc<dyn SanctionsSource>, upstream_timeout: Duration) -> Self {
        Self {
            source,
            upstream_timeout,
        }
    }

    pub async fn screen(&self, candidate: &Candidate) -> ScreeningDecision {
        let screening_id = Uuid::new_v4();

        match self.lookup(candidate).await {
            Ok(records) => {
                let matches = matcher::evaluate(candidate, &records);
                let decision = ScreeningDecision::from_matches(matches);

                counter!("screenings_total", "result" => decision.result.to_string())
                    .increment(1);
                tracing::info!(
                    target: "audit",
                    screening_id = %screening_id,
                    full_name = %candidate.full_name,
                    birth_year = %candidate.birth_year,
                    country = %candidate.country,
                    records = records.len(),
                    result = %decision.result,
                    name_match = matches.name,
                    birth_year_match = matches.birth_year,
                    country_match = matches.country,
                    "Screening request processed"
                );
                decision
            }
            Err(e) => {
                counter!("screenings_failed_total", "kind" => e.kind()).increment(1);
                tracing::error!(
                    target: "audit",
                    screening_id = %screening_id,
                    full_name = %candidate.full_name,
                    birth_year = %candidate.birth_year,
                    country = %candidate.country,
                    kind = e.kind(),
                    error = %e,
                    "Error during screening"
                );
                ScreeningDecision::failure(SCREENING_FAILED_MESSAGE)
            }
        }
    }

    async fn lookup(&self, candidate: &Candidate) -> Result<Vec<SanctionRecord>, AppError> {
        let started = Instant::now();
        let outcome =
            tokio::time::timeout(self.upstream_timeout, self.source.search(candidate)).await;
        histogram!("upstream_latency_seconds").record(started.elapsed().as_secs_f64());

        match outcome {
            Ok(result) => result,
            Err(_) => Err(AppError::Upstream(format!(
                "sanctions source timed out after {}ms",
                self.upstream_timeout.as_millis()
            ))),
        }
    }
}

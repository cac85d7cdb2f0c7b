pub mod candidate;
pub mod decision;
pub mod sanction;

pub use candidate::{Candidate, ScreenRequest, YearInput};
pub use decision::{MatchFlags, ScreeningDecision, ScreeningResult, SCREENING_FAILED_MESSAGE};
pub use sanction::{Address, Identification, SanctionRecord};

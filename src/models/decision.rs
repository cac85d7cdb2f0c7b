use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned to callers whenever screening could not complete.
/// Details stay in the logs.
pub const SCREENING_FAILED_MESSAGE: &str = "An error occurred while searching";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningResult {
    Hit,
    Clear,
}

impl fmt::Display for ScreeningResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreeningResult::Hit => write!(f, "Hit"),
            ScreeningResult::Clear => write!(f, "Clear"),
        }
    }
}

/// Per-field outcome of one evaluation. Flags only ever go from false to true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFlags {
    pub name: bool,
    pub birth_year: bool,
    pub country: bool,
}

impl MatchFlags {
    pub fn any(&self) -> bool {
        self.name || self.birth_year || self.country
    }

    pub fn all(&self) -> bool {
        self.name && self.birth_year && self.country
    }

    pub fn result(&self) -> ScreeningResult {
        if self.any() {
            ScreeningResult::Hit
        } else {
            ScreeningResult::Clear
        }
    }
}

/// Response body of `POST /screen`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningDecision {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub result: ScreeningResult,
    pub matches: MatchFlags,
}

impl ScreeningDecision {
    pub fn from_matches(matches: MatchFlags) -> Self {
        Self {
            error: false,
            error_message: None,
            result: matches.result(),
            matches,
        }
    }

    /// Fail-safe decision: `Clear`, no flags, error surfaced to the caller.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_message: Some(message.into()),
            result: ScreeningResult::Clear,
            matches: MatchFlags::default(),
        }
    }

    pub fn is_ok(&self) -> bool {
        !self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_iff_any_flag() {
        assert_eq!(MatchFlags::default().result(), ScreeningResult::Clear);
        let only_country = MatchFlags {
            country: true,
            ..Default::default()
        };
        assert_eq!(only_country.result(), ScreeningResult::Hit);
    }

    #[test]
    fn test_success_wire_shape() {
        let decision = ScreeningDecision::from_matches(MatchFlags {
            name: true,
            birth_year: false,
            country: true,
        });
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": false,
                "result": "Hit",
                "matches": { "name": true, "birthYear": false, "country": true }
            })
        );
    }

    #[test]
    fn test_failure_wire_shape() {
        let json = serde_json::to_value(ScreeningDecision::failure("boom")).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["errorMessage"], "boom");
        assert_eq!(json["result"], "Clear");
        assert_eq!(
            json["matches"],
            serde_json::json!({ "name": false, "birthYear": false, "country": false })
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Identity attributes submitted for screening. Every field is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub full_name: String,
    pub birth_year: String,
    pub country: String,
}

impl Candidate {
    /// Build a candidate, rejecting any field that is missing or blank.
    pub fn new(
        full_name: Option<String>,
        birth_year: Option<String>,
        country: Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            full_name: required("fullName", full_name)?,
            birth_year: required("birthYear", birth_year)?,
            country: required("country", country)?,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::InvalidInput(format!("{field} is required"))),
    }
}

/// Raw `POST /screen` body. Fields stay optional so presence is checked by
/// [`Candidate::new`] instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub birth_year: Option<YearInput>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Birth year as sent by clients: a form sends `"1980"`, a script may send `1980`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum YearInput {
    Text(String),
    Number(u64),
}

impl From<YearInput> for String {
    fn from(year: YearInput) -> Self {
        match year {
            YearInput::Text(s) => s,
            YearInput::Number(n) => n.to_string(),
        }
    }
}

impl TryFrom<ScreenRequest> for Candidate {
    type Error = AppError;

    fn try_from(req: ScreenRequest) -> Result<Self, Self::Error> {
        Candidate::new(req.full_name, req.birth_year.map(String::from), req.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_trims_fields() {
        let c = Candidate::new(
            Some("  John Smith ".into()),
            Some("1980".into()),
            Some("Cuba\n".into()),
        )
        .unwrap();
        assert_eq!(c.full_name, "John Smith");
        assert_eq!(c.country, "Cuba");
    }

    #[test]
    fn test_candidate_rejects_blank_field() {
        let err = Candidate::new(Some("John".into()), Some("   ".into()), Some("Cuba".into()))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("birthYear")));
    }

    #[test]
    fn test_candidate_rejects_missing_field() {
        let err = Candidate::new(None, Some("1980".into()), Some("Cuba".into())).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("fullName")));
    }

    #[test]
    fn test_request_accepts_numeric_year() {
        let req: ScreenRequest = serde_json::from_str(
            r#"{"fullName":"John Smith","birthYear":1980,"country":"Cuba"}"#,
        )
        .unwrap();
        let c = Candidate::try_from(req).unwrap();
        assert_eq!(c.birth_year, "1980");
    }

    #[test]
    fn test_request_missing_country() {
        let req: ScreenRequest =
            serde_json::from_str(r#"{"fullName":"John Smith","birthYear":"1980"}"#).unwrap();
        assert!(Candidate::try_from(req).is_err());
    }
}

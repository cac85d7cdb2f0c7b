use serde::{Deserialize, Serialize};

/// One potential match returned by the sanctions source.
///
/// Every field may be absent; an absent field never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionRecord {
    pub name: Option<String>,
    pub formatted_name: Option<String>,
    pub aliases: Vec<String>,
    /// Full or partial dates, e.g. `1980-01-01`, `circa 1975`, `1962`.
    pub birth_dates: Vec<String>,
    pub addresses: Vec<Address>,
    pub identifications: Vec<Identification>,
    pub citizenships: Vec<String>,
    pub nationalities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
    pub country: Option<String>,
}

use serde::{Deserialize, Serialize};

use crate::models::{Address, Candidate, Identification, SanctionRecord};

// ---------------------------------------------------------------------------
// Search request (POST /v4/search)
// ---------------------------------------------------------------------------

pub const SOURCE_SDN: &str = "SDN";
pub const TYPE_PERSON: &str = "person";
pub const ID_TYPE_DOB: &str = "DOB";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub api_key: &'a str,
    pub sources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub cases: Vec<SearchCase<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchCase<'a> {
    pub name: &'a str,
    pub address: CaseAddress<'a>,
    pub identification: Vec<CaseIdentification<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseAddress<'a> {
    pub country: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseIdentification<'a> {
    #[serde(rename = "type")]
    pub id_type: &'static str,
    pub id_number: &'a str,
}

impl<'a> SearchRequest<'a> {
    /// One person case against the SDN list, birth year sent as a DOB identification.
    pub fn person(api_key: &'a str, candidate: &'a Candidate) -> Self {
        Self {
            api_key,
            sources: vec![SOURCE_SDN],
            types: vec![TYPE_PERSON],
            cases: vec![SearchCase {
                name: &candidate.full_name,
                address: CaseAddress {
                    country: &candidate.country,
                },
                identification: vec![CaseIdentification {
                    id_type: ID_TYPE_DOB,
                    id_number: &candidate.birth_year,
                }],
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Search response
// ---------------------------------------------------------------------------
//
// The provider omits or nulls fields freely, so everything is optional,
// including individual array entries. Null entries are dropped on conversion.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub error: Option<bool>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<Option<SearchResult>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub matches: Option<Vec<Option<ApiMatch>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_formatted: Option<String>,
    #[serde(default)]
    pub alias: Option<Vec<Option<ApiAlias>>>,
    #[serde(default)]
    pub person_details: Option<ApiPersonDetails>,
    #[serde(default)]
    pub addresses: Option<Vec<Option<ApiCountryRef>>>,
    #[serde(default)]
    pub identifications: Option<Vec<Option<ApiCountryRef>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAlias {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPersonDetails {
    #[serde(default)]
    pub birth_dates: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub citizenships: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub nationalities: Option<Vec<Option<String>>>,
}

/// Addresses and identifications: only the country is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCountryRef {
    #[serde(default)]
    pub country: Option<String>,
}

impl SearchResponse {
    pub fn is_error(&self) -> bool {
        self.error.unwrap_or(false)
    }

    /// Matches of the first (and only) case. Missing at any level means none.
    pub fn into_first_matches(self) -> Vec<ApiMatch> {
        self.results
            .and_then(|results| results.into_iter().next())
            .flatten()
            .and_then(|first| first.matches)
            .map(present)
            .unwrap_or_default()
    }
}

/// Drop null entries from a nullable provider array.
fn present<T>(items: Vec<Option<T>>) -> Vec<T> {
    items.into_iter().flatten().collect()
}

fn present_or_empty<T>(items: Option<Vec<Option<T>>>) -> Vec<T> {
    items.map(present).unwrap_or_default()
}

impl From<ApiMatch> for SanctionRecord {
    fn from(m: ApiMatch) -> Self {
        let details = m.person_details.unwrap_or_default();
        Self {
            name: m.name,
            formatted_name: m.name_formatted,
            aliases: present_or_empty(m.alias)
                .into_iter()
                .filter_map(|a| a.name)
                .collect(),
            birth_dates: present_or_empty(details.birth_dates),
            addresses: present_or_empty(m.addresses)
                .into_iter()
                .map(|a| Address { country: a.country })
                .collect(),
            identifications: present_or_empty(m.identifications)
                .into_iter()
                .map(|i| Identification { country: i.country })
                .collect(),
            citizenships: present_or_empty(details.citizenships),
            nationalities: present_or_empty(details.nationalities),
        }
    }
}

use crate::models::{Candidate, MatchFlags, SanctionRecord};

/// Candidate attributes folded once up front so each record only folds its own side.
struct Needle<'a> {
    name: String,
    birth_year: &'a str,
    country: String,
}

impl<'a> Needle<'a> {
    fn new(candidate: &'a Candidate) -> Self {
        Self {
            name: candidate.full_name.to_lowercase(),
            birth_year: &candidate.birth_year,
            country: candidate.country.to_lowercase(),
        }
    }
}

fn eq_folded(folded: &str, other: &str) -> bool {
    other.to_lowercase() == folded
}

fn name_matches(needle: &Needle<'_>, record: &SanctionRecord) -> bool {
    record
        .name
        .iter()
        .chain(record.formatted_name.iter())
        .chain(record.aliases.iter())
        .any(|n| eq_folded(&needle.name, n))
}

/// Source dates come in mixed formats, so containment is the rule, not equality.
fn birth_year_matches(needle: &Needle<'_>, record: &SanctionRecord) -> bool {
    record
        .birth_dates
        .iter()
        .any(|date| date.contains(needle.birth_year))
}

fn country_matches(needle: &Needle<'_>, record: &SanctionRecord) -> bool {
    let addresses = record.addresses.iter().filter_map(|a| a.country.as_deref());
    let identifications = record
        .identifications
        .iter()
        .filter_map(|i| i.country.as_deref());
    let citizenships = record.citizenships.iter().map(String::as_str);
    let nationalities = record.nationalities.iter().map(String::as_str);

    addresses
        .chain(identifications)
        .chain(citizenships)
        .chain(nationalities)
        .any(|c| eq_folded(&needle.country, c))
}

/// Score `records` against `candidate`, field by field.
///
/// A flag turns on as soon as any record satisfies its rule and stays on.
/// Records are scanned in order and the scan stops once all three flags hold.
pub fn evaluate(candidate: &Candidate, records: &[SanctionRecord]) -> MatchFlags {
    let needle = Needle::new(candidate);
    let mut flags = MatchFlags::default();

    for record in records {
        if !flags.name && name_matches(&needle, record) {
            flags.name = true;
        }
        if !flags.birth_year && birth_year_matches(&needle, record) {
            flags.birth_year = true;
        }
        if !flags.country && country_matches(&needle, record) {
            flags.country = true;
        }

        if flags.all() {
            break;
        }
    }

    flags
}

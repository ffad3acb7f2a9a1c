//! Case-insensitive substring filter for user records.

use crate::model::user::UserRecord;

/// Returns whether `record` matches an already lowercased, non-blank `needle`.
///
/// Matches on name, email or company.
pub fn matches_term(record: &UserRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.email.to_lowercase().contains(needle)
        || record.company.to_lowercase().contains(needle)
}

/// Filters `records` by `term`.
///
/// A blank term returns every record. The term itself is not trimmed
/// otherwise, so `"ana "` only matches text containing a trailing space.
pub fn filter_users<'a>(records: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    if term.trim().is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches_term(record, &needle))
        .collect()
}

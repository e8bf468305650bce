//! Deduplication and ordering of strategy outputs

use std::collections::HashSet;

use super::{canonical_or_self, Candidate};

/// Deduplicate by canonical path and sort by line count, largest first.
///
/// The first occurrence of a path wins; later duplicates are dropped without
/// being re-measured. Ties keep their discovery order.
pub fn merge(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Candidate> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let key = canonical_or_self(&candidate.path);
            seen.insert(key.clone()).then_some(Candidate {
                path: key,
                lines: candidate.lines,
            })
        })
        .collect();

    unique.sort_by(|a, b| b.lines.cmp(&a.lines));
    unique
}

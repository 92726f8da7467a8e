//! Free-text keyword matching.
//!
//! The highest-traffic matcher, and the only one with boosting rules:
//!
//! 1. Candidate keys are every keyword containing the token as a substring,
//!    ordered by ascending length then lexicographically.
//! 2. An exact key match is taken first; if it names a department (by
//!    canonical id or alias), that department's full course list is pulled in
//!    and the fuzzy remainder is suppressed so broader substring noise does
//!    not dilute an exact result.
//! 3. Otherwise the remaining candidate lists are appended in sorted order.
//! 4. Bare departments anywhere in the accumulated result are expanded with
//!    their course lists while the running size stays within `num_results`.
//!    The scan covers the whole accumulated list, including entries appended
//!    during the scan (those are always courses, so the expansion
//!    terminates).
//!
//! The exact key is extracted before the remainder is processed, and the
//! remainder comes from an immutable candidate list. No map is mutated while
//! being iterated.

use crate::combine::OrderedSet;
use crate::types::{EntityType, Index};

/// Match a single lowercase free-text token. `num_results` bounds the
/// department expansion, not the returned set.
pub fn match_keyword(index: &Index, token: &str, num_results: usize) -> OrderedSet {
    let mut response = OrderedSet::new();

    // Step 1: candidate keys, shortest (most specific to the token) first.
    let mut candidates: Vec<&String> = index
        .keywords
        .keys()
        .filter(|key| key.contains(token))
        .collect();
    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    // Step 2: exact match, with department expansion.
    let mut exact_department_match = false;
    if let Some(position) = candidates.iter().position(|key| key.as_str() == token) {
        let key = candidates.remove(position);
        let ids = &index.keywords[key];
        for id in ids {
            response.insert(id.clone());
        }
        for id in ids {
            if is_exact_department(index, token, id) {
                push_department_courses(index, id, &mut response);
                exact_department_match = true;
            }
        }
    }

    // Step 3: fuzzy remainder, suppressed when an exact department matched.
    if !exact_department_match {
        for key in &candidates {
            for id in &index.keywords[key.as_str()] {
                response.insert(id.clone());
            }
        }
    }

    // Step 4: low-water-mark expansion over the growing list.
    let mut i = 0;
    while i < response.len() {
        let id = match response.get(i) {
            Some(id) => id.to_string(),
            None => break,
        };
        if response.len() <= num_results
            && index
                .object(&id)
                .is_some_and(|e| e.entity_type == EntityType::Department)
        {
            push_department_courses(index, &id, &mut response);
        }
        i += 1;
    }

    response
}

/// Whether `id` is a DEPARTMENT whose canonical id equals the uppercased
/// token, or whose alias table maps the token to it.
fn is_exact_department(index: &Index, token: &str, id: &str) -> bool {
    let Some(entity) = index.object(id) else {
        return false;
    };
    entity.entity_type == EntityType::Department
        && (token.to_uppercase() == id
            || index
                .aliases
                .get(token)
                .is_some_and(|departments| departments.iter().any(|d| d == id)))
}

fn push_department_courses(index: &Index, department_id: &str, response: &mut OrderedSet) {
    for (id, entity) in &index.objects {
        if entity.department() == Some(department_id) {
            response.insert(id.clone());
        }
    }
}

//! Course-number matching.

use crate::combine::OrderedSet;
use crate::query::CourseToken;
use crate::types::{EntityType, Index};

/// Match a single course-number token against the index.
///
/// A qualified token (department fragment present) is matched as an
/// uppercased, space-stripped substring of object ids, after rewriting any
/// alias prefix of the fragment to each of its canonical department codes.
/// A bare numeral is matched as a substring of COURSE `number` metadata.
pub fn match_course(index: &Index, token: &CourseToken) -> OrderedSet {
    let mut out = OrderedSet::new();

    match &token.department {
        Some(fragment) => {
            // One candidate key per (alias, canonical department) rewrite; an
            // alias may map to more than one department spelling.
            let mut keys: Vec<String> = Vec::new();
            for (alias, departments) in &index.aliases {
                if fragment.starts_with(alias.as_str()) {
                    for department in departments {
                        let rewritten = CourseToken {
                            department: Some(format!(
                                "{department}{}",
                                &fragment[alias.len()..]
                            )),
                            number: token.number.clone(),
                        };
                        keys.push(rewritten.match_key());
                    }
                }
            }
            if keys.is_empty() {
                keys.push(token.match_key());
            }

            for id in index.objects.keys() {
                if keys.iter().any(|key| id.contains(key.as_str())) {
                    out.insert(id.clone());
                }
            }
        }
        None => {
            let needle = token.number.to_uppercase();
            for (id, entity) in &index.objects {
                if entity.entity_type == EntityType::Course
                    && entity.number().is_some_and(|n| n.contains(&needle))
                {
                    out.insert(id.clone());
                }
            }
        }
    }

    out
}

//! GE-category matching.

use crate::query::GeToken;
use crate::types::Index;

/// Match a single GE-category token.
///
/// Returns a list whose first element is the canonical category id itself and
/// whose remaining elements are every object whose `geList` metadata includes
/// that id. A result of exactly one element means the category matched
/// nothing; the caller treats it as invalid and falls through to
/// course-number/keyword handling.
pub fn match_ge(index: &Index, token: &GeToken) -> Vec<String> {
    let category_id = token.canonical_id();
    let mut out = vec![category_id.clone()];
    for (id, entity) in &index.objects {
        if entity.in_ge_category(&category_id) {
            out.push(id.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entity, EntityType, Metadata, MetadataValue};

    fn fixture() -> Index {
        let mut index = Index::default();
        index.objects.insert(
            "GE-2".into(),
            Entity {
                entity_type: EntityType::GeCategory,
                name: "Science and Technology".into(),
                metadata: Metadata::new(),
            },
        );
        let mut metadata = Metadata::new();
        metadata.insert("department".into(), MetadataValue::from("COMPSCI"));
        metadata.insert("number".into(), MetadataValue::from("161"));
        metadata.insert("geList".into(), MetadataValue::List(vec!["GE-2".into()]));
        index.objects.insert(
            "COMPSCI161".into(),
            Entity {
                entity_type: EntityType::Course,
                name: "Design and Analysis of Algorithms".into(),
                metadata,
            },
        );
        index
    }

    #[test]
    fn category_id_is_first_then_members() {
        let index = fixture();
        let token = GeToken::parse("ge2").unwrap();
        let ids = match_ge(&index, &token);
        assert_eq!(ids, vec!["GE-2", "COMPSCI161"]);
    }

    #[test]
    fn unpopulated_category_yields_singleton() {
        let index = fixture();
        let token = GeToken::parse("ge7").unwrap();
        let ids = match_ge(&index, &token);
        assert_eq!(ids, vec!["GE-7"]);
    }

    #[test]
    fn roman_and_digit_forms_agree() {
        let index = fixture();
        let digit = match_ge(&index, &GeToken::parse("ge2").unwrap());
        let roman = match_ge(&index, &GeToken::parse("geii").unwrap());
        assert_eq!(digit, roman);
    }
}

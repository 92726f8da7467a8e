//! Offline index construction (ETL).
//!
//! The builder turns the raw course/instructor caches into the immutable
//! search index: it seeds the fixed GE-category table, derives keyword
//! associations from titles, department names/aliases, and instructor names,
//! builds the department alias table, and pre-sorts every keyword list with
//! the build-time hierarchy comparator. The output serializes to the JSON
//! artifact the engine loads.
//!
//! # Keyword list order
//!
//! Keyword lists are sorted GE before department before instructor before
//! course, lexiconumeric within a tier. This is *not* the runtime ranking
//! order (which puts courses before instructors); the engine preserves list
//! order as-is and only re-sorts full results.

pub mod fetch;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::error::BuildError;
use crate::types::{Entity, EntityType, Index, Metadata, MetadataValue};

/// The fixed general-education category table.
pub const GE_CATEGORIES: &[(&str, &str)] = &[
    ("GE-1A", "Lower Division Writing"),
    ("GE-1B", "Upper Division Writing"),
    ("GE-2", "Science and Technology"),
    ("GE-3", "Social and Behavioral Sciences"),
    ("GE-4", "Arts and Humanities"),
    ("GE-5A", "Quantitative Literacy"),
    ("GE-5B", "Formal Reasoning"),
    ("GE-6", "Language other than English"),
    ("GE-7", "Multicultural Studies"),
    ("GE-8", "International/Global Issues"),
];

/// One entry of the parsed course cache, keyed by course id.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRecord {
    pub department: String,
    pub department_name: String,
    #[serde(default)]
    pub department_alias: Vec<String>,
    pub number: String,
    pub title: String,
    /// Canonical GE category ids this course satisfies, if any.
    #[serde(default)]
    pub ge_list: Vec<String>,
}

/// One entry of the parsed instructor cache.
#[derive(Debug, Clone, Deserialize)]
pub struct InstructorRecord {
    pub name: String,
    pub shortened_name: String,
}

/// Build the search index from parsed cache records.
pub fn build_index(
    courses: &BTreeMap<String, CourseRecord>,
    instructors: &BTreeMap<String, InstructorRecord>,
) -> Index {
    let mut index = Index::default();
    let mut keywords: BTreeMap<String, Vec<String>> = BTreeMap::new();

    // GE categories
    for (id, name) in GE_CATEGORIES {
        index.objects.insert(
            (*id).to_string(),
            Entity {
                entity_type: EntityType::GeCategory,
                name: (*name).to_string(),
                metadata: Metadata::new(),
            },
        );
        for keyword in keywordize(name) {
            associate(&mut keywords, keyword, id);
        }
    }

    // Departments (deduplicated across the courses that mention them)
    for record in courses.values() {
        if index.objects.contains_key(&record.department) {
            continue;
        }
        let mut metadata = Metadata::new();
        if !record.department_alias.is_empty() {
            metadata.insert(
                "aliases".into(),
                MetadataValue::List(record.department_alias.clone()),
            );
        }
        index.objects.insert(
            record.department.clone(),
            Entity {
                entity_type: EntityType::Department,
                name: record.department_name.clone(),
                metadata,
            },
        );
        for alias in &record.department_alias {
            let alias = alias.to_lowercase();
            associate(&mut keywords, alias.clone(), &record.department);
            let targets = index.aliases.entry(alias).or_default();
            if !targets.contains(&record.department) {
                targets.push(record.department.clone());
            }
        }
        for keyword in keywordize(&record.department_name) {
            associate(&mut keywords, keyword, &record.department);
        }
    }

    // Courses
    for (id, record) in courses {
        let mut metadata = Metadata::new();
        metadata.insert("department".into(), MetadataValue::from(record.department.clone()));
        metadata.insert("number".into(), MetadataValue::from(record.number.clone()));
        if !record.ge_list.is_empty() {
            metadata.insert("geList".into(), MetadataValue::List(record.ge_list.clone()));
        }
        index.objects.insert(
            id.clone(),
            Entity {
                entity_type: EntityType::Course,
                name: record.title.clone(),
                metadata,
            },
        );
        for keyword in keywordize(&record.title) {
            associate(&mut keywords, keyword, id);
        }
    }

    // Instructors
    for record in instructors.values() {
        index.objects.insert(
            record.shortened_name.clone(),
            Entity {
                entity_type: EntityType::Instructor,
                name: record.name.clone(),
                metadata: Metadata::new(),
            },
        );
        for keyword in keywordize_name(&record.name) {
            associate(&mut keywords, keyword, &record.shortened_name);
        }
    }

    // Pre-sort every keyword list with the hierarchy comparator; the engine
    // preserves this order at query time.
    for ids in keywords.values_mut() {
        ids.sort_by(|a, b| hierarchy_cmp(&index, a, b));
    }
    index.keywords = keywords;

    info!(
        objects = index.objects.len(),
        keywords = index.keywords.len(),
        aliases = index.aliases.len(),
        "index built"
    );
    index
}

/// Serialize the index artifact as JSON.
pub fn save_index(index: &Index, path: &Path) -> Result<(), BuildError> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), index).map_err(|source| BuildError::Json {
        file: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "index written");
    Ok(())
}

/// Associate an id with a keyword, deduplicating.
fn associate(keywords: &mut BTreeMap<String, Vec<String>>, keyword: String, id: &str) {
    let ids = keywords.entry(keyword).or_default();
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}

/// Lowercase a title, strip connectives and joining punctuation, and split
/// into keywords.
pub fn keywordize(s: &str) -> Vec<String> {
    s.to_lowercase()
        .chars()
        .map(|c| if matches!(c, '&' | '/' | '-') { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .filter(|word| *word != "and" && *word != "of")
        .map(str::to_string)
        .collect()
}

/// Lowercase a proper name, strip diacritics so ASCII queries match accented
/// spellings, split on spaces/dashes, and drop middle initials.
pub fn keywordize_name(s: &str) -> Vec<String> {
    fold_diacritics(s)
        .to_lowercase()
        .replace(['-', ',', '.'], " ")
        .split_whitespace()
        .filter(|part| part.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// NFD-decompose and drop combining marks: "Peltzér" → "Peltzer".
fn fold_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Unicode category Mn (Mark, Nonspacing) ranges that cover the common
/// combining diacritical marks.
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Build-time tier: GE, then departments, then instructors, then courses.
fn hierarchy_tier(index: &Index, id: &str) -> u8 {
    match index.object(id).map(|e| e.entity_type) {
        Some(EntityType::GeCategory) => 0,
        Some(EntityType::Department) => 1,
        Some(EntityType::Instructor) => 2,
        Some(EntityType::Course) | None => 3,
    }
}

fn hierarchy_cmp(index: &Index, a: &str, b: &str) -> Ordering {
    hierarchy_tier(index, a)
        .cmp(&hierarchy_tier(index, b))
        .then_with(|| lexiconumeric(a, b))
}

/// Lexiconumeric order: strip the longest common literal prefix (stopping at
/// the first digit), then compare numeric remainders numerically, falling
/// back to plain lexicographic order.
fn lexiconumeric(a: &str, b: &str) -> Ordering {
    let common = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y && !x.is_ascii_digit())
        .count();
    let (rest_a, rest_b) = (&a[common..], &b[common..]);
    match (rest_a.parse::<u64>(), rest_b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => rest_a.cmp(rest_b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(
        dept: &str,
        dept_name: &str,
        aliases: &[&str],
        number: &str,
        title: &str,
    ) -> CourseRecord {
        CourseRecord {
            department: dept.into(),
            department_name: dept_name.into(),
            department_alias: aliases.iter().map(|s| s.to_string()).collect(),
            number: number.into(),
            title: title.into(),
            ge_list: Vec::new(),
        }
    }

    fn fixture_caches() -> (BTreeMap<String, CourseRecord>, BTreeMap<String, InstructorRecord>) {
        let mut courses = BTreeMap::new();
        courses.insert(
            "COMPSCI161".to_string(),
            course("COMPSCI", "Computer Science", &["CS"], "161", "Design and Analysis of Algorithms"),
        );
        courses.insert(
            "COMPSCI2".to_string(),
            course("COMPSCI", "Computer Science", &["CS"], "2", "Systems Programming"),
        );
        let mut instructors = BTreeMap::new();
        instructors.insert(
            "peltzerj".to_string(),
            InstructorRecord {
                name: "Jennifer Peltzer".into(),
                shortened_name: "PELTZER_J".into(),
            },
        );
        (courses, instructors)
    }

    #[test]
    fn keywordize_strips_connectives_and_punctuation() {
        assert_eq!(
            keywordize("Design and Analysis of Algorithms"),
            vec!["design", "analysis", "algorithms"]
        );
        assert_eq!(keywordize("I&C SCI"), vec!["i", "c", "sci"]);
        assert_eq!(keywordize("Global-Gender Studies"), vec!["global", "gender", "studies"]);
    }

    #[test]
    fn keywordize_name_drops_initials_and_diacritics() {
        assert_eq!(keywordize_name("Peltzér, J."), vec!["peltzer"]);
        assert_eq!(
            keywordize_name("García-Márquez, Gabriel"),
            vec!["garcia", "marquez", "gabriel"]
        );
    }

    #[test]
    fn builds_ge_seed_and_alias_table() {
        let (courses, instructors) = fixture_caches();
        let index = build_index(&courses, &instructors);

        assert_eq!(index.objects["GE-5B"].name, "Formal Reasoning");
        assert_eq!(index.aliases["cs"], vec!["COMPSCI"]);
        // Department metadata carries the alias spellings.
        assert!(index.objects["COMPSCI"].metadata["aliases"].contains("CS"));
        assert!(index.validate().is_ok());
    }

    #[test]
    fn course_metadata_is_populated() {
        let (courses, instructors) = fixture_caches();
        let index = build_index(&courses, &instructors);
        let entity = &index.objects["COMPSCI161"];
        assert_eq!(entity.department(), Some("COMPSCI"));
        assert_eq!(entity.number(), Some("161"));
    }

    #[test]
    fn keyword_lists_are_hierarchy_sorted() {
        let (mut courses, instructors) = fixture_caches();
        // "science" associates both the department (via its name) and a
        // course (via its title).
        courses.insert(
            "PHYSCI20".to_string(),
            course("PHYSCI", "Physical Sciences", &[], "20", "Science Writing"),
        );
        let index = build_index(&courses, &instructors);
        let science = &index.keywords["science"];
        // GE-2 ("Science and Technology") first, then departments, then the
        // course.
        assert_eq!(science[0], "GE-2");
        assert!(science.iter().position(|id| id == "COMPSCI").unwrap()
            < science.iter().position(|id| id == "PHYSCI20").unwrap());
    }

    #[test]
    fn lexiconumeric_orders_numeric_suffixes() {
        assert_eq!(lexiconumeric("COMPSCI2", "COMPSCI161"), Ordering::Less);
        assert_eq!(lexiconumeric("COMPSCI161", "COMPSCI161"), Ordering::Equal);
        assert_eq!(lexiconumeric("MATH2", "COMPSCI161"), Ordering::Greater);
    }

    #[test]
    fn artifact_roundtrip() {
        let (courses, instructors) = fixture_caches();
        let index = build_index(&courses, &instructors);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        save_index(&index, &path).unwrap();

        let loaded = crate::index::load_index(&path).unwrap();
        assert_eq!(loaded.objects.len(), index.objects.len());
        assert_eq!(loaded.keywords, index.keywords);
        assert_eq!(loaded.aliases, index.aliases);
    }
}

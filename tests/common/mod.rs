//! Shared test fixtures: a small but realistic catalog index.
//!
//! Built through the real ETL (`zotsearch::build::build_index`) from
//! in-memory cache records, so integration tests exercise the builder's
//! keywordization, alias table, and keyword-list ordering along with the
//! engine.

#![allow(dead_code)]

use std::collections::BTreeMap;

use zotsearch::build::{build_index, CourseRecord, InstructorRecord};
use zotsearch::{Index, SearchEngine};

pub fn catalog_index() -> Index {
    build_index(&courses(), &instructors())
}

pub fn engine() -> SearchEngine {
    SearchEngine::with_index(catalog_index())
}

fn course(
    department: &str,
    department_name: &str,
    aliases: &[&str],
    number: &str,
    title: &str,
    ge_list: &[&str],
) -> CourseRecord {
    CourseRecord {
        department: department.into(),
        department_name: department_name.into(),
        department_alias: aliases.iter().map(|s| s.to_string()).collect(),
        number: number.into(),
        title: title.into(),
        ge_list: ge_list.iter().map(|s| s.to_string()).collect(),
    }
}

fn courses() -> BTreeMap<String, CourseRecord> {
    let compsci = |number: &str, title: &str, ge: &[&str]| {
        course("COMPSCI", "Computer Science", &["CS", "CompSci"], number, title, ge)
    };
    let math = |number: &str, title: &str, ge: &[&str]| {
        course("MATH", "Mathematics", &[], number, title, ge)
    };

    let mut records = BTreeMap::new();
    records.insert(
        "COMPSCI122A".to_string(),
        compsci("122A", "Introduction to Data Management", &[]),
    );
    records.insert(
        "COMPSCI161".to_string(),
        compsci("161", "Design and Analysis of Algorithms", &[]),
    );
    records.insert(
        "COMPSCI171".to_string(),
        compsci("171", "Introduction to Artificial Intelligence", &[]),
    );
    records.insert(
        "COMPSCIH290".to_string(),
        compsci("H290", "Honors Research Seminar", &[]),
    );
    records.insert(
        "MATH2A".to_string(),
        math("2A", "Single-Variable Calculus I", &["GE-5A", "GE-5B"]),
    );
    records.insert(
        "MATH2B".to_string(),
        math("2B", "Single-Variable Calculus II", &["GE-5A", "GE-5B"]),
    );
    records.insert(
        "MATH10".to_string(),
        math("10", "Probability and Statistics", &["GE-5A"]),
    );
    records.insert("MATH161".to_string(), math("161", "Abstract Algebra", &[]));
    records.insert(
        "I&CSCI31".to_string(),
        course(
            "I&CSCI",
            "Information and Computer Science",
            &["ICS", "I&C SCI"],
            "31",
            "Introduction to Programming",
            &["GE-2"],
        ),
    );
    records.insert(
        "PHYSICS7C".to_string(),
        course("PHYSICS", "Physics", &[], "7C", "Classical Physics", &["GE-2"]),
    );
    records
}

fn instructors() -> BTreeMap<String, InstructorRecord> {
    let mut records = BTreeMap::new();
    for (key, name, shortened) in [
        ("peltzerj", "Jennifer Peltzer", "PELTZER_J"),
        ("thorntona", "Alex Thornton", "THORNTON_A"),
        ("pattisr", "Richard Pattis", "PATTIS_R"),
    ] {
        records.insert(
            key.to_string(),
            InstructorRecord {
                name: name.into(),
                shortened_name: shortened.into(),
            },
        );
    }
    records
}

//! The deterministic total order over result ids.
//!
//! Entities sort by type priority first (GE categories, then departments,
//! then courses, then instructors). Courses of the same department sort by
//! the numeric value of their course number, with the letter prefix and
//! suffix as tie-breaks, so `"MATH 2A"` precedes `"MATH 10"` even though
//! `"10" < "2A"` lexicographically. Everything else sorts by id.

use std::cmp::Ordering;

use crate::types::{EntityType, Index};

/// A course number split into its comparable parts:
/// `(prefix-letter?, numeral-digits, suffix-letters?)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseNumber {
    pub prefix: String,
    pub numeral: u32,
    pub suffix: String,
}

impl CourseNumber {
    /// Tokenize a `number` metadata value (`"161"`, `"H290"`, `"122AL"`).
    pub fn parse(number: &str) -> Option<Self> {
        let prefix_len = number.chars().take_while(char::is_ascii_alphabetic).count();
        let rest = &number[prefix_len..];
        let digit_len = rest.chars().take_while(char::is_ascii_digit).count();
        if digit_len == 0 {
            return None;
        }
        let suffix = &rest[digit_len..];
        if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(CourseNumber {
            prefix: number[..prefix_len].to_string(),
            numeral: rest[..digit_len].parse().ok()?,
            suffix: suffix.to_string(),
        })
    }
}

/// Compare two result ids under the ranking order. Total and deterministic;
/// ids are unique, so genuine ties cannot occur.
pub fn compare_ids(index: &Index, a: &str, b: &str) -> Ordering {
    let (Some(entity_a), Some(entity_b)) = (index.object(a), index.object(b)) else {
        return a.cmp(b);
    };

    let weight_a = entity_a.entity_type.weight();
    let weight_b = entity_b.entity_type.weight();
    if weight_a != weight_b {
        // Higher weight sorts first.
        return weight_b.cmp(&weight_a);
    }

    if entity_a.entity_type == EntityType::Course {
        if let (Some(dept_a), Some(dept_b)) = (entity_a.department(), entity_b.department()) {
            let by_department = dept_a.cmp(dept_b);
            if by_department != Ordering::Equal {
                return by_department;
            }
            if let (Some(num_a), Some(num_b)) = (
                entity_a.number().and_then(CourseNumber::parse),
                entity_b.number().and_then(CourseNumber::parse),
            ) {
                return num_a
                    .numeral
                    .cmp(&num_b.numeral)
                    .then_with(|| num_a.prefix.cmp(&num_b.prefix))
                    .then_with(|| num_a.suffix.cmp(&num_b.suffix))
                    .then_with(|| a.cmp(b));
            }
        }
        // Malformed or missing course metadata: fall back to id order so the
        // comparator stays total.
        return a.cmp(b);
    }

    a.cmp(b)
}

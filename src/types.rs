//! The building blocks of a catalog index.
//!
//! These types define how catalog entities (GE categories, departments,
//! courses, instructors) and their keyword/alias tables fit together. The
//! index is built offline (see [`crate::build`]), serialized as JSON, and
//! loaded read-only for the process lifetime.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Referential integrity**: every id appearing in a `keywords` list or an
//!   `aliases` value exists in `objects`. Checked by [`Index::validate`] at
//!   load time; the matchers assume it afterwards.
//! - **Keyword list order**: `keywords` values are pre-sorted at build time
//!   (GE before department before instructor before course, lexiconumeric
//!   within a tier). The engine treats that order as significant and must
//!   preserve it when not explicitly re-sorting.
//! - **Immutability**: the index is never mutated after load. Concurrent
//!   readers need no locking because no writer exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::IndexError;

/// Kind of catalog entity, in ranking priority order.
///
/// The discriminants are not the ranking weights; see [`EntityType::weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    GeCategory,
    Department,
    Course,
    Instructor,
}

impl EntityType {
    /// Fixed ranking priority: GE categories sort first, instructors last.
    #[inline]
    pub fn weight(self) -> u8 {
        match self {
            EntityType::GeCategory => 4,
            EntityType::Department => 3,
            EntityType::Course => 2,
            EntityType::Instructor => 1,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityType::GeCategory => "GE_CATEGORY",
            EntityType::Department => "DEPARTMENT",
            EntityType::Course => "COURSE",
            EntityType::Instructor => "INSTRUCTOR",
        };
        f.write_str(s)
    }
}

/// A metadata value: either a scalar string or an ordered list of strings.
///
/// Containment tests treat a scalar as a singleton list, so filter options
/// compose uniformly over both shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Scalar(String),
    List(Vec<String>),
}

impl MetadataValue {
    /// View the value as a slice, scalars included.
    pub fn as_slice(&self) -> &[String] {
        match self {
            MetadataValue::Scalar(s) => std::slice::from_ref(s),
            MetadataValue::List(v) => v.as_slice(),
        }
    }

    /// The scalar form, if this value is one.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            MetadataValue::Scalar(s) => Some(s.as_str()),
            MetadataValue::List(_) => None,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.as_slice().iter().any(|v| v == value)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Scalar(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Scalar(s)
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(v: Vec<String>) -> Self {
        MetadataValue::List(v)
    }
}

/// Arbitrary per-entity metadata (`department`, `number`, `geList`, ...).
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A catalog entity record. The globally unique id is the key in
/// [`Index::objects`]; the record itself carries type, display name, and
/// metadata (mirroring the serialized artifact shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

impl Entity {
    /// Scalar metadata lookup. Returns `None` for absent keys and list values.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(MetadataValue::as_scalar)
    }

    /// The owning department of a course, if recorded.
    pub fn department(&self) -> Option<&str> {
        self.metadata_str("department")
    }

    /// The course number (`"161"`, `"H290"`, `"122AL"`), if recorded.
    pub fn number(&self) -> Option<&str> {
        self.metadata_str("number")
    }

    /// Whether the `geList` metadata includes the given GE category id.
    pub fn in_ge_category(&self, category_id: &str) -> bool {
        self.metadata
            .get("geList")
            .is_some_and(|v| v.contains(category_id))
    }
}

/// The immutable search index: entity records, keyword-to-candidate lists,
/// and the department alias table.
///
/// Built once by the offline builder, loaded once per process, and shared
/// read-only afterwards. `BTreeMap` keeps full scans (course-number matching,
/// department expansion) deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Index {
    pub objects: BTreeMap<String, Entity>,
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Index {
    /// Look up an entity record by id.
    #[inline]
    pub fn object(&self, id: &str) -> Option<&Entity> {
        self.objects.get(id)
    }

    /// Check the referential key-presence invariant: every id referenced by
    /// `keywords` or `aliases` must exist in `objects`.
    ///
    /// This is the only validation the engine performs on the artifact; the
    /// schema itself is the builder's contract.
    pub fn validate(&self) -> Result<(), IndexError> {
        for (keyword, ids) in &self.keywords {
            for id in ids {
                if !self.objects.contains_key(id) {
                    return Err(IndexError::MissingObject {
                        id: id.clone(),
                        referenced_by: format!("keyword '{keyword}'"),
                    });
                }
            }
        }
        for (alias, departments) in &self.aliases {
            for id in departments {
                if !self.objects.contains_key(id) {
                    return Err(IndexError::MissingObject {
                        id: id.clone(),
                        referenced_by: format!("alias '{alias}'"),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A single ranked search result: the entity id paired with a clone of its
/// record. Results are returned as an ordered `Vec` (insertion order =
/// ranked order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    #[serde(flatten)]
    pub entity: Entity,
}

//! Index artifact loading.
//!
//! The artifact is a JSON object matching [`Index`]: `objects`, `keywords`,
//! `aliases`. It is produced and owned by the offline builder; loading
//! checks key presence (every referenced id resolves to a record) and
//! nothing else — the schema is the builder's contract.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::IndexError;
use crate::types::Index;

/// Load and validate an index artifact from a file.
pub fn load_index(path: &Path) -> Result<Index, IndexError> {
    let file = File::open(path)?;
    let index = load_index_from_reader(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        objects = index.objects.len(),
        keywords = index.keywords.len(),
        aliases = index.aliases.len(),
        "index loaded"
    );
    Ok(index)
}

/// Load and validate an index artifact from any reader.
pub fn load_index_from_reader(reader: impl Read) -> Result<Index, IndexError> {
    let index: Index = serde_json::from_reader(reader)?;
    index.validate()?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "objects": {
            "COMPSCI": { "type": "DEPARTMENT", "name": "Computer Science" },
            "COMPSCI161": {
                "type": "COURSE",
                "name": "Design and Analysis of Algorithms",
                "metadata": { "department": "COMPSCI", "number": "161" }
            }
        },
        "keywords": { "algorithms": ["COMPSCI161"] },
        "aliases": { "cs": ["COMPSCI"] }
    }"#;

    #[test]
    fn loads_minimal_artifact() {
        let index = load_index_from_reader(MINIMAL.as_bytes()).unwrap();
        assert_eq!(index.objects.len(), 2);
        assert_eq!(index.keywords["algorithms"], vec!["COMPSCI161"]);
        assert_eq!(index.aliases["cs"], vec!["COMPSCI"]);
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let index = load_index_from_reader(r#"{ "objects": {} }"#.as_bytes()).unwrap();
        assert!(index.keywords.is_empty());
        assert!(index.aliases.is_empty());
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let broken = r#"{
            "objects": {},
            "keywords": { "ghost": ["NOWHERE"] },
            "aliases": {}
        }"#;
        let err = load_index_from_reader(broken.as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::MissingObject { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = load_index_from_reader("{".as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::Json(_)));
    }
}

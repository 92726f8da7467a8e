//! Cache acquisition: local files first, remote fallback.
//!
//! A cache file that is missing or fails to parse locally is downloaded from
//! the remote prefix and persisted next to where it was expected, so repeat
//! builds are offline.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::{CourseRecord, InstructorRecord};
use crate::error::BuildError;

/// Where the raw caches live upstream.
pub const DEFAULT_REMOTE_PREFIX: &str =
    "https://raw.githubusercontent.com/icssc/peterportal-public-api/master/cache/";

pub const COURSES_FILE: &str = "parsed_courses_cache.json";
pub const INSTRUCTORS_FILE: &str = "parsed_professor_cache.json";

/// Load both caches, fetching whichever is missing or malformed.
pub fn load_caches(
    cache_dir: &Path,
    remote_prefix: &str,
) -> Result<
    (
        BTreeMap<String, CourseRecord>,
        BTreeMap<String, InstructorRecord>,
    ),
    BuildError,
> {
    let courses = load_or_fetch(cache_dir, COURSES_FILE, remote_prefix)?;
    let instructors = load_or_fetch(cache_dir, INSTRUCTORS_FILE, remote_prefix)?;
    Ok((courses, instructors))
}

/// Read and parse a local cache file; on a missing or malformed file,
/// download it from the remote prefix, persist it, and parse the downloaded
/// body instead.
pub fn load_or_fetch<T: DeserializeOwned>(
    cache_dir: &Path,
    file_name: &str,
    remote_prefix: &str,
) -> Result<T, BuildError> {
    let local = cache_dir.join(file_name);
    match fs::read_to_string(&local) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(parsed) => {
                info!(file = file_name, "using local cache");
                return Ok(parsed);
            }
            Err(err) => {
                warn!(file = file_name, %err, "malformed local cache, refetching");
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(file = file_name, "local cache missing, fetching");
        }
        Err(err) => return Err(err.into()),
    }

    let url = format!("{remote_prefix}{file_name}");
    let body = reqwest::blocking::get(&url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(|response| response.text())
        .map_err(|source| BuildError::Http {
            url: url.clone(),
            source,
        })?;
    let parsed = serde_json::from_str(&body).map_err(|source| BuildError::Json {
        file: file_name.to_string(),
        source,
    })?;

    fs::create_dir_all(cache_dir)?;
    fs::write(&local, &body)?;
    info!(file = file_name, bytes = body.len(), "cache fetched and written");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_local_cache_is_used_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, r#"{ "k": { "name": "N", "shortened_name": "S" } }"#).unwrap();

        let parsed: BTreeMap<String, InstructorRecord> =
            load_or_fetch(dir.path(), "records.json", "http://127.0.0.1:1/").unwrap();
        assert_eq!(parsed["k"].shortened_name, "S");
    }

    #[test]
    fn malformed_local_cache_falls_back_to_remote() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not json").unwrap();

        // The unreachable remote makes the fallback fail with an HTTP error,
        // which is the point: the malformed file was not silently accepted.
        let result: Result<BTreeMap<String, InstructorRecord>, _> =
            load_or_fetch(dir.path(), "records.json", "http://127.0.0.1:1/");
        assert!(matches!(result, Err(BuildError::Http { .. })));
    }
}

//! On-disk model discovery
//!
//! The models root holds one directory per service; each service directory
//! holds one directory per API version; each version directory holds the
//! model JSON. Only the newest version of each service is selected.

use command_model_generator_common::{GeneratorError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A discovered service model file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLocation {
    /// Service name (the service directory's name)
    pub service: String,

    /// Selected API version (the version directory's name)
    pub version: String,

    /// Path to the model JSON file
    pub path: PathBuf,
}

/// Discover the newest model file for every service under a models root.
///
/// Services without a version directory or without a model file are
/// skipped. Results are sorted by service name.
pub fn discover_models(root: &Path) -> Result<Vec<ModelLocation>> {
    if !root.is_dir() {
        return Err(GeneratorError::Parse(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    let mut locations = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let service_dir = entry.path();
        if !service_dir.is_dir() {
            continue;
        }

        let Some(service) = service_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some((version, version_dir)) = latest_version(&service_dir)? {
            if let Some(path) = find_model_file(&version_dir)? {
                locations.push(ModelLocation {
                    service: service.to_string(),
                    version,
                    path,
                });
            }
        }
    }

    locations.sort_by(|a, b| a.service.cmp(&b.service));
    Ok(locations)
}

/// Pick the newest API version directory of a service.
///
/// Version directories carry date-style names, so the lexicographically
/// greatest name is the newest version.
fn latest_version(service_dir: &Path) -> Result<Option<(String, PathBuf)>> {
    let mut latest: Option<(String, PathBuf)> = None;

    for entry in fs::read_dir(service_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match &latest {
            Some((current, _)) if name <= current.as_str() => {}
            _ => latest = Some((name.to_string(), path)),
        }
    }

    Ok(latest)
}

/// Find the model file inside a version directory.
///
/// `model.json` wins when present; otherwise the lexicographically first
/// `.json` file is taken.
fn find_model_file(version_dir: &Path) -> Result<Option<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(version_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        if path.file_name().and_then(|n| n.to_str()) == Some("model.json") {
            return Ok(Some(path));
        }

        candidates.push(path);
    }

    candidates.sort();
    Ok(candidates.into_iter().next())
}

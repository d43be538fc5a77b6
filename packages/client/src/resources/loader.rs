//! Rule resources on disk
//!
//! Every file under the resource root whose name carries the configured
//! extension is a rule resource: a JSON array of `{source, target}` records.
//! A resource is named by its directory path relative to the root joined
//! with dots, followed by the file stem, so `loans/summary.json` becomes
//! `loans.summary`. Symbolic links to directories are not followed.

use std::fs::{self, FileType};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ResourceConfig;
use crate::error::{ProjectionError, ProjectionResult};
use crate::manifest::Rule;

/// Walk the resource root and parse every resource found
///
/// Unreadable or malformed resources load as empty rule sets so the
/// remaining resources stay available.
///
/// # Errors
///
/// Returns `Resource` when the root itself cannot be listed. Unreadable
/// subdirectories are skipped.
pub(crate) fn load_dir(config: &ResourceConfig) -> ProjectionResult<Vec<(String, Vec<Rule>)>> {
    let marker = format!(".{}", config.extension);
    let mut loaded = Vec::new();
    let mut pending = vec![config.root.clone()];

    while let Some(dir) = pending.pop() {
        let entries = match sorted_entries(&dir) {
            Ok(entries) => entries,
            Err(e) if dir == config.root => {
                return Err(ProjectionError::resource(dir.display().to_string(), e.to_string()));
            }
            Err(e) => {
                warn!(dir = %dir.display(), "skipping unreadable directory: {e}");
                continue;
            }
        };

        for (path, file_type) in entries {
            if file_type.is_symlink() && path.is_dir() {
                warn!(dir = %path.display(), "skipping symlinked directory");
                continue;
            }
            if file_type.is_dir() {
                pending.push(path);
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!(file = %path.display(), "skipping resource with a non UTF-8 name");
                continue;
            };
            if !file_name.contains(&marker) {
                warn!(file = %path.display(), "skipping file without the {marker} extension");
                continue;
            }

            let name = resource_name(&config.root, &path, file_name);
            debug!(resource = %name, file = %path.display(), "processing resource");
            let rules = read_rules(&path, &name);
            loaded.push((name, rules));
        }
    }

    Ok(loaded)
}

/// Entries of `dir` sorted by path, with their unfollowed file types
fn sorted_entries(dir: &Path) -> std::io::Result<Vec<(PathBuf, FileType)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry.and_then(|entry| Ok((entry.path(), entry.file_type()?))) {
            Ok(pair) => entries.push(pair),
            Err(e) => warn!(dir = %dir.display(), "unreadable directory entry: {e}"),
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Dotted resource name from the file's position under `root`
pub(crate) fn resource_name(root: &Path, path: &Path, file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);

    let mut parts: Vec<String> = path
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    parts.push(stem.to_string());
    parts.join(".")
}

/// Parse one resource; failures are logged and yield no rules
pub(crate) fn read_rules(path: &Path, name: &str) -> Vec<Rule> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            error!(resource = %name, "could not read {}: {e}", path.display());
            return Vec::new();
        }
    };

    match parse_rules(&text) {
        Ok(rules) => rules,
        Err(reason) => {
            error!(resource = %name, "could not load {}: {reason}", path.display());
            Vec::new()
        }
    }
}

/// Parse a JSON array of rule records, skipping records that are not rules
///
/// # Errors
///
/// Returns a description when the text is not a JSON array.
pub(crate) fn parse_rules(text: &str) -> Result<Vec<Rule>, String> {
    let document: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let Value::Array(records) = document else {
        return Err("expected a JSON array of rules".to_string());
    };

    let mut rules = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Rule>(record) {
            Ok(rule) => rules.push(rule),
            Err(e) => warn!("skipping rule record {position}: {e}"),
        }
    }
    Ok(rules)
}

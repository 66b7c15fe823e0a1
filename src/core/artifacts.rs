//! Distribution artifact resolution with glob pattern support.

use std::path::PathBuf;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::Distribution;

#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub distribution: String,
    pub file_name: String,
    pub path: PathBuf,
}

/// Resolve every artifact of every distribution against the basedir.
pub fn resolve_all(context: &Context) -> Result<Vec<ResolvedArtifact>> {
    let mut resolved = Vec::new();
    for (name, distribution) in &context.model().distributions {
        resolved.extend(resolve_for(context, name, distribution)?);
    }
    Ok(resolved)
}

/// Resolve one distribution's artifacts. Each configured path must match
/// exactly one file: literal paths must exist, glob patterns resolve to the
/// most recently modified match.
pub fn resolve_for(
    context: &Context,
    name: &str,
    distribution: &Distribution,
) -> Result<Vec<ResolvedArtifact>> {
    let mut resolved = Vec::new();

    for artifact in &distribution.artifacts {
        let path = resolve_artifact_path(context, name, &artifact.path)?;
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .ok_or_else(|| {
                Error::internal_unexpected(format!(
                    "Artifact path has no file name: {}",
                    path.display()
                ))
            })?;

        resolved.push(ResolvedArtifact {
            distribution: name.to_string(),
            file_name,
            path,
        });
    }

    Ok(resolved)
}

fn resolve_artifact_path(context: &Context, distribution: &str, configured: &str) -> Result<PathBuf> {
    let full = context.resolve_path(configured);
    let pattern = full.to_string_lossy().to_string();

    if !contains_glob_chars(configured) {
        if full.is_file() {
            return Ok(full);
        }
        return Err(Error::internal_unexpected(format!(
            "Artifact not found for distribution '{}': {}",
            distribution,
            full.display()
        )));
    }

    let entries: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| {
            Error::internal_unexpected(format!(
                "Invalid glob pattern '{}' for distribution '{}': {}",
                configured, distribution, e
            ))
        })?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();

    if entries.is_empty() {
        return Err(Error::internal_unexpected(format!(
            "No files match pattern '{}' for distribution '{}'",
            configured, distribution
        )));
    }

    entries
        .into_iter()
        .max_by_key(|p| p.metadata().and_then(|m| m.modified()).ok())
        .ok_or_else(|| {
            Error::internal_unexpected(format!(
                "No files match pattern '{}' for distribution '{}'",
                configured, distribution
            ))
        })
}

fn contains_glob_chars(s: &str) -> bool {
    s.contains('*') || s.contains('?') || s.contains('[') || s.contains(']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::model::{Artifact, Model, Project};
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn context_with(dir: &TempDir, artifacts: Vec<&str>) -> Context {
        let mut model = Model {
            project: Project {
                name: "app".to_string(),
                version: "1.0.0".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        model.distributions.insert(
            "cli".to_string(),
            Distribution {
                artifacts: artifacts
                    .into_iter()
                    .map(|path| Artifact {
                        path: path.to_string(),
                    })
                    .collect(),
            },
        );

        Context::new(
            model,
            dir.path(),
            dir.path().join("out").join("shipmate"),
            false,
            Logger::capture(),
        )
        .unwrap()
    }

    #[test]
    fn resolves_literal_relative_path() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("app.zip")).unwrap();
        let context = context_with(&dir, vec!["app.zip"]);

        let resolved = resolve_all(&context).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].file_name, "app.zip");
        assert_eq!(resolved[0].distribution, "cli");
    }

    #[test]
    fn missing_literal_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let context = context_with(&dir, vec!["missing.zip"]);

        let err = resolve_all(&context).unwrap_err();
        assert!(err.message.contains("Artifact not found"));
    }

    #[test]
    fn glob_resolves_to_newest_match() {
        let dir = TempDir::new().unwrap();
        let mut old = File::create(dir.path().join("app-1.0.0.zip")).unwrap();
        old.write_all(b"old").unwrap();
        drop(old);
        std::thread::sleep(std::time::Duration::from_millis(50));
        let mut new = File::create(dir.path().join("app-1.0.1.zip")).unwrap();
        new.write_all(b"new").unwrap();
        drop(new);

        let context = context_with(&dir, vec!["app-*.zip"]);
        let resolved = resolve_all(&context).unwrap();
        assert_eq!(resolved[0].file_name, "app-1.0.1.zip");
    }

    #[test]
    fn glob_without_matches_is_an_error() {
        let dir = TempDir::new().unwrap();
        let context = context_with(&dir, vec!["nothing-*.zip"]);

        let err = resolve_all(&context).unwrap_err();
        assert!(err.message.contains("No files match pattern"));
    }
}

//! SHA-256 checksums for distribution artifacts.
//!
//! Writes one `<file>.sha256` per artifact under the run's checksums
//! directory. Later steps (prepare, release) read these artifacts and
//! digests again, so this step runs even in dry-run.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::artifacts;
use crate::context::Context;
use crate::error::Result;
use crate::utils::io;

pub fn collect(context: &Context) -> Result<()> {
    let resolved = artifacts::resolve_all(context)?;
    if resolved.is_empty() {
        context.logger().info("no artifacts to checksum");
        return Ok(());
    }

    let dir = context.checksums_dir();
    io::ensure_dir(&dir, "create checksums directory")?;

    for artifact in &resolved {
        let digest = hash_file(&artifact.path)?;
        let target = dir.join(format!("{}.sha256", artifact.file_name));
        io::write_file(
            &target,
            &format!("{}  {}\n", digest, artifact.file_name),
            "write checksum",
        )?;
        context
            .logger()
            .info(format!("checksummed {}", artifact.file_name));
    }

    Ok(())
}

pub fn hash_file(path: &Path) -> Result<String> {
    let bytes = io::read_bytes(path, "read artifact")?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::model::{Artifact, Distribution, Model, Project};
    use std::fs;
    use tempfile::TempDir;

    fn context_with_artifact(dir: &TempDir, file_name: &str, content: &[u8]) -> Context {
        fs::write(dir.path().join(file_name), content).unwrap();

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
                artifacts: vec![Artifact {
                    path: file_name.to_string(),
                }],
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
    fn hash_file_matches_known_vector() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vector.txt");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(
            hash_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn collect_writes_one_file_per_artifact() {
        let dir = TempDir::new().unwrap();
        let context = context_with_artifact(&dir, "app.zip", b"abc");

        collect(&context).unwrap();

        let written =
            fs::read_to_string(context.checksums_dir().join("app.zip.sha256")).unwrap();
        assert!(written.starts_with("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"));
        assert!(written.trim_end().ends_with("app.zip"));
    }

    #[test]
    fn collect_skips_when_no_distributions() {
        let dir = TempDir::new().unwrap();
        let model = Model {
            project: Project {
                name: "app".to_string(),
                version: "1.0.0".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let context = Context::new(
            model,
            dir.path(),
            dir.path().join("out").join("shipmate"),
            false,
            Logger::capture(),
        )
        .unwrap();

        collect(&context).unwrap();
        assert!(context
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("no artifacts to checksum")));
        assert!(!context.checksums_dir().exists());
    }
}

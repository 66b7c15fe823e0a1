//! Detached artifact signatures via gpg.
//!
//! Passphrase handling is delegated to the gpg agent; shipmate never reads
//! key material itself.

use crate::artifacts;
use crate::context::Context;
use crate::error::Result;
use crate::utils::{command, io};

pub fn sign(context: &Context) -> Result<()> {
    let signing = &context.model().signing;
    if !signing.enabled {
        context.logger().info("signing is not enabled, skipping");
        return Ok(());
    }

    let resolved = artifacts::resolve_all(context)?;
    if resolved.is_empty() {
        context.logger().info("no artifacts to sign");
        return Ok(());
    }

    let dir = context.signatures_dir();
    io::ensure_dir(&dir, "create signatures directory")?;

    let extension = if signing.armored { "asc" } else { "sig" };

    for artifact in &resolved {
        let signature = dir.join(format!("{}.{}", artifact.file_name, extension));
        let signature_path = signature.to_string_lossy().to_string();
        let artifact_path = artifact.path.to_string_lossy().to_string();

        let mut args: Vec<&str> = vec!["--batch", "--yes", "--detach-sign"];
        if signing.armored {
            args.push("--armor");
        }
        if let Some(key_id) = &signing.key_id {
            args.push("--local-user");
            args.push(key_id.as_str());
        }
        args.push("--output");
        args.push(signature_path.as_str());
        args.push(artifact_path.as_str());

        command::run("gpg", &args, "sign artifact")?;
        context
            .logger()
            .info(format!("signed {}", artifact.file_name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::model::{Model, Project};
    use tempfile::TempDir;

    #[test]
    fn disabled_signing_skips_without_touching_artifacts() {
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

        sign(&context).unwrap();

        assert!(context
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("signing is not enabled, skipping")));
        assert!(!context.signatures_dir().exists());
    }
}

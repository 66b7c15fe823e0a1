//! Artifact upload to configured HTTP targets.

use std::env;

use reqwest::blocking::Client;

use crate::artifacts;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::UploadMethod;
use crate::utils::template::{self, TemplateVars};
use crate::utils::{io, validation};

const USER_AGENT: &str = concat!("shipmate/", env!("CARGO_PKG_VERSION"));

pub fn send(context: &Context) -> Result<()> {
    let model = context.model();
    let targets = &model.upload.http;

    if targets.is_empty() {
        context
            .logger()
            .info("no upload targets are configured, skipping");
        return Ok(());
    }

    let resolved = artifacts::resolve_all(context)?;

    if context.dry_run() {
        for target in targets {
            for artifact in &resolved {
                context.logger().info(format!(
                    "dry-run: would upload {} to {}",
                    artifact.file_name, target.name
                ));
            }
        }
        return Ok(());
    }

    let client = Client::new();

    for target in targets {
        let token = match &target.token_env {
            Some(token_env) => Some(validation::require(
                env::var(token_env).ok(),
                format!("Environment variable {} is not set", token_env),
            )?),
            None => None,
        };

        for artifact in &resolved {
            let url = template::render(
                &target.url,
                &[
                    (TemplateVars::PROJECT_NAME, model.project.name.as_str()),
                    (TemplateVars::PROJECT_VERSION, model.project.version.as_str()),
                    (TemplateVars::DISTRIBUTION_NAME, artifact.distribution.as_str()),
                    (TemplateVars::ARTIFACT_FILE, artifact.file_name.as_str()),
                ],
            );
            let bytes = io::read_bytes(&artifact.path, "read upload artifact")?;

            let request = match target.method {
                UploadMethod::Put => client.put(&url),
                UploadMethod::Post => client.post(&url),
            };
            let mut request = request
                .header("Content-Type", "application/octet-stream")
                .header("User-Agent", USER_AGENT)
                .body(bytes);
            if let Some(token) = &token {
                request = request.header("Authorization", format!("Bearer {}", token));
            }

            let response = request
                .send()
                .map_err(|e| Error::http_request(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::http_status(
                    status.as_u16(),
                    response.text().unwrap_or_default(),
                ));
            }

            context.logger().info(format!(
                "uploaded {} to {}",
                artifact.file_name, target.name
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::model::{Artifact, Distribution, HttpUploader, Model, Project};
    use std::fs;
    use tempfile::TempDir;

    fn base_model() -> Model {
        Model {
            project: Project {
                name: "app".to_string(),
                version: "1.0.0".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn skips_when_no_targets_configured() {
        let ctx = Context::new(
            base_model(),
            "/tmp",
            "/tmp/out/shipmate",
            false,
            Logger::capture(),
        )
        .unwrap();

        send(&ctx).unwrap();

        assert!(ctx
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("no upload targets are configured, skipping")));
    }

    #[test]
    fn dry_run_logs_each_pair_without_network() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.zip"), b"bytes").unwrap();

        let mut model = base_model();
        model.distributions.insert(
            "cli".to_string(),
            Distribution {
                artifacts: vec![Artifact {
                    path: "app.zip".to_string(),
                }],
            },
        );
        model.upload.http.push(HttpUploader {
            name: "artifactory".to_string(),
            url: "https://repo.example.com/{{artifactFile}}".to_string(),
            ..Default::default()
        });

        let ctx = Context::new(
            model,
            dir.path(),
            dir.path().join("out").join("shipmate"),
            true,
            Logger::capture(),
        )
        .unwrap();

        send(&ctx).unwrap();

        assert!(ctx
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("dry-run: would upload app.zip to artifactory")));
    }
}

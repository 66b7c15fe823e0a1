//! Release creation on the configured provider.
//!
//! Creates the release via the GitHub REST API, then attaches artifacts and
//! their checksum/signature files as assets. Dry-run logs the intended
//! release and performs no network call.

use std::env;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::artifacts;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::GitHub;
use crate::utils::template::{self, TemplateVars};
use crate::utils::{io, validation};

const USER_AGENT: &str = concat!("shipmate/", env!("CARGO_PKG_VERSION"));

pub fn create(context: &Context) -> Result<()> {
    let model = context.model();
    let Some(github) = &model.release.github else {
        context
            .logger()
            .info("no release provider is configured, skipping");
        return Ok(());
    };

    let tag = release_tag(context, github);
    let repository = github.repository_name(&model.project);

    if context.dry_run() {
        context.logger().info(format!(
            "dry-run: would create release {} on {}/{}",
            tag, github.owner, repository
        ));
        return Ok(());
    }

    let token = validation::require(
        env::var(&github.token_env).ok(),
        format!("Environment variable {} is not set", github.token_env),
    )?;

    let client = Client::new();
    let url = format!(
        "{}/repos/{}/{}/releases",
        github.api_host, github.owner, repository
    );
    let body = json!({
        "tag_name": tag,
        "name": tag,
        "body": model.project.description.clone().unwrap_or_default(),
        "draft": github.draft,
        "prerelease": github.prerelease,
    });

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", USER_AGENT)
        .json(&body)
        .send()
        .map_err(|e| Error::http_request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::http_status(
            status.as_u16(),
            response.text().unwrap_or_default(),
        ));
    }

    let created: Value = response
        .json()
        .map_err(|e| Error::http_request(e.to_string()))?;
    context.logger().info(format!(
        "created release {} on {}/{}",
        tag, github.owner, repository
    ));

    // "https://uploads.github.com/.../assets{?name,label}" - strip the
    // URI-template suffix before appending query parameters.
    let upload_url = created
        .get("upload_url")
        .and_then(Value::as_str)
        .map(|u| u.split('{').next().unwrap_or(u).to_string());

    if let Some(upload_url) = upload_url {
        for asset in release_assets(context)? {
            upload_asset(context, &client, &upload_url, &token, &asset)?;
        }
    }

    Ok(())
}

pub fn release_tag(context: &Context, github: &GitHub) -> String {
    let project = &context.model().project;
    template::render(
        &github.tag_name,
        &[
            (TemplateVars::PROJECT_NAME, project.name.as_str()),
            (TemplateVars::PROJECT_VERSION, project.version.as_str()),
        ],
    )
}

/// Artifacts plus whatever checksum/signature files earlier steps produced.
fn release_assets(context: &Context) -> Result<Vec<PathBuf>> {
    let mut assets = Vec::new();

    for artifact in artifacts::resolve_all(context)? {
        let companions = [
            context
                .checksums_dir()
                .join(format!("{}.sha256", artifact.file_name)),
            context
                .signatures_dir()
                .join(format!("{}.asc", artifact.file_name)),
            context
                .signatures_dir()
                .join(format!("{}.sig", artifact.file_name)),
        ];

        assets.push(artifact.path);
        for companion in companions {
            if companion.is_file() {
                assets.push(companion);
            }
        }
    }

    Ok(assets)
}

fn upload_asset(
    context: &Context,
    client: &Client,
    upload_url: &str,
    token: &str,
    asset: &Path,
) -> Result<()> {
    let name = asset
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .ok_or_else(|| {
            Error::internal_unexpected(format!("Asset path has no file name: {}", asset.display()))
        })?;
    let bytes = io::read_bytes(asset, "read release asset")?;

    let response = client
        .post(format!("{}?name={}", upload_url, name))
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/octet-stream")
        .header("User-Agent", USER_AGENT)
        .body(bytes)
        .send()
        .map_err(|e| Error::http_request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::http_status(
            status.as_u16(),
            response.text().unwrap_or_default(),
        ));
    }

    context.logger().info(format!("uploaded asset {}", name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::model::{Model, Project};

    fn model_with_github(owner: &str) -> Model {
        let mut model = Model {
            project: Project {
                name: "app".to_string(),
                version: "1.0.0".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        model.release.github = Some(GitHub {
            owner: owner.to_string(),
            ..Default::default()
        });
        model
    }

    fn context(model: Model, dry_run: bool) -> Context {
        Context::new(model, "/tmp", "/tmp/out/shipmate", dry_run, Logger::capture()).unwrap()
    }

    #[test]
    fn skips_when_no_provider_is_configured() {
        let model = Model {
            project: Project {
                name: "app".to_string(),
                version: "1.0.0".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let ctx = context(model, false);

        create(&ctx).unwrap();

        assert!(ctx
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("no release provider is configured, skipping")));
    }

    #[test]
    fn dry_run_logs_intended_release_without_network() {
        let ctx = context(model_with_github("acme"), true);

        create(&ctx).unwrap();

        assert!(ctx
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("dry-run: would create release v1.0.0 on acme/app")));
    }

    #[test]
    fn missing_token_env_fails_before_any_request() {
        let mut model = model_with_github("acme");
        if let Some(github) = model.release.github.as_mut() {
            github.token_env = "SHIPMATE_TEST_TOKEN_THAT_IS_NEVER_SET".to_string();
        }
        let ctx = context(model, false);

        let err = create(&ctx).unwrap_err();
        assert!(err.message.contains("SHIPMATE_TEST_TOKEN_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn release_tag_renders_version_template() {
        let ctx = context(model_with_github("acme"), false);
        let github = ctx.model().release.github.clone().unwrap();
        assert_eq!(release_tag(&ctx, &github), "v1.0.0");
    }
}

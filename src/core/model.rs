//! Release configuration model.
//!
//! Deserialized from `shipmate.{yml,toml,json}`. Sections are optional and
//! default to empty; semantic problems are collected by [`Model::validate`]
//! so a user sees every issue at once instead of fixing them one by one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const GITHUB_TOKEN_ENV: &str = "SHIPMATE_GITHUB_TOKEN";
pub const WEBHOOK_URL_ENV: &str = "SHIPMATE_WEBHOOK_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Model {
    pub project: Project,
    pub release: Release,
    pub signing: Signing,
    pub distributions: BTreeMap<String, Distribution>,
    pub packagers: Packagers,
    pub upload: Upload,
    pub announce: Announce,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Release {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHub>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitHub {
    pub owner: String,
    /// Repository name; defaults to the project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub api_host: String,
    pub token_env: String,
    /// Template for the release tag, rendered against project variables.
    pub tag_name: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl Default for GitHub {
    fn default() -> Self {
        Self {
            owner: String::new(),
            name: None,
            api_host: "https://api.github.com".to_string(),
            token_env: GITHUB_TOKEN_ENV.to_string(),
            tag_name: "v{{projectVersion}}".to_string(),
            draft: false,
            prerelease: false,
        }
    }
}

impl GitHub {
    pub fn repository_name<'a>(&'a self, project: &'a Project) -> &'a str {
        self.name.as_deref().unwrap_or(&project.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Signing {
    pub enabled: bool,
    pub armored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

impl Default for Signing {
    fn default() -> Self {
        Self {
            enabled: false,
            armored: true,
            key_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Distribution {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artifact {
    /// Relative to the basedir; may be a glob pattern.
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Packagers {
    pub brew: Brew,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brew {
    pub enabled: bool,
    /// Formula class name; derived from the distribution name when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_name: Option<String>,
    /// Path to a formula template overriding the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Upload {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub http: Vec<HttpUploader>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpUploader {
    pub name: String,
    /// Target url template, rendered per artifact.
    pub url: String,
    pub method: UploadMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMethod {
    #[default]
    Put,
    Post,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Announce {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<Webhook>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    pub url_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Default for Webhook {
    fn default() -> Self {
        Self {
            url_env: WEBHOOK_URL_ENV.to_string(),
            message: None,
        }
    }
}

impl Model {
    /// Semantic validation. Returns the full set of problems; an empty set
    /// means a context may be built from this model.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.project.name.trim().is_empty() {
            errors.push("project.name must not be blank".to_string());
        }

        if self.project.version.trim().is_empty() {
            errors.push("project.version must not be blank".to_string());
        } else if let Err(e) = semver::Version::parse(&self.project.version) {
            errors.push(format!(
                "project.version '{}' is not a valid semantic version: {}",
                self.project.version, e
            ));
        }

        for (name, distribution) in &self.distributions {
            if distribution.artifacts.is_empty() {
                errors.push(format!("distribution '{}' declares no artifacts", name));
            }
            for (index, artifact) in distribution.artifacts.iter().enumerate() {
                if artifact.path.trim().is_empty() {
                    errors.push(format!(
                        "distribution '{}' artifact #{} has a blank path",
                        name,
                        index + 1
                    ));
                }
            }
        }

        if let Some(github) = &self.release.github {
            if github.owner.trim().is_empty() {
                errors.push("release.github.owner must not be blank".to_string());
            }
        }

        for (index, uploader) in self.upload.http.iter().enumerate() {
            if uploader.name.trim().is_empty() {
                errors.push(format!("upload.http target #{} has a blank name", index + 1));
            }
            if uploader.url.trim().is_empty() {
                errors.push(format!("upload.http target #{} has a blank url", index + 1));
            }
        }

        errors
    }
}

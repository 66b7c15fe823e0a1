//! Distribution packaging.
//!
//! `prepare` renders packager files (currently a Homebrew formula) into the
//! prepare directory; `package` archives each prepared distribution into a
//! zip under the package directory. Distributions that were never prepared
//! are skipped with a log line rather than failing the run.

use std::fs;
use std::io::Write;
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::artifacts;
use crate::checksum;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::utils::io;
use crate::utils::template::{self, TemplateVars};

const BREW_FORMULA_TEMPLATE: &str = r#"class {{formulaClass}} < Formula
  desc "{{projectDescription}}"
  homepage "{{projectWebsite}}"
  url "{{artifactUrl}}"
  sha256 "{{checksumSha256}}"
  version "{{projectVersion}}"

  def install
    bin.install "{{projectName}}"
  end
end
"#;

pub fn prepare(context: &Context) -> Result<()> {
    let model = context.model();
    let brew = &model.packagers.brew;

    if !brew.enabled {
        context.logger().info("no packagers are enabled, skipping");
        return Ok(());
    }

    if model.distributions.is_empty() {
        context.logger().info("no distributions configured, skipping");
        return Ok(());
    }

    let source = match &brew.template {
        Some(configured) => {
            let path = context.resolve_path(configured);
            io::read_file(&path, "read formula template")?
        }
        None => BREW_FORMULA_TEMPLATE.to_string(),
    };

    for (name, distribution) in &model.distributions {
        let resolved = artifacts::resolve_for(context, name, distribution)?;
        let primary = resolved.first().ok_or_else(|| {
            Error::internal_unexpected(format!(
                "distribution '{}' resolved no artifacts",
                name
            ))
        })?;
        let digest = checksum::hash_file(&primary.path)?;
        let artifact_url = download_url(context, &primary.file_name);

        let class = brew
            .formula_name
            .clone()
            .unwrap_or_else(|| formula_class(name));

        let rendered = template::render(
            &source,
            &[
                (TemplateVars::FORMULA_CLASS, class.as_str()),
                (TemplateVars::PROJECT_NAME, model.project.name.as_str()),
                (TemplateVars::PROJECT_VERSION, model.project.version.as_str()),
                (
                    TemplateVars::PROJECT_DESCRIPTION,
                    model.project.description.as_deref().unwrap_or_default(),
                ),
                (
                    TemplateVars::PROJECT_WEBSITE,
                    model.project.website.as_deref().unwrap_or_default(),
                ),
                (TemplateVars::DISTRIBUTION_NAME, name.as_str()),
                (TemplateVars::ARTIFACT_FILE, primary.file_name.as_str()),
                (TemplateVars::ARTIFACT_URL, artifact_url.as_str()),
                (TemplateVars::CHECKSUM_SHA256, digest.as_str()),
            ],
        );

        let target_dir = context.prepare_dir().join(name).join("brew");
        io::ensure_dir(&target_dir, "create prepare directory")?;
        io::write_file(
            &target_dir.join(format!("{}.rb", class)),
            &rendered,
            "write formula",
        )?;

        context
            .logger()
            .info(format!("prepared brew formula for distribution '{}'", name));
    }

    Ok(())
}

pub fn package(context: &Context) -> Result<()> {
    let model = context.model();

    if model.distributions.is_empty() {
        context.logger().info("no distributions configured, skipping");
        return Ok(());
    }

    for name in model.distributions.keys() {
        let prepared = context.prepare_dir().join(name);
        if !prepared.is_dir() {
            context.logger().info(format!(
                "distribution '{}' has not been prepared, skipping",
                name
            ));
            continue;
        }

        let target_dir = context.package_dir().join(name);
        io::ensure_dir(&target_dir, "create package directory")?;
        let archive = target_dir.join(format!("{}-{}.zip", name, model.project.version));
        zip_directory(&prepared, &archive)?;

        context
            .logger()
            .info(format!("packaged distribution '{}'", name));
    }

    Ok(())
}

/// Public download url for a release asset when a GitHub release is
/// configured, otherwise just the file name.
fn download_url(context: &Context, file_name: &str) -> String {
    let model = context.model();
    match &model.release.github {
        Some(github) => {
            let tag = template::render(
                &github.tag_name,
                &[
                    (TemplateVars::PROJECT_NAME, model.project.name.as_str()),
                    (TemplateVars::PROJECT_VERSION, model.project.version.as_str()),
                ],
            );
            format!(
                "https://github.com/{}/{}/releases/download/{}/{}",
                github.owner,
                github.repository_name(&model.project),
                tag,
                file_name
            )
        }
        None => file_name.to_string(),
    }
}

/// `my-cli` -> `MyCli`
fn formula_class(name: &str) -> String {
    name.split(['-', '_', '.'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn zip_directory(source: &Path, archive: &Path) -> Result<()> {
    let file = fs::File::create(archive)
        .map_err(|e| Error::internal_io(e.to_string(), Some("create archive".to_string())))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    add_directory(&mut writer, source, source, options)?;

    writer
        .finish()
        .map_err(|e| Error::internal_io(e.to_string(), Some("finish archive".to_string())))?;
    Ok(())
}

fn add_directory(
    writer: &mut ZipWriter<fs::File>,
    root: &Path,
    dir: &Path,
    options: FileOptions,
) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::internal_io(e.to_string(), Some("read prepared directory".to_string())))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| Error::internal_io(e.to_string(), Some("read prepared directory".to_string())))?;
        let path = entry.path();

        if path.is_dir() {
            add_directory(writer, root, &path, options)?;
            continue;
        }

        let relative = path.strip_prefix(root).map_err(|e| {
            Error::internal_unexpected(format!(
                "entry escapes archive root {}: {}",
                root.display(),
                e
            ))
        })?;
        let entry_name = relative.to_string_lossy().replace('\\', "/");

        writer
            .start_file(entry_name, options)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write archive entry".to_string())))?;
        let bytes = io::read_bytes(&path, "read prepared file")?;
        writer
            .write_all(&bytes)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write archive entry".to_string())))?;
    }

    Ok(())
}

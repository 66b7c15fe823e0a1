//! Configuration loading.
//!
//! Format support is an explicit registration table: each parser declares
//! the extensions it answers for, and discovery walks the table in
//! registration order looking for `shipmate.<ext>` next to the invocation.
//! Adding a format means adding one parser to [`parsers`].

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Model;
use crate::utils::io;

/// Basename of discoverable config files (`shipmate.yml` and friends).
pub const CONFIG_BASENAME: &str = "shipmate";

pub trait ConfigParser: Sync {
    fn format(&self) -> &'static str;
    /// Extension used for config-file discovery.
    fn preferred_extension(&self) -> &'static str;
    /// Whether an explicitly passed file with this extension is ours.
    fn supports(&self, extension: &str) -> bool;
    fn parse(&self, path: &Path, raw: &str) -> Result<Model>;
}

struct YamlParser;
struct TomlParser;
struct JsonParser;

impl ConfigParser for YamlParser {
    fn format(&self) -> &'static str {
        "yaml"
    }

    fn preferred_extension(&self) -> &'static str {
        "yml"
    }

    fn supports(&self, extension: &str) -> bool {
        matches!(extension, "yml" | "yaml")
    }

    fn parse(&self, path: &Path, raw: &str) -> Result<Model> {
        serde_yml::from_str(raw)
            .map_err(|e| Error::config_parse(path.display().to_string(), self.format(), e.to_string()))
    }
}

impl ConfigParser for TomlParser {
    fn format(&self) -> &'static str {
        "toml"
    }

    fn preferred_extension(&self) -> &'static str {
        "toml"
    }

    fn supports(&self, extension: &str) -> bool {
        extension == "toml"
    }

    fn parse(&self, path: &Path, raw: &str) -> Result<Model> {
        toml::from_str(raw)
            .map_err(|e| Error::config_parse(path.display().to_string(), self.format(), e.to_string()))
    }
}

impl ConfigParser for JsonParser {
    fn format(&self) -> &'static str {
        "json"
    }

    fn preferred_extension(&self) -> &'static str {
        "json"
    }

    fn supports(&self, extension: &str) -> bool {
        extension == "json"
    }

    fn parse(&self, path: &Path, raw: &str) -> Result<Model> {
        serde_json::from_str(raw)
            .map_err(|e| Error::config_parse(path.display().to_string(), self.format(), e.to_string()))
    }
}

/// The registration table. Discovery order is table order.
pub fn parsers() -> &'static [&'static dyn ConfigParser] {
    static PARSERS: [&dyn ConfigParser; 3] = [&YamlParser, &TomlParser, &JsonParser];
    &PARSERS
}

pub fn supported_extensions() -> Vec<String> {
    parsers()
        .iter()
        .map(|p| p.preferred_extension().to_string())
        .collect()
}

/// Look for `shipmate.<ext>` in `dir` for each registered parser.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    for parser in parsers() {
        let candidate = dir.join(format!("{}.{}", CONFIG_BASENAME, parser.preferred_extension()));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Parse a config file, selecting the parser by file extension.
pub fn load(path: &Path) -> Result<Model> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let parser = parsers()
        .iter()
        .find(|p| p.supports(extension))
        .ok_or_else(|| {
            Error::config_unsupported_format(
                path.display().to_string(),
                extension,
                supported_extensions(),
            )
        })?;

    let raw = io::read_file(path, "read configuration")?;
    parser.parse(path, &raw)
}

//! The font list, read from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ErrorReport;

/// Which fonts to compile, and how to present them.
///
/// ```toml
/// source_dir = ".make-cache/bdf-fonts"
/// namespace = "Display::Font"
///
/// [[fonts]]
/// name = "bailleul"
/// sizes = [8, 12, 16]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where BDF sources live, as `{source_dir}/{name}/{name}.{size}.bdf`.
    ///
    /// Relative paths are resolved against the directory holding the config.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// The C++ namespace wrapping everything that is generated.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// A system header included by the generated header.
    #[serde(default = "default_platform_include")]
    pub platform_include: String,
    /// Text placed in a comment at the top of each generated file.
    #[serde(default)]
    pub license: Option<String>,
    pub fonts: Vec<FontConfig>,
}

/// One font family, compiled at one or more sizes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontConfig {
    pub name: String,
    pub sizes: Vec<u32>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".make-cache/bdf-fonts")
}

fn default_namespace() -> String {
    "Display::Font".into()
}

fn default_platform_include() -> String {
    "esp_types.h".into()
}

impl Config {
    /// Read a config file, resolving `source_dir` relative to it.
    pub fn load(path: &Path) -> Result<Self, ErrorReport> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ErrorReport::message(format!("error reading '{}': {e}", path.display()))
        })?;
        let mut config = Config::parse(&contents).map_err(|e| {
            ErrorReport::message(format!("failed to parse '{}': {e}", path.display()))
        })?;
        if config.source_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.source_dir = parent.join(&config.source_dir);
            }
        }
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Every (font, size, source path) to compile, in order.
    pub fn sources(&self) -> impl Iterator<Item = (&str, u32, PathBuf)> + '_ {
        self.fonts.iter().flat_map(move |font| {
            font.sizes.iter().map(move |size| {
                let path = self
                    .source_dir
                    .join(&font.name)
                    .join(format!("{}.{size}.bdf", font.name));
                (font.name.as_str(), *size, path)
            })
        })
    }
}

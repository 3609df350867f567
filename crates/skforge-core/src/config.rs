use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(error) => write!(f, "failed to read config: {}", error),
            ConfigError::Yaml(error) => write!(f, "failed to parse config: {}", error),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkforgeConfig {
    #[serde(default)]
    build: BuildSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildSection {
    base_dir: Option<String>,
    skia_src: Option<String>,
}

/// Optional overrides from `skforge.yaml` in the invocation directory. A
/// missing file means defaults; a malformed file is an error.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSettings {
    pub base_dir: Option<PathBuf>,
    pub skia_src: Option<PathBuf>,
}

pub fn build_settings(dir: &Path) -> Result<BuildSettings, ConfigError> {
    let path = dir.join("skforge.yaml");
    if !path.exists() {
        return Ok(BuildSettings::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: SkforgeConfig = serde_yaml::from_str(&contents).map_err(ConfigError::Yaml)?;
    Ok(BuildSettings {
        base_dir: config.build.base_dir.map(PathBuf::from),
        skia_src: config.build.skia_src.map(PathBuf::from),
    })
}

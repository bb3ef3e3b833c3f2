use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// How files are read when computing a checksum from a path.
/// Text = decode as UTF-8 and apply full text normalization; stream = hash the raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    Stream,
}

/// Global configuration loaded from `~/.config/changesum/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangesumConfig {
    /// Collapse CRLF / CR to LF when hashing streams. Text input is always normalized.
    #[serde(default = "default_standardize_line_endings")]
    pub standardize_line_endings: bool,
    /// Default input mode for files: "text" (default) or "stream".
    #[serde(default)]
    pub input_mode: InputMode,
}

fn default_standardize_line_endings() -> bool {
    true
}

impl Default for ChangesumConfig {
    fn default() -> Self {
        Self {
            standardize_line_endings: default_standardize_line_endings(),
            input_mode: InputMode::Text,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("changesum")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ChangesumConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ChangesumConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ChangesumConfig = toml::from_str(&data)?;
    Ok(cfg)
}

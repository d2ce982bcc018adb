/* src/cli/core/src/config.rs */

// Optional kaze.toml. CLI flags always win over config values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KazeConfig {
  #[serde(default)]
  pub optimize: OptimizeSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeSection {
  pub entry: Option<String>,
  pub outfile: Option<String>,
  #[serde(default)]
  pub minify: bool,
}

/// Walk up from `start` looking for kaze.toml.
pub fn find_kaze_config(start: &Path) -> Option<PathBuf> {
  let mut dir = start.to_path_buf();
  loop {
    let candidate = dir.join("kaze.toml");
    if candidate.exists() {
      return Some(candidate);
    }
    if !dir.pop() {
      return None;
    }
  }
}

pub fn load_kaze_config(path: &Path) -> Result<KazeConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Config found upward from cwd, or None (missing config is fine).
pub fn try_load_config() -> Option<KazeConfig> {
  let cwd = std::env::current_dir().ok()?;
  let path = find_kaze_config(&cwd)?;
  load_kaze_config(&path).ok()
}

/* src/cli/core/src/app.rs */

// App introspection: import the user's entry module in a child runtime and
// read the registered route table off the live application object. Module
// top-level side effects run in the child, not in the CLI process.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::error::OptimizeError;
use crate::runtime::JsRuntime;

/// Conventional entry locations, probed in order when no entry is given.
pub const DEFAULT_ENTRY_CANDIDATES: &[&str] =
  &["src/index.ts", "src/index.tsx", "src/index.js", "src/index.jsx"];

#[derive(Debug, Clone, Deserialize)]
pub struct AppRoute {
  #[serde(default = "default_method")]
  pub method: String,
  pub path: String,
}

fn default_method() -> String {
  "ALL".to_string()
}

#[derive(Debug, Clone)]
pub struct AppInfo {
  pub routes: Vec<AppRoute>,
}

impl AppInfo {
  /// Route paths in registration order.
  pub fn route_paths(&self) -> Vec<String> {
    self.routes.iter().map(|r| r.path.clone()).collect()
  }
}

/// Resolve the entry module: the explicit argument, or the first existing
/// conventional candidate. When none exists the first candidate is still
/// chosen so the error names it. The returned path is symlink-resolved.
pub fn resolve_entry(explicit: Option<&str>, base_dir: &Path) -> Result<PathBuf> {
  let entry = match explicit {
    Some(e) => e,
    None => DEFAULT_ENTRY_CANDIDATES
      .iter()
      .copied()
      .find(|c| base_dir.join(c).exists())
      .unwrap_or(DEFAULT_ENTRY_CANDIDATES[0]),
  };

  let path = base_dir.join(entry);
  if !path.exists() {
    return Err(OptimizeError::EntryNotFound(entry.to_string()).into());
  }
  path.canonicalize().with_context(|| format!("failed to resolve {}", path.display()))
}

/// Import the entry in a child runtime and return the application's route
/// table. The child validates the exported app shape (`routes` array plus a
/// `request` dispatch function) and prints the routes as JSON on its last
/// stdout line.
pub fn load_app(entry: &Path, runtime: JsRuntime, base_dir: &Path) -> Result<AppInfo> {
  let script = introspect_script(entry);
  let output = Command::new(runtime.program())
    .args(runtime.eval_args(&script))
    .current_dir(base_dir)
    .output()
    .with_context(|| format!("failed to run {} for app introspection", runtime.program()))?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(
      OptimizeError::EntryLoad {
        path: entry.display().to_string(),
        message: stderr.trim().to_string(),
      }
      .into(),
    );
  }

  // User top-level code may print; the route JSON is the last line.
  let stdout = String::from_utf8_lossy(&output.stdout);
  let Some(line) = stdout.lines().rfind(|l| !l.trim().is_empty()) else {
    return Err(
      OptimizeError::EntryLoad {
        path: entry.display().to_string(),
        message: "introspection produced no output".to_string(),
      }
      .into(),
    );
  };

  let routes: Vec<AppRoute> = serde_json::from_str(line).map_err(|e| OptimizeError::EntryLoad {
    path: entry.display().to_string(),
    message: format!("unexpected introspection output: {e}"),
  })?;
  Ok(AppInfo { routes })
}

fn introspect_script(entry: &Path) -> String {
  let url = json!(format!("file://{}", entry.display())).to_string();
  format!(
    "const mod = await import({url});\n\
     const app = mod.default ?? mod.app;\n\
     if (!app || !Array.isArray(app.routes) || typeof app.request !== 'function') {{\n\
       console.error('entry does not export a Kaze application (expected routes and request)');\n\
       process.exit(1);\n\
     }}\n\
     console.log(JSON.stringify(app.routes.map((r) => ({{ method: r.method, path: r.path }}))));"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_missing_entry_is_entry_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let err = resolve_entry(Some("src/app.ts"), tmp.path()).unwrap_err();
    match err.downcast_ref::<OptimizeError>() {
      Some(OptimizeError::EntryNotFound(entry)) => assert_eq!(entry, "src/app.ts"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn no_entry_and_no_candidates_reports_first_candidate() {
    let tmp = tempfile::tempdir().unwrap();
    let err = resolve_entry(None, tmp.path()).unwrap_err();
    match err.downcast_ref::<OptimizeError>() {
      Some(OptimizeError::EntryNotFound(entry)) => assert_eq!(entry, "src/index.ts"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn first_existing_candidate_wins() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("src")).unwrap();
    std::fs::write(tmp.path().join("src/index.tsx"), "export default {}").unwrap();
    std::fs::write(tmp.path().join("src/index.js"), "export default {}").unwrap();

    let resolved = resolve_entry(None, tmp.path()).unwrap();
    assert!(resolved.ends_with("src/index.tsx"));
  }

  #[test]
  fn explicit_entry_is_canonicalized() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("src")).unwrap();
    std::fs::write(tmp.path().join("src/index.ts"), "export default {}").unwrap();

    let resolved = resolve_entry(Some("src/index.ts"), tmp.path()).unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.exists());
  }

  #[test]
  fn introspect_script_embeds_entry_as_file_url() {
    let script = introspect_script(Path::new("/proj/src/index.ts"));
    assert!(script.contains("\"file:///proj/src/index.ts\""));
    assert!(script.contains("typeof app.request !== 'function'"));
  }
}

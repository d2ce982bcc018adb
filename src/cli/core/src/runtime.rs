/* src/cli/core/src/runtime.rs */

// JS runtime selection shared by introspection, probing, and bundling.
// Prefer bun (imports .ts natively), fall back to node.

use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsRuntime {
  Bun,
  Node,
}

impl JsRuntime {
  pub fn detect() -> Self {
    if which_exists("bun") { Self::Bun } else { Self::Node }
  }

  pub fn program(self) -> &'static str {
    match self {
      Self::Bun => "bun",
      Self::Node => "node",
    }
  }

  /// Arguments that evaluate `script` as an ES module (top-level await).
  pub fn eval_args(self, script: &str) -> Vec<String> {
    match self {
      Self::Bun => vec!["-e".to_string(), script.to_string()],
      Self::Node => {
        vec!["--input-type=module".to_string(), "-e".to_string(), script.to_string()]
      }
    }
  }
}

/// Check if a command exists on PATH.
pub(crate) fn which_exists(cmd: &str) -> bool {
  Command::new("which")
    .arg(cmd)
    .stdout(std::process::Stdio::null())
    .stderr(std::process::Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}

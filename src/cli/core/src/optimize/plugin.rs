/* src/cli/core/src/optimize/plugin.rs */

// Module substitution: redirect the application base-construct import to a
// virtual module that wires in the selected router. Exactly one import
// class is intercepted; everything else in the module graph is untouched.

use std::path::{Path, PathBuf};

use anyhow::Result;
use kaze_synth::RouterPlan;

use crate::bundler::{BundlerPlugin, OnLoadResult, ResolveArgs, Resolver};

/// Sentinel filename colocated with the framework's real module directory,
/// so relative imports inside the substitution module resolve correctly.
pub const VIRTUAL_MODULE: &str = "kaze-optimized-virtual-module";

pub struct RouterPlugin {
  plan: RouterPlan,
}

impl RouterPlugin {
  pub fn new(plan: RouterPlan) -> Self {
    Self { plan }
  }

  pub fn plan(&self) -> &RouterPlan {
    &self.plan
  }
}

impl BundlerPlugin for RouterPlugin {
  fn name(&self) -> &'static str {
    "kaze-optimize"
  }

  fn resolve_filter(&self) -> &'static str {
    "^kaze$"
  }

  fn load_filter(&self) -> String {
    format!("/{VIRTUAL_MODULE}$")
  }

  fn on_resolve(
    &mut self,
    args: &ResolveArgs,
    resolver: &mut dyn Resolver,
  ) -> Result<Option<PathBuf>> {
    // No importer: the bundler's own resolution (entry point or the nested
    // resolve below). Redirecting it would recurse forever.
    if args.importer.is_none() {
      return Ok(None);
    }

    // Locate the real on-disk module, then park the sentinel next to it.
    let resolved = resolver.resolve(&args.path, &args.resolve_dir)?;
    let dir = resolved.parent().unwrap_or_else(|| Path::new("."));
    Ok(Some(dir.join(VIRTUAL_MODULE)))
  }

  fn on_load(&mut self, path: &str) -> Result<Option<OnLoadResult>> {
    if !path.ends_with(VIRTUAL_MODULE) {
      return Ok(None);
    }
    Ok(Some(OnLoadResult { contents: render_module(&self.plan), loader: "js" }))
  }
}

/// The substitution module. Both statements come from the same RouterPlan,
/// so the imported class and the constructed class always agree.
pub fn render_module(plan: &RouterPlan) -> String {
  let mut out = String::from("import { KazeBase } from 'kaze/kaze-base'\n");
  out.push_str(&plan.import_statement);
  out.push_str("\n\nexport class Kaze extends KazeBase {\n");
  out.push_str("  constructor(options = {}) {\n");
  out.push_str("    super(options)\n    ");
  out.push_str(&plan.construct_statement);
  out.push_str("\n  }\n}\n");
  out
}

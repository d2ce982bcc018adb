/* src/cli/core/src/optimize/mod.rs */

// The optimize pipeline: introspect the app, probe router capability,
// synthesize the router plan, bundle with the substitution plugin
// installed. Strictly sequential; each stage's output feeds the next.

mod plugin;

#[cfg(test)]
mod tests;

pub use plugin::{RouterPlugin, VIRTUAL_MODULE, render_module};

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::app;
use crate::bundler::{BundleOptions, Bundler, EsbuildBundler};
use crate::config::KazeConfig;
use crate::probe;
use crate::runtime::JsRuntime;
use crate::ui;

pub const DEFAULT_OUTFILE: &str = "dist/index.js";

#[derive(Debug, Clone, Default)]
pub struct OptimizeOptions {
  pub entry: Option<String>,
  pub outfile: Option<PathBuf>,
  pub minify: bool,
}

pub async fn run_optimize(
  options: &OptimizeOptions,
  config: Option<&KazeConfig>,
  base_dir: &Path,
) -> Result<()> {
  let runtime = JsRuntime::detect();

  let entry_arg =
    options.entry.as_deref().or_else(|| config.and_then(|c| c.optimize.entry.as_deref()));
  let entry = app::resolve_entry(entry_arg, base_dir)?;
  ui::arrow(&format!("entry {}", entry.display()));

  let info = app::load_app(&entry, runtime, base_dir)?;
  ui::detail(&format!("{} routes registered", info.routes.len()));

  let prepared = probe::has_prepared_router(runtime, base_dir).await;
  let plan = kaze_synth::synthesize(&info.route_paths(), prepared);

  let outfile = options
    .outfile
    .clone()
    .or_else(|| config.and_then(|c| c.optimize.outfile.as_ref().map(PathBuf::from)))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTFILE));
  let absolute_outfile =
    if outfile.is_absolute() { outfile.clone() } else { base_dir.join(&outfile) };
  let minify = options.minify || config.is_some_and(|c| c.optimize.minify);

  let bundle_options = BundleOptions::new(entry, absolute_outfile, minify);
  let mut router_plugin = RouterPlugin::new(plan);
  let bundler = EsbuildBundler::new(runtime, base_dir);
  let output = bundler.bundle(&bundle_options, &mut router_plugin)?;

  let shown = output.outfile.strip_prefix(base_dir).unwrap_or(&output.outfile);
  ui::ok(&format!("Router: {}", router_plugin.plan().variant.class_name()));
  ui::ok(&format!("Output: {} ({})", shown.display(), ui::format_kib(output.size)));
  Ok(())
}

/* src/cli/core/src/bundler/mod.rs */

// Bundler boundary. The CLI consumes any bundler that can host a
// resolve/load plugin; the production implementation drives esbuild in a
// child runtime (see esbuild.rs).

mod esbuild;

pub use esbuild::EsbuildBundler;

use std::path::{Path, PathBuf};

use anyhow::Result;

/// A module resolution request observed by a plugin.
#[derive(Debug, Clone)]
pub struct ResolveArgs {
  pub path: String,
  /// Absent for the bundler's own top-level resolutions (entry points and
  /// nested resolve calls issued by plugins).
  pub importer: Option<String>,
  pub resolve_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct OnLoadResult {
  pub contents: String,
  pub loader: &'static str,
}

/// Access to the bundler's own resolver, for nested resolution from inside
/// an `on_resolve` handler. Nested requests carry no importer.
pub trait Resolver {
  fn resolve(&mut self, path: &str, resolve_dir: &Path) -> Result<PathBuf>;
}

pub trait BundlerPlugin {
  fn name(&self) -> &'static str;
  /// JS regex source selecting the resolve requests this plugin sees.
  fn resolve_filter(&self) -> &'static str;
  /// JS regex source selecting the load requests this plugin sees.
  fn load_filter(&self) -> String;
  /// `Some(path)` redirects the import; `None` passes it through.
  fn on_resolve(&mut self, args: &ResolveArgs, resolver: &mut dyn Resolver)
  -> Result<Option<PathBuf>>;
  /// `Some(contents)` supplies the module; `None` defers to the bundler.
  fn on_load(&mut self, path: &str) -> Result<Option<OnLoadResult>>;
}

#[derive(Debug, Clone)]
pub struct BundleOptions {
  pub entry: PathBuf,
  pub outfile: PathBuf,
  pub minify: bool,
  /// Packages assumed present in the artifact's execution environment.
  pub external: Vec<String>,
  pub format: &'static str,
  pub platform: &'static str,
  pub target: &'static str,
  pub jsx: &'static str,
  pub jsx_import_source: &'static str,
}

impl BundleOptions {
  pub fn new(entry: PathBuf, outfile: PathBuf, minify: bool) -> Self {
    Self {
      entry,
      outfile,
      minify,
      external: vec!["@kaze/node-server".to_string()],
      format: "esm",
      platform: "node",
      target: "node20",
      jsx: "automatic",
      jsx_import_source: "kaze/jsx",
    }
  }
}

#[derive(Debug, Clone)]
pub struct BundleOutput {
  pub outfile: PathBuf,
  pub size: u64,
}

pub trait Bundler {
  fn bundle(&self, options: &BundleOptions, plugin: &mut dyn BundlerPlugin)
  -> Result<BundleOutput>;
}

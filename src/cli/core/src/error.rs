/* src/cli/core/src/error.rs */

// Fatal error classes for the optimize pipeline. Probe and synthesis
// failures have no variants here: they are absorbed into the router
// fallback chain and never surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
  #[error("entry file {0} does not exist")]
  EntryNotFound(String),

  #[error("failed to load application from {path}\n{message}")]
  EntryLoad { path: String, message: String },

  #[error("bundling failed\n{0}")]
  Bundle(String),
}

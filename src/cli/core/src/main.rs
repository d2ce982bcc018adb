/* src/cli/core/src/main.rs */

mod app;
mod bundler;
mod config;
mod error;
mod optimize;
mod probe;
mod runtime;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::try_load_config;
use optimize::OptimizeOptions;
use runtime::JsRuntime;

#[derive(Parser)]
#[command(name = "kaze", about = "Kaze CLI", version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Build an optimized bundle with the router dispatch table precomputed
  Optimize {
    /// Application entry file (auto-detected if omitted)
    entry: Option<String>,
    /// Output file
    #[arg(short, long)]
    outfile: Option<PathBuf>,
    /// Minify the output file
    #[arg(short, long)]
    minify: bool,
  },
  /// Print the routes registered by an application entry
  Routes {
    /// Application entry file (auto-detected if omitted)
    entry: Option<String>,
  },
}

/// Warn if `.kaze/` is not covered by any gitignore rule
fn warn_kaze_not_gitignored(base_dir: &std::path::Path) {
  use std::process::Command;
  let output =
    Command::new("git").args(["check-ignore", "-q", ".kaze"]).current_dir(base_dir).output();
  match output {
    // exit 1 = not ignored by any gitignore rule
    Ok(o) if o.status.code() == Some(1) => {
      ui::warn(
        ".kaze/ is not in .gitignore -- consider adding it to avoid tracking build artifacts",
      );
    }
    // exit 0 = ignored (good); other = not a git repo or git missing (skip)
    _ => {}
  }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
  let cli = Cli::parse();
  match run(cli).await {
    Ok(()) => std::process::ExitCode::SUCCESS,
    Err(err) => {
      ui::fail(&format!("{err:#}"));
      std::process::ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli) -> Result<()> {
  let base_dir = std::env::current_dir().context("failed to get cwd")?;

  match cli.command {
    Command::Optimize { entry, outfile, minify } => {
      let config = try_load_config();
      ui::banner("optimize");
      warn_kaze_not_gitignored(&base_dir);
      let options = OptimizeOptions { entry, outfile, minify };
      optimize::run_optimize(&options, config.as_ref(), &base_dir).await?;
      ui::blank();
    }
    Command::Routes { entry } => {
      let config = try_load_config();
      let entry_arg =
        entry.as_deref().or_else(|| config.as_ref().and_then(|c| c.optimize.entry.as_deref()));
      let resolved = app::resolve_entry(entry_arg, &base_dir)?;
      let info = app::load_app(&resolved, JsRuntime::detect(), &base_dir)?;
      for route in &info.routes {
        ui::detail(&format!("{:<7} {}", route.method, route.path));
      }
      ui::ok(&format!("{} routes", info.routes.len()));
    }
  }

  Ok(())
}

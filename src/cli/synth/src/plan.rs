/* src/cli/synth/src/plan.rs */

// Router variant selection. The preference order is Prepared > RegExp >
// Trie; selection never fails, it only demotes.

use std::panic::{AssertUnwindSafe, catch_unwind};

use anyhow::Result;

use crate::route_table::{RouteTable, build_route_table};
use crate::serialize::serialize_init_params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterVariant {
  Prepared,
  RegExp,
  Trie,
}

impl RouterVariant {
  /// Class name exported by the framework's router module.
  pub fn class_name(self) -> &'static str {
    match self {
      Self::Prepared => "PreparedRegExpRouter",
      Self::RegExp => "RegExpRouter",
      Self::Trie => "TrieRouter",
    }
  }

  pub fn module_path(self) -> &'static str {
    match self {
      Self::Prepared | Self::RegExp => "kaze/router/reg-exp-router",
      Self::Trie => "kaze/router/trie-router",
    }
  }
}

/// The construction artifact consumed by the module substitution layer.
/// Only the per-variant constructors below can build one, so the import
/// statement and the construction statement always name the same variant.
#[derive(Debug, Clone)]
pub struct RouterPlan {
  pub variant: RouterVariant,
  pub import_statement: String,
  pub construct_statement: String,
}

impl RouterPlan {
  fn new(variant: RouterVariant, construct_statement: String) -> Self {
    let import_statement =
      format!("import {{ {} }} from '{}'", variant.class_name(), variant.module_path());
    Self { variant, import_statement, construct_statement }
  }

  fn prepared(payload: &str) -> Self {
    let construct = format!(
      "const routerParams = {payload}\n    this.router = new PreparedRegExpRouter(...routerParams)"
    );
    Self::new(RouterVariant::Prepared, construct)
  }

  fn reg_exp() -> Self {
    Self::new(RouterVariant::RegExp, "this.router = new RegExpRouter()".to_string())
  }

  fn trie() -> Self {
    Self::new(RouterVariant::Trie, "this.router = new TrieRouter()".to_string())
  }
}

/// Select the router variant for a route set.
///
/// `prepared_available` is the capability probe outcome. When it is false
/// the paths are not inspected at all. A table-build failure demotes to
/// RegExp; a panic anywhere in selection is caught and collapses to Trie,
/// the variant that needs no route analysis.
pub fn synthesize(paths: &[String], prepared_available: bool) -> RouterPlan {
  synthesize_with(paths, prepared_available, build_route_table)
}

pub(crate) fn synthesize_with(
  paths: &[String],
  prepared_available: bool,
  builder: impl Fn(&[String]) -> Result<RouteTable>,
) -> RouterPlan {
  catch_unwind(AssertUnwindSafe(|| select(paths, prepared_available, builder)))
    .unwrap_or_else(|_| RouterPlan::trie())
}

pub(crate) fn select(
  paths: &[String],
  prepared_available: bool,
  builder: impl Fn(&[String]) -> Result<RouteTable>,
) -> RouterPlan {
  if !prepared_available {
    return RouterPlan::reg_exp();
  }
  match builder(paths) {
    Ok(table) => RouterPlan::prepared(&serialize_init_params(&table)),
    Err(_) => RouterPlan::reg_exp(),
  }
}

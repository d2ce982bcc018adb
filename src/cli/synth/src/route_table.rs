/* src/cli/synth/src/route_table.rs */

// Compiles registered route paths into the dispatch table embedded in the
// PreparedRegExpRouter init params.

use anyhow::{Result, bail};

/// One registered route, compiled. `pattern` is a JS regex source (slashes
/// pre-escaped for regex-literal embedding), `params` are capture names in
/// group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
  pub path: String,
  pub pattern: String,
  pub params: Vec<String>,
}

/// Compiled dispatch table for a route set, in registration order.
/// `statics` maps param-less, wildcard-less paths to their entry index so
/// the router can skip regex matching for them.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
  pub entries: Vec<RouteEntry>,
  pub statics: Vec<(String, usize)>,
}

impl RouteTable {
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Build the dispatch table from route paths in registration order.
/// Fails on patterns the table builder cannot encode; the caller treats any
/// failure as "use a runtime-built router instead".
pub fn build_route_table(paths: &[String]) -> Result<RouteTable> {
  let mut table = RouteTable::default();
  for path in paths {
    let entry = compile_route(path)?;
    if entry.params.is_empty() && !has_wildcard(path) {
      table.statics.push((path.clone(), table.entries.len()));
    }
    table.entries.push(entry);
  }
  Ok(table)
}

fn has_wildcard(path: &str) -> bool {
  path.split('/').any(|seg| seg == "*")
}

fn compile_route(path: &str) -> Result<RouteEntry> {
  if !path.starts_with('/') {
    bail!("route path {path:?} must start with '/'");
  }
  if path == "/" {
    return Ok(RouteEntry {
      path: path.to_string(),
      pattern: "^\\/$".to_string(),
      params: vec![],
    });
  }

  let mut pattern = String::from("^");
  let mut params: Vec<String> = Vec::new();
  let segments: Vec<&str> = path[1..].split('/').collect();
  let last = segments.len() - 1;

  for (i, segment) in segments.iter().enumerate() {
    pattern.push_str("\\/");
    if let Some(rest) = segment.strip_prefix(':') {
      let (name, matcher) = parse_param(path, rest)?;
      if params.iter().any(|p| p == name) {
        bail!("route path {path:?} uses param name {name:?} more than once");
      }
      params.push(name.to_string());
      pattern.push('(');
      pattern.push_str(matcher.unwrap_or("[^\\/]+"));
      pattern.push(')');
    } else if *segment == "*" {
      // Trailing wildcard swallows the rest of the path, mid-path matches
      // exactly one segment.
      pattern.push_str(if i == last { ".*" } else { "[^\\/]+" });
    } else {
      escape_static(segment, &mut pattern);
    }
  }

  pattern.push('$');
  Ok(RouteEntry { path: path.to_string(), pattern, params })
}

/// Parse `name` or `name{matcher}` after the leading ':'.
fn parse_param<'a>(path: &str, rest: &'a str) -> Result<(&'a str, Option<&'a str>)> {
  let (name, matcher) = match rest.find('{') {
    Some(brace) => {
      let Some(inner) = rest[brace..].strip_prefix('{').and_then(|m| m.strip_suffix('}')) else {
        bail!("route path {path:?} has an unterminated custom matcher");
      };
      (&rest[..brace], Some(inner))
    }
    None => (rest, None),
  };

  if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
    bail!("route path {path:?} has an invalid param name {name:?}");
  }
  if let Some(m) = matcher {
    validate_matcher(path, m)?;
  }
  Ok((name, matcher))
}

/// Custom matchers are spliced into the emitted regex literal as-is, so
/// they may not introduce capture groups (which would shift the capture
/// indexes recorded in the table) or characters that cannot appear raw in
/// a single-line JS regex literal.
fn validate_matcher(path: &str, matcher: &str) -> Result<()> {
  if matcher.is_empty() {
    bail!("route path {path:?} has an empty custom matcher");
  }
  if matcher
    .chars()
    .any(|c| (c as u32) < 0x20 || c == '\u{7f}' || c == '\u{2028}' || c == '\u{2029}')
  {
    bail!("route path {path:?} has a control character in its custom matcher");
  }
  let bytes = matcher.as_bytes();
  let mut i = 0;
  while i < bytes.len() {
    match bytes[i] {
      b'\\' => {
        if i + 1 == bytes.len() {
          bail!("route path {path:?} has a trailing backslash in its custom matcher");
        }
        i += 1;
      }
      b'(' if !matcher[i + 1..].starts_with("?:") => {
        bail!("route path {path:?} has a capturing group in its custom matcher");
      }
      _ => {}
    }
    i += 1;
  }
  Ok(())
}

/// Append a static segment, escaped for JS regex-literal embedding.
/// Control characters and the JS line separators become \xHH / \uHHHH so the
/// emitted literal stays on one source line no matter what bytes the route
/// path carried.
fn escape_static(segment: &str, out: &mut String) {
  use std::fmt::Write;
  for c in segment.chars() {
    match c {
      '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\' => {
        out.push('\\');
        out.push(c);
      }
      '/' => out.push_str("\\/"),
      '\u{2028}' | '\u{2029}' => {
        let _ = write!(out, "\\u{:04x}", c as u32);
      }
      c if (c as u32) < 0x20 || c == '\u{7f}' => {
        let _ = write!(out, "\\x{:02x}", c as u32);
      }
      c => out.push(c),
    }
  }
}

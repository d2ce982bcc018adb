/* src/cli/core/src/bundler/esbuild.rs */

// Drives esbuild in a child runtime. The embedded driver script hosts the
// esbuild API; plugin hooks cross the process boundary as line-delimited
// JSON on the child's stdio:
//
//   driver -> cli   {"id", "type": "onResolve" | "onLoad", ...}
//   cli -> driver   {"id", "type": "result", ...}
//   cli -> driver   {"id", "type": "resolve", path, resolveDir}   (nested)
//   driver -> cli   {"id", "type": "answer", path}
//
// Traffic is tiny (one redirected import, one virtual load per build), so
// hooks are served sequentially; out-of-order messages that arrive while a
// nested resolve is in flight are parked in a backlog.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};

use crate::error::OptimizeError;
use crate::runtime::JsRuntime;

use super::{BundleOptions, BundleOutput, Bundler, BundlerPlugin, ResolveArgs, Resolver};

const DRIVER_SCRIPT: &str = include_str!("driver.mjs");
const DRIVER_FILENAME: &str = "esbuild-driver.mjs";

pub struct EsbuildBundler {
  runtime: JsRuntime,
  base_dir: PathBuf,
}

impl EsbuildBundler {
  pub fn new(runtime: JsRuntime, base_dir: &Path) -> Self {
    Self { runtime, base_dir: base_dir.to_path_buf() }
  }

  /// Write the driver into .kaze/ so its bare 'esbuild' import resolves
  /// against the project's node_modules.
  fn write_driver(&self) -> Result<PathBuf> {
    let dir = self.base_dir.join(".kaze");
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(DRIVER_FILENAME);
    std::fs::write(&path, DRIVER_SCRIPT)
      .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
  }

  fn spawn_driver(&self, driver: &Path, payload: &str) -> Result<Child> {
    Command::new(self.runtime.program())
      .arg(driver)
      .arg(payload)
      .current_dir(&self.base_dir)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .with_context(|| format!("failed to start the esbuild driver via {}", self.runtime.program()))
  }
}

impl Bundler for EsbuildBundler {
  fn bundle(
    &self,
    options: &BundleOptions,
    plugin: &mut dyn BundlerPlugin,
  ) -> Result<BundleOutput> {
    let payload = json!({
      "entry": options.entry.to_string_lossy(),
      "outfile": options.outfile.to_string_lossy(),
      "minify": options.minify,
      "format": options.format,
      "target": options.target,
      "platform": options.platform,
      "jsx": options.jsx,
      "jsxImportSource": options.jsx_import_source,
      "external": options.external,
      "plugin": {
        "name": plugin.name(),
        "resolveFilter": plugin.resolve_filter(),
        "loadFilter": plugin.load_filter(),
      },
    });

    let driver = self.write_driver()?;
    let mut child = self.spawn_driver(&driver, &payload.to_string())?;

    let stderr = child.stderr.take().context("driver stderr not captured")?;
    let stderr_thread = std::thread::spawn(move || {
      let mut buf = String::new();
      let mut reader = BufReader::new(stderr);
      let _ = reader.read_to_string(&mut buf);
      buf
    });

    let mut session = DriverSession {
      stdin: child.stdin.take().context("driver stdin not captured")?,
      reader: BufReader::new(child.stdout.take().context("driver stdout not captured")?),
      backlog: VecDeque::new(),
      call_seq: 0,
    };

    let hook_result = serve_hooks(&mut session, plugin);
    drop(session);
    if hook_result.is_err() {
      let _ = child.kill();
    }
    let status = child.wait().context("failed to wait for the esbuild driver")?;
    let stderr_text = stderr_thread.join().unwrap_or_default();
    hook_result?;

    if !status.success() {
      return Err(
        OptimizeError::Bundle(format!(
          "esbuild driver exited with status {status}\n{}",
          stderr_text.trim()
        ))
        .into(),
      );
    }

    let size = std::fs::metadata(&options.outfile)
      .with_context(|| format!("bundler produced no output at {}", options.outfile.display()))?
      .len();
    Ok(BundleOutput { outfile: options.outfile.clone(), size })
  }
}

/// Serve hook requests until the driver closes its stdout.
fn serve_hooks(session: &mut DriverSession, plugin: &mut dyn BundlerPlugin) -> Result<()> {
  while let Some(msg) = session.next_msg()? {
    let id = msg.get("id").and_then(Value::as_u64).context("driver message without id")?;
    match msg.get("type").and_then(Value::as_str) {
      Some("onResolve") => {
        let args = ResolveArgs {
          path: str_field(&msg, "path").to_string(),
          importer: msg.get("importer").and_then(Value::as_str).map(str::to_string),
          resolve_dir: PathBuf::from(str_field(&msg, "resolveDir")),
        };
        let redirect = plugin.on_resolve(&args, session)?;
        session.send(&json!({
          "type": "result",
          "id": id,
          "path": redirect.map(|p| p.to_string_lossy().into_owned()),
        }))?;
      }
      Some("onLoad") => {
        let loaded = plugin.on_load(str_field(&msg, "path"))?;
        let reply = match loaded {
          Some(l) => json!({ "type": "result", "id": id, "contents": l.contents, "loader": l.loader }),
          None => json!({ "type": "result", "id": id, "contents": null }),
        };
        session.send(&reply)?;
      }
      other => bail!("unexpected message from esbuild driver: {other:?}"),
    }
  }
  Ok(())
}

fn str_field<'a>(msg: &'a Value, key: &str) -> &'a str {
  msg.get(key).and_then(Value::as_str).unwrap_or_default()
}

struct DriverSession {
  stdin: ChildStdin,
  reader: BufReader<ChildStdout>,
  backlog: VecDeque<Value>,
  call_seq: u64,
}

impl DriverSession {
  fn send(&mut self, msg: &Value) -> Result<()> {
    let line = serde_json::to_string(msg)?;
    writeln!(self.stdin, "{line}").context("failed to write to the esbuild driver")?;
    self.stdin.flush().context("failed to flush the esbuild driver stdin")?;
    Ok(())
  }

  fn read_raw(&mut self) -> Result<Option<Value>> {
    let mut line = String::new();
    loop {
      line.clear();
      let n = self.reader.read_line(&mut line).context("failed to read from the esbuild driver")?;
      if n == 0 {
        return Ok(None);
      }
      let trimmed = line.trim();
      if trimmed.is_empty() {
        continue;
      }
      let msg = serde_json::from_str(trimmed)
        .with_context(|| format!("unexpected driver output: {trimmed}"))?;
      return Ok(Some(msg));
    }
  }

  fn next_msg(&mut self) -> Result<Option<Value>> {
    if let Some(msg) = self.backlog.pop_front() {
      return Ok(Some(msg));
    }
    self.read_raw()
  }
}

impl Resolver for DriverSession {
  fn resolve(&mut self, path: &str, resolve_dir: &Path) -> Result<PathBuf> {
    self.call_seq += 1;
    let id = self.call_seq;
    self.send(&json!({
      "type": "resolve",
      "id": id,
      "path": path,
      "resolveDir": resolve_dir.to_string_lossy(),
    }))?;

    loop {
      let Some(msg) = self.read_raw()? else {
        bail!("driver closed while resolving {path:?}");
      };
      let is_answer = msg.get("type").and_then(Value::as_str) == Some("answer")
        && msg.get("id").and_then(Value::as_u64) == Some(id);
      if !is_answer {
        self.backlog.push_back(msg);
        continue;
      }
      let resolved = msg.get("path").and_then(Value::as_str).unwrap_or_default();
      if resolved.is_empty() {
        bail!("bundler could not resolve {path:?}");
      }
      return Ok(PathBuf::from(resolved));
    }
  }
}

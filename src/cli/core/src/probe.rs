/* src/cli/core/src/probe.rs */

// Capability probe: does the installed framework export the prepared
// router? Runs in a child process so a broken or incompatible install can
// throw during import without touching the CLI process. Exit status is the
// entire protocol; every failure mode (import error, missing export, spawn
// failure, timeout) collapses to "absent".

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::runtime::JsRuntime;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

const PROBE_SCRIPT: &str = "try { \
   const m = await import('kaze/router/reg-exp-router'); \
   process.exit(m.PreparedRegExpRouter ? 0 : 1); \
 } catch { process.exit(1); }";

/// Never errors: a probe that cannot run reports the capability as absent.
pub async fn has_prepared_router(runtime: JsRuntime, base_dir: &Path) -> bool {
  let mut cmd = Command::new(runtime.program());
  cmd
    .args(runtime.eval_args(PROBE_SCRIPT))
    .current_dir(base_dir)
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .kill_on_drop(true);

  let Ok(mut child) = cmd.spawn() else {
    return false;
  };

  match tokio::time::timeout(PROBE_TIMEOUT, child.wait()).await {
    Ok(Ok(status)) => status.success(),
    Ok(Err(_)) => false,
    // Hung probe: kill and treat the capability as absent.
    Err(_) => {
      let _ = child.start_kill();
      false
    }
  }
}

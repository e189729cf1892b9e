use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::Error;

/// Ask git for the top-level directory of the work tree containing `dir`.
///
/// This uses the system git command, so it honors whatever repository
/// discovery settings (`GIT_DIR`, `GIT_CEILING_DIRECTORIES`, ...) are in
/// effect for the caller.
pub fn show_toplevel(dir: &Path) -> Result<PathBuf, Error> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .map_err(|e| Error::Git {
            command: "rev-parse --show-toplevel".to_string(),
            stderr: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let toplevel = stdout.trim();
    if !output.status.success() || toplevel.is_empty() {
        return Err(Error::Git {
            command: "rev-parse --show-toplevel".to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(PathBuf::from(toplevel))
}

/// Locate the repository root for `dir`, falling back to `dir` itself when
/// it is not inside a git work tree or git is unavailable.
pub fn repo_root(dir: &Path) -> PathBuf {
    match show_toplevel(dir) {
        Ok(root) => root,
        Err(e) => {
            debug!("{}; using {} as repository root", e, dir.display());
            dir.to_path_buf()
        }
    }
}

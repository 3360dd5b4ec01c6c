//! Atomic publication of generated files
//!
//! Output is written to `<target>.tmp` in the same directory and renamed
//! into place, so the target only ever holds a previous complete output or
//! the new complete output. A published file is left read-only to discourage
//! hand edits; the next publish clears that protection before replacing it.
//!
//! Two invocations publishing to the same target at the same time race on
//! the remove/rename/protect steps. The outcome of such a race is undefined.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the target to form the temp path
pub const TEMP_SUFFIX: &str = ".tmp";

/// How far a publish got before failing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Staging,
    Replacing,
    Protecting,
}

/// In-flight write of one generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishIntent {
    temp: PathBuf,
    target: PathBuf,
}

impl PublishIntent {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        Self {
            temp: temp_path(&target),
            target,
        }
    }

    pub fn temp(&self) -> &Path {
        &self.temp
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Write `text` to the target atomically and mark it read-only.
    ///
    /// On failure the temp file is removed, and if the previous target had
    /// already been removed, whatever is left at the target is removed too.
    pub fn publish(&self, text: &str) -> Result<()> {
        self.publish_with(text, |path| set_readonly(path, true))
    }

    /// `publish` with the final protect step supplied by the caller
    fn publish_with<F>(&self, text: &str, protect: F) -> Result<()>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        let mut stage = Stage::Staging;
        let result = self.commit(text, &mut stage, protect);
        if result.is_err() {
            self.discard();
            if stage >= Stage::Replacing {
                self.retract();
            }
        }
        result
    }

    fn commit<F>(&self, text: &str, stage: &mut Stage, protect: F) -> Result<()>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        self.stage(text)?;
        *stage = Stage::Replacing;
        self.clear_target()?;
        fs::rename(&self.temp, &self.target).with_context(|| {
            format!("renaming {} to {}", self.temp.display(), self.target.display())
        })?;
        *stage = Stage::Protecting;
        protect(&self.target).with_context(|| format!("protecting {}", self.target.display()))?;
        log::debug!("published {}", self.target.display());
        Ok(())
    }

    /// Step 1: full contents into the temp file, synced to disk
    fn stage(&self, text: &str) -> Result<()> {
        let mut file = File::create(&self.temp)
            .with_context(|| format!("creating {}", self.temp.display()))?;
        file.write_all(text.as_bytes())
            .and_then(|()| file.sync_all())
            .with_context(|| format!("writing {}", self.temp.display()))?;
        Ok(())
    }

    /// Step 2: remove a previous output, read-only or not
    fn clear_target(&self) -> Result<()> {
        if fs::symlink_metadata(&self.target).is_err() {
            return Ok(());
        }
        set_readonly(&self.target, false)
            .with_context(|| format!("unprotecting {}", self.target.display()))?;
        fs::remove_file(&self.target)
            .with_context(|| format!("removing previous {}", self.target.display()))
    }

    /// Best-effort removal of the temp file
    pub fn discard(&self) {
        if let Err(err) = fs::remove_file(&self.temp) {
            log::trace!("temp cleanup of {}: {err}", self.temp.display());
        }
    }

    /// Best-effort removal of the target, clearing protection first
    pub fn retract(&self) {
        if fs::symlink_metadata(&self.target).is_err() {
            return;
        }
        if let Err(err) = set_readonly(&self.target, false) {
            log::trace!("unprotecting {}: {err}", self.target.display());
        }
        if let Err(err) = fs::remove_file(&self.target) {
            log::debug!("could not remove {}: {err}", self.target.display());
        }
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(unix)]
fn set_readonly(path: &Path, readonly: bool) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    let mode = permissions.mode();
    // Only the owner write bit is restored when unprotecting.
    permissions.set_mode(if readonly { mode & !0o222 } else { mode | 0o200 });
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn set_readonly(path: &Path, readonly: bool) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(readonly);
    fs::set_permissions(path, permissions)
}

//! Device filesystem acquisition
//!
//! Mounts an iOS app sandbox over FUSE (`ifuse`) so the CoinKeeper database
//! file can be read in place, and unmounts it afterward. The export core
//! treats the returned path as an opaque database location.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ExportError, ExportResult};

/// Database file name inside the mounted app sandbox
pub const DEVICE_DB_FILE: &str = "CoinKeeper2.db3";

/// Default app identifier of the CoinKeeper iOS app
pub const DEFAULT_APP_ID: &str = "com.coinkeeper.CoinKeeper";

/// Mount the app sandbox at `mount_point` and return the database path
///
/// Creates the mount point if needed (an existing directory is fine), then
/// shells out to `ifuse`.
///
/// # Errors
///
/// Returns [`ExportError::Mount`] if the mount point cannot be created or
/// `ifuse` fails.
pub fn mount(mount_point: impl AsRef<Path>, app_id: &str) -> ExportResult<PathBuf> {
    let mount_point = mount_point.as_ref();
    std::fs::create_dir_all(mount_point).map_err(|e| {
        ExportError::Mount(format!(
            "cannot create mount point {}: {}",
            mount_point.display(),
            e
        ))
    })?;

    let status = Command::new("ifuse")
        .arg(mount_point)
        .arg("--appid")
        .arg(app_id)
        .status()
        .map_err(|e| ExportError::Mount(format!("cannot run ifuse: {}", e)))?;

    if !status.success() {
        return Err(ExportError::Mount(format!(
            "ifuse exited with {} for {}",
            status,
            mount_point.display()
        )));
    }

    Ok(mount_point.join(DEVICE_DB_FILE))
}

/// Unmount the app sandbox and remove the mount point directory
///
/// # Errors
///
/// Returns [`ExportError::Mount`] if `umount` fails; a leftover mount point
/// directory that cannot be removed is not an error.
pub fn unmount(mount_point: impl AsRef<Path>) -> ExportResult<()> {
    let mount_point = mount_point.as_ref();

    let status = Command::new("umount")
        .arg(mount_point)
        .status()
        .map_err(|e| ExportError::Mount(format!("cannot run umount: {}", e)))?;

    if !status.success() {
        return Err(ExportError::Mount(format!(
            "umount exited with {} for {}",
            status,
            mount_point.display()
        )));
    }

    let _ = std::fs::remove_dir(mount_point);
    Ok(())
}

/// Combine an export outcome with the trailing unmount outcome
///
/// The export error is the one the user cares about: an unmount failure is
/// only surfaced when the export itself succeeded, and is otherwise
/// reported as a warning.
pub fn resolve_outcome(export: ExportResult<()>, unmount: ExportResult<()>) -> ExportResult<()> {
    match (export, unmount) {
        (Ok(()), unmount) => unmount,
        (export, Ok(())) => export,
        (Err(export_err), Err(unmount_err)) => {
            eprintln!("Warning: {}", unmount_err);
            Err(export_err)
        }
    }
}

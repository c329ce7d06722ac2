//! The symlink swap that decides which instance is live.
//!
//! Activation state is never stored. The live Minecraft path either is a
//! symlink (its target's base name is the active instance) or it is a real
//! directory or absent (the unmanaged "default" state). Deriving the state
//! from the filesystem on every query keeps the tool honest even when the
//! user deletes or replaces the link by hand.
//!
//! The backup is a single slot: every switch that displaces a real
//! directory overwrites whatever the slot held before. A symlink being
//! displaced carries no unique data and is simply removed.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::settings::Settings;

/// Name shown for the unmanaged state, when no instance symlink is in place.
pub const DEFAULT_INSTANCE: &str = "default";

/// Swaps the live Minecraft directory between instances.
#[derive(Debug, Clone)]
pub struct Activation {
    instances_path: PathBuf,
    minecraft_path: PathBuf,
    backup_path: PathBuf,
}

impl Activation {
    pub fn new(settings: &Settings) -> Self {
        Activation {
            instances_path: settings.instances_path.clone(),
            minecraft_path: settings.minecraft_path.clone(),
            backup_path: settings.backup_path.clone(),
        }
    }

    /// Name of the active instance, or `None` when the live path is a real
    /// directory or absent. A dangling symlink still reports its target's
    /// name; operations against it will fail on their own.
    pub fn active_instance(&self) -> Option<String> {
        let meta = std::fs::symlink_metadata(&self.minecraft_path).ok()?;
        if !meta.file_type().is_symlink() {
            return None;
        }
        let target = std::fs::read_link(&self.minecraft_path).ok()?;
        target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_instance().as_deref() == Some(name)
    }

    /// Point the live path at the named instance.
    ///
    /// A real directory at the live path is displaced into the backup slot
    /// first, replacing any previous backup; an existing symlink is just
    /// removed. The steps are individually atomic but the sequence is not:
    /// a failure between displacement and link creation leaves no live
    /// directory, and retrying the same call completes the switch.
    pub fn switch_to(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let instance_path = self.instances_path.join(name);
        if !instance_path.exists() {
            return Err(Error::NotFound(name.to_string()));
        }

        match std::fs::symlink_metadata(&self.minecraft_path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                std::fs::remove_file(&self.minecraft_path).map_err(|e| Error::SwitchFailed {
                    step: "removing the existing instance symlink",
                    source: e,
                })?;
            }
            Ok(_) => {
                self.displace_to_backup()?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // Nothing at the live path; nothing to displace.
            }
            Err(e) => {
                return Err(Error::SwitchFailed {
                    step: "inspecting the live path",
                    source: e,
                });
            }
        }

        symlink_dir(&instance_path, &self.minecraft_path).map_err(|e| Error::SwitchFailed {
            step: "creating the instance symlink",
            source: e,
        })?;

        tracing::info!("activated instance {:?} -> {:?}", name, instance_path);
        Ok(())
    }

    /// Move the real directory at the live path into the backup slot,
    /// deleting whatever the slot held before.
    fn displace_to_backup(&self) -> Result<()> {
        if let Ok(meta) = std::fs::symlink_metadata(&self.backup_path) {
            let removed = if meta.is_dir() {
                std::fs::remove_dir_all(&self.backup_path)
            } else {
                std::fs::remove_file(&self.backup_path)
            };
            removed.map_err(|e| Error::SwitchFailed {
                step: "removing the stale backup",
                source: e,
            })?;
        }
        std::fs::rename(&self.minecraft_path, &self.backup_path).map_err(|e| {
            Error::SwitchFailed {
                step: "moving the live directory to the backup slot",
                source: e,
            }
        })?;
        tracing::info!(
            "backed up {:?} -> {:?}",
            self.minecraft_path,
            self.backup_path
        );
        Ok(())
    }

    /// Remove the instance symlink, if any, and put the backed-up directory
    /// back in its place. With no backup present the live path ends up
    /// absent; no empty directory is fabricated. Idempotent.
    pub fn restore_default(&self) -> Result<()> {
        if let Ok(meta) = std::fs::symlink_metadata(&self.minecraft_path) {
            if meta.file_type().is_symlink() {
                std::fs::remove_file(&self.minecraft_path)
                    .map_err(|e| Error::io("remove symlink at", &self.minecraft_path, e))?;
            }
        }

        if self.backup_path.exists() {
            std::fs::rename(&self.backup_path, &self.minecraft_path)
                .map_err(|e| Error::io("restore backup from", &self.backup_path, e))?;
            tracing::info!(
                "restored backup {:?} -> {:?}",
                self.backup_path,
                self.minecraft_path
            );
        }

        Ok(())
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    // Needs Developer Mode or elevation; the caller surfaces the error.
    std::os::windows::fs::symlink_dir(target, link)
}

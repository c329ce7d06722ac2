//! Tool configuration: the three governing paths and their persistence.
//!
//! The paths live in `config.json` under the per-user config directory
//! (`~/.config/craftswap/` on Linux). The file is plain JSON and safe to
//! hand-edit; a missing or empty field is healed with a recomputed default
//! on load rather than failing. First run writes the defaults out and
//! creates the instances root, and never writes again except through
//! [`Settings::set`].

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Directory name under the per-user config root.
pub const APP_DIR_NAME: &str = "craftswap";

const CONFIG_FILE_NAME: &str = "config.json";

/// On-disk record. Field names match the JSON keys.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    instances_path: String,
    #[serde(default)]
    minecraft_path: String,
    #[serde(default)]
    backup_path: String,
}

/// The three governing paths, resolved once at startup and lent to the
/// other components.
#[derive(Debug, Clone)]
pub struct Settings {
    app_dir: PathBuf,
    config_file: PathBuf,
    /// Root directory holding one subdirectory per instance.
    pub instances_path: PathBuf,
    /// The live `.minecraft` location the game reads.
    pub minecraft_path: PathBuf,
    /// Single backup slot for a displaced real directory.
    pub backup_path: PathBuf,
}

impl Settings {
    /// Load from the default per-user location, initializing it on first run.
    pub fn load() -> Result<Self> {
        let config_root = dirs::config_dir().ok_or(Error::HomeResolution)?;
        Self::load_from(&config_root.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit config file. The file's parent directory is the
    /// app directory, which also anchors the default instances and backup
    /// locations.
    pub fn load_from(config_file: &Path) -> Result<Self> {
        let app_dir = config_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        std::fs::create_dir_all(&app_dir).map_err(|e| Error::ConfigIo {
            op: "create app dir",
            path: app_dir.clone(),
            source: e,
        })?;

        let mut settings = Settings {
            instances_path: app_dir.join("instances"),
            minecraft_path: default_minecraft_dir()?,
            backup_path: app_dir.join("backup"),
            config_file: config_file.to_path_buf(),
            app_dir,
        };

        match std::fs::read_to_string(&settings.config_file) {
            Ok(data) => {
                let cfg: ConfigFile = serde_json::from_str(&data).map_err(|e| Error::ConfigIo {
                    op: "parse",
                    path: settings.config_file.clone(),
                    source: io::Error::new(io::ErrorKind::InvalidData, e),
                })?;
                settings.apply(cfg);
                std::fs::create_dir_all(&settings.instances_path)
                    .map_err(|e| Error::io("create instances root", &settings.instances_path, e))?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                std::fs::create_dir_all(&settings.instances_path)
                    .map_err(|e| Error::io("create instances root", &settings.instances_path, e))?;
                settings.save()?;
            }
            Err(e) => {
                return Err(Error::ConfigIo {
                    op: "read",
                    path: settings.config_file.clone(),
                    source: e,
                });
            }
        }

        Ok(settings)
    }

    /// Overlay a loaded record onto the defaults. Empty fields keep the
    /// default already in place; non-empty ones are `~`-expanded.
    fn apply(&mut self, cfg: ConfigFile) {
        if !cfg.instances_path.is_empty() {
            self.instances_path = expand_tilde(&cfg.instances_path);
        }
        if !cfg.minecraft_path.is_empty() {
            self.minecraft_path = expand_tilde(&cfg.minecraft_path);
        }
        if !cfg.backup_path.is_empty() {
            self.backup_path = expand_tilde(&cfg.backup_path);
        }
    }

    /// Persist the current paths, overwriting the config file.
    pub fn save(&self) -> Result<()> {
        let cfg = ConfigFile {
            instances_path: self.instances_path.to_string_lossy().into_owned(),
            minecraft_path: self.minecraft_path.to_string_lossy().into_owned(),
            backup_path: self.backup_path.to_string_lossy().into_owned(),
        };
        let data = serde_json::to_string_pretty(&cfg).map_err(|e| Error::ConfigIo {
            op: "encode",
            path: self.config_file.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        std::fs::write(&self.config_file, data).map_err(|e| Error::ConfigIo {
            op: "write",
            path: self.config_file.clone(),
            source: e,
        })
    }

    /// Update one recognized key and persist immediately.
    ///
    /// Accepts the canonical keys and their short forms: `minecraft-path`
    /// (`minecraft-dir`, `minecraft`), `instances-path` (`instances-dir`,
    /// `instances`), `backup-path` (`backup-dir`, `backup`). Values are
    /// `~`-expanded but otherwise taken as given, with no existence check.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = expand_tilde(value);
        match key {
            "minecraft-path" | "minecraft-dir" | "minecraft" => self.minecraft_path = value,
            "instances-path" | "instances-dir" | "instances" => {
                self.instances_path = value;
                std::fs::create_dir_all(&self.instances_path)
                    .map_err(|e| Error::io("create instances root", &self.instances_path, e))?;
            }
            "backup-path" | "backup-dir" | "backup" => self.backup_path = value,
            _ => return Err(Error::UnknownConfigKey(key.to_string())),
        }
        self.save()
    }

    /// Look up one value by key, accepting the same synonyms as [`set`]
    /// plus the derived `app-dir` and `config-file` entries.
    ///
    /// [`set`]: Settings::set
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "minecraft-path" | "minecraft-dir" | "minecraft" => &self.minecraft_path,
            "instances-path" | "instances-dir" | "instances" => &self.instances_path,
            "backup-path" | "backup-dir" | "backup" => &self.backup_path,
            "app-dir" => &self.app_dir,
            "config-file" => &self.config_file,
            _ => return None,
        };
        Some(value.display().to_string())
    }

    /// The effective configuration as ordered key/value pairs.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("minecraft-path", self.minecraft_path.display().to_string()),
            ("instances-path", self.instances_path.display().to_string()),
            ("backup-path", self.backup_path.display().to_string()),
            ("app-dir", self.app_dir.display().to_string()),
            ("config-file", self.config_file.display().to_string()),
        ]
    }
}

/// Platform default for the live Minecraft directory.
///
/// Windows puts it under the roaming app-data root (with a fallback chain
/// through `USERPROFILE` down to a home-derived guess), macOS uses
/// Application Support without the leading dot, everything else gets
/// `~/.minecraft`.
pub fn default_minecraft_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::HomeResolution)?;

    if cfg!(windows) {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Ok(PathBuf::from(appdata).join(".minecraft"));
        }
        if let Some(profile) = std::env::var_os("USERPROFILE") {
            return Ok(PathBuf::from(profile)
                .join("AppData")
                .join("Roaming")
                .join(".minecraft"));
        }
        return Ok(home.join("AppData").join("Roaming").join(".minecraft"));
    }

    if cfg!(target_os = "macos") {
        return Ok(home.join("Library/Application Support/minecraft"));
    }

    Ok(home.join(".minecraft"))
}

/// Expand a leading `~` to the home directory. Paths without one, and
/// environments without a resolvable home, pass through unchanged.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}

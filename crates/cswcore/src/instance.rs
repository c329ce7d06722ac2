//! Instance storage: named copies of a Minecraft directory tree.
//!
//! Each instance is a plain directory under the instances root; the
//! directory name is the instance name. Creation seeds the new directory
//! from whatever currently backs the live path and guarantees the standard
//! subdirectory layout. Enumeration derives counts and the active flag on
//! the fly; nothing about an instance is stored outside its directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::activation::Activation;
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::stats;

/// Subdirectories guaranteed to exist in every instance after a successful
/// create. Callers may rely on these.
pub const ESSENTIAL_DIRS: &[&str] = &["mods", "config", "saves", "resourcepacks", "shaderpacks"];

/// Entries skipped while seeding, by name-substring match.
const SKIP_MARKERS: &[&str] = &[".git", ".DS_Store"];

/// Suffix counted as a mod inside `mods/`.
const MOD_SUFFIX: &str = ".jar";

/// Summary of one instance, as shown in listings.
#[derive(Debug, Clone)]
pub struct Instance {
    pub name: String,
    pub path: PathBuf,
    pub mod_count: usize,
    pub config_count: usize,
    pub save_count: usize,
    pub is_active: bool,
}

/// Categorized content listing of one instance, recomputed on demand.
#[derive(Debug, Clone, Default)]
pub struct InstanceDetail {
    /// Mod file names in `mods/`
    pub mods: Vec<String>,
    /// File names in `config/`
    pub configs: Vec<String>,
    /// World directory names in `saves/`
    pub saves: Vec<String>,
}

/// Create, enumerate, inspect and delete instances under the instances root.
#[derive(Debug, Clone)]
pub struct InstanceStore {
    instances_path: PathBuf,
    minecraft_path: PathBuf,
    activation: Activation,
}

impl InstanceStore {
    pub fn new(settings: &Settings) -> Self {
        InstanceStore {
            instances_path: settings.instances_path.clone(),
            minecraft_path: settings.minecraft_path.clone(),
            activation: Activation::new(settings),
        }
    }

    /// The root directory holding the instances.
    pub fn instances_root(&self) -> &Path {
        &self.instances_path
    }

    /// Full path of the named instance's directory.
    pub fn instance_path(&self, name: &str) -> PathBuf {
        self.instances_path.join(name)
    }

    /// Create a new instance, seeded from the current live tree.
    ///
    /// The seed source is the symlink target when the live path is a
    /// symlink, the directory itself when it is real, and nothing when it
    /// is absent. A failure mid-copy leaves the partially populated
    /// directory behind; delete it and retry.
    pub fn create(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let instance_path = self.instances_path.join(name);
        if instance_path.exists() {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        std::fs::create_dir_all(&self.instances_path)
            .map_err(|e| Error::io("create instances root", &self.instances_path, e))?;
        std::fs::create_dir_all(&instance_path)
            .map_err(|e| Error::io("create instance directory", &instance_path, e))?;

        if let Ok(meta) = std::fs::symlink_metadata(&self.minecraft_path) {
            let source = if meta.file_type().is_symlink() {
                std::fs::read_link(&self.minecraft_path).ok()
            } else {
                Some(self.minecraft_path.clone())
            };
            if let Some(source) = source {
                copy_tree(&source, &instance_path)?;
            }
        }

        for dir in ESSENTIAL_DIRS {
            let dir_path = instance_path.join(dir);
            std::fs::create_dir_all(&dir_path)
                .map_err(|e| Error::io("create subdirectory", &dir_path, e))?;
        }

        tracing::info!("created instance {:?} at {:?}", name, instance_path);
        Ok(())
    }

    /// All instances, alphabetically by name, with derived counts and the
    /// active flag. A missing instances root yields an empty list.
    pub fn list(&self) -> Result<Vec<Instance>> {
        let mut instances = Vec::new();
        if !self.instances_path.exists() {
            return Ok(instances);
        }

        let active = self.activation.active_instance();
        let entries = std::fs::read_dir(&self.instances_path)
            .map_err(|e| Error::io("read instances root", &self.instances_path, e))?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        "skipping unreadable entry in {:?}: {}",
                        self.instances_path,
                        e
                    );
                    continue;
                }
            };
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            instances.push(Instance {
                mod_count: stats::count_files_with_suffix(&path.join("mods"), MOD_SUFFIX),
                config_count: stats::count_files(&path.join("config")),
                save_count: stats::count_dirs(&path.join("saves")),
                is_active: active.as_deref() == Some(name.as_str()),
                name,
                path,
            });
        }

        instances.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(instances)
    }

    /// Sorted name listings for the named instance's mod, config and save
    /// directories. Missing subdirectories yield empty lists.
    pub fn inspect(&self, name: &str) -> Result<InstanceDetail> {
        let instance_path = self.instances_path.join(name);
        if !instance_path.exists() {
            return Err(Error::NotFound(name.to_string()));
        }

        Ok(InstanceDetail {
            mods: stats::file_names_with_suffix(&instance_path.join("mods"), MOD_SUFFIX),
            configs: stats::file_names(&instance_path.join("config")),
            saves: stats::dir_names(&instance_path.join("saves")),
        })
    }

    /// Remove the named instance's directory. Refused while the instance is
    /// active: the live symlink must never be left pointing at a directory
    /// we deleted ourselves.
    pub fn delete(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let instance_path = self.instances_path.join(name);
        if !instance_path.exists() {
            return Err(Error::NotFound(name.to_string()));
        }
        if self.activation.is_active(name) {
            return Err(Error::ActiveInstance(name.to_string()));
        }

        std::fs::remove_dir_all(&instance_path)
            .map_err(|e| Error::io("remove instance directory", &instance_path, e))?;
        tracing::info!("deleted instance {:?}", name);
        Ok(())
    }
}

/// Recursive tree copy preserving directory structure. Entries whose path
/// relative to `src` contains one of the skip markers are left behind,
/// subtrees included.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| Error::io("walk seed tree", src, e.into()))?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        let relative_str = relative.to_string_lossy();
        if SKIP_MARKERS.iter().any(|m| relative_str.contains(m)) {
            continue;
        }

        let dest = dst.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)
                .map_err(|e| Error::io("create directory", &dest, e))?;
        } else {
            std::fs::copy(entry.path(), &dest)
                .map_err(|e| Error::io("copy file", entry.path(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(tmp: &Path) -> Settings {
        let mut settings =
            Settings::load_from(&tmp.join("craftswap/config.json")).unwrap();
        settings.instances_path = tmp.join("instances");
        settings.minecraft_path = tmp.join(".minecraft");
        settings.backup_path = tmp.join("backup");
        settings
    }

    #[test]
    fn test_create_then_list() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);

        store.create("vanilla").unwrap();

        let instances = store.list().unwrap();
        assert_eq!(instances.len(), 1);
        let inst = &instances[0];
        assert_eq!(inst.name, "vanilla");
        assert_eq!(inst.path, settings.instances_path.join("vanilla"));
        assert!(!inst.is_active);
        assert_eq!(
            (inst.mod_count, inst.config_count, inst.save_count),
            (0, 0, 0)
        );

        for dir in ESSENTIAL_DIRS {
            assert!(inst.path.join(dir).is_dir(), "missing {dir}");
        }
    }

    #[test]
    fn test_create_rejects_empty_and_duplicate_names() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);

        assert!(matches!(store.create(""), Err(Error::EmptyName)));

        store.create("vanilla").unwrap();
        std::fs::write(
            settings.instances_path.join("vanilla/config/keep.toml"),
            "keep",
        )
        .unwrap();

        assert!(matches!(
            store.create("vanilla"),
            Err(Error::AlreadyExists(_))
        ));
        // The first instance is untouched.
        assert!(settings
            .instances_path
            .join("vanilla/config/keep.toml")
            .exists());
    }

    #[test]
    fn test_create_seeds_from_live_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        std::fs::create_dir_all(settings.minecraft_path.join("mods")).unwrap();
        std::fs::create_dir_all(settings.minecraft_path.join(".git")).unwrap();
        std::fs::write(settings.minecraft_path.join("options.txt"), "opts").unwrap();
        std::fs::write(settings.minecraft_path.join("mods/sodium.jar"), "jar").unwrap();
        std::fs::write(settings.minecraft_path.join(".DS_Store"), "junk").unwrap();
        std::fs::write(settings.minecraft_path.join(".git/HEAD"), "ref").unwrap();

        let store = InstanceStore::new(&settings);
        store.create("seeded").unwrap();

        let root = settings.instances_path.join("seeded");
        assert_eq!(
            std::fs::read_to_string(root.join("options.txt")).unwrap(),
            "opts"
        );
        assert!(root.join("mods/sodium.jar").exists());
        assert!(!root.join(".DS_Store").exists());
        assert!(!root.join(".git").exists());
    }

    #[test]
    fn test_create_seeds_from_symlink_target() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);
        let activation = Activation::new(&settings);

        store.create("original").unwrap();
        std::fs::write(
            settings.instances_path.join("original/options.txt"),
            "from-original",
        )
        .unwrap();
        activation.switch_to("original").unwrap();

        // The live path is now a symlink; creation copies from its target.
        store.create("clone").unwrap();
        assert_eq!(
            std::fs::read_to_string(settings.instances_path.join("clone/options.txt")).unwrap(),
            "from-original"
        );
    }

    #[test]
    fn test_create_with_absent_live_path() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);

        store.create("bare").unwrap();

        // Nothing to seed from: just the essential layout.
        let detail = store.inspect("bare").unwrap();
        assert!(detail.mods.is_empty());
        assert!(detail.configs.is_empty());
        assert!(detail.saves.is_empty());
    }

    #[test]
    fn test_list_without_instances_root() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = test_settings(tmp.path());
        settings.instances_path = tmp.path().join("never-created");
        let store = InstanceStore::new(&settings);

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_is_sorted_and_counts() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);

        store.create("zoo").unwrap();
        store.create("arc").unwrap();

        let arc = settings.instances_path.join("arc");
        std::fs::write(arc.join("mods/sodium.jar"), "jar").unwrap();
        std::fs::write(arc.join("mods/notamod.txt"), "txt").unwrap();
        std::fs::write(arc.join("config/sodium.toml"), "cfg").unwrap();
        std::fs::create_dir(arc.join("saves/New World")).unwrap();
        // A stray file in saves/ is not a world.
        std::fs::write(arc.join("saves/session.lock"), "lock").unwrap();

        let instances = store.list().unwrap();
        let names: Vec<&str> = instances.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["arc", "zoo"]);
        assert_eq!(instances[0].mod_count, 1);
        assert_eq!(instances[0].config_count, 1);
        assert_eq!(instances[0].save_count, 1);
    }

    #[test]
    fn test_list_marks_only_the_active_instance() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);
        let activation = Activation::new(&settings);

        store.create("vanilla").unwrap();
        store.create("modded").unwrap();
        activation.switch_to("modded").unwrap();

        let instances = store.list().unwrap();
        let active: Vec<&str> = instances
            .iter()
            .filter(|i| i.is_active)
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(active, vec!["modded"]);
    }

    #[test]
    fn test_inspect() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);

        assert!(matches!(store.inspect("ghost"), Err(Error::NotFound(_))));

        store.create("inspectee").unwrap();
        let detail = store.inspect("inspectee").unwrap();
        assert!(detail.mods.is_empty() && detail.configs.is_empty() && detail.saves.is_empty());

        let root = settings.instances_path.join("inspectee");
        std::fs::write(root.join("mods/b.jar"), "").unwrap();
        std::fs::write(root.join("mods/a.jar"), "").unwrap();
        std::fs::write(root.join("config/video.json"), "").unwrap();
        std::fs::create_dir(root.join("saves/world")).unwrap();

        let detail = store.inspect("inspectee").unwrap();
        assert_eq!(detail.mods, vec!["a.jar", "b.jar"]);
        assert_eq!(detail.configs, vec!["video.json"]);
        assert_eq!(detail.saves, vec!["world"]);
    }

    #[test]
    fn test_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);

        assert!(matches!(store.delete(""), Err(Error::EmptyName)));
        assert!(matches!(store.delete("ghost"), Err(Error::NotFound(_))));

        store.create("doomed").unwrap();
        store.delete("doomed").unwrap();
        assert!(!settings.instances_path.join("doomed").exists());
    }

    #[test]
    fn test_delete_refuses_active_instance() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = test_settings(tmp.path());
        let store = InstanceStore::new(&settings);
        let activation = Activation::new(&settings);

        store.create("live").unwrap();
        store.create("spare").unwrap();
        activation.switch_to("live").unwrap();

        assert!(matches!(
            store.delete("live"),
            Err(Error::ActiveInstance(_))
        ));

        // The listing is unchanged afterward.
        let names: Vec<String> = store.list().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["live", "spare"]);
    }
}

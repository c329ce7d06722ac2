//! Read-only aggregation over instance subdirectories.
//!
//! Mods are non-directory entries ending in `.jar`, configs are any
//! non-directory entries, saves are subdirectories (each world is a
//! directory). Every helper tolerates a missing target directory by
//! returning zero or an empty list, so a freshly created or partially
//! populated instance never breaks a listing.

use std::path::Path;

/// Count non-directory entries whose name ends with `suffix`.
pub fn count_files_with_suffix(dir: &Path, suffix: &str) -> usize {
    file_names_with_suffix(dir, suffix).len()
}

/// Count all non-directory entries.
pub fn count_files(dir: &Path) -> usize {
    file_names(dir).len()
}

/// Count directory entries.
pub fn count_dirs(dir: &Path) -> usize {
    dir_names(dir).len()
}

/// Sorted names of non-directory entries ending with `suffix`.
pub fn file_names_with_suffix(dir: &Path, suffix: &str) -> Vec<String> {
    collect_names(dir, |name, is_dir| !is_dir && name.ends_with(suffix))
}

/// Sorted names of all non-directory entries.
pub fn file_names(dir: &Path) -> Vec<String> {
    collect_names(dir, |_, is_dir| !is_dir)
}

/// Sorted names of directory entries.
pub fn dir_names(dir: &Path) -> Vec<String> {
    collect_names(dir, |_, is_dir| is_dir)
}

fn collect_names(dir: &Path, keep: impl Fn(&str, bool) -> bool) -> Vec<String> {
    let mut names = Vec::new();

    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let name = entry.file_name().to_string_lossy().into_owned();
            if keep(&name, is_dir) {
                names.push(name);
            }
        }
    }

    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_yields_zero() {
        let dir = Path::new("/nonexistent/mods");
        assert_eq!(count_files_with_suffix(dir, ".jar"), 0);
        assert_eq!(count_files(dir), 0);
        assert_eq!(count_dirs(dir), 0);
        assert!(file_names(dir).is_empty());
    }

    #[test]
    fn test_suffix_counting() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("sodium.jar"), "jar").unwrap();
        std::fs::write(tmp.path().join("lithium.jar"), "jar").unwrap();
        std::fs::write(tmp.path().join("readme.txt"), "txt").unwrap();
        std::fs::create_dir(tmp.path().join("old.jar")).unwrap();

        // A directory named like a jar is not a mod file.
        assert_eq!(count_files_with_suffix(tmp.path(), ".jar"), 2);
        assert_eq!(count_files(tmp.path()), 3);
        assert_eq!(count_dirs(tmp.path()), 1);
    }

    #[test]
    fn test_names_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("b.jar"), "").unwrap();
        std::fs::write(tmp.path().join("a.jar"), "").unwrap();
        std::fs::create_dir(tmp.path().join("world2")).unwrap();
        std::fs::create_dir(tmp.path().join("world1")).unwrap();

        assert_eq!(file_names_with_suffix(tmp.path(), ".jar"), vec!["a.jar", "b.jar"]);
        assert_eq!(dir_names(tmp.path()), vec!["world1", "world2"]);
    }

    #[test]
    fn test_dirs_not_counted_as_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("New World")).unwrap();
        std::fs::write(tmp.path().join("stray.dat"), "").unwrap();

        // A file placed in a saves directory is not a world.
        assert_eq!(count_dirs(tmp.path()), 1);
        assert_eq!(dir_names(tmp.path()), vec!["New World"]);
    }
}

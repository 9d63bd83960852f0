//! Filesystem utilities for the file-backed store.

use crate::constants::TEMP_FILE_SUFFIX;
use crate::{PatientError, PatientResult};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Writes `contents` to `path` so that readers see either the old file or the new one.
///
/// The data goes to a sibling scratch file first and is then renamed over `path`. Parent
/// directories are created as needed.
///
/// # Errors
///
/// Returns `PatientError::StorageDirCreation` if the parent cannot be created, or
/// `PatientError::FileWrite` if writing or renaming fails.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> PatientResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(PatientError::StorageDirCreation)?;
    }

    let temp_path = path.with_extension(TEMP_FILE_SUFFIX);
    fs::write(&temp_path, contents).map_err(PatientError::FileWrite)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(PatientError::FileWrite(e));
    }

    Ok(())
}

/// Lists the record directories under a sharded tree: `base_dir/<s1>/<s2>/<uuid>/`.
///
/// A missing `base_dir` yields an empty list. Plain files found at any shard level are
/// ignored.
///
/// # Errors
///
/// Returns `PatientError::FileRead` if a directory in the tree cannot be read.
pub(crate) fn list_sharded_dirs(base_dir: &Path) -> PatientResult<Vec<PathBuf>> {
    let mut leaves = Vec::new();

    let s1_iter = match fs::read_dir(base_dir) {
        Ok(it) => it,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(leaves),
        Err(e) => return Err(PatientError::FileRead(e)),
    };
    for s1 in s1_iter {
        let s1_path = s1.map_err(PatientError::FileRead)?.path();
        if !s1_path.is_dir() {
            continue;
        }

        for s2 in fs::read_dir(&s1_path).map_err(PatientError::FileRead)? {
            let s2_path = s2.map_err(PatientError::FileRead)?.path();
            if !s2_path.is_dir() {
                continue;
            }

            for id_ent in fs::read_dir(&s2_path).map_err(PatientError::FileRead)? {
                let id_path = id_ent.map_err(PatientError::FileRead)?.path();
                if id_path.is_dir() {
                    leaves.push(id_path);
                }
            }
        }
    }

    leaves.sort();
    Ok(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ab").join("cd").join("patient.yaml");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension(TEMP_FILE_SUFFIX).exists());
    }

    #[test]
    fn test_list_sharded_dirs_missing_base_is_empty() {
        let tmp = TempDir::new().unwrap();
        let leaves = list_sharded_dirs(&tmp.path().join("absent")).unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn test_list_sharded_dirs_skips_stray_files() {
        let tmp = TempDir::new().unwrap();
        let leaf = tmp.path().join("55").join("0e").join("550e8400e29b41d4a716446655440000");
        fs::create_dir_all(&leaf).unwrap();
        fs::write(tmp.path().join("README"), "x").unwrap();
        fs::write(tmp.path().join("55").join("notes.txt"), "x").unwrap();

        let leaves = list_sharded_dirs(tmp.path()).unwrap();
        assert_eq!(leaves, vec![leaf]);
    }
}

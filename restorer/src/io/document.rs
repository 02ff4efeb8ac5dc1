//! Whole-file document read and write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RestoreError;

/// Read `path` in full as UTF-8.
pub fn read_document(path: &Path) -> Result<String, RestoreError> {
    let contents = fs::read_to_string(path).map_err(|source| RestoreError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "read document");
    Ok(contents)
}

/// Overwrite `path` with `contents` (temp file + rename).
///
/// A symlinked destination is followed so the link target receives the new
/// content, and an existing destination's permissions are carried over. On
/// failure the destination keeps its previous content, if any.
pub fn write_document(path: &Path, contents: &str) -> Result<(), RestoreError> {
    let write_err = |source: std::io::Error| RestoreError::ResourceWrite {
        path: path.to_path_buf(),
        source,
    };
    let target = resolve_target(path);
    let tmp_path = temp_path(&target);
    if let Err(source) = write_temp(&tmp_path, &target, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    if let Err(source) = fs::rename(&tmp_path, &target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    debug!(
        path = %path.display(),
        target = %target.display(),
        bytes = contents.len(),
        "wrote document"
    );
    Ok(())
}

/// Follow symlinks for a destination that already exists.
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn write_temp(tmp_path: &Path, target: &Path, contents: &str) -> std::io::Result<()> {
    fs::write(tmp_path, contents)?;
    if let Ok(meta) = fs::metadata(target) {
        fs::set_permissions(tmp_path, meta.permissions())?;
    }
    Ok(())
}

/// Sibling of `path` so the rename never crosses filesystems.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".restorer.tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("missing.txt");
        let err = read_document(&missing).expect_err("read should fail");
        assert!(matches!(err, RestoreError::ResourceNotFound { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn read_invalid_utf8_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("binary.bin");
        fs::write(&path, [0xff, 0xfe, 0x00]).expect("write bytes");
        let err = read_document(&path).expect_err("read should fail");
        assert!(matches!(err, RestoreError::ResourceNotFound { .. }));
    }

    #[test]
    fn write_overwrites_existing_content() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out.txt");
        fs::write(&path, "old content that is longer").expect("seed");
        write_document(&path, "new").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "new");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("no-such-dir").join("out.txt");
        let err = write_document(&path, "x").expect_err("write should fail");
        assert!(matches!(err, RestoreError::ResourceWrite { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn failed_write_keeps_existing_destination() {
        let temp = tempfile::tempdir().expect("tempdir");
        // A non-empty directory cannot be replaced by a file rename.
        let path = temp.path().join("out.txt");
        fs::create_dir(&path).expect("create dir");
        fs::write(path.join("inner.txt"), "prior").expect("seed");

        let err = write_document(&path, "new").expect_err("write should fail");

        assert!(matches!(err, RestoreError::ResourceWrite { .. }));
        assert_eq!(
            fs::read_to_string(path.join("inner.txt")).expect("read back"),
            "prior"
        );
        let entries: Vec<_> = fs::read_dir(temp.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn write_through_symlink_updates_target() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().expect("tempdir");
        let real = temp.path().join("real.txt");
        let link = temp.path().join("link.txt");
        fs::write(&real, "old").expect("seed");
        symlink(&real, &link).expect("symlink");

        write_document(&link, "new").expect("write");

        let link_meta = fs::symlink_metadata(&link).expect("link metadata");
        assert!(link_meta.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).expect("read real"), "new");
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_destination_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("script.sh");
        fs::write(&path, "old").expect("seed");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");

        write_document(&path, "new").expect("write");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(fs::read_to_string(&path).expect("read back"), "new");
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let path = Path::new("tests/e2e/out.ts");
        assert_eq!(
            temp_path(path),
            PathBuf::from("tests/e2e/out.ts.restorer.tmp")
        );
    }
}

//! Snapshot file I/O.
//!
//! # Invariants
//! - Saves go through a uniquely named sibling temp file that is fsynced and
//!   then renamed over the target; the target is never partially written.
//! - The temp file is removed on every failure path.
//! - Loading a path that does not exist yields an empty list.

use super::codec::{decode, encode, CodecOptions};
use super::record::Record;
use super::{StoreError, StoreResult};
use log::{error, info, warn};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// Encodes `entities` and atomically replaces the file at `path`.
///
/// # Errors
/// - `Io` when the temp file cannot be written/synced or the rename fails
///   (for example a missing parent directory).
pub fn save_to_store<E: Record>(
    path: impl AsRef<Path>,
    entities: &[E],
    options: CodecOptions,
) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=store_save module=store status=start kind={} path={} records={}",
        E::KIND,
        path.display(),
        entities.len()
    );

    let result = encode(entities, options).and_then(|bytes| write_atomically(path, &bytes));
    match &result {
        Ok(()) => info!(
            "event=store_save module=store status=ok kind={} path={} records={} duration_ms={}",
            E::KIND,
            path.display(),
            entities.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=store_save module=store status=error kind={} path={} duration_ms={} error={}",
            E::KIND,
            path.display(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Reads and decodes the snapshot at `path`.
///
/// Returns an empty list when the file does not exist.
///
/// # Errors
/// - `Io` when the file exists but cannot be read.
/// - `MalformedData` / `FieldMismatch` from `decode`.
pub fn load_from_store<E: Record>(path: impl AsRef<Path>) -> StoreResult<Vec<E>> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(
                "event=store_load module=store status=ok kind={} path={} records=0 missing=true",
                E::KIND,
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(source) => {
            error!(
                "event=store_load module=store status=error kind={} path={} error_code=read_failed error={}",
                E::KIND,
                path.display(),
                source
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match decode::<E>(&bytes) {
        Ok(entities) => {
            info!(
                "event=store_load module=store status=ok kind={} path={} records={} duration_ms={}",
                E::KIND,
                path.display(),
                entities.len(),
                started_at.elapsed().as_millis()
            );
            Ok(entities)
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error kind={} path={} error_code=decode_failed error={}",
                E::KIND,
                path.display(),
                err
            );
            Err(err)
        }
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let temp_path = temp_path_for(path);

    let outcome = write_synced(&temp_path, bytes).and_then(|()| fs::rename(&temp_path, path));
    if let Err(source) = outcome {
        discard_temp_file(&temp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn discard_temp_file(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            "event=store_save module=store status=error error_code=temp_cleanup_failed temp_path={} error={}",
            temp_path.display(),
            err
        ),
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // The handle is closed on drop, including the early returns below.
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
}

#[cfg(test)]
mod tests {
    use super::{discard_temp_file, temp_path_for};
    use std::fs;
    use std::path::Path;

    #[test]
    fn temp_path_is_a_hidden_sibling() {
        let temp = temp_path_for(Path::new("/data/inventory.json"));

        assert_eq!(temp.parent(), Some(Path::new("/data")));
        let name = temp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".inventory.json."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn temp_paths_are_unique() {
        let path = Path::new("inventory.json");
        assert_ne!(temp_path_for(path), temp_path_for(path));
    }

    #[test]
    fn discard_temp_file_removes_leftover_and_tolerates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let leftover = dir.path().join(".inventory.json.abc.tmp");
        fs::write(&leftover, b"partial").unwrap();

        discard_temp_file(&leftover);
        assert!(!leftover.exists());

        // Already gone: nothing to report.
        discard_temp_file(&leftover);

        // Not removable as a file: logged, never panics.
        let occupied = dir.path().join("occupied");
        fs::create_dir(&occupied).unwrap();
        discard_temp_file(&occupied);
        assert!(occupied.is_dir());
    }
}

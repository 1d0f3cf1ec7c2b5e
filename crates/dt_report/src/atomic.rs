use std::io::Write;
use std::path::Path;
use dt_core::{Error, Result};
use tempfile::NamedTempFile;

/// Writes `path` through a temporary sibling file that replaces the
/// destination only once `write` has succeeded and the data is flushed.
///
/// On any failure the destination is left untouched and the temporary file
/// is removed when dropped. The result gets the permissions of the file it
/// replaces, or `0644` when there was none.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::export(path, e))?;
    write(&mut tmp)?;
    tmp.flush().map_err(|e| Error::export(path, e))?;
    tmp.as_file().sync_all().map_err(|e| Error::export(path, e))?;
    set_permissions(&tmp, path)?;
    tmp.persist(path).map_err(|e| Error::export(path, e.error))?;
    Ok(())
}

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Temporary files are created `0600`; a report must not end up that way.
#[cfg(unix)]
fn set_permissions(tmp: &NamedTempFile, path: &Path) -> Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    let permissions = match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta.permissions(),
        _ => Permissions::from_mode(NEW_FILE_MODE),
    };
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(|e| Error::export(path, e))
}

#[cfg(not(unix))]
fn set_permissions(_tmp: &NamedTempFile, _path: &Path) -> Result<()> {
    Ok(())
}

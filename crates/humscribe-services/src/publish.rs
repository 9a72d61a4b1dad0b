//! Atomic file publication

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Write `bytes` to `path` through a uniquely named sibling temp file and a rename.
///
/// Readers see either the previous file or the complete new one. Concurrent
/// writers to the same path each get their own temp file; the last rename wins.
pub fn publish_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    // A failed persist drops the temp file, which removes it
    tmp.persist(path).map_err(|e| e.error)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

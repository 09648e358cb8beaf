//! Atomic file writes
//!
//! Table and log files are always rewritten in full. To keep a crash
//! from leaving a half-written file behind, writes go to a `.tmp`
//! sibling, get synced, and are renamed over the final path. The final
//! file is therefore either the old content or the new content, never a
//! partial state.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Atomically replace `path` with `content`
///
/// Creates missing parent directories. The rename is atomic on the
/// filesystems this application targets.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;

    // Sync before rename so the new content is durable
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

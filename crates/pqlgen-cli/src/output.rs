//! Query file layout under `--out`.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub(crate) fn query_file_path(out_dir: &Path, index: usize) -> PathBuf {
    out_dir.join(format!("queries_{index}.txt"))
}

pub(crate) fn ensure_dir(out_dir: &Path) -> Result<()> {
    if !out_dir.exists() {
        tracing::debug!(dir = %out_dir.display(), "creating output directory");
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))
}

/// Open `path` for appending, creating it if needed. Reruns accumulate
/// queries instead of overwriting earlier ones.
pub(crate) fn open_append(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufWriter::new(file))
}

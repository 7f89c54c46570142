use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Sibling path used to stage a write before it is renamed into place.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

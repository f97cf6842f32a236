use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use ticketlog_core::Document;

use crate::errors::GenerationError;

const INDENT: &[u8] = b"    ";

/// Render a document as 4-space indented JSON.
pub fn render_document(document: &Document) -> Result<Vec<u8>, GenerationError> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write a document through a temp file and rename so readers never see a
/// partial file. Returns the number of bytes written.
pub fn write_document(path: &Path, document: &Document) -> Result<u64, GenerationError> {
    let data = render_document(document)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    if let Err(err) = write_then_rename(&tmp_path, path, &data) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    Ok(data.len() as u64)
}

fn write_then_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    std::fs::rename(tmp_path, path)
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid output path '{}'", path.display()),
        ))
    })?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

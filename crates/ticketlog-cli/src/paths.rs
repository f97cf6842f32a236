use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Append `.{extension}` to a path without one. Any other extension is
/// rejected.
pub fn with_default_extension(path: &Path, extension: &str) -> Result<PathBuf, CliError> {
    match path.extension() {
        None => {
            let mut name = OsString::from(path.as_os_str());
            name.push(".");
            name.push(extension);
            Ok(PathBuf::from(name))
        }
        Some(found) if found == extension => Ok(path.to_path_buf()),
        Some(found) => Err(CliError::InvalidArgument(format!(
            "'{}' must have a .{extension} extension, got .{}",
            path.display(),
            found.to_string_lossy()
        ))),
    }
}

/// The path must carry `.{extension}` and name an existing file.
pub fn require_existing(path: &Path, extension: &str) -> Result<PathBuf, CliError> {
    if path.extension().is_none_or(|found| found != extension) {
        return Err(CliError::InvalidArgument(format!(
            "'{}' must be a .{extension} file",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(CliError::MissingInput(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

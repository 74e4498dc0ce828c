//! Input/output path selection rules for front ends.
//!
//! Only still images are accepted as input and only GIF is written. A chosen output path
//! without an extension gets `.gif` appended.

use std::path::{Path, PathBuf};

use crate::foundation::error::{CardspinError, CardspinResult};

/// File extensions accepted for the source image (compared case-insensitively).
pub const INPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// The one output extension.
pub const OUTPUT_EXTENSION: &str = "gif";

/// Accept `path` as a source image if its extension is a supported still-image type.
///
/// Existence is not checked here; opening the file reports that.
pub fn check_input_path(path: &Path) -> CardspinResult<()> {
    match lowercase_extension(path) {
        Some(ext) if INPUT_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(CardspinError::unsupported(format!(
            "input '{}' has extension '.{ext}', expected one of: {}",
            path.display(),
            INPUT_EXTENSIONS.join(", ")
        ))),
        None => Err(CardspinError::unsupported(format!(
            "input '{}' has no file extension, expected one of: {}",
            path.display(),
            INPUT_EXTENSIONS.join(", ")
        ))),
    }
}

/// Resolve the path the GIF will be written to.
pub fn resolve_output_path(path: &Path) -> CardspinResult<PathBuf> {
    if path.file_name().is_none() {
        return Err(CardspinError::output(format!(
            "output '{}' does not name a file",
            path.display()
        )));
    }
    match lowercase_extension(path) {
        None => Ok(path.with_extension(OUTPUT_EXTENSION)),
        Some(ext) if ext == OUTPUT_EXTENSION => Ok(path.to_path_buf()),
        Some(ext) => Err(CardspinError::unsupported(format!(
            "output '{}' has extension '.{ext}', only .{OUTPUT_EXTENSION} is written",
            path.display()
        ))),
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .filter(|e| !e.is_empty())
}

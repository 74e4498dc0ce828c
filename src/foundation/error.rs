use std::path::Path;

/// Result alias used across the crate.
pub type CardspinResult<T> = Result<T, CardspinError>;

/// The single failure surface of an export.
///
/// Every stage (load, resize, synthesis, encode) reports through this type, and the shell turns
/// any variant into one user-visible message. The variants only exist to make that message more
/// precise.
#[derive(thiserror::Error, Debug)]
pub enum CardspinError {
    /// The source image could not be opened or decoded.
    #[error("input error: {0}")]
    Input(String),

    /// The input or output format is not one we read or write.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The output animation could not be written.
    #[error("output error: {0}")]
    Output(String),

    /// Configuration or call arguments are out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardspinError {
    /// Build a [`CardspinError::Input`].
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`CardspinError::UnsupportedFormat`].
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`CardspinError::Output`].
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Build a [`CardspinError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classify an `image` error raised while reading `path`.
    pub(crate) fn from_image_read(path: &Path, err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => {
                Self::unsupported(format!("'{}': {e}", path.display()))
            }
            e => Self::input(format!("read '{}': {e}", path.display())),
        }
    }
}

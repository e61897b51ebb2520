//! Error types for the logo-watermark crate.

use std::path::PathBuf;

/// Errors that can occur while loading assets, resolving inputs, or saving output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to load or decode a watermark variant image.
    #[error("failed to load watermark '{}': {source}", .path.display())]
    WatermarkLoad {
        /// Path of the watermark file that failed to load.
        path: PathBuf,
        /// Underlying decode error.
        source: image::ImageError,
    },

    /// The light and dark watermark variants do not share dimensions.
    #[error(
        "watermark variants differ in size ({light_w}x{light_h} light vs {dark_w}x{dark_h} dark)"
    )]
    VariantSizeMismatch {
        /// Light variant width in pixels.
        light_w: u32,
        /// Light variant height in pixels.
        light_h: u32,
        /// Dark variant width in pixels.
        dark_w: u32,
        /// Dark variant height in pixels.
        dark_h: u32,
    },

    /// The path given for a directory listing is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (decode, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// A metadata container could not be rewritten.
    #[error("metadata error: {0}")]
    Metadata(#[from] img_parts::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let unsupported = Error::UnsupportedFormat("tiff".to_string());
        assert!(unsupported.to_string().contains("tiff"));

        let mismatch = Error::VariantSizeMismatch {
            light_w: 490,
            light_h: 220,
            dark_w: 480,
            dark_h: 220,
        };
        let msg = mismatch.to_string();
        assert!(msg.contains("490x220"));
        assert!(msg.contains("480x220"));

        let not_dir = Error::NotADirectory(PathBuf::from("/tmp/somefile.jpg"));
        assert!(not_dir.to_string().contains("somefile.jpg"));
    }
}

//! Output naming and saving.
//!
//! Three destinations for a stamped image: back over the original, into a
//! sibling `Watermarked/` directory, or next to the original — the latter
//! two with a `_WM` filename suffix. Saving re-encodes at maximum quality
//! and re-attaches the source's ICC/EXIF segments.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::error::{Error, Result};
use crate::metadata::ColorMetadata;

/// Name of the sibling directory used by the new-folder modes.
pub const OUTPUT_DIR_NAME: &str = "Watermarked";
/// Filename suffix appended before the extension.
pub const OUTPUT_SUFFIX: &str = "_WM";

/// Where and how the stamped image is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Replace the original file in place.
    Overwrite,
    /// Write to a sibling `Watermarked/` directory with a `_WM` suffix.
    NewFolder,
    /// Like [`OutputMode::NewFolder`], but skip inputs whose output already exists.
    NewFolderSkipExisting,
    /// Write next to the original with a `_WM` suffix, the default.
    Vanilla,
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::Vanilla
    }
}

impl OutputMode {
    /// Destination path for `input` under this mode.
    #[must_use]
    pub fn output_path(self, input: &Path) -> PathBuf {
        match self {
            Self::Overwrite => input.to_path_buf(),
            Self::NewFolder | Self::NewFolderSkipExisting => {
                let parent = input.parent().unwrap_or(Path::new("."));
                parent.join(OUTPUT_DIR_NAME).join(suffixed_name(input))
            }
            Self::Vanilla => {
                let parent = input.parent().unwrap_or(Path::new("."));
                parent.join(suffixed_name(input))
            }
        }
    }

    /// Whether inputs with a pre-existing output should be skipped.
    #[must_use]
    pub fn skip_existing(self) -> bool {
        matches!(self, Self::NewFolderSkipExisting)
    }
}

/// `photo.jpg` becomes `photo_WM.jpg`.
fn suffixed_name(input: &Path) -> String {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    match input.extension() {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    }
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Save a stamped image at maximum quality, carrying over `metadata`.
///
/// JPEG encodes at quality 100; PNG, WebP and BMP encode lossless. The
/// parent directory is created if absent.
///
/// # Errors
///
/// Returns an error if the format is unsupported, encoding fails, or the
/// file cannot be written.
pub fn save_image(img: &RgbImage, path: &Path, metadata: &ColorMetadata) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    let dyn_img = DynamicImage::ImageRgb8(img.clone());
    let mut encoded = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, 100);
            encoder.encode_image(&dyn_img)?;
        }
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp => {
            let mut cursor = std::io::Cursor::new(&mut encoded);
            dyn_img.write_to(&mut cursor, format)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    let bytes = metadata.embed(encoded)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;

    Ok(())
}

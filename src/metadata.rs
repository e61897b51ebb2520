//! Color-profile metadata carry-over.
//!
//! Compositing goes through a decode/re-encode, which strips container
//! segments the decoder does not model. The ICC profile and EXIF block from
//! the source file are lifted out of the original bytes and re-attached to
//! the freshly encoded output, so color management survives the round trip.

use img_parts::{Bytes, DynImage, ImageEXIF, ImageICC};

use crate::error::Result;

/// ICC profile and EXIF segments captured from a source file.
#[derive(Debug, Default, Clone)]
pub struct ColorMetadata {
    icc: Option<Bytes>,
    exif: Option<Bytes>,
}

impl ColorMetadata {
    /// Capture metadata from raw image file bytes.
    ///
    /// Unrecognized or malformed containers yield empty metadata; extraction
    /// never fails a job that already decoded.
    #[must_use]
    pub fn extract(bytes: &[u8]) -> Self {
        match DynImage::from_bytes(Bytes::copy_from_slice(bytes)) {
            Ok(Some(dimg)) => Self {
                icc: dimg.icc_profile(),
                exif: dimg.exif(),
            },
            _ => Self::default(),
        }
    }

    /// Whether any metadata was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icc.is_none() && self.exif.is_none()
    }

    /// Re-attach the captured segments to freshly encoded image bytes.
    ///
    /// Returns the input unchanged when there is nothing to attach or the
    /// encoded container is not one that carries these segments (e.g. BMP).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Metadata`] if the encoded container is
    /// recognized but cannot be parsed, or [`crate::Error::Io`] if
    /// reassembly fails.
    pub fn embed(&self, encoded: Vec<u8>) -> Result<Vec<u8>> {
        if self.is_empty() {
            return Ok(encoded);
        }

        match DynImage::from_bytes(Bytes::from(encoded.clone()))? {
            Some(mut dimg) => {
                if self.icc.is_some() {
                    dimg.set_icc_profile(self.icc.clone());
                }
                if self.exif.is_some() {
                    dimg.set_exif(self.exif.clone());
                }
                let mut out = Vec::with_capacity(encoded.len());
                dimg.encoder().write_to(&mut out)?;
                Ok(out)
            }
            None => Ok(encoded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn tiny_jpeg() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([120, 130, 140])));
        let mut buf = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 100);
        encoder.encode_image(&img).unwrap();
        buf
    }

    #[test]
    fn extract_from_garbage_is_empty() {
        let meta = ColorMetadata::extract(b"definitely not an image");
        assert!(meta.is_empty());
    }

    #[test]
    fn plain_jpeg_has_no_metadata() {
        let meta = ColorMetadata::extract(&tiny_jpeg());
        assert!(meta.is_empty());
    }

    #[test]
    fn empty_metadata_passes_bytes_through() {
        let bytes = tiny_jpeg();
        let out = ColorMetadata::default().embed(bytes.clone()).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn icc_and_exif_survive_embed_then_extract() {
        let icc = Bytes::from_static(b"fake icc profile payload");
        let exif = Bytes::from_static(b"II*\0fake exif payload");
        let meta = ColorMetadata {
            icc: Some(icc.clone()),
            exif: Some(exif.clone()),
        };

        let stamped = meta.embed(tiny_jpeg()).unwrap();
        let recovered = ColorMetadata::extract(&stamped);

        assert_eq!(recovered.icc, Some(icc));
        assert_eq!(recovered.exif, Some(exif));
    }

    #[test]
    fn embed_into_unrecognized_container_passes_through() {
        let meta = ColorMetadata {
            icc: Some(Bytes::from_static(b"payload")),
            exif: None,
        };
        // BMP is not an img-parts container; bytes come back untouched.
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3])));
        let mut bmp = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bmp, image::ImageFormat::Bmp).unwrap();
        let bytes = bmp.into_inner();

        let out = meta.embed(bytes.clone()).unwrap();
        assert_eq!(out, bytes);
    }
}

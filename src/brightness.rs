//! Corner-brightness sampling.
//!
//! The watermark ships in two renderings of the same logo, and the one that
//! contrasts with the background wins: a mostly-dark corner gets the light
//! variant, anything else gets the dark variant. "Dark" is judged per pixel
//! on the raw RGB channel sum, then aggregated into a ratio over the region.

use image::RgbImage;

/// A pixel is dark when its RGB channel sum falls below this value.
pub const DARK_PIXEL_THRESHOLD: u32 = 125;
/// Dark-pixel ratio above which the light variant is used.
pub const LIGHT_VARIANT_RATIO: f32 = 0.47;

/// Which rendering of the logo to composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Light rendering, for dark backgrounds.
    Light,
    /// Dark rendering, for light backgrounds.
    Dark,
}

impl Variant {
    /// Lowercase name as printed in progress output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Fraction of pixels in the given region whose RGB sum is below
/// [`DARK_PIXEL_THRESHOLD`].
///
/// The rectangle is clipped to the image bounds; an empty clipped region
/// yields 0.0.
#[must_use]
pub fn darkness_ratio(image: &RgbImage, x: u32, y: u32, w: u32, h: u32) -> f32 {
    let x2 = (x + w).min(image.width());
    let y2 = (y + h).min(image.height());
    if x >= x2 || y >= y2 {
        return 0.0;
    }

    let mut dark = 0u32;
    for py in y..y2 {
        for px in x..x2 {
            let p = image.get_pixel(px, py);
            let sum = u32::from(p[0]) + u32::from(p[1]) + u32::from(p[2]);
            if sum < DARK_PIXEL_THRESHOLD {
                dark += 1;
            }
        }
    }

    let sampled = (x2 - x) * (y2 - y);
    #[allow(clippy::cast_precision_loss)]
    let ratio = dark as f32 / sampled as f32;
    ratio
}

/// Pick the watermark variant for a region with the given darkness ratio.
///
/// Strictly greater than [`LIGHT_VARIANT_RATIO`] selects [`Variant::Light`];
/// a ratio of exactly 0.47 still selects [`Variant::Dark`].
#[must_use]
pub fn choose_variant(ratio: f32) -> Variant {
    if ratio > LIGHT_VARIANT_RATIO {
        Variant::Light
    } else {
        Variant::Dark
    }
}

//! Corner placement and alpha compositing.
//!
//! The logo is pasted by forward alpha blending:
//! `out = alpha * logo + (1 - alpha) * background`
//!
//! using the watermark's own alpha channel. The blend rectangle is clipped
//! to the destination, so images smaller than the watermark are stamped with
//! as much of the logo as fits instead of being rejected.

use image::{RgbImage, RgbaImage};

/// Alpha below this leaves the background pixel untouched.
const ALPHA_THRESHOLD: f32 = 0.002;

/// Which corner of the image receives the watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Upper left corner.
    TopLeft,
    /// Upper right corner.
    TopRight,
    /// Lower left corner.
    BottomLeft,
    /// Lower right corner, the default.
    BottomRight,
}

impl Default for Placement {
    fn default() -> Self {
        Self::BottomRight
    }
}

impl Placement {
    /// Top-left anchor of the watermark region on an `img_w` x `img_h` image.
    ///
    /// Coordinates saturate at zero, so a destination smaller than the
    /// watermark anchors at the image origin and the region clips.
    #[must_use]
    pub fn anchor(self, img_w: u32, img_h: u32, wm_w: u32, wm_h: u32) -> (u32, u32) {
        let x = match self {
            Self::TopLeft | Self::BottomLeft => 0,
            Self::TopRight | Self::BottomRight => img_w.saturating_sub(wm_w),
        };
        let y = match self {
            Self::TopLeft | Self::TopRight => 0,
            Self::BottomLeft | Self::BottomRight => img_h.saturating_sub(wm_h),
        };
        (x, y)
    }
}

/// Alpha-blend `watermark` over `image` with its top-left corner at
/// (`pos_x`, `pos_y`).
///
/// Operates in place. The blend region is clipped to the image bounds;
/// watermark pixels with alpha below the threshold (0.002) are skipped.
pub fn composite_over(image: &mut RgbImage, watermark: &RgbaImage, pos_x: u32, pos_y: u32) {
    let img_w = image.width();
    let img_h = image.height();

    // Clip to image bounds
    let x2 = (pos_x + watermark.width()).min(img_w);
    let y2 = (pos_y + watermark.height()).min(img_h);

    if pos_x >= x2 || pos_y >= y2 {
        return;
    }

    for dy in 0..(y2 - pos_y) {
        for dx in 0..(x2 - pos_x) {
            let wm_px = watermark.get_pixel(dx, dy);
            let alpha = f32::from(wm_px[3]) / 255.0;

            if alpha < ALPHA_THRESHOLD {
                continue;
            }

            let inv_alpha = 1.0 - alpha;
            let px = image.get_pixel_mut(pos_x + dx, pos_y + dy);
            for ch in 0..3 {
                let background = f32::from(px[ch]);
                let logo = f32::from(wm_px[ch]);
                let blended = alpha * logo + inv_alpha * background;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    px[ch] = blended.clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
}

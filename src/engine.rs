//! Core stamping engine.

use std::path::{Path, PathBuf};

use image::{RgbImage, RgbaImage};

use crate::brightness::{self, Variant};
use crate::compositor::{self, Placement};
use crate::error::{Error, Result};
use crate::metadata::ColorMetadata;
use crate::output::{self, OutputMode};

/// Immutable per-run configuration, built once by the option resolver and
/// passed explicitly to every job.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    /// Where and how results are written.
    pub mode: OutputMode,
    /// Which corner receives the watermark.
    pub placement: Placement,
}

/// Outcome of one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The watermark was composited and the result saved.
    Stamped(Variant),
    /// The output already existed and the mode skips those.
    SkippedExisting,
    /// The file could not be read or decoded; the run continues.
    ReadError(String),
}

/// Aggregated counts over a batch, rendered into the final tally line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of inputs in the batch.
    pub total: usize,
    /// Files that were stamped and saved.
    pub stamped: usize,
    /// Files skipped because their output already existed.
    pub skipped: usize,
    /// Files that could not be read or decoded.
    pub read_errors: usize,
}

impl Summary {
    /// Tally a slice of per-file outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: &[JobOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome {
                JobOutcome::Stamped(_) => summary.stamped += 1,
                JobOutcome::SkippedExisting => summary.skipped += 1,
                JobOutcome::ReadError(_) => summary.read_errors += 1,
            }
        }
        summary
    }

    /// The closing line of a run. Skipped files count as successes; only
    /// read errors count against the batch.
    #[must_use]
    pub fn tally_line(&self) -> String {
        format!(
            "{}/{} files successfully watermarked.",
            self.total - self.read_errors,
            self.total
        )
    }
}

/// The stamping engine holding the decoded watermark variants.
///
/// Create once with [`Stamper::from_files`] or [`Stamper::from_images`] and
/// reuse for every image in the run. Both variants must share dimensions.
pub struct Stamper {
    light: RgbaImage,
    dark: RgbaImage,
}

impl Stamper {
    /// Load the light and dark variants from image files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatermarkLoad`] if either file cannot be decoded, or
    /// [`Error::VariantSizeMismatch`] if the variants differ in size.
    pub fn from_files(light: &Path, dark: &Path) -> Result<Self> {
        let load = |path: &Path| -> Result<RgbaImage> {
            let img = image::open(path).map_err(|source| Error::WatermarkLoad {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(img.to_rgba8())
        };
        Self::from_images(load(light)?, load(dark)?)
    }

    /// Build a stamper from already-decoded variants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VariantSizeMismatch`] if the variants differ in size.
    pub fn from_images(light: RgbaImage, dark: RgbaImage) -> Result<Self> {
        if light.dimensions() != dark.dimensions() {
            return Err(Error::VariantSizeMismatch {
                light_w: light.width(),
                light_h: light.height(),
                dark_w: dark.width(),
                dark_h: dark.height(),
            });
        }
        Ok(Self { light, dark })
    }

    /// Watermark dimensions in pixels (shared by both variants).
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.light.dimensions()
    }

    /// Pick the variant for `image` at `placement` without compositing.
    ///
    /// Samples the corner region the watermark would cover and applies the
    /// darkness-ratio rule.
    #[must_use]
    pub fn choose_variant_for(&self, image: &RgbImage, placement: Placement) -> Variant {
        let (wm_w, wm_h) = self.dimensions();
        let (x, y) = placement.anchor(image.width(), image.height(), wm_w, wm_h);
        let ratio = brightness::darkness_ratio(image, x, y, wm_w, wm_h);
        brightness::choose_variant(ratio)
    }

    /// Composite the contrast-appropriate variant onto `image` in place.
    ///
    /// Returns the variant that was used.
    pub fn stamp(&self, image: &mut RgbImage, placement: Placement) -> Variant {
        let (wm_w, wm_h) = self.dimensions();
        let (x, y) = placement.anchor(image.width(), image.height(), wm_w, wm_h);
        let variant = self.choose_variant_for(image, placement);
        let watermark = match variant {
            Variant::Light => &self.light,
            Variant::Dark => &self.dark,
        };
        compositor::composite_over(image, watermark, x, y);
        variant
    }

    /// Process a single input file: load, stamp, save per the run config.
    ///
    /// Unreadable or undecodable inputs are tolerated and reported as
    /// [`JobOutcome::ReadError`]; in skip mode a pre-existing output short
    /// circuits to [`JobOutcome::SkippedExisting`] without touching the
    /// input.
    ///
    /// # Errors
    ///
    /// Save and encode failures are not tolerated per-file and propagate.
    pub fn process_file(&self, input: &Path, config: &RunConfig) -> Result<JobOutcome> {
        let out_path = config.mode.output_path(input);
        if config.mode.skip_existing() && out_path.is_file() {
            return Ok(JobOutcome::SkippedExisting);
        }

        let raw = match std::fs::read(input) {
            Ok(bytes) => bytes,
            Err(e) => return Ok(JobOutcome::ReadError(e.to_string())),
        };
        let decoded = match image::load_from_memory(&raw) {
            Ok(img) => img,
            Err(e) => return Ok(JobOutcome::ReadError(e.to_string())),
        };

        let metadata = ColorMetadata::extract(&raw);
        let mut img = decoded.to_rgb8();
        let variant = self.stamp(&mut img, config.placement);

        output::save_image(&img, &out_path, &metadata)?;
        Ok(JobOutcome::Stamped(variant))
    }
}

/// Resolve CLI inputs into the list of files to process.
///
/// With `first_is_dir`, the first input names a directory and the list is
/// replaced by its regular files with a supported image extension, sorted
/// by name (not recursive). Otherwise the inputs are taken verbatim.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] if `first_is_dir` is set and the first
/// input is not a directory, or [`Error::Io`] if the listing fails.
pub fn resolve_inputs(inputs: &[PathBuf], first_is_dir: bool) -> Result<Vec<PathBuf>> {
    if !first_is_dir {
        return Ok(inputs.to_vec());
    }

    let Some(dir) = inputs.first() else {
        return Ok(Vec::new());
    };
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.clone()));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| output::is_supported_image(p))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    fn test_stamper(wm_w: u32, wm_h: u32) -> Stamper {
        // Opaque white "light" and opaque black "dark" variants make the
        // chosen one visible in the output pixels.
        let light = RgbaImage::from_pixel(wm_w, wm_h, Rgba([255, 255, 255, 255]));
        let dark = RgbaImage::from_pixel(wm_w, wm_h, Rgba([0, 0, 0, 255]));
        Stamper::from_images(light, dark).unwrap()
    }

    #[test]
    fn mismatched_variants_are_rejected() {
        let light = RgbaImage::new(10, 5);
        let dark = RgbaImage::new(10, 6);
        let err = Stamper::from_images(light, dark);
        assert!(matches!(err, Err(Error::VariantSizeMismatch { .. })));
    }

    #[test]
    fn dark_corner_gets_light_variant() {
        let stamper = test_stamper(10, 5);
        let mut img = RgbImage::from_pixel(100, 80, Rgb([0, 0, 0]));

        let variant = stamper.stamp(&mut img, Placement::BottomRight);

        assert_eq!(variant, Variant::Light);
        assert_eq!(*img.get_pixel(99, 79), Rgb([255, 255, 255]));
        // Anchor corner of the region too
        assert_eq!(*img.get_pixel(90, 75), Rgb([255, 255, 255]));
        // Outside the region stays black
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn bright_corner_gets_dark_variant() {
        let stamper = test_stamper(10, 5);
        let mut img = RgbImage::from_pixel(100, 80, Rgb([255, 255, 255]));

        let variant = stamper.stamp(&mut img, Placement::TopLeft);

        assert_eq!(variant, Variant::Dark);
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(9, 4), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(10, 5), Rgb([255, 255, 255]));
    }

    #[test]
    fn variant_decision_uses_the_placement_corner() {
        // Black top half, white bottom half: the sampled corner decides.
        let stamper = test_stamper(10, 5);
        let mut img = RgbImage::from_pixel(100, 80, Rgb([255, 255, 255]));
        for y in 0..40 {
            for x in 0..100 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }

        assert_eq!(
            stamper.choose_variant_for(&img, Placement::TopRight),
            Variant::Light
        );
        assert_eq!(
            stamper.choose_variant_for(&img, Placement::BottomRight),
            Variant::Dark
        );
    }

    #[test]
    fn stamp_clips_on_image_smaller_than_watermark() {
        let stamper = test_stamper(10, 5);
        let mut img = RgbImage::from_pixel(4, 3, Rgb([0, 0, 0]));

        let variant = stamper.stamp(&mut img, Placement::BottomRight);

        // Whole image is the (clipped) corner region: dark, so light variant
        // covers every visible pixel.
        assert_eq!(variant, Variant::Light);
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(3, 2), Rgb([255, 255, 255]));
    }

    #[test]
    fn process_file_reports_read_error_for_missing_input() {
        let stamper = test_stamper(4, 4);
        let config = RunConfig::default();
        let outcome = stamper
            .process_file(Path::new("/nonexistent/nope.png"), &config)
            .unwrap();
        assert!(matches!(outcome, JobOutcome::ReadError(_)));
    }

    #[test]
    fn resolve_inputs_passes_explicit_files_through() {
        let files = vec![PathBuf::from("a.png"), PathBuf::from("b.txt")];
        let resolved = resolve_inputs(&files, false).unwrap();
        assert_eq!(resolved, files);
    }

    #[test]
    fn resolve_inputs_rejects_non_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let inputs = vec![file.path().to_path_buf()];
        let err = resolve_inputs(&inputs, true);
        assert!(matches!(err, Err(Error::NotADirectory(_))));
    }

    #[test]
    fn resolve_inputs_lists_supported_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let inputs = vec![dir.path().to_path_buf()];
        let resolved = resolve_inputs(&inputs, true).unwrap();

        let names: Vec<_> = resolved
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn summary_tally_counts_skips_as_success() {
        let outcomes = vec![
            JobOutcome::Stamped(Variant::Light),
            JobOutcome::Stamped(Variant::Dark),
            JobOutcome::SkippedExisting,
            JobOutcome::ReadError("bad file".to_string()),
        ];
        let summary = Summary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.stamped, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.read_errors, 1);
        assert_eq!(summary.tally_line(), "3/4 files successfully watermarked.");
    }
}

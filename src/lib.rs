//! Batch-apply a logo watermark, picking the light or dark variant by
//! corner brightness.
//!
//! The watermark ships as two pre-rendered variants of the same logo. For
//! each image the corner region that will receive the logo is sampled: if
//! more than 47% of its pixels are dark (RGB channel sum below 125), the
//! light variant is composited, otherwise the dark one. Output goes back
//! over the original, into a sibling `Watermarked/` directory, or next to
//! the original with a `_WM` suffix, re-encoded at maximum quality with the
//! source's ICC profile and EXIF carried over.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use logo_watermark::{RunConfig, Stamper};
//!
//! let stamper = Stamper::from_files(Path::new("logo_light.png"), Path::new("logo_dark.png"))
//!     .expect("failed to load watermark variants");
//! let config = RunConfig::default();
//! let outcome = stamper.process_file(Path::new("photo.jpg"), &config).unwrap();
//! println!("{outcome:?}");
//! ```
//!
//! # In-memory use
//!
//! ```no_run
//! use logo_watermark::{Placement, Stamper};
//!
//! # let (light, dark) = (image::RgbaImage::new(8, 8), image::RgbaImage::new(8, 8));
//! let stamper = Stamper::from_images(light, dark).unwrap();
//! let mut img = image::open("photo.jpg").unwrap().to_rgb8();
//! let variant = stamper.stamp(&mut img, Placement::BottomRight);
//! println!("used the {} variant", variant.name());
//! ```

#![deny(missing_docs)]

pub mod brightness;
pub mod compositor;
mod engine;
pub mod error;
pub mod metadata;
pub mod output;

pub use brightness::Variant;
pub use compositor::Placement;
pub use engine::{resolve_inputs, JobOutcome, RunConfig, Stamper, Summary};
pub use error::{Error, Result};
pub use output::{is_supported_image, OutputMode};

//! Stamp a single image with the contrast-appropriate logo variant.
//!
//! Usage:
//! ```sh
//! cargo run --example stamp_image -- logo_light.png logo_dark.png photo.jpg
//! ```

use std::env;
use std::process;

use logo_watermark::{JobOutcome, RunConfig, Stamper};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <light> <dark> <image>", args[0]);
        process::exit(1);
    }

    let stamper = Stamper::from_files(args[1].as_ref(), args[2].as_ref())
        .expect("failed to load watermark variants");
    let config = RunConfig::default();

    match stamper.process_file(args[3].as_ref(), &config) {
        Ok(JobOutcome::Stamped(variant)) => println!("Done ({})", variant.name()),
        Ok(JobOutcome::SkippedExisting) => println!("Skipped: output already exists"),
        Ok(JobOutcome::ReadError(msg)) => {
            eprintln!("Error reading image: {msg}");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;

use clap::Parser;

use logo_watermark::{
    resolve_inputs, JobOutcome, OutputMode, Placement, RunConfig, Stamper, Summary,
};

#[derive(Parser)]
#[command(
    name = "watermark",
    about = "Batch-apply a logo watermark, picking the light or dark variant by corner brightness",
    version,
    after_help = "The corner region each image would receive the logo in is sampled first;\n\
                  a mostly-dark corner gets the light variant, anything else the dark one.\n\
                  Giving both -n and -N behaves as -N alone."
)]
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
struct Cli {
    /// Image files to watermark, or a single folder with -f
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Light watermark variant (composited over dark corners)
    #[arg(long, value_name = "PATH")]
    light: PathBuf,

    /// Dark watermark variant (composited over light corners)
    #[arg(long, value_name = "PATH")]
    dark: PathBuf,

    /// Overwrite the original files in place
    #[arg(short = 'o', conflicts_with_all = ["new_folder", "only_new"])]
    overwrite: bool,

    /// Save files to a sibling 'Watermarked' folder with a _WM suffix
    #[arg(short = 'n')]
    new_folder: bool,

    /// Like -n, but skip files whose output already exists
    #[arg(short = 'N')]
    only_new: bool,

    /// Treat the first argument as a folder of images (not recursive)
    #[arg(short = 'f')]
    folder: bool,

    /// Place the watermark in the upper left corner
    #[arg(short = '1', group = "placement")]
    top_left: bool,

    /// Place the watermark in the upper right corner
    #[arg(short = '2', group = "placement")]
    top_right: bool,

    /// Place the watermark in the bottom right corner (the default)
    #[arg(short = '3', group = "placement")]
    bottom_right: bool,

    /// Place the watermark in the bottom left corner
    #[arg(short = '4', group = "placement")]
    bottom_left: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let mode = if self.overwrite {
            OutputMode::Overwrite
        } else if self.only_new {
            OutputMode::NewFolderSkipExisting
        } else if self.new_folder {
            OutputMode::NewFolder
        } else {
            OutputMode::Vanilla
        };

        let placement = if self.top_left {
            Placement::TopLeft
        } else if self.top_right {
            Placement::TopRight
        } else if self.bottom_left {
            Placement::BottomLeft
        } else {
            Placement::BottomRight
        };

        RunConfig { mode, placement }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.inputs.is_empty() {
        println!("usage: watermark [options] file1 [file2 ...]");
        process::exit(1);
    }

    let config = cli.run_config();

    if cli.overwrite {
        overwrite_countdown();
    }

    let stamper = match Stamper::from_files(&cli.light, &cli.dark) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let files = match resolve_inputs(&cli.inputs, cli.folder) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let total = files.len();
    let mut outcomes = Vec::with_capacity(total);
    for (i, path) in files.iter().enumerate() {
        outcomes.push(run_one(&stamper, path, &config, i + 1, total));
    }

    println!("{}", Summary::from_outcomes(&outcomes).tally_line());
}

fn run_one(
    stamper: &Stamper,
    path: &Path,
    config: &RunConfig,
    index: usize,
    total: usize,
) -> JobOutcome {
    if config.mode.skip_existing() && config.mode.output_path(path).is_file() {
        println!("Skipping image {index} of {total}.");
        return JobOutcome::SkippedExisting;
    }

    print!("Watermarking image {index} of {total}........");
    let _ = io::stdout().flush();

    match stamper.process_file(path, config) {
        Ok(JobOutcome::Stamped(variant)) => {
            println!("Done ({})", variant.name());
            JobOutcome::Stamped(variant)
        }
        Ok(JobOutcome::SkippedExisting) => {
            println!("Skipped.");
            JobOutcome::SkippedExisting
        }
        Ok(JobOutcome::ReadError(msg)) => {
            println!("Error reading file '{}'.", path.display());
            JobOutcome::ReadError(msg)
        }
        Err(e) => {
            println!();
            eprintln!("Fatal: {e}");
            process::exit(1);
        }
    }
}

/// Four two-second steps between the warning and the first overwrite.
fn overwrite_countdown() {
    println!(
        "OVERWRITE WARNING: Original files will be overwritten. This cannot be undone. Press ctrl+C to stop."
    );
    let mut stdout = io::stdout();
    for step in (0..=3u8).rev() {
        print!("{step}....");
        let _ = stdout.flush();
        thread::sleep(Duration::from_secs(2));
    }
    println!(" Continuing.");
}

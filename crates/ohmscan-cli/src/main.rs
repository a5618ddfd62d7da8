//! ohmscan CLI: detect resistor values from cropped resistor photos.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ohmscan::{BandCountMode, BgrImage, DetectConfig, Detector, Hsv, StrategyKind};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ohmscan")]
#[command(about = "Decode resistor color bands from a cropped image of the resistor body")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the resistance encoded in an image.
    Detect(CliDetectArgs),

    /// Classify a single HSV sample against the calibrated bound table.
    ClassifyTest {
        /// Hue in 0..=180 (half-degree convention).
        #[arg(long)]
        h: u8,
        /// Saturation in 0..=255.
        #[arg(long)]
        s: u8,
        /// Value in 0..=255.
        #[arg(long)]
        v: u8,
    },
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the input image (tightly cropped to the resistor body).
    #[arg(long)]
    image: PathBuf,

    /// Path to write the detection result (JSON). Printed to stdout when
    /// omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory to write step-trace snapshots (PNG per recorded step).
    #[arg(long)]
    steps_dir: Option<PathBuf>,

    /// Extraction strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Columns)]
    strategy: StrategyArg,

    /// Band-count assumption for decoding.
    #[arg(long, value_enum, default_value_t = BandsArg::Auto)]
    bands: BandsArg,

    /// Record every intermediate snapshot, not just stage boundaries.
    #[arg(long)]
    verbose_trace: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Columns,
    Contours,
}

impl StrategyArg {
    fn to_core(self) -> StrategyKind {
        match self {
            Self::Columns => StrategyKind::Columns,
            Self::Contours => StrategyKind::Contours,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BandsArg {
    Auto,
    Four,
    Five,
}

impl BandsArg {
    fn to_core(self) -> BandCountMode {
        match self {
            Self::Auto => BandCountMode::Auto,
            Self::Four => BandCountMode::Four,
            Self::Five => BandCountMode::Five,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::ClassifyTest { h, s, v } => {
            let name = ohmscan::classify(Hsv::new(h, s, v));
            println!("{name}");
            Ok(())
        }
    }
}

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    let rgb = image::open(&args.image)?.to_rgb8();
    let bgr = rgb_to_bgr(&rgb);

    let config = DetectConfig {
        strategy: args.strategy.to_core(),
        band_count: args.bands.to_core(),
        verbose_trace: args.verbose_trace || args.steps_dir.is_some(),
        ..Default::default()
    };
    let detector = Detector::with_config(config);
    let result = detector.detect(&bgr)?;

    if result.is_determined() {
        tracing::info!("resistance: {} ohm", result.resistance_ohm);
    } else {
        tracing::info!("resistance: not available");
    }

    if let Some(dir) = &args.steps_dir {
        write_step_snapshots(&result, dir)?;
    }

    let json = serde_json::to_string_pretty(&result)?;
    match &args.out {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Swap RGB file data into the detector's BGR channel convention.
fn rgb_to_bgr(rgb: &image::RgbImage) -> BgrImage {
    let (w, h) = rgb.dimensions();
    let mut bgr = BgrImage::new(w, h);
    for (x, y, px) in rgb.enumerate_pixels() {
        bgr.put_pixel(x, y, image::Rgb([px[2], px[1], px[0]]));
    }
    bgr
}

fn write_step_snapshots(result: &ohmscan::DetectionResult, dir: &std::path::Path) -> CliResult<()> {
    std::fs::create_dir_all(dir)?;
    for (idx, step) in result.steps.iter().enumerate() {
        let Some(snapshot) = &step.snapshot else {
            continue;
        };
        let name = format!("{idx:02}-{}.png", step.label.replace(' ', "-"));
        // Snapshots are BGR; swap back for the PNG encoder.
        rgb_to_bgr(snapshot).save(dir.join(name))?;
    }
    Ok(())
}

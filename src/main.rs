use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colortype::core::catalog::{self, ColorType};
use colortype::core::config::AnalysisConfig;
use colortype::services::{ColorAnalysisService, ScannerService};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "colortype", version, about = "Seasonal color type analysis for portraits")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single portrait
    Analyze {
        /// Image file, or a text file holding a data URL with --data-url
        #[arg(short, long, value_name = "FILE")]
        image: PathBuf,
        /// Treat the file contents as a `data:image/...;base64,` URL
        #[arg(long)]
        data_url: bool,
        /// Include per-region summaries and rule scores
        #[arg(long)]
        details: bool,
        /// JSON file overriding the analysis thresholds
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Classify every image under a directory
    Batch {
        /// Directory to scan
        #[arg(short, long, value_name = "DIR")]
        path: PathBuf,
        /// Report file (default: `<dir>/.colortype.jsonl`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// JSON file overriding the analysis thresholds
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show the color type catalog
    Catalog {
        /// Only show one color type, e.g. `deep_autumn`
        #[arg(long)]
        id: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            image,
            data_url,
            details,
            config,
        } => {
            let service = ColorAnalysisService::new(load_config(config.as_deref())?);

            let report = if data_url {
                let payload = fs::read_to_string(&image)
                    .with_context(|| format!("Failed to read data URL from {:?}", image))?;
                service.analyze_payload(&payload)
            } else {
                service
                    .analyze_file(&image)
                    .with_context(|| format!("Failed to read image {:?}", image))?
            };

            let report = if details { report } else { report.without_details() };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Batch {
            path,
            output,
            config,
        } => {
            let service = ColorAnalysisService::new(load_config(config.as_deref())?);
            let scanner = ScannerService::default();

            println!("▶ Scanning for images in: {}", path.display());
            let images = scan_directory(&scanner, &path)?;
            if images.is_empty() {
                println!("No images found.");
                return Ok(());
            }

            let progress = ProgressBar::new(images.len() as u64);
            progress.set_style(ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos}/{len} {msg}",
            )?);
            progress.set_message("analyzing");

            let records = benchmark("analyzing all images", || {
                scanner.analyze_all(&service, &images, &progress)
            });
            progress.finish_and_clear();

            let report_file = output.unwrap_or_else(|| path.join(".colortype.jsonl"));
            let file = File::create(&report_file)
                .with_context(|| format!("Failed to create report file {:?}", report_file))?;
            let mut out = BufWriter::new(file);

            let mut tally: BTreeMap<ColorType, usize> = BTreeMap::new();
            let mut failed = 0;
            for record in &records {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
                match &record.report {
                    Some(report) => *tally.entry(report.color_type_id).or_default() += 1,
                    None => failed += 1,
                }
            }
            out.flush()
                .with_context(|| format!("Failed to write report file {:?}", report_file))?;

            println!("Analyzed {} image(s):", records.len() - failed);
            for (color_type, count) in &tally {
                println!("   🎨 {:<16} {}", color_type.as_str(), count);
            }
            if failed > 0 {
                println!("   ⚠️  {} file(s) could not be read", failed);
            }
            println!("\n✅ Wrote report to {}", report_file.display());
        }

        Commands::Catalog { id } => match id {
            Some(id) => {
                let color_type: ColorType = id.parse()?;
                let entry = serde_json::json!({
                    "color_type": catalog::archetype(color_type),
                    "face_analysis": catalog::face_analysis(color_type),
                });
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            None => {
                for archetype in catalog::archetypes() {
                    println!("{:<16} {}", archetype.id, archetype.name);
                    println!("   {}", archetype.description);
                }
            }
        },
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path)),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Walk `dir` behind a spinner, returning the image files found.
fn scan_directory(scanner: &ScannerService, dir: &Path) -> Result<Vec<PathBuf>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.set_message("Scanning for images…");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let images = scanner
        .discover(dir)
        .with_context(|| format!("Failed to scan {:?}", dir))?;

    spinner.finish_with_message(format!("Scan complete: {} image(s)", images.len()));
    Ok(images)
}

/// Run `f()`, print how long it took (with `label`), and return its result.
fn benchmark<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = Instant::now();
    let result = f();
    println!("⏱ {} took {:.2?}", label, start.elapsed());
    result
}

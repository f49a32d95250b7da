//! Paleomap CLI - plate reconstruction from finite rotation tables.
//!
//! Resolve a rotation table at a given age, rotate single points or whole
//! feature files, and split rings at the antimeridian for plotting.

use clap::{Parser, Subcommand};
use glam::DVec2;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use paleomap::feature::Feature;
use paleomap::pipeline::{PipelineError, Reconstruction, ReconstructionConfig, Timeline};
use paleomap::resolver::{Resolver, ResolverConfig, RotationTable};
use paleomap::rotation::rotate_point;
use paleomap::Decomposer;

/// Plate-tectonic reconstruction tool.
#[derive(Parser)]
#[command(name = "paleomap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every plate's absolute rotation at one age.
    Resolve {
        /// Rotation table file.
        #[arg(short, long)]
        rotations: PathBuf,

        /// Target age in Ma.
        #[arg(short, long)]
        time: f64,

        /// Express every rotation relative to this plate.
        #[arg(long)]
        fixed_plate: Option<u32>,

        /// Print JSON instead of the text summary.
        #[arg(long)]
        json: bool,
    },
    /// Rotate a single point carried by a plate.
    Rotate {
        /// Rotation table file.
        #[arg(short, long)]
        rotations: PathBuf,

        /// Target age in Ma.
        #[arg(short, long)]
        time: f64,

        /// Plate carrying the point.
        #[arg(short, long)]
        plate: u32,

        /// Present-day latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Present-day longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Reconstruct a feature file over a range of ages.
    Reconstruct {
        /// Rotation table file.
        #[arg(short, long)]
        rotations: PathBuf,

        /// JSON array of features.
        #[arg(short, long)]
        features: PathBuf,

        /// First age in Ma.
        #[arg(long)]
        start: f64,

        /// Last age in Ma; a single frame if omitted.
        #[arg(long)]
        end: Option<f64>,

        /// Age step between frames in Ma.
        #[arg(long)]
        step: Option<f64>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Express every rotation relative to this plate.
        #[arg(long)]
        fixed_plate: Option<u32>,

        /// Output directory for frame files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for frame files.
        #[arg(short, long, default_value = "frame")]
        name: String,
    },
    /// Split a (lon, lat) ring at the 0 and 180 meridians.
    Decompose {
        /// JSON array of [lon, lat] pairs.
        #[arg(long)]
        ring: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            rotations,
            time,
            fixed_plate,
            json,
        } => run_resolve(&rotations, time, fixed_plate, json),
        Commands::Rotate {
            rotations,
            time,
            plate,
            lat,
            lon,
        } => run_rotate(&rotations, time, plate, lat, lon),
        Commands::Reconstruct {
            rotations,
            features,
            start,
            end,
            step,
            config,
            fixed_plate,
            output,
            name,
        } => run_reconstruct(
            &rotations,
            &features,
            start,
            end,
            step,
            config.as_deref(),
            fixed_plate,
            &output,
            &name,
        ),
        Commands::Decompose { ring } => run_decompose(&ring),
    }
}

fn load_table(path: &Path) -> RotationTable {
    match RotationTable::from_path(path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error reading rotation table {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn run_resolve(rotations: &Path, time: f64, fixed_plate: Option<u32>, json: bool) {
    let table = load_table(rotations);
    let config = ResolverConfig {
        fixed_plate,
        ..ResolverConfig::default()
    };
    let resolved = match Resolver::new(config).resolve(&table, time) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error resolving rotations: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let written = if json {
        serde_json::to_writer_pretty(stdout.lock(), &resolved).map_err(|e| e.to_string())
    } else {
        resolved.write_summary(stdout.lock()).map_err(|e| e.to_string())
    };
    if let Err(e) = written {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    }
}

fn run_rotate(rotations: &Path, time: f64, plate: u32, lat: f64, lon: f64) {
    let table = load_table(rotations);
    let resolved = match Resolver::default().resolve(&table, time) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error resolving rotations: {}", e);
            std::process::exit(1);
        }
    };
    let Some(entry) = resolved.get(plate) else {
        eprintln!("Error: plate {} has no rotation at {} Ma", plate, time);
        std::process::exit(1);
    };
    let (new_lat, new_lon) = rotate_point(lat, lon, &entry.rotation);
    println!("{:.4} {:.4}", new_lat, new_lon);
}

fn load_features(path: &Path) -> Result<Vec<Feature>, PipelineError> {
    let reader = BufReader::new(File::open(path)?);
    let features: Vec<Feature> = serde_json::from_reader(reader)?;
    for feature in &features {
        feature.validate()?;
    }
    Ok(features)
}

#[allow(clippy::too_many_arguments)]
fn run_reconstruct(
    rotations: &Path,
    features: &Path,
    start: f64,
    end: Option<f64>,
    step: Option<f64>,
    config: Option<&Path>,
    fixed_plate: Option<u32>,
    output: &Path,
    name: &str,
) {
    let mut config = match config {
        Some(path) => match ReconstructionConfig::from_json_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ReconstructionConfig::default(),
    };
    if fixed_plate.is_some() {
        config.resolver.fixed_plate = fixed_plate;
    }

    let timeline = match Timeline::new(start, end, step) {
        Ok(timeline) => timeline,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let table = load_table(rotations);
    let features = match load_features(features) {
        Ok(features) => features,
        Err(e) => {
            eprintln!("Error reading features {}: {}", features.display(), e);
            std::process::exit(1);
        }
    };

    println!("Paleomap - Plate Reconstruction");
    println!("===============================");
    println!(
        "Rotation table: {} samples, {} plates",
        table.samples().len(),
        table.plate_count()
    );
    println!("Features: {}", features.len());
    println!("Frames: {}", timeline.len());
    println!("Output: {}", output.display());

    if let Err(e) = std::fs::create_dir_all(output) {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    }

    let started = Instant::now();
    let reconstruction = Reconstruction::new(&table, config);
    let result = reconstruction.run(&timeline, &features, |record, i, total| {
        let path = output.join(format!("{}_{}Ma.json", name, record.time));
        record.write_json(&path)?;
        println!(
            "  [{}/{}] {} Ma: {} features -> {}",
            i + 1,
            total,
            record.time,
            record.features.len(),
            path.display()
        );
        Ok(())
    });
    if let Err(e) = result {
        eprintln!("Error during reconstruction: {}", e);
        std::process::exit(1);
    }
    println!("Reconstruction completed in {:.2?}", started.elapsed());
}

fn run_decompose(ring: &Path) {
    let points: Vec<DVec2> = match File::open(ring)
        .map_err(PipelineError::from)
        .and_then(|file| Ok(serde_json::from_reader(BufReader::new(file))?))
    {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Error reading ring {}: {}", ring.display(), e);
            std::process::exit(1);
        }
    };

    let rings = Decomposer::default().decompose(&points);
    match serde_json::to_string_pretty(&rings) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            std::process::exit(1);
        }
    }
}

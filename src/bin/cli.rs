// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygrav CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::Point3;
use polygrav::io::{self, MeshSource};
use polygrav::{
    EvaluationResult, GravityEvaluable, MetricUnit, NormalOrientation,
    PolyhedronIntegrity, PolyhedronOptions, RunConfig,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Points evaluated between two progress bar updates
const PROGRESS_CHUNK: usize = 1024;

#[derive(Parser)]
#[command(name = "polygrav")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Gravity field of constant-density polyhedra", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the points of a TOML run configuration
    Run {
        /// Run configuration file
        config: PathBuf,
    },

    /// Check the face orientation of a mesh
    Check {
        /// JSON mesh array file
        mesh: PathBuf,

        /// Declared orientation (OUTWARDS, INWARDS)
        #[arg(short, long, default_value = "OUTWARDS")]
        orientation: String,

        /// Flip minority faces and write the healed mesh
        #[arg(long)]
        heal: bool,

        /// Healed mesh file, defaults to overwriting the input
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Evaluate a single point
    Eval {
        /// JSON mesh array file
        mesh: PathBuf,

        /// Evaluation point as x,y,z
        #[arg(short, long, allow_hyphen_values = true)]
        point: String,

        /// Constant density
        #[arg(short, long, default_value = "1.0")]
        density: f64,

        /// Unit of the mesh coordinates (m, km, unitless)
        #[arg(short, long, default_value = "m")]
        unit: String,

        /// Declared orientation (OUTWARDS, INWARDS)
        #[arg(short, long, default_value = "OUTWARDS")]
        orientation: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run { config } => run_command(&config),
        Commands::Check {
            mesh,
            orientation,
            heal,
            output,
        } => check_command(&mesh, &orientation, heal, output.as_deref()),
        Commands::Eval {
            mesh,
            point,
            density,
            unit,
            orientation,
        } => eval_command(&mesh, &point, density, &unit, &orientation),
    }
}

fn run_command(config_path: &Path) -> Result<()> {
    let config = RunConfig::load_file(config_path)?;
    if config.points.is_empty() {
        bail!("No evaluation points in {}", config_path.display());
    }

    let start = Instant::now();
    let polyhedron = io::load_polyhedron(&config.mesh, config.density, config.options())?;
    println!(
        "{} {} in {:.2?}",
        "Built".green().bold(),
        polyhedron,
        start.elapsed()
    );

    let start = Instant::now();
    let evaluable = GravityEvaluable::new(polyhedron)?;
    let points = config.evaluation_points();
    let mut results = evaluate_with_progress(&evaluable, &points, config.parallel);
    info!(points = points.len(), elapsed = ?start.elapsed(), "Evaluation finished");

    let mut units = evaluable.output_units();
    if let Some(target) = config.output_unit {
        let source = evaluable.polyhedron().unit();
        results = polygrav::units::convert_all(&results, source, target);
        units = target.output_units();
    }

    match &config.output {
        Some(path) => {
            io::export_results(path, &points, &results, config.format, &units)?;
            println!(
                "{} {} points -> {}",
                "Wrote".green().bold(),
                results.len(),
                path.display()
            );
        }
        None => print_summary(&points, &results, &units),
    }

    Ok(())
}

fn check_command(
    mesh_path: &Path,
    orientation: &str,
    heal: bool,
    output: Option<&Path>,
) -> Result<()> {
    let declared: NormalOrientation = orientation.parse()?;
    let options = PolyhedronOptions::default()
        .with_orientation(declared)
        .with_integrity(PolyhedronIntegrity::Disable);
    let polyhedron = io::load_polyhedron(mesh_path, 1.0, options)?;

    let start = Instant::now();
    let (majority, violating) = polyhedron.check_plane_unit_normal_orientation();
    println!("{} {}", "Mesh:".bold(), mesh_path.display().to_string().cyan());
    println!(
        "  {} {} faces, {} vertices",
        "Size:".bright_black(),
        polyhedron.face_count(),
        polyhedron.vertex_count()
    );
    println!(
        "  {} {} (declared {}), checked in {:.2?}",
        "Majority:".bright_black(),
        majority,
        declared,
        start.elapsed()
    );

    if violating.is_empty() && majority == declared {
        println!("{}", "All plane unit normals are consistent".green().bold());
        return Ok(());
    }

    if violating.is_empty() {
        println!(
            "{}",
            format!("All plane unit normals point {}", majority).yellow()
        );
    } else {
        println!(
            "{} {} faces disagree with the majority: {:?}",
            "!".yellow(),
            violating.len(),
            violating
        );
    }

    if !heal {
        std::process::exit(1);
    }

    let healed = io::import_mesh_file(mesh_path)?
        .into_polyhedron(1.0, options.with_integrity(PolyhedronIntegrity::Heal))
        .context("Failed to heal mesh")?;
    let target = output.unwrap_or(mesh_path);
    io::export_mesh(target, &MeshSource::from_polyhedron(&healed))?;
    println!(
        "{} {} faces, orientation {} -> {}",
        "Healed".green().bold(),
        violating.len(),
        healed.orientation(),
        target.display()
    );

    Ok(())
}

fn eval_command(
    mesh_path: &Path,
    point: &str,
    density: f64,
    unit: &str,
    orientation: &str,
) -> Result<()> {
    let point = parse_point(point)?;
    let options = PolyhedronOptions::default()
        .with_unit(unit.parse::<MetricUnit>()?)
        .with_orientation(orientation.parse::<NormalOrientation>()?);
    let polyhedron = io::load_polyhedron(mesh_path, density, options)?;

    let result = polygrav::evaluate(&polyhedron, &point, true)?;
    let units = polyhedron.unit().output_units();
    print_summary(&[point], &[result], &units);
    Ok(())
}

fn evaluate_with_progress(
    evaluable: &GravityEvaluable,
    points: &[Point3<f64>],
    parallel: bool,
) -> Vec<EvaluationResult> {
    let pb = ProgressBar::new(points.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut results = Vec::with_capacity(points.len());
    for chunk in points.chunks(PROGRESS_CHUNK) {
        results.extend(evaluable.evaluate_batch(chunk, parallel));
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();
    results
}

fn print_summary(points: &[Point3<f64>], results: &[EvaluationResult], units: &[String; 3]) {
    for (point, result) in points.iter().zip(results) {
        println!(
            "{} ({}, {}, {})",
            "Point".bold(),
            point.x,
            point.y,
            point.z
        );
        println!(
            "  {} {:e} [{}]",
            "potential:".bright_black(),
            result.potential,
            units[0]
        );
        println!(
            "  {} ({:e}, {:e}, {:e}) [{}]",
            "acceleration:".bright_black(),
            result.acceleration.x,
            result.acceleration.y,
            result.acceleration.z,
            units[1]
        );
        let [xx, yy, zz, xy, xz, yz] = result.tensor;
        println!(
            "  {} ({:e}, {:e}, {:e}, {:e}, {:e}, {:e}) [{}]",
            "tensor:".bright_black(),
            xx,
            yy,
            zz,
            xy,
            xz,
            yz,
            units[2]
        );
    }
}

fn parse_point(value: &str) -> Result<Point3<f64>> {
    let coordinates = value
        .split(',')
        .map(|c| {
            c.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid coordinate '{}'", c))
        })
        .collect::<Result<Vec<f64>>>()?;

    match coordinates.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => bail!("Expected a point as x,y,z, got '{}'", value),
    }
}


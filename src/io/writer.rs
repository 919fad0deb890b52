// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Result and mesh writers

use super::importer::MeshSource;
use crate::model::EvaluationResult;
use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

const CSV_HEADER: &str = "x,y,z,potential,ax,ay,az,txx,tyy,tzz,txy,txz,tyz";

/// Output format of evaluation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => bail!("Unknown output format '{}', expected 'csv' or 'json'", other),
        }
    }
}

#[derive(Serialize)]
struct ResultRecord<'a> {
    point: [f64; 3],
    #[serde(flatten)]
    result: &'a EvaluationResult,
}

#[derive(Serialize)]
struct ResultDocument<'a> {
    units: ResultUnits<'a>,
    results: Vec<ResultRecord<'a>>,
}

#[derive(Serialize)]
struct ResultUnits<'a> {
    potential: &'a str,
    acceleration: &'a str,
    tensor: &'a str,
}

/// Write one row or record per point.
///
/// `units` are the potential, acceleration and tensor units; JSON output
/// carries them in a header object, CSV output ignores them.
pub fn write_results<W: Write>(
    mut writer: W,
    points: &[Point3<f64>],
    results: &[EvaluationResult],
    format: OutputFormat,
    units: &[String; 3],
) -> Result<()> {
    if points.len() != results.len() {
        bail!(
            "Got {} results for {} evaluation points",
            results.len(),
            points.len()
        );
    }

    match format {
        OutputFormat::Csv => {
            writeln!(writer, "{}", CSV_HEADER)?;
            for (point, result) in points.iter().zip(results) {
                let [txx, tyy, tzz, txy, txz, tyz] = result.tensor;
                let a = result.acceleration;
                writeln!(
                    writer,
                    "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                    point.x, point.y, point.z, result.potential, a.x, a.y, a.z, txx, tyy, tzz, txy,
                    txz, tyz
                )?;
            }
        }
        OutputFormat::Json => {
            let document = ResultDocument {
                units: ResultUnits {
                    potential: &units[0],
                    acceleration: &units[1],
                    tensor: &units[2],
                },
                results: points
                    .iter()
                    .zip(results)
                    .map(|(point, result)| ResultRecord {
                        point: [point.x, point.y, point.z],
                        result,
                    })
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write results to a file, see [`write_results`].
pub fn export_results(
    path: impl AsRef<Path>,
    points: &[Point3<f64>],
    results: &[EvaluationResult],
    format: OutputFormat,
    units: &[String; 3],
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_results(BufWriter::new(file), points, results, format, units)
        .with_context(|| format!("Failed to write results to: {}", path.display()))
}

/// Write a mesh in the JSON array format read by the importer.
pub fn export_mesh(path: impl AsRef<Path>, mesh: &MeshSource) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create mesh file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, mesh)
        .with_context(|| format!("Failed to write mesh to: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush mesh to: {}", path.display()))
}

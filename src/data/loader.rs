use std::path::{Path, PathBuf};

use crate::error::{Result, WorkupError};

use super::model::{
    display_label, SampleCategory, SampleDimensions, Table, TensileSample, ThermalSample,
};

/// Column names written by the TGA/DSC instrument export.
pub const TEMPERATURE_COLUMN: &str = "°C";
pub const HEAT_FLOW_COLUMN: &str = "W/g";
pub const MASS_PERCENT_COLUMN: &str = "%";

/// Load is exported in N/cm²-equivalent units once divided by the area in cm².
const N_PER_CM2_TO_N_PER_MM2: f64 = 0.1;

// ---------------------------------------------------------------------------
// Directory listing
// ---------------------------------------------------------------------------

/// List the regular files in `dir` with the given extension, sorted by name.
pub fn list_sample_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(WorkupError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Delimited table reader
// ---------------------------------------------------------------------------

/// Read a delimited numeric table, skipping `header_rows` lines of preamble.
///
/// The line after the preamble holds the column names. Cells that do not
/// parse as numbers are kept as missing values rather than rejected.
pub fn read_table(path: &Path, header_rows: usize, delimiter: u8) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    let text = decode_text(bytes);

    let mut lines = text.split_inclusive('\n');
    for _ in 0..header_rows {
        if lines.next().is_none() {
            return Err(WorkupError::TruncatedPreamble {
                path: path.to_path_buf(),
                header_rows,
            });
        }
    }
    let body: String = lines.collect();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(WorkupError::TruncatedPreamble {
            path: path.to_path_buf(),
            header_rows,
        });
    }

    let mut table = Table::new(headers);
    for result in reader.records() {
        let record = result?;
        table.push_row(record.iter().map(parse_cell));
    }

    log::debug!(
        "{}: {} rows, {} missing cells",
        path.display(),
        table.len(),
        table.missing_cells()
    );
    Ok(table)
}

/// Instrument exports are not always UTF-8; fall back to Latin-1 so a bare
/// degree sign still decodes to `°`.
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Unparseable cells and literal `NaN` are both missing.
fn parse_cell(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

// ---------------------------------------------------------------------------
// Sample loaders
// ---------------------------------------------------------------------------

/// Load one TGA/DSC export (comma-delimited).
pub fn load_thermal_sample(path: &Path, header_rows: usize) -> Result<ThermalSample> {
    let table = read_table(path, header_rows, b',')?;
    let stem = file_stem(path);

    Ok(ThermalSample {
        label: display_label(&stem),
        category: SampleCategory::from_stem(&stem),
        temperature: table.require(TEMPERATURE_COLUMN, path)?,
        heat_flow: table.require(HEAT_FLOW_COLUMN, path)?,
        mass_percent: table.require(MASS_PERCENT_COLUMN, path)?,
    })
}

/// Names of the load and strain columns in a tensile export.
#[derive(Debug, Clone, Copy)]
pub struct TensileColumns<'a> {
    pub load: &'a str,
    pub strain: &'a str,
}

/// Load one tensile export (tab-delimited) and convert load to stress.
pub fn load_tensile_sample(
    path: &Path,
    header_rows: usize,
    columns: TensileColumns<'_>,
    dimensions: SampleDimensions,
) -> Result<TensileSample> {
    let table = read_table(path, header_rows, b'\t')?;
    let load = table.require(columns.load, path)?;
    let strain = table.require(columns.strain, path)?;

    let area = dimensions.area_cm2();
    let stress = load
        .iter()
        .map(|l| l.map(|l| l / area * N_PER_CM2_TO_N_PER_MM2))
        .collect();

    Ok(TensileSample {
        name: file_stem(path),
        strain,
        stress,
    })
}

use std::fmt;
use std::path::Path;

use crate::error::{Result, WorkupError};

/// One numeric column. `None` marks a cell that was empty or not a number.
pub type Series = Vec<Option<f64>>;

// ---------------------------------------------------------------------------
// Table – named numeric columns parsed from one delimited file
// ---------------------------------------------------------------------------

/// Column-major numeric table. All columns have `row_count` cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Header names exactly as they appear in the file.
    pub headers: Vec<String>,
    columns: Vec<Series>,
    row_count: usize,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        let columns = vec![Vec::new(); headers.len()];
        Table {
            headers,
            columns,
            row_count: 0,
        }
    }

    /// Append one row. Short rows are padded with missing cells, surplus
    /// cells beyond the header width are ignored.
    pub fn push_row<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut cells = cells.into_iter();
        for column in &mut self.columns {
            column.push(cells.next().flatten());
        }
        self.row_count += 1;
    }

    /// Look a column up by name. Surrounding whitespace in the header is
    /// ignored, so `"Load "` matches `"Load"`.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        let wanted = name.trim();
        self.headers
            .iter()
            .position(|h| h.trim() == wanted)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Like [`Table::column`] but a missing column is an error naming `path`.
    pub fn require(&self, name: &str, path: &Path) -> Result<Series> {
        self.column(name)
            .map(<[Option<f64>]>::to_vec)
            .ok_or_else(|| WorkupError::MissingColumn {
                path: path.to_path_buf(),
                column: name.trim().to_string(),
                available: self.headers.iter().map(|h| h.trim().to_string()).collect(),
            })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Total number of missing cells across all columns.
    pub fn missing_cells(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.iter().filter(|v| v.is_none()).count())
            .sum()
    }
}

// ---------------------------------------------------------------------------
// SampleCategory – resolved once from the file stem
// ---------------------------------------------------------------------------

/// Coating treatment of a thermal sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SampleCategory {
    Uncoated,
    CoatedLaser,
    CoatedOven,
    Unrecognized,
}

impl SampleCategory {
    /// Classify a sample from its file stem (`coated-laser`, `uncoated`, ...).
    /// Replicate suffixes are allowed, so `uncoated-2` is still `Uncoated`.
    pub fn from_stem(stem: &str) -> Self {
        let stem = stem.to_ascii_lowercase();
        if stem.starts_with("uncoated") {
            SampleCategory::Uncoated
        } else if stem.contains("laser") {
            SampleCategory::CoatedLaser
        } else if stem.contains("oven") {
            SampleCategory::CoatedOven
        } else {
            SampleCategory::Unrecognized
        }
    }
}

impl fmt::Display for SampleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleCategory::Uncoated => write!(f, "uncoated"),
            SampleCategory::CoatedLaser => write!(f, "coated-laser"),
            SampleCategory::CoatedOven => write!(f, "coated-oven"),
            SampleCategory::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Turn a file stem into a legend label: dashes become spaces, the first
/// letter is upper-cased and the rest lower-cased.
pub fn display_label(stem: &str) -> String {
    let spaced = stem.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// One TGA/DSC run. The three series are index-aligned.
#[derive(Debug, Clone)]
pub struct ThermalSample {
    pub label: String,
    pub category: SampleCategory,
    /// Temperature in °C (x axis of both panels).
    pub temperature: Series,
    /// Heat flow in W/g.
    pub heat_flow: Series,
    /// Remaining mass in %.
    pub mass_percent: Series,
}

impl ThermalSample {
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// One tensile specimen. `strain` and `stress` are index-aligned.
#[derive(Debug, Clone)]
pub struct TensileSample {
    pub name: String,
    /// Strain in mm/mm.
    pub strain: Series,
    /// Stress in N/mm².
    pub stress: Series,
}

/// Specimen cross-section used to turn load into stress.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleDimensions {
    pub thickness_cm: f64,
    pub width_cm: f64,
}

impl SampleDimensions {
    /// Cross-section area in cm².
    pub fn area_cm2(&self) -> f64 {
        self.thickness_cm * self.width_cm
    }
}

impl Default for SampleDimensions {
    fn default() -> Self {
        // 0.2725 cm thick, one inch wide
        SampleDimensions {
            thickness_cm: 0.2725,
            width_cm: 2.54,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_stem() {
        assert_eq!(SampleCategory::from_stem("uncoated"), SampleCategory::Uncoated);
        assert_eq!(SampleCategory::from_stem("Uncoated-2"), SampleCategory::Uncoated);
        assert_eq!(SampleCategory::from_stem("coated-laser"), SampleCategory::CoatedLaser);
        assert_eq!(SampleCategory::from_stem("Coated-Oven-2"), SampleCategory::CoatedOven);
        assert_eq!(SampleCategory::from_stem("reference"), SampleCategory::Unrecognized);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("coated-laser"), "Coated laser");
        assert_eq!(display_label("UNCOATED"), "Uncoated");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn test_table_pads_short_rows() {
        let mut table = Table::new(vec!["a".into(), "b ".into()]);
        table.push_row([Some(1.0)]);
        table.push_row([Some(2.0), None, Some(9.0)]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.column("a"), Some(&[Some(1.0), Some(2.0)][..]));
        assert_eq!(table.column("b"), Some(&[None, None][..]));
        assert_eq!(table.missing_cells(), 2);
    }

    #[test]
    fn test_require_reports_available_columns() {
        let table = Table::new(vec!["x".into()]);
        let err = table.require("y", Path::new("f.csv")).unwrap_err();
        match err {
            WorkupError::MissingColumn { column, available, .. } => {
                assert_eq!(column, "y");
                assert_eq!(available, vec!["x".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

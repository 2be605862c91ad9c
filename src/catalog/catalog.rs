use super::song::{Song, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Cell values treated as "no value", on top of the empty string.
const MISSING_VALUE_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not open catalog file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read catalog header: {0}")]
    Header(#[source] csv::Error),

    #[error("Catalog is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed catalog row at line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Catalog row at line {line} has {found} fields, the header has {expected}")]
    ExtraFields {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Non-fatal issues found while building the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    MissingValue { line: u64, column: String },
}

#[derive(Debug)]
pub struct CatalogBuildResult {
    pub catalog: Catalog,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    dropped_rows: usize,
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_VALUE_MARKERS.contains(&cell)
}

fn check_header(headers: &StringRecord) -> Result<(), CatalogError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.trim() == **required))
        .map(|s| s.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::MissingColumns(missing))
    }
}

/// A short row is missing every trailing column it does not have.
fn first_missing_column(headers: &StringRecord, record: &StringRecord) -> Option<String> {
    record
        .iter()
        .position(is_missing)
        .or_else(|| (record.len() < headers.len()).then_some(record.len()))
        .map(|index| headers.get(index).unwrap_or_default().to_string())
}

impl Catalog {
    pub fn new(songs: Vec<Song>) -> Catalog {
        Catalog {
            songs,
            dropped_rows: 0,
        }
    }

    pub fn build(path: &Path) -> Result<CatalogBuildResult, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Reads a catalog from CSV. Rows with any missing cell, including rows
    /// cut short before the last column, are dropped and reported as
    /// problems. Rows longer than the header and values of the wrong type
    /// are errors.
    pub fn from_reader<R: Read>(source: R) -> Result<CatalogBuildResult, CatalogError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(source);
        let headers = reader.headers().map_err(CatalogError::Header)?.clone();
        check_header(&headers)?;

        let mut songs = Vec::new();
        let mut problems = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| CatalogError::Malformed {
                line: source.position().map(|p| p.line()).unwrap_or_default(),
                source,
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() > headers.len() {
                return Err(CatalogError::ExtraFields {
                    line,
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            if let Some(column) = first_missing_column(&headers, &record) {
                problems.push(Problem::MissingValue { line, column });
                continue;
            }

            let song: Song = record
                .deserialize(Some(&headers))
                .map_err(|source| CatalogError::Malformed { line, source })?;
            songs.push(song);
        }

        Ok(CatalogBuildResult {
            catalog: Catalog {
                songs,
                dropped_rows: problems.len(),
            },
            problems,
        })
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter_songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    pub fn get_songs_count(&self) -> usize {
        self.songs.len()
    }

    /// Number of source rows discarded because of missing values.
    pub fn get_dropped_rows_count(&self) -> usize {
        self.dropped_rows
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

use super::{Catalog, LoadCatalogProblem};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Upper bound on how many individual dropped rows get logged.
const MAX_LOGGED_PROBLEMS: usize = 20;

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    info!("Loading catalog from {}...", path.display());

    let catalog_result = Catalog::build(path)
        .with_context(|| format!("Could not load catalog from {}", path.display()))?;
    let problems = catalog_result.problems;
    let catalog = catalog_result.catalog;

    if !problems.is_empty() {
        warn!(
            "Dropped {} rows with missing values from the catalog.",
            problems.len()
        );
        for problem in problems.iter().take(MAX_LOGGED_PROBLEMS) {
            match problem {
                LoadCatalogProblem::MissingValue { line, column } => {
                    debug!("- line {}: no value for \"{}\"", line, column)
                }
            }
        }
    }

    if catalog.is_empty() {
        warn!("Catalog at {} has no usable songs.", path.display());
    }

    info!("Catalog has {} songs.", catalog.get_songs_count());
    Ok(catalog)
}

mod catalog;
mod load;
mod song;

pub use catalog::{Catalog, CatalogBuildResult, CatalogError, Problem as LoadCatalogProblem};
pub use load::load_catalog;
pub use song::{Song, REQUIRED_COLUMNS};

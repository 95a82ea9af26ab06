use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::core::{Catalog, CatalogError};
use crate::models::{Hotel, RegionGranularity};

/// Errors that can occur while loading the bundled catalog
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog rejected: {0}")]
    Invalid(#[from] CatalogError),
}

/// On-disk shape: `{ "hotels": [...] }`
#[derive(Debug, Deserialize)]
struct CatalogFile {
    hotels: Vec<Hotel>,
}

/// Parse and validate a catalog document
pub fn parse_catalog(json: &str, granularity: RegionGranularity) -> Result<Catalog, LoadError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    Ok(Catalog::from_hotels(file.hotels, granularity)?)
}

/// Read the catalog file once at startup
pub async fn load_catalog<P: AsRef<Path>>(path: P, granularity: RegionGranularity) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&json, granularity)?;
    tracing::info!(
        "Loaded {} hotels in {} regions from {}",
        catalog.len(),
        catalog.index().unique_regions().len(),
        path.display()
    );
    Ok(catalog)
}

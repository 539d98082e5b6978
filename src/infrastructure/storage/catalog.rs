use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::shared::errors::ConfigError;
use crate::shared::types::{Catalog, Category, PlatformRecord};

const DEFAULT_ICON: &str = "📦";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    // Kept as a JSON map so category order follows the file
    #[serde(default)]
    categories: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: Option<String>,
    icon: Option<String>,
    #[serde(default)]
    platforms: Vec<PlatformEntry>,
}

#[derive(Debug, Deserialize)]
struct PlatformEntry {
    name: String,
    #[serde(default)]
    monthly_price: Option<f64>,
}

/// Reads the category → platform → price catalog
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> Result<Catalog, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Catalog, ConfigError> {
        let file: CatalogFile =
            serde_json::from_str(content).map_err(|e| ConfigError::InvalidCatalog(e.to_string()))?;

        let mut categories = Vec::with_capacity(file.categories.len());
        for (id, raw) in file.categories {
            let entry: CategoryEntry = serde_json::from_value(raw)
                .map_err(|e| ConfigError::InvalidCatalog(format!("category `{}`: {}", id, e)))?;

            let name = entry.name.filter(|n| !n.is_empty()).unwrap_or_else(|| id.clone());
            let platforms = entry
                .platforms
                .into_iter()
                .map(|p| PlatformRecord::new(p.name, name.clone(), p.monthly_price.unwrap_or(0.0)))
                .collect();

            categories.push(Category {
                id,
                name,
                icon: entry.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
                platforms,
            });
        }

        Ok(Catalog { categories })
    }
}

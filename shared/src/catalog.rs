//! Crop catalog
//!
//! The catalog is loaded once and shared read-only. It is an injected value
//! rather than a global so tests and deployments can substitute their own
//! crop lists.

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use thiserror::Error;

use crate::models::Crop;
use crate::validation::validate_npk_ratio;

/// Catalog bundled with the crate
const BUILTIN_CATALOG_JSON: &str = include_str!("../data/crops.json");

/// Errors raised while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate crop id {0}")]
    DuplicateId(u32),

    #[error("Invalid crop {id}: {reason}")]
    InvalidCrop { id: u32, reason: &'static str },
}

/// Immutable, cheaply cloneable list of crops
#[derive(Debug, Clone)]
pub struct Catalog {
    crops: Arc<[Crop]>,
}

impl Catalog {
    /// Default catalog of common Indian field crops
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    /// Parse and validate a JSON array of crops
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let crops: Vec<Crop> = serde_json::from_str(json)?;
        Self::from_crops(crops)
    }

    /// Validate and wrap an existing crop list
    pub fn from_crops(crops: Vec<Crop>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(crops.len());
        for crop in &crops {
            if !seen.insert(crop.id) {
                return Err(CatalogError::DuplicateId(crop.id));
            }
            validate_crop(crop)?;
        }
        Ok(Self {
            crops: crops.into(),
        })
    }

    pub fn get(&self, id: u32) -> Option<&Crop> {
        self.crops.iter().find(|c| c.id == id)
    }

    /// Case-insensitive substring match on the crop name.
    /// An empty query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Crop> + 'a {
        let needle = query.trim().to_lowercase();
        self.crops
            .iter()
            .filter(move |c| c.name.to_lowercase().contains(&needle))
    }
}

impl Deref for Catalog {
    type Target = [Crop];

    fn deref(&self) -> &[Crop] {
        &self.crops
    }
}

fn validate_crop(crop: &Crop) -> Result<(), CatalogError> {
    let invalid = |reason| CatalogError::InvalidCrop {
        id: crop.id,
        reason,
    };

    if crop.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if crop.soil_type.trim().is_empty() {
        return Err(invalid("soil type is empty"));
    }
    if !(crop.yield_per_acre.is_finite() && crop.yield_per_acre > 0.0) {
        return Err(invalid("yield must be positive"));
    }
    validate_npk_ratio(&crop.npk_ratio).map_err(invalid)?;
    Ok(())
}

//! Listing indexer
//!
//! Turns raw listings into indexed records: exclusion filters first, then a
//! manual override for the listing id if one exists, otherwise the classifier.

use crate::classifier::ProductClassifier;
use crate::config::{BatchConfig, FilterConfig};
use crate::context::Classification;
use crate::exclusion::{is_custom_order_listing, is_tip_listing};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedListing {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategories: Vec<String>,
}

impl IndexedListing {
    fn new(listing: &Listing, classification: Classification) -> Self {
        IndexedListing {
            id: listing.id.clone(),
            name: listing.name.clone(),
            description: listing.description.clone(),
            category: classification.primary,
            subcategories: classification.subcategories,
        }
    }
}

/// Hand-curated classifications keyed by listing id. Applied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualOverrides {
    entries: HashMap<String, Classification>,
}

impl ManualOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read overrides file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let overrides: ManualOverrides = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON overrides in {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML overrides in {}", path.display()))?
        };

        log::info!(
            "Loaded {} manual overrides from {}",
            overrides.len(),
            path.display()
        );
        Ok(overrides)
    }

    pub fn insert(&mut self, id: &str, classification: Classification) {
        self.entries.insert(id.to_string(), classification);
    }

    pub fn get(&self, id: &str) -> Option<&Classification> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone)]
pub struct Indexer {
    classifier: Arc<ProductClassifier>,
    overrides: Arc<ManualOverrides>,
    filters: FilterConfig,
}

impl Indexer {
    pub fn new(
        classifier: Arc<ProductClassifier>,
        overrides: ManualOverrides,
        filters: FilterConfig,
    ) -> Self {
        Self {
            classifier,
            overrides: Arc::new(overrides),
            filters,
        }
    }

    /// Whether the configured exclusion filters drop this listing.
    pub fn is_excluded(&self, listing: &Listing) -> bool {
        let name = listing.name.as_deref();
        let description = listing.description.as_deref();

        if self.filters.skip_tips && is_tip_listing(name, description) {
            log::debug!("Skipping tip listing {}", listing.id);
            return true;
        }
        if self.filters.skip_custom_orders && is_custom_order_listing(name, description) {
            log::debug!("Skipping custom order listing {}", listing.id);
            return true;
        }
        false
    }

    /// `None` for excluded listings.
    pub fn index(&self, listing: &Listing) -> Option<IndexedListing> {
        if self.is_excluded(listing) {
            return None;
        }

        let classification = match self.overrides.get(&listing.id) {
            Some(manual) => {
                log::debug!("Using manual override for listing {}", listing.id);
                manual.clone()
            }
            None => self
                .classifier
                .classify(listing.name.as_deref(), listing.description.as_deref()),
        };

        Some(IndexedListing::new(listing, classification))
    }

    /// Index many listings on blocking worker threads. Output keeps input
    /// order; excluded listings are left out.
    pub async fn index_batch(
        &self,
        listings: Vec<Listing>,
        batch: &BatchConfig,
    ) -> Result<Vec<IndexedListing>> {
        let chunk_size = batch.chunk_size.max(1);
        let workers = batch.workers.max(1);
        let chunks: Vec<Vec<Listing>> = listings
            .chunks(chunk_size)
            .map(|chunk| chunk.to_vec())
            .collect();

        log::info!(
            "Indexing {} listings in {} chunks with {} workers",
            listings.len(),
            chunks.len(),
            workers
        );

        let mut indexed = Vec::with_capacity(listings.len());
        // Run up to `workers` chunks at a time; join in spawn order.
        for wave in chunks.chunks(workers) {
            let handles: Vec<_> = wave
                .iter()
                .cloned()
                .map(|chunk| {
                    let indexer = self.clone();
                    tokio::task::spawn_blocking(move || {
                        chunk
                            .iter()
                            .filter_map(|listing| indexer.index(listing))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                let records = handle.await.context("Indexing worker failed")?;
                indexed.extend(records);
            }
        }

        Ok(indexed)
    }
}

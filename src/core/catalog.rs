use std::collections::{HashMap, HashSet};
use thiserror::Error;
use crate::core::distance::CoordinateError;
use crate::models::{Hotel, RegionGranularity, Suggestion, SuggestionKind};

const MAX_REGION_SUGGESTIONS: usize = 3;
const MAX_ADDRESS_SUGGESTIONS: usize = 2;
const MAX_NAME_SUGGESTIONS: usize = 3;

/// Lookup projections derived from the catalog
///
/// Built once when the catalog is loaded; drives filter chips and search
/// suggestions.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    granularity: RegionGranularity,
    unique_regions: Vec<String>,
    region_counts: HashMap<String, usize>,
    all_addresses: Vec<String>,
    all_names: Vec<String>,
}

impl CatalogIndex {
    pub fn build(hotels: &[Hotel], granularity: RegionGranularity) -> Self {
        let mut seen = HashSet::new();
        let mut unique_regions = Vec::new();
        let mut region_counts: HashMap<String, usize> = HashMap::new();

        for hotel in hotels {
            let region = granularity.region_of(hotel);
            if seen.insert(region) {
                unique_regions.push(region.to_string());
            }
            *region_counts.entry(region.to_string()).or_default() += 1;
        }

        Self {
            granularity,
            unique_regions,
            region_counts,
            all_addresses: hotels.iter().map(|h| h.address.clone()).collect(),
            all_names: hotels.iter().map(|h| h.name.trim().to_string()).collect(),
        }
    }

    pub fn granularity(&self) -> RegionGranularity {
        self.granularity
    }

    /// Distinct regions in first-seen order
    pub fn unique_regions(&self) -> &[String] {
        &self.unique_regions
    }

    pub fn region_count(&self, region: &str) -> usize {
        self.region_counts.get(region).copied().unwrap_or(0)
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.region_counts.contains_key(region)
    }

    /// Canonical spelling of a region matched case-insensitively
    pub fn find_region(&self, text: &str) -> Option<&str> {
        let needle = text.trim().to_lowercase();
        self.unique_regions
            .iter()
            .find(|r| r.to_lowercase() == needle)
            .map(String::as_str)
    }

    pub fn all_addresses(&self) -> &[String] {
        &self.all_addresses
    }

    pub fn all_names(&self) -> &[String] {
        &self.all_names
    }

    /// Search-box suggestions: regions first, then addresses, then names
    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let matching = |values: &[String], limit: usize, kind: SuggestionKind| -> Vec<Suggestion> {
            values
                .iter()
                .filter(|v| v.to_lowercase().contains(&needle))
                .take(limit)
                .map(|v| Suggestion { label: v.clone(), kind })
                .collect()
        };

        let mut suggestions = matching(&self.unique_regions, MAX_REGION_SUGGESTIONS, SuggestionKind::Region);
        suggestions.extend(matching(&self.all_addresses, MAX_ADDRESS_SUGGESTIONS, SuggestionKind::Place));
        suggestions.extend(matching(&self.all_names, MAX_NAME_SUGGESTIONS, SuggestionKind::Place));
        suggestions
    }
}

/// Rejected catalog records
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Hotel with empty id at position {0}")]
    MissingId(usize),

    #[error("Duplicate hotel id: {0}")]
    DuplicateId(String),

    #[error("Hotel {id} has invalid coordinates: {source}")]
    InvalidCoordinates {
        id: String,
        #[source]
        source: CoordinateError,
    },

    #[error("Hotel {id} has invalid {field}: {value}")]
    InvalidField {
        id: String,
        field: &'static str,
        value: f64,
    },
}

/// The immutable hotel catalog and its index
#[derive(Debug, Clone)]
pub struct Catalog {
    hotels: Vec<Hotel>,
    by_id: HashMap<String, usize>,
    index: CatalogIndex,
}

impl Catalog {
    /// Validate the records and build the index
    pub fn from_hotels(hotels: Vec<Hotel>, granularity: RegionGranularity) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(hotels.len());

        for (position, hotel) in hotels.iter().enumerate() {
            if hotel.id.trim().is_empty() {
                return Err(CatalogError::MissingId(position));
            }
            hotel.coordinates.validate().map_err(|source| CatalogError::InvalidCoordinates {
                id: hotel.id.clone(),
                source,
            })?;
            if !(0.0..=5.0).contains(&hotel.rating) {
                return Err(CatalogError::InvalidField {
                    id: hotel.id.clone(),
                    field: "rating",
                    value: hotel.rating,
                });
            }
            if !hotel.price.is_finite() || hotel.price < 0.0 {
                return Err(CatalogError::InvalidField {
                    id: hotel.id.clone(),
                    field: "price",
                    value: hotel.price,
                });
            }
            if hotel.coordinates.is_null_island() {
                tracing::warn!("Hotel {} is placed at (0, 0), check its coordinates", hotel.id);
            }
            if by_id.insert(hotel.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(hotel.id.clone()));
            }
        }

        let index = CatalogIndex::build(&hotels, granularity);
        Ok(Self { hotels, by_id, index })
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn hotel(&self, id: &str) -> Option<&Hotel> {
        self.by_id.get(id).map(|&i| &self.hotels[i])
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

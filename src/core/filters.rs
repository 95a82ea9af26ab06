use crate::models::{Hotel, RegionGranularity};

/// Check if a hotel matches free text
///
/// `needle` must already be lowercased. An empty needle matches everything;
/// otherwise any one of name, state, city or address containing it suffices.
#[inline]
pub fn matches_text(hotel: &Hotel, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [&hotel.name, &hotel.state, &hotel.city, &hotel.address]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Check if a hotel belongs to a region (exact, case-sensitive)
#[inline]
pub fn matches_region(hotel: &Hotel, region: &str, granularity: RegionGranularity) -> bool {
    granularity.region_of(hotel) == region
}

/// One match criterion
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Lowercased substring across the text fields
    Text(String),
    Region {
        region: String,
        granularity: RegionGranularity,
    },
}

impl Criterion {
    #[inline]
    pub fn matches(&self, hotel: &Hotel) -> bool {
        match self {
            Criterion::Text(needle) => matches_text(hotel, needle),
            Criterion::Region { region, granularity } => matches_region(hotel, region, *granularity),
        }
    }
}

/// Conjunction of criteria; an empty set matches every hotel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchCriteria {
    criteria: Vec<Criterion>,
}

impl MatchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text criterion; blank queries add nothing
    pub fn with_text(mut self, query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        if !needle.is_empty() {
            self.criteria.push(Criterion::Text(needle));
        }
        self
    }

    pub fn with_region(mut self, region: Option<&str>, granularity: RegionGranularity) -> Self {
        if let Some(region) = region {
            self.criteria.push(Criterion::Region {
                region: region.to_string(),
                granularity,
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    #[inline]
    pub fn matches(&self, hotel: &Hotel) -> bool {
        self.criteria.iter().all(|c| c.matches(hotel))
    }
}

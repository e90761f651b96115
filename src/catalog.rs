//! Ingredient catalog: physical properties of malts and hops by name

use std::collections::HashMap;

use tracing::debug;

use crate::models::{HopSpec, MaltSpec};

/// Properties assumed for a malt missing from the catalog.
pub const DEFAULT_MALT_YIELD_PERCENT: f64 = 78.0;
pub const DEFAULT_MALT_COLOR_EBC: f64 = 4.0;

/// Alpha acid assumed for a hop missing from the catalog, by usage.
pub const DEFAULT_BITTERING_ALPHA_PERCENT: f64 = 10.0;
pub const DEFAULT_AROMA_ALPHA_PERCENT: f64 = 5.0;

/// Built-in malts: (name, extraction yield %, color EBC)
pub const BUILTIN_MALTS: &[(&str, f64, f64)] = &[
    ("Pilsner", 78.0, 3.5),
    ("Pale Ale", 79.0, 6.5),
    ("Maris Otter", 78.0, 5.0),
    ("Munich", 76.0, 15.0),
    ("Vienna", 76.0, 8.0),
    ("Wheat", 80.0, 4.0),
    ("Carapils", 72.0, 3.0),
    ("Acidulated", 50.0, 4.0),
    ("Cara Ruby", 74.0, 50.0),
    ("Crystal 150", 70.0, 150.0),
    ("Chocolate", 65.0, 900.0),
    ("Roasted Barley", 65.0, 1200.0),
    ("Smoked", 77.0, 6.0),
    ("Biscuit", 75.0, 50.0),
];

/// Built-in hops: (name, alpha acid %)
pub const BUILTIN_HOPS: &[(&str, f64)] = &[
    ("Magnum", 12.0),
    ("Saaz", 3.5),
    ("Citra", 13.0),
    ("Amarillo", 9.0),
    ("Mosaic", 12.0),
    ("Galaxy", 14.0),
    ("Simcoe", 13.0),
    ("Chinook", 13.0),
    ("Mistral", 6.5),
    ("Hallertau Mittelfrueh", 4.0),
    ("Barbe Rouge", 8.0),
    ("Fuggles", 4.5),
    ("Cascade", 6.0),
    ("Tettnanger", 4.0),
];

/// Read-only lookup of malt and hop properties.
///
/// Never mutated after construction, so a single instance can be shared
/// between any number of concurrent recipe calculations.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    malts: HashMap<String, MaltSpec>,
    hops: HashMap<String, HopSpec>,
}

impl Catalog {
    pub fn new(malts: Vec<MaltSpec>, hops: Vec<HopSpec>) -> Self {
        Self {
            malts: malts.into_iter().map(|m| (m.name.clone(), m)).collect(),
            hops: hops.into_iter().map(|h| (h.name.clone(), h)).collect(),
        }
    }

    /// The catalog shipped with the calculator
    pub fn builtin() -> Self {
        Self::new(builtin_malts(), builtin_hops())
    }

    /// This catalog with every entry of `stored` added, stored entries
    /// winning on a name clash
    pub fn merged_with(mut self, stored: Catalog) -> Self {
        self.malts.extend(stored.malts);
        self.hops.extend(stored.hops);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.malts.is_empty() && self.hops.is_empty()
    }

    pub fn malt_count(&self) -> usize {
        self.malts.len()
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Look up a malt, falling back to a generic pale malt profile
    pub fn malt(&self, name: &str) -> MaltSpec {
        match self.malts.get(name) {
            Some(spec) => spec.clone(),
            None => {
                debug!(malt = name, "malt not in catalog, using default profile");
                MaltSpec {
                    name: name.to_string(),
                    extraction_yield_percent: DEFAULT_MALT_YIELD_PERCENT,
                    color_ebc: DEFAULT_MALT_COLOR_EBC,
                }
            }
        }
    }

    /// Look up a hop destined for the 60 minute addition
    pub fn bittering_hop(&self, name: &str) -> HopSpec {
        self.hop_or(name, DEFAULT_BITTERING_ALPHA_PERCENT)
    }

    /// Look up a hop destined for the late addition
    pub fn aroma_hop(&self, name: &str) -> HopSpec {
        self.hop_or(name, DEFAULT_AROMA_ALPHA_PERCENT)
    }

    fn hop_or(&self, name: &str, default_alpha: f64) -> HopSpec {
        match self.hops.get(name) {
            Some(spec) => spec.clone(),
            None => {
                debug!(hop = name, alpha = default_alpha, "hop not in catalog, using default alpha acid");
                HopSpec {
                    name: name.to_string(),
                    alpha_acid_percent: default_alpha,
                }
            }
        }
    }

    /// All malts, sorted by name
    pub fn malts(&self) -> Vec<&MaltSpec> {
        let mut list: Vec<_> = self.malts.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// All hops, sorted by name
    pub fn hops(&self) -> Vec<&HopSpec> {
        let mut list: Vec<_> = self.hops.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }
}

pub fn builtin_malts() -> Vec<MaltSpec> {
    BUILTIN_MALTS
        .iter()
        .map(|&(name, yield_percent, ebc)| MaltSpec {
            name: name.to_string(),
            extraction_yield_percent: yield_percent,
            color_ebc: ebc,
        })
        .collect()
}

pub fn builtin_hops() -> Vec<HopSpec> {
    BUILTIN_HOPS
        .iter()
        .map(|&(name, alpha)| HopSpec {
            name: name.to_string(),
            alpha_acid_percent: alpha,
        })
        .collect()
}

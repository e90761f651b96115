//! Data models for ingredients, brew targets and computed recipes

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaltSpec {
    pub name: String,
    pub extraction_yield_percent: f64,
    pub color_ebc: f64, // Linear contribution per kg per liter
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopSpec {
    pub name: String,
    pub alpha_acid_percent: f64,
}

/// Beer styles offered by the recipe form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumString,
    Display, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Style {
    Blonde,
    #[strum(to_string = "IPA")]
    #[serde(rename = "IPA")]
    Ipa,
    Stout,
    Amber,
    Wheat,
    Saison,
    Sour,
    Lager,
}

impl Style {
    pub fn description(self) -> &'static str {
        match self {
            Style::Blonde => "Golden, malty and approachable",
            Style::Ipa => "Hop-forward, bitter and aromatic",
            Style::Stout => "Black and roasty with coffee notes",
            Style::Amber => "Copper colored with caramel notes",
            Style::Wheat => "Hazy wheat beer with citrus hints",
            Style::Saison => "Rustic, dry and peppery",
            Style::Sour => "Tart and refreshing",
            Style::Lager => "Bottom-fermented and crisp",
        }
    }
}

/// Aroma descriptors a brewer can ask for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumString,
    Display, EnumIter,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum FlavorTag {
    Citrus,
    Tropical,
    Pine,
    Banana,
    Coffee,
    Chocolate,
    Caramel,
    Biscuit,
    Smoked,
    #[strum(to_string = "spice", serialize = "spicy")]
    Spice,
    Floral,
    #[strum(to_string = "herbal", serialize = "herbaceous")]
    Herbal,
    #[strum(to_string = "red-fruit", serialize = "red fruit", serialize = "redfruit")]
    RedFruit,
}

impl FlavorTag {
    /// Plain word used when searching free-text tasting notes.
    pub fn keyword(self) -> &'static str {
        match self {
            FlavorTag::Citrus => "citrus",
            FlavorTag::Tropical => "tropical",
            FlavorTag::Pine => "pine",
            FlavorTag::Banana => "banana",
            FlavorTag::Coffee => "coffee",
            FlavorTag::Chocolate => "chocolate",
            FlavorTag::Caramel => "caramel",
            FlavorTag::Biscuit => "biscuit",
            FlavorTag::Smoked => "smoked",
            FlavorTag::Spice => "spice",
            FlavorTag::Floral => "floral",
            FlavorTag::Herbal => "herbal",
            FlavorTag::RedFruit => "red fruit",
        }
    }
}

/// Bitterness tiers of the recipe form, each standing for a fixed IBU target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BitternessLevel {
    #[strum(to_string = "minimal", serialize = "none")]
    Minimal,
    Light,
    #[default]
    Medium,
    Strong,
    Extreme,
}

impl BitternessLevel {
    pub fn ibu(self) -> f64 {
        match self {
            BitternessLevel::Minimal => 5.0,
            BitternessLevel::Light => 15.0,
            BitternessLevel::Medium => 30.0,
            BitternessLevel::Strong => 50.0,
            BitternessLevel::Extreme => 80.0,
        }
    }
}

/// What the brewer asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeTarget {
    pub batch_volume_liters: f64,
    pub target_alcohol_percent: f64,
    pub target_bitterness_units: f64,
    pub style: Style,
    pub flavor_tags: BTreeSet<FlavorTag>,
}

impl RecipeTarget {
    pub fn new(style: Style, batch_volume_liters: f64, target_alcohol_percent: f64) -> Self {
        Self {
            batch_volume_liters,
            target_alcohol_percent,
            target_bitterness_units: BitternessLevel::default().ibu(),
            style,
            flavor_tags: BTreeSet::new(),
        }
    }

    pub fn with_bitterness(mut self, ibu: f64) -> Self {
        self.target_bitterness_units = ibu;
        self
    }

    pub fn with_flavors(mut self, tags: impl IntoIterator<Item = FlavorTag>) -> Self {
        self.flavor_tags.extend(tags);
        self
    }
}

/// Ingredients chosen for a style and flavor profile, resolved against a catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientSelection {
    pub base_malt: MaltSpec,
    pub specialty_malt: MaltSpec,
    pub base_mass_ratio: f64,
    pub specialty_mass_ratio: f64,
    pub yeast_strain: String,
    pub bittering_hop: HopSpec,
    pub aroma_hop: HopSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrainAddition {
    pub malt: MaltSpec,
    pub mass_kg: f64,
    pub mass_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum HopRole {
    Bittering,
    Aroma,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HopAddition {
    pub hop: HopSpec,
    pub mass_grams: f64,
    pub boil_time_minutes: f64,
    pub role: HopRole,
}

/// Result of a recipe calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub target_original_gravity: f64,
    pub efficiency: f64,
    pub grain_bill: Vec<GrainAddition>,
    pub total_grain_kg: f64,
    pub estimated_color_ebc: f64,
    pub hop_schedule: Vec<HopAddition>,
    pub strike_water_liters: f64,
    pub rinse_water_liters: f64,
    pub yeast_strain: String,
}

/// A beer sold commercially, used to suggest something similar to taste
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialBeer {
    pub name: String,
    pub brewery: String,
    pub style: Style,
    pub abv: f64,
    pub flavor_notes: String,
}

//! Ingredient selection policy
//!
//! A style picks a baseline grain bill, yeast and hops. Flavor tags then
//! override parts of that baseline through an ordered rule list; a later
//! matching rule replaces whatever an earlier one chose.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::models::{FlavorTag, IngredientSelection, Style};

/// Ingredient names and ratios before catalog resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientChoice {
    pub base_malt: &'static str,
    pub specialty_malt: &'static str,
    pub base_mass_ratio: f64,
    pub specialty_mass_ratio: f64,
    pub yeast_strain: &'static str,
    pub bittering_hop: &'static str,
    pub aroma_hop: &'static str,
}

/// Used for any style without its own row in [`STYLE_TABLE`].
pub const DEFAULT_CHOICE: IngredientChoice = IngredientChoice {
    base_malt: "Pilsner",
    specialty_malt: "Wheat",
    base_mass_ratio: 0.90,
    specialty_mass_ratio: 0.10,
    yeast_strain: "US-05",
    bittering_hop: "Magnum",
    aroma_hop: "Saaz",
};

const fn style_row(
    base_malt: &'static str,
    specialty_malt: &'static str,
    yeast_strain: &'static str,
    base_mass_ratio: f64,
    specialty_mass_ratio: f64,
) -> IngredientChoice {
    IngredientChoice {
        base_malt,
        specialty_malt,
        base_mass_ratio,
        specialty_mass_ratio,
        yeast_strain,
        ..DEFAULT_CHOICE
    }
}

pub const STYLE_TABLE: &[(Style, IngredientChoice)] = &[
    (Style::Ipa, style_row("Pale Ale", "Carapils", "Verdant IPA", 0.93, 0.07)),
    (Style::Stout, style_row("Maris Otter", "Chocolate", "S-04", 0.85, 0.15)),
    (Style::Amber, style_row("Pale Ale", "Cara Ruby", "T-58", 0.85, 0.15)),
    (Style::Wheat, style_row("Pilsner", "Wheat", "WB-06", 0.60, 0.40)),
    (Style::Saison, style_row("Pilsner", "Munich", "Belle Saison", 0.90, 0.10)),
    (Style::Sour, style_row("Pilsner", "Acidulated", "Philly Sour", 0.90, 0.10)),
    (Style::Lager, style_row("Pilsner", "Vienna", "W-34/70", 0.90, 0.10)),
];

#[derive(Debug, Clone, Copy)]
enum Condition {
    Tag(FlavorTag),
    TagUnlessStyle(FlavorTag, Style),
}

impl Condition {
    fn holds(self, style: Style, tags: &BTreeSet<FlavorTag>) -> bool {
        match self {
            Condition::Tag(tag) => tags.contains(&tag),
            Condition::TagUnlessStyle(tag, excluded) => style != excluded && tags.contains(&tag),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Override {
    BaseMalt(&'static str),
    SpecialtyMalt(&'static str),
}

impl Override {
    fn apply(self, choice: &mut IngredientChoice) {
        match self {
            Override::BaseMalt(name) => choice.base_malt = name,
            Override::SpecialtyMalt(name) => choice.specialty_malt = name,
        }
    }
}

/// Malt overrides, applied in order. Every matching rule fires.
const MALT_RULES: &[(Condition, Override)] = &[
    (Condition::Tag(FlavorTag::Smoked), Override::BaseMalt("Smoked")),
    (Condition::Tag(FlavorTag::Biscuit), Override::SpecialtyMalt("Biscuit")),
    (
        Condition::TagUnlessStyle(FlavorTag::Caramel, Style::Amber),
        Override::SpecialtyMalt("Crystal 150"),
    ),
];

/// Aroma hop by flavor, highest priority first. Only the first match counts.
const AROMA_HOP_PRIORITY: &[(FlavorTag, &str)] = &[
    (FlavorTag::Citrus, "Citra"),
    (FlavorTag::Tropical, "Galaxy"),
    (FlavorTag::Pine, "Simcoe"),
    (FlavorTag::Floral, "Mistral"),
    (FlavorTag::Herbal, "Hallertau Mittelfrueh"),
    (FlavorTag::RedFruit, "Barbe Rouge"),
    (FlavorTag::Coffee, "Fuggles"),
];

/// Baseline ingredients for a style, before any flavor overrides
pub fn style_baseline(style: Style) -> IngredientChoice {
    STYLE_TABLE
        .iter()
        .find(|(s, _)| *s == style)
        .map(|(_, choice)| *choice)
        .unwrap_or(DEFAULT_CHOICE)
}

/// Pick ingredient names and ratios for a style and flavor profile
pub fn select_ingredients(style: Style, tags: &BTreeSet<FlavorTag>) -> IngredientChoice {
    let mut choice = style_baseline(style);

    for (condition, action) in MALT_RULES {
        if condition.holds(style, tags) {
            action.apply(&mut choice);
        }
    }

    if let Some((_, hop)) = AROMA_HOP_PRIORITY.iter().find(|(tag, _)| tags.contains(tag)) {
        choice.aroma_hop = *hop;
    }

    choice
}

impl IngredientChoice {
    /// Attach catalog properties to the chosen names
    pub fn resolve(&self, catalog: &Catalog) -> IngredientSelection {
        IngredientSelection {
            base_malt: catalog.malt(self.base_malt),
            specialty_malt: catalog.malt(self.specialty_malt),
            base_mass_ratio: self.base_mass_ratio,
            specialty_mass_ratio: self.specialty_mass_ratio,
            yeast_strain: self.yeast_strain.to_string(),
            bittering_hop: catalog.bittering_hop(self.bittering_hop),
            aroma_hop: catalog.aroma_hop(self.aroma_hop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn tags(list: &[FlavorTag]) -> BTreeSet<FlavorTag> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_ratios_sum_to_one_for_every_style() {
        for style in Style::iter() {
            let choice = style_baseline(style);
            let sum = choice.base_mass_ratio + choice.specialty_mass_ratio;
            assert!((sum - 1.0).abs() < 1e-9, "{style}: {sum}");
        }
    }

    #[test]
    fn test_blonde_uses_default_row() {
        assert_eq!(style_baseline(Style::Blonde), DEFAULT_CHOICE);
    }

    #[test]
    fn test_style_rows() {
        let stout = style_baseline(Style::Stout);
        assert_eq!(stout.base_malt, "Maris Otter");
        assert_eq!(stout.specialty_malt, "Chocolate");
        assert_eq!(stout.yeast_strain, "S-04");
        assert_eq!(stout.bittering_hop, "Magnum");
        assert_eq!(stout.aroma_hop, "Saaz");

        let wheat = style_baseline(Style::Wheat);
        assert_eq!(wheat.base_mass_ratio, 0.60);
        assert_eq!(wheat.yeast_strain, "WB-06");
    }

    #[test]
    fn test_citrus_overrides_style_aroma_hop() {
        let choice = select_ingredients(Style::Ipa, &tags(&[FlavorTag::Citrus]));
        assert_eq!(choice.aroma_hop, "Citra");
        assert_eq!(choice.base_malt, "Pale Ale");
    }

    #[test]
    fn test_caramel_overrides_specialty_except_for_amber() {
        let lager = select_ingredients(Style::Lager, &tags(&[FlavorTag::Caramel]));
        assert_eq!(lager.specialty_malt, "Crystal 150");

        let amber = select_ingredients(Style::Amber, &tags(&[FlavorTag::Caramel]));
        assert_eq!(amber.specialty_malt, "Cara Ruby");
    }

    #[test]
    fn test_caramel_rule_fires_after_biscuit() {
        let choice = select_ingredients(Style::Blonde, &tags(&[FlavorTag::Biscuit, FlavorTag::Caramel]));
        assert_eq!(choice.specialty_malt, "Crystal 150");

        let amber = select_ingredients(Style::Amber, &tags(&[FlavorTag::Biscuit, FlavorTag::Caramel]));
        assert_eq!(amber.specialty_malt, "Biscuit");
    }

    #[test]
    fn test_smoked_replaces_base_malt() {
        let choice = select_ingredients(Style::Stout, &tags(&[FlavorTag::Smoked]));
        assert_eq!(choice.base_malt, "Smoked");
        assert_eq!(choice.specialty_malt, "Chocolate");
        assert_eq!(choice.base_mass_ratio, 0.85);
    }

    #[test]
    fn test_aroma_hop_priority() {
        let choice = select_ingredients(Style::Blonde, &tags(&[FlavorTag::Coffee, FlavorTag::Pine]));
        assert_eq!(choice.aroma_hop, "Simcoe");

        let choice = select_ingredients(Style::Blonde, &tags(&[FlavorTag::Floral, FlavorTag::Tropical]));
        assert_eq!(choice.aroma_hop, "Galaxy");

        let choice = select_ingredients(Style::Blonde, &tags(&[FlavorTag::RedFruit, FlavorTag::Herbal]));
        assert_eq!(choice.aroma_hop, "Hallertau Mittelfrueh");

        let choice = select_ingredients(Style::Stout, &tags(&[FlavorTag::Coffee, FlavorTag::Chocolate]));
        assert_eq!(choice.aroma_hop, "Fuggles");
    }

    #[test]
    fn test_tags_without_rules_change_nothing() {
        let choice = select_ingredients(Style::Saison, &tags(&[FlavorTag::Banana, FlavorTag::Spice]));
        assert_eq!(choice, style_baseline(Style::Saison));
    }

    #[test]
    fn test_no_upper_bound_on_tags() {
        let all: BTreeSet<FlavorTag> = FlavorTag::iter().collect();
        let choice = select_ingredients(Style::Blonde, &all);
        assert_eq!(choice.base_malt, "Smoked");
        assert_eq!(choice.specialty_malt, "Crystal 150");
        assert_eq!(choice.aroma_hop, "Citra");
    }

    #[test]
    fn test_resolve_against_catalog() {
        let selection = select_ingredients(Style::Ipa, &tags(&[FlavorTag::Tropical])).resolve(&Catalog::builtin());
        assert_eq!(selection.base_malt.extraction_yield_percent, 79.0);
        assert_eq!(selection.specialty_malt.name, "Carapils");
        assert_eq!(selection.aroma_hop.alpha_acid_percent, 14.0);
        assert_eq!(selection.bittering_hop.alpha_acid_percent, 12.0);
        assert_eq!(selection.yeast_strain, "Verdant IPA");
    }
}

//! Recipe composition: turns a brew target into a complete recipe

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::RecipeError;
use crate::formulas::{self, BOIL_GRAVITY_FACTOR, DEFAULT_EFFICIENCY};
use crate::models::{GrainAddition, HopAddition, HopRole, Recipe, RecipeTarget};
use crate::selector;

/// The recipe form accepts at most this many flavor tags.
pub const MAX_FLAVOR_TAGS: usize = 2;

/// Shares of the bitterness target given to the 60 and 5 minute additions.
const BITTERING_SHARE: f64 = 0.8;
const AROMA_SHARE: f64 = 0.2;
const BITTERING_BOIL_MINUTES: f64 = 60.0;
const AROMA_BOIL_MINUTES: f64 = 5.0;

/// Liters of strike water per kg of grain.
const MASH_THICKNESS_L_PER_KG: f64 = 3.0;

/// Extra volume collected on top of the batch size to cover boil-off.
const BOIL_OFF_ALLOWANCE: f64 = 1.15;

/// Process parameters that are not part of the brewer's target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposerSettings {
    pub efficiency: f64,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            efficiency: DEFAULT_EFFICIENCY,
        }
    }
}

/// Reject targets the formulas cannot handle
pub fn validate_target(target: &RecipeTarget, settings: &ComposerSettings) -> Result<(), RecipeError> {
    if !target.batch_volume_liters.is_finite() || target.batch_volume_liters <= 0.0 {
        return Err(RecipeError::invalid(
            "batch volume",
            format!("must be greater than 0 L, got {}", target.batch_volume_liters),
        ));
    }
    if !target.target_alcohol_percent.is_finite() || target.target_alcohol_percent <= 0.0 {
        return Err(RecipeError::invalid(
            "alcohol",
            format!("must be greater than 0%, got {}", target.target_alcohol_percent),
        ));
    }
    if !target.target_bitterness_units.is_finite() || target.target_bitterness_units < 0.0 {
        return Err(RecipeError::invalid(
            "bitterness",
            format!("must be 0 IBU or more, got {}", target.target_bitterness_units),
        ));
    }
    if target.flavor_tags.len() > MAX_FLAVOR_TAGS {
        return Err(RecipeError::invalid(
            "flavor tags",
            format!("choose at most {MAX_FLAVOR_TAGS}, got {}", target.flavor_tags.len()),
        ));
    }
    if !(settings.efficiency > 0.0 && settings.efficiency <= 1.0) {
        return Err(RecipeError::invalid(
            "efficiency",
            format!("must be within (0, 1], got {}", settings.efficiency),
        ));
    }
    Ok(())
}

/// Compute a recipe for `target` using the default process settings
pub fn compose_recipe(target: &RecipeTarget, catalog: &Catalog) -> Result<Recipe, RecipeError> {
    compose_recipe_with(target, catalog, &ComposerSettings::default())
}

/// Compute a recipe for `target`
///
/// Either returns a complete recipe or fails before any formula runs.
pub fn compose_recipe_with(
    target: &RecipeTarget,
    catalog: &Catalog,
    settings: &ComposerSettings,
) -> Result<Recipe, RecipeError> {
    validate_target(target, settings)?;

    let selection = selector::select_ingredients(target.style, &target.flavor_tags).resolve(catalog);
    let volume = target.batch_volume_liters;

    let original_gravity = formulas::gravity_from_alcohol(target.target_alcohol_percent);
    let average_yield = selection.base_malt.extraction_yield_percent * selection.base_mass_ratio
        + selection.specialty_malt.extraction_yield_percent * selection.specialty_mass_ratio;
    let total_grain = formulas::grain_mass(original_gravity, volume, settings.efficiency, average_yield);

    debug!(
        style = %target.style,
        og = original_gravity,
        average_yield,
        total_grain,
        "sized grain bill"
    );

    let grain_bill = vec![
        GrainAddition {
            mass_kg: formulas::round_to_grain_granularity(total_grain * selection.base_mass_ratio),
            mass_ratio: selection.base_mass_ratio,
            malt: selection.base_malt,
        },
        GrainAddition {
            mass_kg: formulas::round_to_grain_granularity(total_grain * selection.specialty_mass_ratio),
            mass_ratio: selection.specialty_mass_ratio,
            malt: selection.specialty_malt,
        },
    ];
    let total_grain_kg: f64 = grain_bill.iter().map(|g| g.mass_kg).sum();

    let contributions: Vec<(f64, f64)> = grain_bill.iter().map(|g| (g.mass_kg, g.malt.color_ebc)).collect();
    let estimated_color_ebc = formulas::estimate_color(&contributions, volume);

    let boil_gravity = original_gravity * BOIL_GRAVITY_FACTOR;
    let bittering_ibu = target.target_bitterness_units * BITTERING_SHARE;
    let aroma_ibu = target.target_bitterness_units * AROMA_SHARE;

    let hop_schedule = vec![
        HopAddition {
            mass_grams: formulas::hop_mass(
                bittering_ibu,
                selection.bittering_hop.alpha_acid_percent,
                BITTERING_BOIL_MINUTES,
                volume,
                boil_gravity,
            ),
            boil_time_minutes: BITTERING_BOIL_MINUTES,
            role: HopRole::Bittering,
            hop: selection.bittering_hop,
        },
        HopAddition {
            mass_grams: formulas::hop_mass(
                aroma_ibu,
                selection.aroma_hop.alpha_acid_percent,
                AROMA_BOIL_MINUTES,
                volume,
                boil_gravity,
            ),
            boil_time_minutes: AROMA_BOIL_MINUTES,
            role: HopRole::Aroma,
            hop: selection.aroma_hop,
        },
    ];

    let strike_water_liters = total_grain_kg * MASH_THICKNESS_L_PER_KG;
    let rinse_water_liters = (volume * BOIL_OFF_ALLOWANCE + total_grain_kg - strike_water_liters).max(0.0);

    debug!(
        total_grain_kg,
        estimated_color_ebc, strike_water_liters, rinse_water_liters, "recipe composed"
    );

    Ok(Recipe {
        target_original_gravity: original_gravity,
        efficiency: settings.efficiency,
        grain_bill,
        total_grain_kg,
        estimated_color_ebc,
        hop_schedule,
        strike_water_liters,
        rinse_water_liters,
        yeast_strain: selection.yeast_strain,
    })
}

/// Format a recipe as a short readable listing
pub fn format_recipe(recipe: &Recipe) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Grains: {:.2} kg (eff. {:.0}% | EBC {:.0})\n",
        recipe.total_grain_kg,
        recipe.efficiency * 100.0,
        recipe.estimated_color_ebc.trunc()
    ));
    for grain in &recipe.grain_bill {
        output.push_str(&format!("  {:.2} kg  {}\n", grain.mass_kg, grain.malt.name));
    }

    output.push_str("Hops:\n");
    for addition in &recipe.hop_schedule {
        output.push_str(&format!(
            "  {:.0} g  {} ({} - {:.0} min)\n",
            addition.mass_grams.trunc(),
            addition.hop.name,
            addition.role,
            addition.boil_time_minutes
        ));
    }

    output.push_str(&format!("Yeast: {} (1 sachet)\n", recipe.yeast_strain));
    output
}

/// Headline numbers of a recipe
#[derive(Debug)]
pub struct RecipeSummary {
    pub original_gravity: f64,
    pub bitterness_ibu: f64,
    pub color_ebc: f64,
    pub total_grain_kg: f64,
    pub total_hops_g: f64,
    pub strike_water_liters: f64,
    pub rinse_water_liters: f64,
}

pub fn summarize_recipe(recipe: &Recipe, target: &RecipeTarget) -> RecipeSummary {
    RecipeSummary {
        original_gravity: recipe.target_original_gravity,
        bitterness_ibu: target.target_bitterness_units,
        color_ebc: recipe.estimated_color_ebc,
        total_grain_kg: recipe.total_grain_kg,
        total_hops_g: recipe.hop_schedule.iter().map(|h| h.mass_grams).sum(),
        strike_water_liters: recipe.strike_water_liters,
        rinse_water_liters: recipe.rinse_water_liters,
    }
}

impl std::fmt::Display for RecipeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Recipe Summary ===")?;
        writeln!(f, "OG:     {:.3}", self.original_gravity)?;
        writeln!(f, "IBU:    {:.0}", self.bitterness_ibu)?;
        writeln!(f, "EBC:    {:.0}", self.color_ebc.trunc())?;
        writeln!(f)?;
        writeln!(f, "Grain:  {:.2} kg", self.total_grain_kg)?;
        writeln!(f, "Hops:   {:.0} g", self.total_hops_g.trunc())?;
        writeln!(f)?;
        writeln!(f, "Water:")?;
        writeln!(f, "  Strike: {:.1} L", self.strike_water_liters)?;
        writeln!(f, "  Rinse:  {:.1} L", self.rinse_water_liters)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlavorTag, Style};
    use strum::IntoEnumIterator;

    fn ipa() -> RecipeTarget {
        RecipeTarget::new(Style::Ipa, 20.0, 6.0)
            .with_bitterness(50.0)
            .with_flavors([FlavorTag::Citrus])
    }

    #[test]
    fn test_compose_ipa() {
        let recipe = compose_recipe(&ipa(), &Catalog::builtin()).unwrap();

        assert!((recipe.target_original_gravity - 1.055714).abs() < 1e-6);
        assert_eq!(recipe.grain_bill.len(), 2);
        assert_eq!(recipe.grain_bill[0].malt.name, "Pale Ale");
        assert_eq!(recipe.grain_bill[1].malt.name, "Carapils");
        assert_eq!(recipe.hop_schedule[0].hop.name, "Magnum");
        assert_eq!(recipe.hop_schedule[0].role, HopRole::Bittering);
        assert_eq!(recipe.hop_schedule[0].boil_time_minutes, 60.0);
        assert_eq!(recipe.hop_schedule[1].hop.name, "Citra");
        assert_eq!(recipe.hop_schedule[1].role, HopRole::Aroma);
        assert_eq!(recipe.hop_schedule[1].boil_time_minutes, 5.0);
        assert_eq!(recipe.yeast_strain, "Verdant IPA");
    }

    #[test]
    fn test_grain_bill_follows_formulas() {
        let target = ipa();
        let recipe = compose_recipe(&target, &Catalog::builtin()).unwrap();

        let og = formulas::gravity_from_alcohol(6.0);
        let avg_yield = 79.0 * 0.93 + 72.0 * 0.07;
        let total = formulas::grain_mass(og, 20.0, 0.75, avg_yield);
        assert_eq!(recipe.grain_bill[0].mass_kg, formulas::round_to_grain_granularity(total * 0.93));
        assert_eq!(recipe.grain_bill[1].mass_kg, formulas::round_to_grain_granularity(total * 0.07));
        assert_eq!(
            recipe.total_grain_kg,
            recipe.grain_bill[0].mass_kg + recipe.grain_bill[1].mass_kg
        );
    }

    #[test]
    fn test_bitterness_split_80_20() {
        let recipe = compose_recipe(&ipa(), &Catalog::builtin()).unwrap();
        let boil_gravity = recipe.target_original_gravity * 0.85;
        let expected_bittering = formulas::hop_mass(40.0, 12.0, 60.0, 20.0, boil_gravity);
        let expected_aroma = formulas::hop_mass(10.0, 13.0, 5.0, 20.0, boil_gravity);
        assert_eq!(recipe.hop_schedule[0].mass_grams, expected_bittering);
        assert_eq!(recipe.hop_schedule[1].mass_grams, expected_aroma);
    }

    #[test]
    fn test_water_accounting() {
        let recipe = compose_recipe(&ipa(), &Catalog::builtin()).unwrap();
        assert!((recipe.strike_water_liters - recipe.total_grain_kg * 3.0).abs() < 1e-9);
        let expected_rinse = 20.0 * 1.15 + recipe.total_grain_kg - recipe.strike_water_liters;
        assert!((recipe.rinse_water_liters - expected_rinse.max(0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_rinse_water_never_negative() {
        // A very strong beer needs so much grain that strike water exceeds the collection volume
        let target = RecipeTarget::new(Style::Stout, 10.0, 40.0);
        let recipe = compose_recipe(&target, &Catalog::builtin()).unwrap();
        assert!(recipe.strike_water_liters > 10.0 * 1.15 + recipe.total_grain_kg);
        assert_eq!(recipe.rinse_water_liters, 0.0);
    }

    #[test]
    fn test_invariants_hold_for_all_styles() {
        let catalog = Catalog::builtin();
        for style in Style::iter() {
            for abv in [3.0, 6.0, 12.0] {
                let target = RecipeTarget::new(style, 20.0, abv);
                let recipe = compose_recipe(&target, &catalog).unwrap();
                let ratio_sum: f64 = recipe.grain_bill.iter().map(|g| g.mass_ratio).sum();
                assert!((ratio_sum - 1.0).abs() < 1e-9, "{style} {abv}");
                assert!(recipe.strike_water_liters >= 0.0);
                assert!(recipe.rinse_water_liters >= 0.0);
                assert!(recipe.grain_bill.iter().all(|g| g.mass_kg >= 0.0));
                assert!(recipe.hop_schedule.iter().all(|h| h.mass_grams >= 0.0));
            }
        }
    }

    #[test]
    fn test_zero_bitterness_gives_zero_hops() {
        let target = RecipeTarget::new(Style::Wheat, 20.0, 5.0).with_bitterness(0.0);
        let recipe = compose_recipe(&target, &Catalog::builtin()).unwrap();
        assert!(recipe.hop_schedule.iter().all(|h| h.mass_grams == 0.0));
    }

    #[test]
    fn test_composition_is_idempotent() {
        let catalog = Catalog::builtin();
        let target = ipa();
        let first = compose_recipe(&target, &catalog).unwrap();
        let second = compose_recipe(&target, &catalog).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.estimated_color_ebc.to_bits(),
            second.estimated_color_ebc.to_bits()
        );
    }

    #[test]
    fn test_invalid_targets_rejected() {
        let catalog = Catalog::builtin();

        let err = compose_recipe(&RecipeTarget::new(Style::Blonde, 0.0, 5.0), &catalog).unwrap_err();
        assert_eq!(err.field(), "batch volume");

        let err = compose_recipe(&RecipeTarget::new(Style::Blonde, 20.0, -1.0), &catalog).unwrap_err();
        assert_eq!(err.field(), "alcohol");

        let err = compose_recipe(&RecipeTarget::new(Style::Blonde, f64::NAN, 5.0), &catalog).unwrap_err();
        assert_eq!(err.field(), "batch volume");

        let target = RecipeTarget::new(Style::Blonde, 20.0, 5.0).with_bitterness(-3.0);
        assert_eq!(compose_recipe(&target, &catalog).unwrap_err().field(), "bitterness");

        let target = RecipeTarget::new(Style::Blonde, 20.0, 5.0).with_flavors([
            FlavorTag::Citrus,
            FlavorTag::Pine,
            FlavorTag::Floral,
        ]);
        assert_eq!(compose_recipe(&target, &catalog).unwrap_err().field(), "flavor tags");
    }

    #[test]
    fn test_invalid_efficiency_rejected() {
        let target = RecipeTarget::new(Style::Blonde, 20.0, 5.0);
        let settings = ComposerSettings { efficiency: 0.0 };
        let err = compose_recipe_with(&target, &Catalog::builtin(), &settings).unwrap_err();
        assert_eq!(err.field(), "efficiency");
    }

    #[test]
    fn test_higher_efficiency_needs_less_grain() {
        let target = RecipeTarget::new(Style::Lager, 20.0, 5.0);
        let catalog = Catalog::builtin();
        let normal = compose_recipe(&target, &catalog).unwrap();
        let efficient = compose_recipe_with(&target, &catalog, &ComposerSettings { efficiency: 0.9 }).unwrap();
        assert!(efficient.total_grain_kg < normal.total_grain_kg);
        assert_eq!(efficient.efficiency, 0.9);
    }

    #[test]
    fn test_unknown_ingredients_use_catalog_defaults() {
        let recipe = compose_recipe(&ipa(), &Catalog::default()).unwrap();
        assert_eq!(recipe.grain_bill[0].malt.extraction_yield_percent, 78.0);
        assert_eq!(recipe.hop_schedule[0].hop.alpha_acid_percent, 10.0);
        assert_eq!(recipe.hop_schedule[1].hop.alpha_acid_percent, 5.0);
    }

    #[test]
    fn test_format_and_summary() {
        let target = ipa();
        let recipe = compose_recipe(&target, &Catalog::builtin()).unwrap();

        let listing = format_recipe(&recipe);
        assert!(listing.contains("Pale Ale"));
        assert!(listing.contains("Citra (Aroma - 5 min)"));
        assert!(listing.contains("Yeast: Verdant IPA"));

        let summary = summarize_recipe(&recipe, &target).to_string();
        assert!(summary.contains("OG:     1.056"));
        assert!(summary.contains("IBU:    50"));
    }
}

//! One-page brew sheet rendered as plain text

use crate::models::{Recipe, RecipeTarget};

pub const MASH_TEMP_C: u32 = 67;
pub const MASH_MINUTES: u32 = 60;
pub const RINSE_TEMP_C: u32 = 75;
pub const BOIL_TEMP_C: u32 = 100;
pub const BOIL_MINUTES: u32 = 60;
pub const FERMENTATION_TEMP_C: u32 = 20;
pub const FERMENTATION_DAYS: u32 = 15;

const WIDTH: usize = 64;

fn profile_line(target: &RecipeTarget) -> String {
    if target.flavor_tags.is_empty() {
        return "Profile: classic".to_string();
    }
    let tags: Vec<String> = target.flavor_tags.iter().map(|t| t.to_string()).collect();
    format!("Profile: {}", tags.join(", "))
}

/// Render the brew sheet for a computed recipe
///
/// Hop weights are truncated to whole grams, matching what a kitchen
/// scale shows.
pub fn render_brew_sheet(target: &RecipeTarget, recipe: &Recipe) -> String {
    let mut output = String::new();
    let width = WIDTH;
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);

    output.push_str(&format!("{rule}\n"));
    output.push_str(&format!("{:^width$}\n", format!("Brew sheet: {}", target.style)));
    output.push_str(&format!("{:^width$}\n", profile_line(target)));
    output.push_str(&format!("{rule}\n"));
    output.push_str(&format!(
        "Vol: {}L | ABV: {}% | OG: {:.3} | IBU: {} | EBC: {} | Eff: {}%\n\n",
        target.batch_volume_liters,
        target.target_alcohol_percent,
        recipe.target_original_gravity,
        target.target_bitterness_units.trunc(),
        recipe.estimated_color_ebc.trunc(),
        (recipe.efficiency * 100.0).round()
    ));

    output.push_str("1. Grains & fermentables\n");
    output.push_str(&format!("{thin}\n"));
    output.push_str(&format!("{:>10}  {:<44}{:>6}\n", "Weight", "Malt", "%"));
    for grain in &recipe.grain_bill {
        output.push_str(&format!(
            "{:>10}  {:<44}{:>5.0}%\n",
            format!("{:.2} kg", grain.mass_kg),
            grain.malt.name,
            grain.mass_ratio * 100.0
        ));
    }
    output.push_str(&format!("{:>width$}\n\n", format!("Total: {:.2} kg", recipe.total_grain_kg)));

    output.push_str("2. Hops\n");
    output.push_str(&format!("{thin}\n"));
    output.push_str(&format!("{:>10}  {:<24}{:<18}{:>8}\n", "Weight", "Variety", "Use", "AA%"));
    for addition in &recipe.hop_schedule {
        output.push_str(&format!(
            "{:>10}  {:<24}{:<18}{:>8}\n",
            format!("{} g", addition.mass_grams.trunc()),
            addition.hop.name,
            format!("{} {}min", addition.role, addition.boil_time_minutes),
            format!("{} %", addition.hop.alpha_acid_percent)
        ));
    }
    output.push('\n');

    output.push_str("3. Process\n");
    output.push_str(&format!("{thin}\n"));
    output.push_str(&format!(
        "Mash: {:.1} L ({} C - {} min)\n",
        recipe.strike_water_liters, MASH_TEMP_C, MASH_MINUTES
    ));
    output.push_str(&format!("Rinse: {:.1} L ({} C)\n", recipe.rinse_water_liters, RINSE_TEMP_C));
    output.push_str(&format!("Boil: {} min ({} C)\n", BOIL_MINUTES, BOIL_TEMP_C));
    output.push_str(&format!(
        "Fermentation: ~{} days ({} C)\n\n",
        FERMENTATION_DAYS, FERMENTATION_TEMP_C
    ));
    output.push_str(&format!("Yeast: {}\n", recipe.yeast_strain));
    output.push_str(&format!("{rule}\n"));

    output
}

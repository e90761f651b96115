//! Suggest a commercial beer close to a recipe target

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{CommercialBeer, FlavorTag, Style};

const STYLE_POINTS: u32 = 2;
const FLAVOR_POINTS: u32 = 3;
const ABV_POINTS: u32 = 1;

/// Maximum ABV difference (percentage points) still counted as similar.
const ABV_TOLERANCE: f64 = 1.5;

/// Minimum score for a beer to be suggested at all.
pub const MIN_MATCH_SCORE: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeerMatch<'a> {
    pub beer: &'a CommercialBeer,
    pub score: u32,
}

/// Score one beer against the requested style, flavors and strength
pub fn score_beer(beer: &CommercialBeer, style: Style, tags: &BTreeSet<FlavorTag>, abv: f64) -> u32 {
    let mut score = 0;

    if beer.style == style {
        score += STYLE_POINTS;
    }

    let notes = beer.flavor_notes.to_lowercase();
    if tags.iter().any(|tag| notes.contains(tag.keyword())) {
        score += FLAVOR_POINTS;
    }

    if (beer.abv - abv).abs() <= ABV_TOLERANCE {
        score += ABV_POINTS;
    }

    score
}

/// Best scoring beer with at least [`MIN_MATCH_SCORE`] points
///
/// On equal scores the beer listed first wins.
pub fn find_match<'a>(
    beers: &'a [CommercialBeer],
    style: Style,
    tags: &BTreeSet<FlavorTag>,
    abv: f64,
) -> Option<BeerMatch<'a>> {
    let mut best: Option<BeerMatch<'a>> = None;

    for beer in beers {
        let score = score_beer(beer, style, tags, abv);
        if score < MIN_MATCH_SCORE {
            continue;
        }
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(BeerMatch { beer, score });
        }
    }

    best
}

/// Reference list of commercial beers, extended by the catalog store
pub fn builtin_beers() -> Vec<CommercialBeer> {
    [
        ("Leffe Blonde", "Abbaye de Leffe", Style::Blonde, 6.6, "biscuit, banana, spice"),
        ("Punk IPA", "BrewDog", Style::Ipa, 5.4, "citrus, tropical, pine"),
        ("Torpedo Extra IPA", "Sierra Nevada", Style::Ipa, 7.2, "pine, citrus, floral"),
        ("Guinness Draught", "Guinness", Style::Stout, 4.2, "coffee, chocolate, roasted"),
        ("Pelforth Ambree", "Pelforth", Style::Amber, 6.5, "caramel, biscuit"),
        ("Hoegaarden", "Hoegaarden", Style::Wheat, 4.9, "citrus, spice, floral"),
        ("Saison Dupont", "Brasserie Dupont", Style::Saison, 6.5, "spice, herbal, citrus"),
        ("Rodenbach Grand Cru", "Rodenbach", Style::Sour, 6.0, "red fruit, caramel, oak"),
        ("Pilsner Urquell", "Plzensky Prazdroj", Style::Lager, 4.4, "herbal, floral, biscuit"),
        ("Aecht Schlenkerla Rauchbier", "Schlenkerla", Style::Lager, 5.1, "smoked, caramel"),
    ]
    .into_iter()
    .map(|(name, brewery, style, abv, notes)| CommercialBeer {
        name: name.to_string(),
        brewery: brewery.to_string(),
        style,
        abv,
        flavor_notes: notes.to_string(),
    })
    .collect()
}

/// `base` with `stored` layered on top. A stored beer replaces the base
/// entry with the same name and brewery in place; new beers go last.
pub fn merge_beers(mut base: Vec<CommercialBeer>, stored: Vec<CommercialBeer>) -> Vec<CommercialBeer> {
    for beer in stored {
        match base
            .iter_mut()
            .find(|b| b.name == beer.name && b.brewery == beer.brewery)
        {
            Some(slot) => *slot = beer,
            None => base.push(beer),
        }
    }
    base
}

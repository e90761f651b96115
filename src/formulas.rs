//! Brewing chemistry formulas
//!
//! Pure numeric functions. Callers are expected to validate their inputs:
//! a zero volume or a gravity below 1.0 produce meaningless numbers here.

/// Fraction of theoretical extract a typical home mash recovers.
pub const DEFAULT_EFFICIENCY: f64 = 0.75;

/// Calibration constant tying yield percent, liters and gravity points to kg.
const GRAIN_MASS_CALIBRATION: f64 = 3.83;

/// Grain is weighed in 0.05 kg steps.
const GRAIN_STEPS_PER_KG: f64 = 20.0;

/// Pre-boil wort is more dilute than the finished target.
pub const BOIL_GRAVITY_FACTOR: f64 = 0.85;

/// Original gravity needed to reach an alcohol percentage by volume.
pub fn gravity_from_alcohol(alcohol_percent: f64) -> f64 {
    alcohol_percent / 131.25 + 1.010
}

/// Total grain mass (kg) needed to hit `target_gravity` in `volume_liters`.
pub fn grain_mass(
    target_gravity: f64,
    volume_liters: f64,
    efficiency: f64,
    average_yield_percent: f64,
) -> f64 {
    let points = (target_gravity - 1.0) * 1000.0;
    points * volume_liters / (average_yield_percent * efficiency * GRAIN_MASS_CALIBRATION)
}

/// Fraction of alpha acids isomerized after `boil_time_minutes` at `boil_gravity`.
pub fn hop_utilization(boil_time_minutes: f64, boil_gravity: f64) -> f64 {
    let bigness = 1.65 * 0.000125_f64.powf(boil_gravity - 1.0);
    let time_factor = (1.0 - (-0.04 * boil_time_minutes).exp()) / 4.15;
    bigness * time_factor
}

/// Hop mass (grams) contributing `target_bitterness_units` IBU to the batch.
///
/// Returns 0 when utilization collapses to zero (e.g. a zero minute boil)
/// instead of dividing by it.
pub fn hop_mass(
    target_bitterness_units: f64,
    alpha_acid_percent: f64,
    boil_time_minutes: f64,
    volume_liters: f64,
    boil_gravity: f64,
) -> f64 {
    let utilization = hop_utilization(boil_time_minutes, boil_gravity);
    if utilization == 0.0 {
        return 0.0;
    }
    target_bitterness_units * volume_liters / (utilization * (alpha_acid_percent / 100.0) * 1000.0)
}

/// Estimated beer color (EBC) from `(mass_kg, color_ebc)` pairs.
pub fn estimate_color(contributions: &[(f64, f64)], volume_liters: f64) -> f64 {
    let mcu: f64 = contributions
        .iter()
        .map(|(mass, color)| mass * color)
        .sum::<f64>()
        / volume_liters;
    2.93 * (mcu * 4.23).powf(0.6859)
}

/// Round to the nearest 0.05 kg. Halfway values round away from zero.
pub fn round_to_grain_granularity(mass_kg: f64) -> f64 {
    (mass_kg * GRAIN_STEPS_PER_KG).round() / GRAIN_STEPS_PER_KG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_gravity_from_alcohol() {
        let og = gravity_from_alcohol(6.0);
        assert!(approx(og, 6.0 / 131.25 + 1.010, 1e-12));
        assert!(approx(og, 1.055714, 1e-6));
    }

    #[test]
    fn test_gravity_increases_with_alcohol() {
        let mut previous = gravity_from_alcohol(3.0);
        for tenth in 31..=120 {
            let og = gravity_from_alcohol(tenth as f64 / 10.0);
            assert!(og > previous);
            previous = og;
        }
    }

    #[test]
    fn test_grain_mass() {
        // 50 points in 20 L at 75% efficiency and 78% yield
        let mass = grain_mass(1.050, 20.0, 0.75, 78.0);
        assert!(approx(mass, 50.0 * 20.0 / (78.0 * 0.75 * 3.83), 1e-9));
        assert!(approx(mass, 4.4632, 1e-3));
    }

    #[test]
    fn test_grain_mass_scales_with_volume() {
        let small = grain_mass(1.060, 10.0, 0.75, 78.0);
        let large = grain_mass(1.060, 20.0, 0.75, 78.0);
        assert!(approx(large, small * 2.0, 1e-9));
    }

    #[test]
    fn test_zero_bitterness_needs_no_hops() {
        assert_eq!(hop_mass(0.0, 12.0, 60.0, 20.0, 0.9), 0.0);
        assert_eq!(hop_mass(0.0, 3.5, 5.0, 50.0, 0.95), 0.0);
    }

    #[test]
    fn test_zero_boil_time_returns_zero() {
        assert_eq!(hop_utilization(0.0, 0.9), 0.0);
        assert_eq!(hop_mass(40.0, 12.0, 0.0, 20.0, 0.9), 0.0);
    }

    #[test]
    fn test_hop_mass_matches_utilization_model() {
        let boil_gravity = gravity_from_alcohol(6.0) * BOIL_GRAVITY_FACTOR;
        let utilization = hop_utilization(60.0, boil_gravity);
        let mass = hop_mass(24.0, 12.0, 60.0, 20.0, boil_gravity);
        assert!(approx(mass, 24.0 * 20.0 / (utilization * 0.12 * 1000.0), 1e-9));
        assert!(mass > 0.0);
    }

    #[test]
    fn test_longer_boil_needs_fewer_hops() {
        let short = hop_mass(20.0, 10.0, 5.0, 20.0, 0.9);
        let long = hop_mass(20.0, 10.0, 60.0, 20.0, 0.9);
        assert!(long < short);
    }

    #[test]
    fn test_estimate_color() {
        let ebc = estimate_color(&[(4.0, 3.5), (0.45, 4.0)], 20.0);
        let mcu: f64 = (4.0 * 3.5 + 0.45 * 4.0) / 20.0;
        assert!(approx(ebc, 2.93 * (mcu * 4.23).powf(0.6859), 1e-12));
    }

    #[test]
    fn test_dark_malt_darkens_beer() {
        let pale = estimate_color(&[(4.0, 6.5), (0.7, 3.0)], 20.0);
        let dark = estimate_color(&[(4.0, 6.5), (0.7, 900.0)], 20.0);
        assert!(dark > pale * 5.0);
    }

    #[test]
    fn test_round_to_grain_granularity() {
        assert!(approx(round_to_grain_granularity(3.024), 3.0, 1e-12));
        assert!(approx(round_to_grain_granularity(3.026), 3.05, 1e-12));
        assert!(approx(round_to_grain_granularity(0.011), 0.0, 1e-12));
        assert!(approx(round_to_grain_granularity(4.4632), 4.45, 1e-12));
    }
}

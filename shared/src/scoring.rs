//! Crop suitability scoring
//!
//! An additive rule set: every crop starts at [`BASELINE_SCORE`], each
//! triggered rule adds or subtracts a fixed number of points, a small jitter
//! is added to break near-ties, and the result is clamped to [0, 100].
//!
//! The jitter source is injected so callers choose between entropy-backed
//! randomness in production and fixed values in tests.

use serde::{Deserialize, Serialize};

use crate::models::{
    BudgetTier, Crop, FarmCondition, IrrigationMethod, Recommendation, WaterRequirement,
};

/// Starting score before any rule applies
pub const BASELINE_SCORE: f64 = 100.0;

/// Upper bound (exclusive) of the tie-breaking jitter
pub const JITTER_SPAN: f64 = 10.0;

/// Number of crops returned by [`recommend`]
pub const MAX_RECOMMENDATIONS: usize = 6;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

// pH tolerance window
const PH_MIN: f64 = 5.5;
const PH_MAX: f64 = 8.5;

// Rainfall thresholds (mm/year)
const LOW_RAINFALL_MM: f64 = 500.0;
const HIGH_RAINFALL_MM: f64 = 2000.0;

// Temperature thresholds (°C)
const COLD_TEMPERATURE: f64 = 15.0;
const HOT_TEMPERATURE: f64 = 35.0;

/// Nitrogen rate above which a crop is too expensive on a low budget
const HEAVY_NITROGEN_RATE: f64 = 150.0;

// ============================================================================
// Rules
// ============================================================================

/// A scoring rule that can adjust a crop's score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    SoilMismatch,
    SeasonMismatch,
    RainfedHighWater,
    DripHighWater,
    PhOutOfRange,
    LowRainfallHighWater,
    HighRainfallLowWater,
    ColdRice,
    HotWheat,
    LowBudgetHeavyFertilizer,
}

impl ScoringRule {
    /// Every rule, in evaluation order
    pub const ALL: [ScoringRule; 10] = [
        ScoringRule::SoilMismatch,
        ScoringRule::SeasonMismatch,
        ScoringRule::RainfedHighWater,
        ScoringRule::DripHighWater,
        ScoringRule::PhOutOfRange,
        ScoringRule::LowRainfallHighWater,
        ScoringRule::HighRainfallLowWater,
        ScoringRule::ColdRice,
        ScoringRule::HotWheat,
        ScoringRule::LowBudgetHeavyFertilizer,
    ];

    /// Points added when the rule fires (negative for penalties)
    pub fn points(&self) -> f64 {
        match self {
            ScoringRule::SoilMismatch => -30.0,
            ScoringRule::SeasonMismatch => -25.0,
            ScoringRule::RainfedHighWater => -20.0,
            ScoringRule::DripHighWater => 10.0,
            ScoringRule::PhOutOfRange => -15.0,
            ScoringRule::LowRainfallHighWater => -25.0,
            ScoringRule::HighRainfallLowWater => -10.0,
            ScoringRule::ColdRice => -20.0,
            ScoringRule::HotWheat => -20.0,
            ScoringRule::LowBudgetHeavyFertilizer => -15.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoringRule::SoilMismatch => "Soil type does not match the crop's preferred soil",
            ScoringRule::SeasonMismatch => "Crop is not grown in the selected season",
            ScoringRule::RainfedHighWater => "Rainfed farm cannot meet a high water requirement",
            ScoringRule::DripHighWater => "Drip irrigation suits a high water requirement",
            ScoringRule::PhOutOfRange => "Soil pH is outside 5.5-8.5",
            ScoringRule::LowRainfallHighWater => "Rainfall below 500 mm for a thirsty crop",
            ScoringRule::HighRainfallLowWater => "Rainfall above 2000 mm for a dry-land crop",
            ScoringRule::ColdRice => "Rice struggles below 15°C",
            ScoringRule::HotWheat => "Wheat struggles above 35°C",
            ScoringRule::LowBudgetHeavyFertilizer => {
                "Nitrogen demand above 150 is costly on a low budget"
            }
        }
    }

    /// Whether the rule fires for this crop and condition
    pub fn applies(&self, crop: &Crop, condition: &FarmCondition) -> bool {
        let high_water = crop.water_requirement == WaterRequirement::High;
        match self {
            ScoringRule::SoilMismatch => !crop.suits_soil(&condition.soil_type),
            ScoringRule::SeasonMismatch => !crop.grows_in(condition.season),
            ScoringRule::RainfedHighWater => {
                condition.irrigation == IrrigationMethod::Rainfed && high_water
            }
            ScoringRule::DripHighWater => {
                condition.irrigation == IrrigationMethod::Drip && high_water
            }
            ScoringRule::PhOutOfRange => condition.ph_level < PH_MIN || condition.ph_level > PH_MAX,
            ScoringRule::LowRainfallHighWater => {
                condition.rainfall_mm < LOW_RAINFALL_MM && high_water
            }
            ScoringRule::HighRainfallLowWater => {
                condition.rainfall_mm > HIGH_RAINFALL_MM
                    && crop.water_requirement == WaterRequirement::Low
            }
            ScoringRule::ColdRice => {
                condition.temperature_celsius < COLD_TEMPERATURE && crop.name.contains("Rice")
            }
            ScoringRule::HotWheat => {
                condition.temperature_celsius > HOT_TEMPERATURE && crop.name.contains("Wheat")
            }
            // Unparsable ratios are rejected when the catalog loads; one that
            // slips through gets no penalty.
            ScoringRule::LowBudgetHeavyFertilizer => {
                condition.budget == BudgetTier::Low
                    && crop
                        .nitrogen_rate()
                        .map(|n| n > HEAVY_NITROGEN_RATE)
                        .unwrap_or(false)
            }
        }
    }
}

/// One triggered rule and its effect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreAdjustment {
    pub rule: ScoringRule,
    pub points: f64,
    pub description: String,
}

// ============================================================================
// Jitter
// ============================================================================

/// Source of the tie-breaking jitter added to every score
pub trait Jitter {
    /// Next jitter value, in [0, JITTER_SPAN)
    fn next_jitter(&mut self) -> f64;
}

/// No jitter at all; scoring becomes deterministic
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn next_jitter(&mut self) -> f64 {
        0.0
    }
}

/// Largest value strictly below JITTER_SPAN
fn max_jitter() -> f64 {
    f64::from_bits(JITTER_SPAN.to_bits() - 1)
}

/// The same jitter on every call, clamped into [0, JITTER_SPAN)
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn next_jitter(&mut self) -> f64 {
        if self.0.is_finite() {
            self.0.clamp(0.0, max_jitter())
        } else {
            0.0
        }
    }
}

/// Scales unit samples in [0, 1) from any generator, e.g. `Math.random`
pub struct UnitSampleJitter<F>(pub F);

impl<F: FnMut() -> f64> Jitter for UnitSampleJitter<F> {
    fn next_jitter(&mut self) -> f64 {
        let sample = (self.0)();
        if sample.is_finite() {
            (sample.clamp(0.0, 1.0) * JITTER_SPAN).min(max_jitter())
        } else {
            0.0
        }
    }
}

/// Uniform jitter from a seedable generator
#[cfg(feature = "rand")]
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: rand::rngs::StdRng,
}

#[cfg(feature = "rand")]
impl RandomJitter {
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(feature = "rand")]
impl Jitter for RandomJitter {
    fn next_jitter(&mut self) -> f64 {
        use rand::Rng;
        self.rng.gen_range(0.0..JITTER_SPAN)
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Rules that fire for this crop and condition, in evaluation order
pub fn score_breakdown(crop: &Crop, condition: &FarmCondition) -> Vec<ScoreAdjustment> {
    ScoringRule::ALL
        .iter()
        .filter(|rule| rule.applies(crop, condition))
        .map(|rule| ScoreAdjustment {
            rule: *rule,
            points: rule.points(),
            description: rule.description().to_string(),
        })
        .collect()
}

/// Rule sum before jitter and clamping. May exceed 100 or drop below 0.
pub fn base_score(crop: &Crop, condition: &FarmCondition) -> f64 {
    ScoringRule::ALL
        .iter()
        .filter(|rule| rule.applies(crop, condition))
        .fold(BASELINE_SCORE, |acc, rule| acc + rule.points())
}

/// Suitability of a crop for the given condition, in [0, 100]
pub fn score<J: Jitter + ?Sized>(crop: &Crop, condition: &FarmCondition, jitter: &mut J) -> f64 {
    let raw = base_score(crop, condition) + jitter.next_jitter();
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

/// Score every crop, rank by descending score and keep the top
/// [`MAX_RECOMMENDATIONS`]. Ties keep catalog order.
pub fn recommend<J: Jitter + ?Sized>(
    condition: &FarmCondition,
    catalog: &[Crop],
    jitter: &mut J,
) -> Vec<Recommendation> {
    let mut scored: Vec<(usize, f64)> = catalog
        .iter()
        .enumerate()
        .map(|(idx, crop)| (idx, score(crop, condition, jitter)))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|(idx, s)| Recommendation::new(catalog[idx].clone(), s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Benefits, RecommendationCategory, Season};

    fn crop(name: &str, soil: &str, season: Season, water: WaterRequirement) -> Crop {
        Crop {
            id: 1,
            name: name.to_string(),
            season,
            soil_type: soil.to_string(),
            water_requirement: water,
            npk_ratio: "120-60-40".to_string(),
            yield_per_acre: 2000.0,
            icon: String::new(),
            benefits: Benefits::default(),
        }
    }

    fn condition() -> FarmCondition {
        FarmCondition {
            location: "Warangal".to_string(),
            coordinates: None,
            soil_type: "clay".to_string(),
            ph_level: 6.5,
            rainfall_mm: 1200.0,
            temperature_celsius: 28.0,
            season: Season::Kharif,
            farm_size_acres: 5.0,
            irrigation: IrrigationMethod::Drip,
            budget: BudgetTier::High,
            experience: String::new(),
        }
    }

    #[test]
    fn test_perfect_match_with_drip_bonus_clamps_to_100() {
        let c = crop("Rice", "clay", Season::Kharif, WaterRequirement::High);
        assert_eq!(base_score(&c, &condition()), 110.0);
        assert_eq!(score(&c, &condition(), &mut NoJitter), 100.0);
        assert_eq!(score(&c, &condition(), &mut FixedJitter(9.9)), 100.0);
    }

    #[test]
    fn test_soil_mismatch_scores_seventy() {
        let c = crop("Cotton", "clay", Season::Kharif, WaterRequirement::Medium);
        let mut cond = condition();
        cond.soil_type = "sandy".to_string();
        assert_eq!(score(&c, &cond, &mut NoJitter), 70.0);
    }

    #[test]
    fn test_soil_and_season_mismatch_scores_forty_five() {
        let c = crop("Mustard", "loam", Season::Rabi, WaterRequirement::Low);
        let s = score(&c, &condition(), &mut NoJitter);
        assert_eq!(s, 45.0);
        assert_eq!(
            crate::models::classify_by_score(s),
            RecommendationCategory::Moderate
        );
    }

    #[test]
    fn test_everything_wrong_clamps_to_zero() {
        let mut c = crop("Basmati Rice", "loam", Season::Rabi, WaterRequirement::High);
        c.npk_ratio = "200-60-40".to_string();
        let cond = FarmCondition {
            soil_type: "sandy".to_string(),
            ph_level: 4.0,
            rainfall_mm: 200.0,
            temperature_celsius: 10.0,
            irrigation: IrrigationMethod::Rainfed,
            budget: BudgetTier::Low,
            ..condition()
        };
        // 100 - 30 - 25 - 20 - 15 - 25 - 20 - 15 = -50
        assert_eq!(base_score(&c, &cond), -50.0);
        assert_eq!(score(&c, &cond, &mut FixedJitter(9.0)), 0.0);
    }

    #[test]
    fn test_breakdown_lists_triggered_rules() {
        let c = crop("Wheat", "loam", Season::Rabi, WaterRequirement::Medium);
        let cond = FarmCondition {
            temperature_celsius: 38.0,
            ..condition()
        };
        let rules: Vec<ScoringRule> = score_breakdown(&c, &cond).iter().map(|a| a.rule).collect();
        assert_eq!(
            rules,
            vec![
                ScoringRule::SoilMismatch,
                ScoringRule::SeasonMismatch,
                ScoringRule::HotWheat
            ]
        );
    }

    #[test]
    fn test_low_budget_heavy_fertilizer_compares_numerically() {
        let mut c = crop("Sugarcane", "clay", Season::Annual, WaterRequirement::Medium);
        let cond = FarmCondition {
            budget: BudgetTier::Low,
            ..condition()
        };

        // "90" > "150" as strings, but not as numbers
        c.npk_ratio = "90-40-40".to_string();
        assert!(!ScoringRule::LowBudgetHeavyFertilizer.applies(&c, &cond));

        c.npk_ratio = "250-115-115".to_string();
        assert!(ScoringRule::LowBudgetHeavyFertilizer.applies(&c, &cond));

        c.npk_ratio = "150-60-60".to_string();
        assert!(!ScoringRule::LowBudgetHeavyFertilizer.applies(&c, &cond));

        c.npk_ratio = "n/a".to_string();
        assert!(!ScoringRule::LowBudgetHeavyFertilizer.applies(&c, &cond));
    }

    #[test]
    fn test_rainfall_rules() {
        let thirsty = crop("Sugarcane", "clay", Season::Kharif, WaterRequirement::High);
        let hardy = crop("Pearl Millet", "clay", Season::Kharif, WaterRequirement::Low);

        let dry = FarmCondition {
            rainfall_mm: 499.0,
            irrigation: IrrigationMethod::Irrigated,
            ..condition()
        };
        assert!(ScoringRule::LowRainfallHighWater.applies(&thirsty, &dry));
        assert!(!ScoringRule::LowRainfallHighWater.applies(&hardy, &dry));

        let wet = FarmCondition {
            rainfall_mm: 2001.0,
            ..condition()
        };
        assert!(ScoringRule::HighRainfallLowWater.applies(&hardy, &wet));
        assert!(!ScoringRule::HighRainfallLowWater.applies(&thirsty, &wet));
    }

    #[test]
    fn test_rice_name_match_is_case_sensitive() {
        let cond = FarmCondition {
            temperature_celsius: 12.0,
            ..condition()
        };
        let rice = crop("Rice (Paddy)", "clay", Season::Kharif, WaterRequirement::High);
        let other = crop("rice bean", "clay", Season::Kharif, WaterRequirement::High);
        assert!(ScoringRule::ColdRice.applies(&rice, &cond));
        assert!(!ScoringRule::ColdRice.applies(&other, &cond));
    }

    #[test]
    fn test_recommend_ranks_and_truncates() {
        let mut catalog = Vec::new();
        for i in 0..8u32 {
            let mut c = crop("Crop", "clay", Season::Kharif, WaterRequirement::Medium);
            c.id = i;
            if i % 2 == 0 {
                c.soil_type = "sandy".to_string();
            }
            catalog.push(c);
        }

        let recs = recommend(&condition(), &catalog, &mut NoJitter);
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);

        // Odd ids match the soil (100), even ids do not (70); ties keep catalog order
        let ids: Vec<u32> = recs.iter().map(|r| r.crop.id).collect();
        assert_eq!(ids, vec![1, 3, 5, 7, 0, 2]);
        assert_eq!(recs[0].category, RecommendationCategory::Recommended);
        assert_eq!(recs[5].category, RecommendationCategory::Good);
    }

    #[test]
    fn test_recommend_small_catalog() {
        let catalog = vec![crop("Gram", "loam", Season::Rabi, WaterRequirement::Low)];
        assert_eq!(recommend(&condition(), &catalog, &mut NoJitter).len(), 1);
        assert!(recommend(&condition(), &[], &mut NoJitter).is_empty());
    }

    #[test]
    fn test_unit_sample_jitter_scales() {
        let mut jitter = UnitSampleJitter(|| 0.5);
        assert_eq!(jitter.next_jitter(), 5.0);
        let mut broken = UnitSampleJitter(|| f64::NAN);
        assert_eq!(broken.next_jitter(), 0.0);
    }

    #[test]
    fn test_jitter_stays_below_span() {
        let mut at_one = UnitSampleJitter(|| 1.0);
        let mut above_one = UnitSampleJitter(|| 3.0);
        for value in [at_one.next_jitter(), above_one.next_jitter()] {
            assert!(value < JITTER_SPAN);
            assert!(value > 9.999);
        }
        for fixed in [JITTER_SPAN, 25.0, f64::MAX] {
            let value = FixedJitter(fixed).next_jitter();
            assert!((0.0..JITTER_SPAN).contains(&value));
        }
        assert_eq!(FixedJitter(-3.0).next_jitter(), 0.0);
        assert_eq!(FixedJitter(9.9).next_jitter(), 9.9);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_seeded_jitter_is_reproducible_and_bounded() {
        let mut a = RandomJitter::seeded(42);
        let mut b = RandomJitter::seeded(42);
        for _ in 0..100 {
            let x = a.next_jitter();
            assert_eq!(x, b.next_jitter());
            assert!((0.0..JITTER_SPAN).contains(&x));
        }
    }
}

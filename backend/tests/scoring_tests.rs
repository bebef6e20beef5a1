//! Tests for the crop suitability scorer
//! Verifies score bounds, ranking order, category thresholds and the
//! worked examples for the additive rules

use proptest::prelude::*;
use shared::{
    base_score, classify_by_score, recommend, score, Benefits, BudgetTier, Catalog, Crop,
    FarmCondition, FixedJitter, IrrigationMethod, NoJitter, RandomJitter, RecommendationCategory,
    Season, WaterRequirement, MAX_RECOMMENDATIONS,
};

const SOILS: [&str; 5] = ["Clay", "Loam", "Black Soil", "Sandy Loam", "Sandy"];

fn crop(name: &str, soil: &str, season: Season, water: WaterRequirement, npk: &str) -> Crop {
    Crop {
        id: 1,
        name: name.to_string(),
        season,
        soil_type: soil.to_string(),
        water_requirement: water,
        npk_ratio: npk.to_string(),
        yield_per_acre: 1000.0,
        icon: String::new(),
        benefits: Benefits::default(),
    }
}

fn condition(soil: &str, season: Season, irrigation: IrrigationMethod) -> FarmCondition {
    FarmCondition {
        location: "Warangal".to_string(),
        coordinates: None,
        soil_type: soil.to_string(),
        ph_level: 6.5,
        rainfall_mm: 1200.0,
        temperature_celsius: 28.0,
        season,
        farm_size_acres: 3.0,
        irrigation,
        budget: BudgetTier::High,
        experience: String::new(),
    }
}

// =============================================================================
// Strategies
// =============================================================================

fn season_strategy() -> impl Strategy<Value = Season> {
    prop_oneof![
        Just(Season::Kharif),
        Just(Season::Rabi),
        Just(Season::Zaid),
        Just(Season::Both),
        Just(Season::Annual),
    ]
}

fn sowing_season_strategy() -> impl Strategy<Value = Season> {
    prop_oneof![Just(Season::Kharif), Just(Season::Rabi), Just(Season::Zaid)]
}

fn water_strategy() -> impl Strategy<Value = WaterRequirement> {
    prop_oneof![
        Just(WaterRequirement::Low),
        Just(WaterRequirement::Medium),
        Just(WaterRequirement::High),
    ]
}

fn irrigation_strategy() -> impl Strategy<Value = IrrigationMethod> {
    prop_oneof![
        Just(IrrigationMethod::Rainfed),
        Just(IrrigationMethod::Irrigated),
        Just(IrrigationMethod::Drip),
        Just(IrrigationMethod::Sprinkler),
    ]
}

fn budget_strategy() -> impl Strategy<Value = BudgetTier> {
    prop_oneof![
        Just(BudgetTier::Low),
        Just(BudgetTier::Medium),
        Just(BudgetTier::High),
    ]
}

fn crop_strategy() -> impl Strategy<Value = Crop> {
    (
        prop_oneof![Just("Rice"), Just("Wheat"), Just("Maize"), Just("Cotton")],
        0usize..SOILS.len(),
        season_strategy(),
        water_strategy(),
        0u32..300,
    )
        .prop_map(|(name, soil, season, water, nitrogen)| {
            crop(
                name,
                SOILS[soil],
                season,
                water,
                &format!("{}-60-40", nitrogen),
            )
        })
}

fn condition_strategy() -> impl Strategy<Value = FarmCondition> {
    (
        0usize..SOILS.len(),
        sowing_season_strategy(),
        irrigation_strategy(),
        budget_strategy(),
        1.0f64..14.0,
        0.0f64..4000.0,
        -5.0f64..50.0,
    )
        .prop_map(
            |(soil, season, irrigation, budget, ph_level, rainfall_mm, temperature_celsius)| {
                FarmCondition {
                    ph_level,
                    rainfall_mm,
                    temperature_celsius,
                    budget,
                    ..condition(SOILS[soil], season, irrigation)
                }
            },
        )
}

// =============================================================================
// Score Bounds
// =============================================================================

mod score_bounds {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Score is always within [0, 100], whatever the jitter
        #[test]
        fn prop_score_within_range(
            crop in crop_strategy(),
            condition in condition_strategy(),
            jitter in 0.0f64..10.0
        ) {
            let s = score(&crop, &condition, &mut FixedJitter(jitter));
            prop_assert!((0.0..=100.0).contains(&s));
        }

        /// Matching soil, season and water need with a normal pH scores at
        /// least 70 before jitter
        #[test]
        fn prop_matching_crop_scores_at_least_70(
            soil in 0usize..SOILS.len(),
            season in sowing_season_strategy(),
            water in water_strategy(),
            irrigation in irrigation_strategy(),
            ph_level in 5.5f64..=8.5,
            rainfall_mm in 500.0f64..=2000.0
        ) {
            let candidate = crop("Maize", SOILS[soil], season, water, "120-60-40");
            let condition = FarmCondition {
                ph_level,
                rainfall_mm,
                ..super::condition(&SOILS[soil].to_lowercase(), season, irrigation)
            };
            prop_assert!(score(&candidate, &condition, &mut NoJitter) >= 70.0);
        }

        /// Without jitter the score is deterministic
        #[test]
        fn prop_score_deterministic_without_jitter(
            crop in crop_strategy(),
            condition in condition_strategy()
        ) {
            let first = score(&crop, &condition, &mut NoJitter);
            let second = score(&crop, &condition, &mut NoJitter);
            prop_assert_eq!(first, second);
        }

        /// Jitter never lowers a score
        #[test]
        fn prop_jitter_is_non_negative(
            crop in crop_strategy(),
            condition in condition_strategy(),
            seed in any::<u64>()
        ) {
            let plain = score(&crop, &condition, &mut NoJitter);
            let jittered = score(&crop, &condition, &mut RandomJitter::seeded(seed));
            prop_assert!(jittered >= plain);
            prop_assert!(jittered < plain + 10.0 || jittered == 100.0);
        }
    }
}

// =============================================================================
// Ranking
// =============================================================================

mod ranking {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// At most six entries, sorted non-increasing, categories consistent
        #[test]
        fn prop_recommend_sorted_and_capped(
            condition in condition_strategy(),
            seed in any::<u64>()
        ) {
            let catalog = Catalog::builtin().unwrap();
            let recs = recommend(&condition, &catalog, &mut RandomJitter::seeded(seed));

            prop_assert_eq!(recs.len(), MAX_RECOMMENDATIONS.min(catalog.len()));
            for pair in recs.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            for rec in &recs {
                prop_assert_eq!(rec.category, classify_by_score(rec.score));
            }
        }

        /// Small catalogs return every crop
        #[test]
        fn prop_recommend_small_catalog(
            crops in prop::collection::vec(crop_strategy(), 0..6),
            condition in condition_strategy()
        ) {
            let recs = recommend(&condition, &crops, &mut NoJitter);
            prop_assert_eq!(recs.len(), crops.len());
        }
    }

    #[test]
    fn ties_keep_catalog_order() {
        let crops = vec![
            crop("Maize", "Loam", Season::Both, WaterRequirement::Medium, "150-75-40"),
            crop("Tomato", "Loam", Season::Both, WaterRequirement::Medium, "120-80-60"),
            crop("Onion", "Loam", Season::Rabi, WaterRequirement::Medium, "100-50-50"),
        ];
        let c = condition("loam", Season::Rabi, IrrigationMethod::Irrigated);
        let recs = recommend(&c, &crops, &mut NoJitter);
        let names: Vec<&str> = recs.iter().map(|r| r.crop.name.as_str()).collect();
        assert_eq!(names, vec!["Maize", "Tomato", "Onion"]);
    }

    #[test]
    fn empty_catalog_gives_empty_result() {
        let c = condition("clay", Season::Kharif, IrrigationMethod::Drip);
        assert!(recommend(&c, &[], &mut NoJitter).is_empty());
    }
}

// =============================================================================
// Worked Examples
// =============================================================================

mod worked_examples {
    use super::*;

    fn paddy() -> Crop {
        crop("Rice (Paddy)", "Clay", Season::Kharif, WaterRequirement::High, "120-60-40")
    }

    #[test]
    fn perfect_match_clamps_to_100() {
        let c = condition("clay", Season::Kharif, IrrigationMethod::Drip);
        assert_eq!(base_score(&paddy(), &c), 110.0);
        let s = score(&paddy(), &c, &mut NoJitter);
        assert_eq!(s, 100.0);
        assert_eq!(classify_by_score(s), RecommendationCategory::Recommended);
    }

    #[test]
    fn soil_mismatch_is_70_good() {
        let mut cotton = paddy();
        cotton.water_requirement = WaterRequirement::Medium;
        let c = condition("sandy", Season::Kharif, IrrigationMethod::Irrigated);
        let s = score(&cotton, &c, &mut NoJitter);
        assert_eq!(s, 70.0);
        assert_eq!(classify_by_score(s), RecommendationCategory::Good);
    }

    #[test]
    fn soil_and_season_mismatch_is_45_moderate() {
        let mut cotton = paddy();
        cotton.water_requirement = WaterRequirement::Medium;
        let c = condition("sandy", Season::Rabi, IrrigationMethod::Irrigated);
        let s = score(&cotton, &c, &mut NoJitter);
        assert_eq!(s, 45.0);
        assert_eq!(classify_by_score(s), RecommendationCategory::Moderate);
    }

    #[test]
    fn everything_wrong_clamps_to_zero() {
        let c = FarmCondition {
            ph_level: 4.0,
            rainfall_mm: 300.0,
            temperature_celsius: 10.0,
            budget: BudgetTier::Low,
            ..condition("sandy", Season::Rabi, IrrigationMethod::Rainfed)
        };
        let heavy = crop("Rice", "Clay", Season::Kharif, WaterRequirement::High, "200-60-40");
        // 100 - 30 - 25 - 20 - 15 - 25 - 20 - 15
        assert_eq!(base_score(&heavy, &c), -50.0);
        assert_eq!(score(&heavy, &c, &mut FixedJitter(9.0)), 0.0);
    }

    #[test]
    fn nitrogen_compared_numerically() {
        let c = FarmCondition {
            budget: BudgetTier::Low,
            ..condition("loam", Season::Rabi, IrrigationMethod::Irrigated)
        };
        let light = crop("Wheat", "Loam", Season::Rabi, WaterRequirement::Medium, "90-60-40");
        let heavy = crop("Wheat", "Loam", Season::Rabi, WaterRequirement::Medium, "180-60-40");
        assert_eq!(base_score(&light, &c), 100.0);
        assert_eq!(base_score(&heavy, &c), 85.0);
    }
}

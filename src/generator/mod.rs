pub mod profiles;
pub mod random;
pub mod slots;

use chrono::{DateTime, Utc};

use crate::clock::civil_minutes_of_day;
use crate::config::{BETTING_HOUSE_COUNT, CONFIDENCE_RANGE};
use crate::types::{Game, Recommendation, SignalDraft, Strength};

use profiles::{profile_for, AutoModeRule, ProviderProfile, StrengthWeight, PROVIDER_PROFILES};
use random::{shuffle, uniform_int, unit_draw, RandomSource};
use slots::next_profitable_slot;

/// Builds signal drafts from a provider profile table. Pure: everything comes
/// from the game, the instant, and the draws.
///
/// Draws are consumed in a fixed order: strength, confidence, normal spins,
/// turbo spins, auto mode (only for probabilistic rules), assertiveness, the
/// venue shuffle (`len - 1` draws), then the venue count.
#[derive(Debug, Clone, Copy)]
pub struct SignalGenerator {
    profiles: &'static [ProviderProfile],
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(PROVIDER_PROFILES)
    }
}

impl SignalGenerator {
    pub fn new(profiles: &'static [ProviderProfile]) -> Self {
        Self { profiles }
    }

    pub fn generate(
        &self,
        game: &Game,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> SignalDraft {
        let profile = profile_for(self.profiles, &game.provider);

        let strength = pick_strength(profile.strengths, unit_draw(rng));
        let confidence = uniform_int(rng, CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1) as u8;
        let normal_spins = uniform_int(rng, profile.normal_spins.0, profile.normal_spins.1);
        let turbo_spins = uniform_int(rng, profile.turbo_spins.0, profile.turbo_spins.1);
        let auto_mode = match profile.auto_mode {
            AutoModeRule::Fixed(on) => on,
            AutoModeRule::DrawAbove(threshold) => unit_draw(rng) > threshold,
        };
        let assertiveness =
            uniform_int(rng, profile.assertiveness.0, profile.assertiveness.1).min(100) as u8;

        let slot = next_profitable_slot(civil_minutes_of_day(now));
        let betting_houses = pick_venues(profile.venues(), rng);

        SignalDraft {
            game_id: game.id,
            strength,
            strength_level: strength.level(),
            recommendation: Recommendation::from_confidence(confidence),
            confidence,
            assertiveness,
            normal_spins,
            turbo_spins,
            auto_mode,
            profitable_time_start: slot.start_label(),
            profitable_time_end: slot.end_label(),
            betting_houses,
            algorithm: profile.algorithm_name(&game.name),
            result: None,
            user_feedback: None,
        }
    }
}

/// First entry whose cumulative weight reaches `r`. Float drift that leaves
/// the running sum short of `r` selects the last entry.
pub fn pick_strength(weights: &[StrengthWeight], r: f64) -> Strength {
    let mut cumulative = 0.0;
    for w in weights {
        cumulative += w.weight;
        if r <= cumulative {
            return w.strength;
        }
    }
    weights.last().map_or(Strength::Medium, |w| w.strength)
}

/// Uniform permutation of `venues`, truncated to 3–4 entries.
fn pick_venues(venues: &[&str], rng: &mut dyn RandomSource) -> Vec<String> {
    let mut houses: Vec<String> = venues.iter().map(|v| v.to_string()).collect();
    shuffle(rng, &mut houses);
    let count = uniform_int(rng, BETTING_HOUSE_COUNT.0, BETTING_HOUSE_COUNT.1) as usize;
    houses.truncate(count);
    houses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::state::game_catalog::GameCatalog;
    use crate::types::{NewGame, Provider};
    use super::random::{rng_from_seed, ScriptedRandom};

    fn game(provider: &str, name: &str) -> Game {
        NewGame {
            name: name.to_string(),
            display_name: name.to_string(),
            emoji: "🎰".to_string(),
            description: String::new(),
            provider: Provider::from(provider),
            badge_text: String::new(),
            badge_color: "gray".to_string(),
            assertiveness_level: 90,
            is_active: true,
        }
        .into_game(1)
    }

    static DRIFTING: &[ProviderProfile] = &[ProviderProfile {
        provider: "Drift",
        algorithm: profiles::AlgorithmName::Fixed("DRIFT"),
        strengths: &[
            StrengthWeight::new(Strength::Weak, 0.3),
            StrengthWeight::new(Strength::Medium, 0.3),
            StrengthWeight::new(Strength::Strong, 0.3),
        ],
        normal_spins: (1, 1),
        turbo_spins: (1, 1),
        auto_mode: AutoModeRule::Fixed(false),
        assertiveness: (50, 50),
        venues: None,
    }];

    #[test]
    fn pg_soft_strength_draws() {
        let weights = profile_for(PROVIDER_PROFILES, &Provider::PgSoft).strengths;
        assert_eq!(pick_strength(weights, 0.35), Strength::Strong);
        assert_eq!(pick_strength(weights, 0.75), Strength::VeryStrong);
        assert_eq!(pick_strength(weights, 0.4), Strength::Strong);
        assert_eq!(pick_strength(weights, 0.0), Strength::Strong);
    }

    #[test]
    fn short_cumulative_sum_clamps_to_last_entry() {
        assert_eq!(pick_strength(DRIFTING[0].strengths, 0.95), Strength::Strong);
    }

    #[test]
    fn drifting_table_still_generates() {
        let generator = SignalGenerator::new(DRIFTING);
        let draft = generator.generate(
            &game("Drift", "x"),
            FixedClock::at_civil(9, 0).now(),
            &mut ScriptedRandom::constant(0.99),
        );
        assert_eq!(draft.strength, Strength::Strong);
        assert_eq!(draft.strength_level, 3);
        assert_eq!(draft.assertiveness, 50);
    }

    #[test]
    fn publishes_nearest_slot_in_civil_time() {
        let draft = SignalGenerator::default().generate(
            &game("PG Soft", "fortune-tiger"),
            FixedClock::at_civil(10, 0).now(),
            &mut rng_from_seed(Some(1)),
        );
        assert_eq!(draft.profitable_time_start, "10:15");
        assert_eq!(draft.profitable_time_end, "11:00");
    }

    #[test]
    fn scripted_pg_soft_draft() {
        // strength, confidence, normal, turbo, assertiveness, 4 shuffle draws, count
        let mut rng = ScriptedRandom::new(vec![
            0.75, 0.5, 0.0, 0.99, 0.5, 0.0, 0.0, 0.0, 0.0, 0.9,
        ]);
        let draft = SignalGenerator::default().generate(
            &game("PG Soft", "fortune-tiger"),
            FixedClock::at_civil(10, 0).now(),
            &mut rng,
        );
        assert_eq!(draft.game_id, 1);
        assert_eq!(draft.strength, Strength::VeryStrong);
        assert_eq!(draft.strength_level, 4);
        assert_eq!(draft.confidence, 90);
        assert_eq!(draft.recommendation, Recommendation::Play);
        assert_eq!(draft.normal_spins, 3);
        assert_eq!(draft.turbo_spins, 3);
        assert!(draft.auto_mode);
        assert_eq!(draft.assertiveness, 97);
        assert_eq!(
            draft.betting_houses,
            vec!["Betano", "KTO", "Stake", "Pixbet"]
        );
        assert_eq!(draft.algorithm, "PG_SOFT_CYCLE_v2.1_FORTUNE-TIGER");
        assert!(draft.result.is_none());
        assert!(draft.user_feedback.is_none());
    }

    #[test]
    fn fat_panda_auto_mode_follows_draw() {
        let panda = game("Fat Panda", "lucky-monkey");
        let now = FixedClock::at_civil(12, 0).now();
        // strength, confidence, normal, turbo, auto
        let on = SignalGenerator::default()
            .generate(&panda, now, &mut ScriptedRandom::new(vec![0.1, 0.0, 0.0, 0.0, 0.31]));
        assert!(on.auto_mode);
        assert_eq!(on.strength, Strength::Medium);
        assert_eq!(on.confidence, 80);
        assert_eq!(on.recommendation, Recommendation::Wait);

        let off = SignalGenerator::default()
            .generate(&panda, now, &mut ScriptedRandom::new(vec![0.1, 0.0, 0.0, 0.0, 0.3]));
        assert!(!off.auto_mode);
    }

    #[test]
    fn unknown_provider_uses_generic_values() {
        let draft = SignalGenerator::default().generate(
            &game("Spribe", "aviator"),
            FixedClock::at_civil(8, 0).now(),
            &mut rng_from_seed(Some(3)),
        );
        assert_eq!(draft.strength, Strength::Medium);
        assert_eq!(draft.normal_spins, 5);
        assert_eq!(draft.turbo_spins, 3);
        assert!(!draft.auto_mode);
        assert_eq!(draft.assertiveness, 85);
        assert_eq!(draft.algorithm, "GENERIC_ALGORITHM_v1.0");
        for house in &draft.betting_houses {
            assert!(profiles::ALL_BETTING_HOUSES[..5].contains(&house.as_str()));
        }
    }

    #[test]
    fn seeded_catalog_sweep_stays_in_bands() {
        let catalog = GameCatalog::seeded();
        let generator = SignalGenerator::default();
        let mut rng = rng_from_seed(Some(2024));
        for g in catalog.list() {
            let profile = profile_for(PROVIDER_PROFILES, &g.provider);
            for minute in (0..1440).step_by(97) {
                let now = FixedClock::at_civil(minute / 60, minute % 60).now();
                let d = generator.generate(&g, now, &mut rng);
                assert!((80..=99).contains(&d.confidence));
                let band = profile.assertiveness;
                assert!((band.0..=band.1).contains(&u32::from(d.assertiveness)));
                assert!((profile.normal_spins.0..=profile.normal_spins.1).contains(&d.normal_spins));
                assert!((profile.turbo_spins.0..=profile.turbo_spins.1).contains(&d.turbo_spins));
                assert_eq!(d.strength_level, d.strength.level());
                assert!(profile.strengths.iter().any(|w| w.strength == d.strength));
                assert!((3..=4).contains(&d.betting_houses.len()));
                let mut unique = d.betting_houses.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), d.betting_houses.len());
                assert_eq!(
                    d.recommendation,
                    if d.confidence > 85 { Recommendation::Play } else { Recommendation::Wait }
                );
            }
        }
    }
}

//! Batch driver: many battles over one matchup, reduced to `SimulationResult`s.
//!
//! Runs are strictly sequential. Each run gets its own RNG stream derived from
//! the batch seed, so a batch is reproducible run by run.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::battle::BattleEngine;
use crate::error::{BalanceError, BalanceResult};
use crate::limits::DEFAULT_MAX_TURNS;
use crate::log;
use crate::rng::{BattleRng, XorShiftRng};
use crate::state::{BattleState, Outcome, Side};
use crate::types::{Card, CardId, CharacteristicCatalog, Deck, DeckId, HeroSettings};

/// Two decks and the hero settings they start from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub hero1_deck: Deck,
    pub hero2_deck: Deck,
    pub hero1: HeroSettings,
    pub hero2: HeroSettings,
}

/// How starting stats are chosen for each run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum StatSampling {
    /// Use the matchup's settings as-is
    Fixed,
    /// Draw each stat uniformly from an inclusive range, per hero and per run
    Randomized {
        health: (i32, i32),
        mana: (i32, i32),
        stamina: (i32, i32),
    },
}

impl StatSampling {
    /// Ranges spanning `min_pct..=max_pct` percent of `base`
    pub fn around(base: HeroSettings, min_pct: u32, max_pct: u32) -> Self {
        let span = |v: i32| {
            (
                (v as i64 * min_pct as i64 / 100) as i32,
                (v as i64 * max_pct as i64 / 100) as i32,
            )
        };
        StatSampling::Randomized {
            health: span(base.health),
            mana: span(base.mana),
            stamina: span(base.stamina),
        }
    }

    fn sample<R: BattleRng>(&self, base: HeroSettings, rng: &mut R) -> HeroSettings {
        match self {
            StatSampling::Fixed => base,
            StatSampling::Randomized {
                health,
                mana,
                stamina,
            } => HeroSettings::new(
                rng.gen_inclusive(health.0, health.1),
                rng.gen_inclusive(mana.0, mana.1),
                rng.gen_inclusive(stamina.0, stamina.1),
            ),
        }
    }

    fn validate(&self) -> BalanceResult<()> {
        let StatSampling::Randomized {
            health,
            mana,
            stamina,
        } = self
        else {
            return Ok(());
        };
        for (name, (min, max)) in [("health", health), ("mana", mana), ("stamina", stamina)] {
            if *min <= 0 || min > max {
                return Err(BalanceError::InvalidBatchConfig {
                    reason: format!("{} range {}..={} must be positive and ordered", name, min, max),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchConfig {
    pub runs: u32,
    pub seed: u64,
    pub max_turns: u32,
    /// Shuffle both decks at the start of every run
    pub shuffle_decks: bool,
    pub sampling: StatSampling,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            seed: 42,
            max_turns: DEFAULT_MAX_TURNS,
            shuffle_decks: false,
            sampling: StatSampling::Fixed,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> BalanceResult<()> {
        if self.runs == 0 {
            return Err(BalanceError::InvalidBatchConfig {
                reason: "runs must be at least 1".to_string(),
            });
        }
        if self.max_turns == 0 {
            return Err(BalanceError::InvalidBatchConfig {
                reason: "max_turns must be at least 1".to_string(),
            });
        }
        self.sampling.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: u32,
    pub total: u32,
}

/// One finished battle: its inputs and outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub id: String,
    pub hero1_deck_id: DeckId,
    pub hero2_deck_id: DeckId,
    pub hero1_deck_name: String,
    pub hero2_deck_name: String,
    /// Starting capacities, not end-of-battle values
    pub hero1_initial_settings: HeroSettings,
    pub hero2_initial_settings: HeroSettings,
    pub winner: Outcome,
    pub turns: u32,
    pub hero1_cards: Vec<CardId>,
    pub hero2_cards: Vec<CardId>,
}

impl SimulationResult {
    /// Reduce a finished battle. Returns `None` if the battle is still running.
    pub fn from_battle(id: String, matchup: &Matchup, final_state: &BattleState) -> Option<Self> {
        let winner = final_state.winner?;
        let all_cards = |played: &[CardId], remaining: &[CardId]| -> Vec<CardId> {
            played.iter().chain(remaining).cloned().collect()
        };
        Some(Self {
            id,
            hero1_deck_id: matchup.hero1_deck.id.clone(),
            hero2_deck_id: matchup.hero2_deck.id.clone(),
            hero1_deck_name: matchup.hero1_deck.name.clone(),
            hero2_deck_name: matchup.hero2_deck.name.clone(),
            hero1_initial_settings: final_state.hero1.settings(),
            hero2_initial_settings: final_state.hero2.settings(),
            winner,
            turns: final_state.turn,
            hero1_cards: all_cards(&final_state.hero1_played, &final_state.hero1_deck),
            hero2_cards: all_cards(&final_state.hero2_played, &final_state.hero2_deck),
        })
    }

    pub fn cards(&self, side: Side) -> &[CardId] {
        match side {
            Side::Hero1 => &self.hero1_cards,
            Side::Hero2 => &self.hero2_cards,
        }
    }

    pub fn initial_settings(&self, side: Side) -> HeroSettings {
        match side {
            Side::Hero1 => self.hero1_initial_settings,
            Side::Hero2 => self.hero2_initial_settings,
        }
    }

    pub fn holds(&self, side: Side, card_id: &str) -> bool {
        self.cards(side).iter().any(|id| id == card_id)
    }
}

/// Run `config.runs` battles for `matchup`.
///
/// `on_progress` is called after every battle; returning `ControlFlow::Break`
/// stops the batch and keeps the results gathered so far.
pub fn run_batch<F>(
    matchup: &Matchup,
    cards: &[Card],
    characteristics: &CharacteristicCatalog,
    config: &BatchConfig,
    mut on_progress: F,
) -> BalanceResult<Vec<SimulationResult>>
where
    F: FnMut(BatchProgress) -> ControlFlow<()>,
{
    config.validate()?;

    let hero1_cards = matchup.hero1_deck.resolve(cards);
    let hero2_cards = matchup.hero2_deck.resolve(cards);
    if hero1_cards.is_empty() && hero2_cards.is_empty() {
        log::warn("run_batch: neither deck resolved to any card");
    }

    log::info(&format!(
        "Batch start: {} vs {}, {} runs, seed {}",
        matchup.hero1_deck.name, matchup.hero2_deck.name, config.runs, config.seed
    ));

    let mut results = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let mut rng = XorShiftRng::for_run(config.seed, run);
        let hero1 = config.sampling.sample(matchup.hero1, &mut rng);
        let hero2 = config.sampling.sample(matchup.hero2, &mut rng);

        let mut engine =
            BattleEngine::new(hero1, hero2, &hero1_cards, &hero2_cards, characteristics)?;
        if config.shuffle_decks {
            engine = engine.with_shuffled_decks(&mut rng);
        }
        let final_state = engine.run_full_simulation(config.max_turns);

        if let Some(result) =
            SimulationResult::from_battle(format!("sim-{}", run + 1), matchup, &final_state)
        {
            results.push(result);
        }

        let progress = BatchProgress {
            completed: run + 1,
            total: config.runs,
        };
        if on_progress(progress).is_break() {
            log::info(&format!(
                "Batch cancelled after {}/{} runs",
                progress.completed, progress.total
            ));
            break;
        }
    }

    log::info(&format!("Batch done: {} results", results.len()));
    Ok(results)
}

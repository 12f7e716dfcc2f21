mod analytics;
mod cards;
mod resources;
mod stalemate;

use crate::batch::SimulationResult;
use crate::battle::BattleEngine;
use crate::state::{BattleState, Outcome};
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn characteristic(id: &str, power_points: f64, actions: &[Action]) -> Characteristic {
    actions.iter().fold(
        Characteristic::new(id, id, Polarity::Positive, power_points),
        |c, action| c.with_action(*action),
    )
}

/// The canonical test characteristic: one DAMAGE_ENEMY action
fn strike(damage: f64) -> Characteristic {
    characteristic("strike", 1.0, &[Action::DamageEnemy(damage)])
}

fn catalog_of(characteristics: Vec<Characteristic>) -> CharacteristicCatalog {
    characteristics.into_iter().collect()
}

/// Card referencing catalog characteristics with the given multipliers
fn card(id: &str, refs: &[(&str, f64)], catalog: &CharacteristicCatalog) -> Card {
    let characteristics = refs
        .iter()
        .map(|(cid, value)| CardCharacteristic::new(cid, *value))
        .collect();
    Card::new(id, id, characteristics, catalog)
}

fn hero() -> HeroSettings {
    HeroSettings::default()
}

fn run_battle(
    hero1_cards: &[Card],
    hero2_cards: &[Card],
    catalog: &CharacteristicCatalog,
    max_turns: u32,
) -> BattleState {
    let mut engine = BattleEngine::new(hero(), hero(), hero1_cards, hero2_cards, catalog)
        .expect("default heroes are valid");
    engine.run_full_simulation(max_turns)
}

fn log_contains(state: &BattleState, needle: &str) -> bool {
    state.log.iter().any(|entry| entry.message.contains(needle))
}

fn sim_result(
    hero1_cards: &[&str],
    hero2_cards: &[&str],
    winner: Outcome,
    hero1: HeroSettings,
    hero2: HeroSettings,
) -> SimulationResult {
    SimulationResult {
        id: "sim-test".to_string(),
        hero1_deck_id: "d1".to_string(),
        hero2_deck_id: "d2".to_string(),
        hero1_deck_name: "Deck 1".to_string(),
        hero2_deck_name: "Deck 2".to_string(),
        hero1_initial_settings: hero1,
        hero2_initial_settings: hero2,
        winner,
        turns: 3,
        hero1_cards: hero1_cards.iter().map(|s| s.to_string()).collect(),
        hero2_cards: hero2_cards.iter().map(|s| s.to_string()).collect(),
    }
}

/// `n` copies of the same result at default hero settings
fn repeat_result(
    n: usize,
    hero1_cards: &[&str],
    hero2_cards: &[&str],
    winner: Outcome,
) -> Vec<SimulationResult> {
    (0..n)
        .map(|_| sim_result(hero1_cards, hero2_cards, winner, hero(), hero()))
        .collect()
}

/// Bare cards for the analytics layer, which only looks at id and name
fn named_cards(ids: &[&str]) -> Vec<Card> {
    let catalog = CharacteristicCatalog::new();
    ids.iter().map(|id| card(id, &[], &catalog)).collect()
}

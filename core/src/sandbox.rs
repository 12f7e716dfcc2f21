//! Browser bindings
//!
//! Stateless entry points for the web UI. Inputs and outputs cross the
//! boundary as plain JS objects via serde-wasm-bindgen; the UI keeps any
//! history it wants (e.g. per-turn snapshots for stepping back).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::analytics::{analyze_simulations_with, SimulationAnalytics};
use crate::batch::{run_batch, BatchConfig, Matchup, SimulationResult};
use crate::battle::BattleEngine;
use crate::config::AnalyticsConfig;
use crate::limits::DEFAULT_MAX_TURNS;
use crate::log;
use crate::ranges::{
    find_best_balanced_ranges_with, get_card_win_rate_by_stats,
    get_cards_win_rate_at_specific_stats_with, StatRangeBalance,
};
use crate::rng::XorShiftRng;
use crate::state::BattleState;
use crate::tuning::{calculate_power_point_suggestions_with, calculate_scaling_suggestions_with};
use crate::types::{Card, Characteristic, CharacteristicCatalog, HeroSettings};

/// Everything needed to start one battle
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSetup {
    pub hero1: HeroSettings,
    pub hero2: HeroSettings,
    pub hero1_cards: Vec<Card>,
    pub hero2_cards: Vec<Card>,
    pub characteristics: Vec<Characteristic>,
    #[serde(default)]
    pub max_turns: Option<u32>,
    /// Shuffle both decks with this seed; keep deck order when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReplay {
    /// Initial state followed by one snapshot per turn
    pub states: Vec<BattleState>,
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) just keeps the existing logger
    let _ = console_log::init_with_level(::log::Level::Info);
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, String> {
    serde_wasm_bindgen::from_value(value).map_err(|e| format!("Failed to parse {}: {:?}", what, e))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(value).map_err(|e| format!("Serialization failed: {:?}", e))
}

fn catalog_from_js(value: JsValue) -> Result<CharacteristicCatalog, String> {
    let list: Vec<Characteristic> = from_js(value, "characteristics")?;
    Ok(list.into_iter().collect())
}

/// Cards with power points recomputed against `catalog`
fn cards_from_js(value: JsValue, catalog: &CharacteristicCatalog) -> Result<Vec<Card>, String> {
    let mut cards: Vec<Card> = from_js(value, "cards")?;
    for card in &mut cards {
        card.recompute_power_points(catalog);
    }
    Ok(cards)
}

fn config_from_js(value: JsValue) -> Result<AnalyticsConfig, String> {
    if value.is_null() || value.is_undefined() {
        return Ok(AnalyticsConfig::default());
    }
    from_js(value, "analytics config")
}

/// Fresh seed from the browser's crypto source
#[wasm_bindgen]
pub fn random_seed() -> Result<u64, String> {
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf).map_err(|e| format!("No entropy available: {}", e))?;
    Ok(u64::from_le_bytes(buf))
}

/// Play a battle to the end, returning every per-turn snapshot
#[wasm_bindgen]
pub fn replay_battle(setup_js: JsValue) -> Result<JsValue, String> {
    log::action("replay_battle", "Running battle with per-turn snapshots");
    let setup: BattleSetup = from_js(setup_js, "battle setup")?;
    let catalog: CharacteristicCatalog = setup.characteristics.iter().cloned().collect();
    let max_turns = setup.max_turns.unwrap_or(DEFAULT_MAX_TURNS);

    let mut engine = BattleEngine::new(
        setup.hero1,
        setup.hero2,
        &setup.hero1_cards,
        &setup.hero2_cards,
        &catalog,
    )
    .map_err(|e| e.to_string())?;
    if let Some(seed) = setup.seed {
        engine = engine.with_shuffled_decks(&mut XorShiftRng::seed_from_u64(seed));
    }

    let states = engine.replay(max_turns);
    to_js(&BattleReplay { states })
}

/// Run a battle and return only the final state
#[wasm_bindgen]
pub fn run_battle(setup_js: JsValue) -> Result<JsValue, String> {
    log::action("run_battle", "Running full battle");
    let setup: BattleSetup = from_js(setup_js, "battle setup")?;
    let catalog: CharacteristicCatalog = setup.characteristics.iter().cloned().collect();

    let mut engine = BattleEngine::new(
        setup.hero1,
        setup.hero2,
        &setup.hero1_cards,
        &setup.hero2_cards,
        &catalog,
    )
    .map_err(|e| e.to_string())?;
    if let Some(seed) = setup.seed {
        engine = engine.with_shuffled_decks(&mut XorShiftRng::seed_from_u64(seed));
    }

    let final_state = engine.run_full_simulation(setup.max_turns.unwrap_or(DEFAULT_MAX_TURNS));
    to_js(&final_state)
}

/// Run a whole batch; returns the list of `SimulationResult`s
#[wasm_bindgen]
pub fn run_simulation_batch(
    matchup_js: JsValue,
    cards_js: JsValue,
    characteristics_js: JsValue,
    config_js: JsValue,
) -> Result<JsValue, String> {
    log::action("run_simulation_batch", "Running batch");
    let matchup: Matchup = from_js(matchup_js, "matchup")?;
    let cards: Vec<Card> = from_js(cards_js, "cards")?;
    let catalog = catalog_from_js(characteristics_js)?;
    let config: BatchConfig = if config_js.is_null() || config_js.is_undefined() {
        BatchConfig::default()
    } else {
        from_js(config_js, "batch config")?
    };

    let results = run_batch(&matchup, &cards, &catalog, &config, |_| {
        std::ops::ControlFlow::Continue(())
    })
    .map_err(|e| e.to_string())?;
    to_js(&results)
}

#[wasm_bindgen]
pub fn analyze(results_js: JsValue, cards_js: JsValue, config_js: JsValue) -> Result<JsValue, String> {
    let results: Vec<SimulationResult> = from_js(results_js, "results")?;
    let cards: Vec<Card> = from_js(cards_js, "cards")?;
    let config = config_from_js(config_js)?;
    to_js(&analyze_simulations_with(&results, &cards, &config))
}

#[wasm_bindgen]
pub fn card_win_rate_by_stats(
    card_id: &str,
    analytics_js: JsValue,
    health_min: f64,
    health_max: f64,
    resource_min: f64,
    resource_max: f64,
) -> Result<JsValue, String> {
    let analytics: SimulationAnalytics = from_js(analytics_js, "analytics")?;
    to_js(&get_card_win_rate_by_stats(
        card_id,
        &analytics,
        (health_min, health_max),
        (resource_min, resource_max),
    ))
}

#[wasm_bindgen]
pub fn best_balanced_ranges(
    analytics_js: JsValue,
    cards_js: JsValue,
    health_buckets: u32,
    resource_buckets: u32,
    base_health: f64,
    base_resource: f64,
    config_js: JsValue,
) -> Result<JsValue, String> {
    let analytics: SimulationAnalytics = from_js(analytics_js, "analytics")?;
    let cards: Vec<Card> = from_js(cards_js, "cards")?;
    let config = config_from_js(config_js)?;
    let ranges = find_best_balanced_ranges_with(
        &analytics,
        &cards,
        health_buckets,
        resource_buckets,
        base_health,
        base_resource,
        &config,
    )
    .map_err(|e| e.to_string())?;
    to_js(&ranges)
}

#[wasm_bindgen]
pub fn cards_win_rate_at_stats(
    analytics_js: JsValue,
    cards_js: JsValue,
    health: f64,
    resource: f64,
    tolerance: Option<f64>,
    config_js: JsValue,
) -> Result<JsValue, String> {
    let analytics: SimulationAnalytics = from_js(analytics_js, "analytics")?;
    let cards: Vec<Card> = from_js(cards_js, "cards")?;
    let config = config_from_js(config_js)?;
    to_js(&get_cards_win_rate_at_specific_stats_with(
        &analytics, &cards, health, resource, tolerance, &config,
    ))
}

#[wasm_bindgen]
pub fn power_point_suggestions(
    analytics_js: JsValue,
    cards_js: JsValue,
    characteristics_js: JsValue,
    config_js: JsValue,
) -> Result<JsValue, String> {
    let analytics: SimulationAnalytics = from_js(analytics_js, "analytics")?;
    let catalog = catalog_from_js(characteristics_js)?;
    let cards = cards_from_js(cards_js, &catalog)?;
    let config = config_from_js(config_js)?;
    to_js(&calculate_power_point_suggestions_with(&analytics, &cards, &config))
}

/// `best_range_js` may be null when no balanced range was found
#[wasm_bindgen]
pub fn scaling_suggestions(
    analytics_js: JsValue,
    cards_js: JsValue,
    best_range_js: JsValue,
    characteristics_js: JsValue,
    config_js: JsValue,
) -> Result<JsValue, String> {
    let analytics: SimulationAnalytics = from_js(analytics_js, "analytics")?;
    let best_range: Option<StatRangeBalance> = from_js(best_range_js, "best range")?;
    let catalog = catalog_from_js(characteristics_js)?;
    let cards = cards_from_js(cards_js, &catalog)?;
    let config = config_from_js(config_js)?;
    to_js(&calculate_scaling_suggestions_with(
        &analytics,
        &cards,
        best_range.as_ref(),
        &catalog,
        &config,
    ))
}

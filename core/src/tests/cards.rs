use super::*;
use crate::state::{BattleState, CooldownMap};

// ==========================================
// POWER POINTS
// ==========================================

#[test]
fn test_card_power_points_sum_weighted_characteristics() {
    let catalog = catalog_of(vec![
        strike(10.0),
        Characteristic::new("frail", "Frail", Polarity::Negative, -2.0)
            .with_action(Action::DamageSelf(5.0)),
    ]);
    let glass = card("glass", &[("strike", 3.0), ("frail", 1.5), ("missing", 9.0)], &catalog);

    // 1 × 3 + (-2) × 1.5; the unknown id adds nothing
    assert_eq!(glass.total_power_points(), 0.0);
    assert_eq!(glass.compute_power_points(&catalog), 0.0);
}

#[test]
fn test_recompute_tracks_catalog_changes() {
    let mut catalog = catalog_of(vec![strike(10.0)]);
    let mut a = card("a", &[("strike", 2.0)], &catalog);
    assert_eq!(a.total_power_points(), 2.0);

    catalog.insert(characteristic("strike", 4.0, &[Action::DamageEnemy(10.0)]));
    assert_eq!(a.total_power_points(), 2.0, "stored value is not live");

    a.recompute_power_points(&catalog);
    assert_eq!(a.total_power_points(), 8.0);
}

#[test]
fn test_deck_resolves_as_multiset() {
    let catalog = catalog_of(vec![strike(10.0)]);
    let cards = vec![
        card("a", &[("strike", 1.0)], &catalog),
        card("b", &[("strike", 3.0)], &catalog),
    ];
    let deck = Deck::new("d", "Aggro", &["a", "b", "a", "ghost"]);

    let resolved = deck.resolve(&cards);

    let ids: Vec<&str> = resolved.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "a"], "duplicates kept, unknown ids dropped");
    assert_eq!(deck.total_power_points(&cards), 5.0);
    assert!((deck.average_power_points(&cards) - 5.0 / 3.0).abs() < 1e-9);
    assert_eq!(Deck::new("e", "Empty", &[]).average_power_points(&cards), 0.0);
}

// ==========================================
// SERIALIZATION SHAPE
// ==========================================

#[test]
fn test_characteristic_json_shape() {
    let json = r#"{
        "id": "fireball",
        "name": "Fireball",
        "type": "positive",
        "powerPoints": 4,
        "actions": [
            { "id": "f1", "type": "damage_enemy", "value": 30 },
            { "id": "f2", "type": "spend_mana_self", "value": 15 },
            { "id": "f3", "type": "cooldown", "value": 2 }
        ]
    }"#;

    let parsed: Characteristic = serde_json::from_str(json).expect("valid characteristic");

    assert_eq!(parsed.polarity, Polarity::Positive);
    assert_eq!(parsed.power_points, 4.0);
    assert_eq!(parsed.actions[0].action, Action::DamageEnemy(30.0));
    assert_eq!(parsed.actions[1].action, Action::SpendManaSelf(15.0));
    assert_eq!(parsed.actions[2].action, Action::Cooldown(2.0));
    assert!(parsed.actions[2].action.is_structural());
    assert!(parsed.description.is_none());
}

#[test]
fn test_battle_state_serializes_camel_case() {
    let mut state = BattleState::new(hero(), HeroSettings::new(80, 40, 30));
    state.cooldowns1.set("zap", 2);

    let value = serde_json::to_value(&state).expect("serializable");

    assert_eq!(value["hero2"]["currentHealth"], 80.0);
    assert_eq!(value["cooldowns1"]["zap"], 2);
    assert!(value["winner"].is_null());
    assert!(value["hero1Played"].as_array().is_some_and(|a| a.is_empty()));
}

#[test]
fn test_cooldown_map_ticks_to_zero() {
    let mut cooldowns = CooldownMap::new();
    cooldowns.set("a", 1);
    cooldowns.set("b", 3);

    assert_eq!(cooldowns.tick(), vec!["a".to_string()]);
    assert!(cooldowns.tick().is_empty(), "a stays at zero");

    assert!(cooldowns.is_ready("a"));
    assert_eq!(cooldowns.remaining("b"), 1);
    assert!(cooldowns.is_ready("never-played"));
    let keys: Vec<&str> = cooldowns.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"], "ordered by card id");
}

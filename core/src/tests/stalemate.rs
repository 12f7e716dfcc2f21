use super::*;
use crate::limits::{BattleLimits, STALEMATE_TURNS};

#[test]
fn test_unaffordable_decks_end_in_stalemate() {
    // SCENARIO: every card costs more mana than either hero has. The battle
    // must be called after the idle streak, far below the turn cap.
    let catalog = catalog_of(vec![characteristic(
        "meteor",
        10.0,
        &[Action::DamageEnemy(100.0), Action::SpendManaSelf(100.0)],
    )]);
    let hero1_cards = vec![card("meteor", &[("meteor", 1.0)], &catalog)];
    let hero2_cards = vec![card("meteor", &[("meteor", 1.0)], &catalog)];

    let state = run_battle(&hero1_cards, &hero2_cards, &catalog, 100);

    assert_eq!(state.turn, STALEMATE_TURNS);
    assert_eq!(state.winner, Some(Outcome::Draw), "equal health is a draw");
    assert!(log_contains(&state, "stalemate"));
    assert!(!log_contains(&state, "turn limit"));
}

#[test]
fn test_exhausted_deck_stalemate_goes_to_healthier_hero() {
    let catalog = catalog_of(vec![strike(20.0)]);
    let hero1_cards = vec![card("a", &[("strike", 1.0)], &catalog)];

    let state = run_battle(&hero1_cards, &[], &catalog, 100);

    // Turn 1 plays, then five idle turns
    assert_eq!(state.turn, 1 + STALEMATE_TURNS);
    assert_eq!(state.winner, Some(Outcome::Hero1));
}

#[test]
fn test_idle_streak_resets_on_play() {
    let mut limits = BattleLimits::new();

    for _ in 0..STALEMATE_TURNS - 1 {
        assert!(!limits.record_turn(0));
    }
    assert!(!limits.record_turn(1), "a play resets the streak");
    for _ in 0..STALEMATE_TURNS - 1 {
        assert!(!limits.record_turn(0));
    }
    assert!(limits.record_turn(0));
    assert!(limits.is_stalemate());
}

#[test]
fn test_lasting_effects_do_not_count_as_plays() {
    // A long burn keeps dealing damage but nobody plays a card, so the
    // streak still runs out.
    let catalog = catalog_of(vec![characteristic(
        "burn",
        1.0,
        &[Action::DamageEnemy(1.0), Action::EffectDuration(50.0)],
    )]);
    let hero1_cards = vec![card("inferno", &[("burn", 1.0)], &catalog)];

    let state = run_battle(&hero1_cards, &[], &catalog, 100);

    assert_eq!(state.turn, 1 + STALEMATE_TURNS);
    assert_eq!(state.hero2.current_health, 100.0 - STALEMATE_TURNS as f64);
    assert_eq!(state.winner, Some(Outcome::Hero1));
}

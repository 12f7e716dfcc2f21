use super::*;
use crate::actions::{apply_action, can_afford};
use crate::state::{HeroState, Resource};

#[test]
fn test_heal_clamps_to_capacity() {
    let mut hero_state = HeroState::from_settings(hero());
    hero_state.take_damage(10.0);

    hero_state.heal(25.0);

    assert_eq!(hero_state.current_health, 100.0);
}

#[test]
fn test_restore_clamps_to_capacity() {
    let mut hero_state = HeroState::from_settings(HeroSettings::new(100, 30, 20));
    hero_state.spend(Resource::Mana, 5.0);

    hero_state.restore(Resource::Mana, 50.0);
    hero_state.restore(Resource::Stamina, 50.0);

    assert_eq!(hero_state.current(Resource::Mana), 30.0);
    assert_eq!(hero_state.current(Resource::Stamina), 20.0);
}

#[test]
fn test_spend_never_goes_negative() {
    let mut hero_state = HeroState::from_settings(hero());

    hero_state.spend(Resource::Mana, 80.0);
    hero_state.spend(Resource::Stamina, 50.5);

    assert_eq!(hero_state.current_mana, 0.0);
    assert_eq!(hero_state.current_stamina, 0.0);
}

#[test]
fn test_damage_is_not_clamped() {
    let mut hero_state = HeroState::from_settings(hero());

    hero_state.take_damage(150.0);

    assert_eq!(hero_state.current_health, -50.0);
    assert!(!hero_state.is_alive());
}

#[test]
fn test_enemy_resource_actions_hit_opponent() {
    let mut actor = HeroState::from_settings(hero());
    let mut opponent = HeroState::from_settings(hero());

    apply_action(&Action::SpendManaEnemy(20.0), &mut actor, &mut opponent, "Drain");
    apply_action(&Action::SpendStaminaEnemy(60.0), &mut actor, &mut opponent, "Trip");
    apply_action(&Action::RestoreManaEnemy(5.0), &mut actor, &mut opponent, "Gift");

    assert_eq!(opponent.current_mana, 35.0);
    assert_eq!(opponent.current_stamina, 0.0);
    assert_eq!(actor, HeroState::from_settings(hero()), "actor untouched");
}

#[test]
fn test_can_afford_checks_both_costs() {
    let catalog = catalog_of(vec![characteristic(
        "heavy",
        3.0,
        &[Action::SpendManaSelf(20.0), Action::SpendStaminaSelf(40.0)],
    )]);
    let heavy = card("heavy", &[("heavy", 1.0)], &catalog);

    let mut hero_state = HeroState::from_settings(hero());
    assert!(can_afford(&heavy, &hero_state, &catalog));

    hero_state.spend(Resource::Stamina, 15.0);
    assert!(!can_afford(&heavy, &hero_state, &catalog), "35 stamina < 40");
}

#[test]
fn test_mana_drains_across_turns() {
    // SCENARIO: each play costs 20 mana; the third copy is unaffordable.
    let catalog = catalog_of(vec![characteristic(
        "spell",
        1.0,
        &[Action::DamageEnemy(5.0), Action::SpendManaSelf(20.0)],
    )]);
    let spell = card("spell", &[("spell", 1.0)], &catalog);
    let hero1_cards = vec![spell.clone(), spell.clone(), spell];
    let mut engine =
        BattleEngine::new(hero(), hero(), &hero1_cards, &[], &catalog).expect("valid settings");

    for _ in 0..3 {
        engine.next_turn();
    }

    let state = engine.state();
    assert_eq!(state.hero1.current_mana, 10.0);
    assert_eq!(state.hero1_played.len(), 2);
    assert_eq!(state.hero1_deck.len(), 1);
    assert_eq!(state.hero2.current_health, 90.0);
}

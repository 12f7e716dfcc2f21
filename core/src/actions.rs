//! Card resolution and action application
//!
//! A card is resolved against the characteristic catalog into scaled action
//! blocks, split into what happens now and what recurs on later turns.

use crate::log;
use crate::state::{HeroState, Resource};
use crate::types::{Action, ActionBlock, Card, CharacteristicCatalog};

/// Actions from one characteristic that recur for `duration` turns
#[derive(Debug, Clone, PartialEq)]
pub struct LastingEffect {
    pub duration: u32,
    pub actions: Vec<ActionBlock>,
}

/// A card broken down for play
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedCard {
    /// Applied on play, in declaration order (resource costs always land here)
    pub immediate: Vec<ActionBlock>,
    pub lasting: Vec<LastingEffect>,
    /// Max cooldown across the card's characteristics
    pub cooldown: u32,
}

/// Whole turns for a structural value; fractions round up, negatives clamp to 0
fn whole_turns(value: f64) -> u32 {
    if value > 0.0 {
        value.ceil() as u32
    } else {
        0
    }
}

/// Scale every action on `card` and partition it into immediate, lasting and cooldown.
/// Unknown characteristic ids contribute nothing.
pub fn resolve_card(card: &Card, catalog: &CharacteristicCatalog) -> ResolvedCard {
    let mut resolved = ResolvedCard::default();

    for reference in &card.characteristics {
        let Some(characteristic) = catalog.get(&reference.characteristic_id) else {
            log::debug(
                "resolve_card",
                &format!(
                    "{}: unknown characteristic {} skipped",
                    card.name, reference.characteristic_id
                ),
            );
            continue;
        };

        let duration = characteristic
            .actions
            .iter()
            .filter_map(|block| match block.action {
                Action::EffectDuration(v) => Some(whole_turns(v)),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut recurring = Vec::new();
        for block in &characteristic.actions {
            match block.action {
                Action::Cooldown(v) => resolved.cooldown = resolved.cooldown.max(whole_turns(v)),
                Action::EffectDuration(_) => {}
                action => {
                    let scaled = ActionBlock {
                        id: block.id.clone(),
                        action: action.scaled(reference.value),
                    };
                    if duration > 0 && !action.is_resource_cost() {
                        recurring.push(scaled);
                    } else {
                        resolved.immediate.push(scaled);
                    }
                }
            }
        }

        if !recurring.is_empty() {
            resolved.lasting.push(LastingEffect {
                duration,
                actions: recurring,
            });
        }
    }

    resolved
}

/// Mana and stamina the playing hero must have on hand
pub fn play_cost(card: &Card, catalog: &CharacteristicCatalog) -> (f64, f64) {
    let mut mana = 0.0;
    let mut stamina = 0.0;
    for reference in &card.characteristics {
        let Some(characteristic) = catalog.get(&reference.characteristic_id) else {
            continue;
        };
        for block in &characteristic.actions {
            match block.action {
                Action::SpendManaSelf(v) => mana += v * reference.value,
                Action::SpendStaminaSelf(v) => stamina += v * reference.value,
                _ => {}
            }
        }
    }
    (mana, stamina)
}

pub fn can_afford(card: &Card, hero: &HeroState, catalog: &CharacteristicCatalog) -> bool {
    let (mana, stamina) = play_cost(card, catalog);
    hero.current_mana >= mana && hero.current_stamina >= stamina
}

/// Apply one action from `actor`'s side. Returns the log line, or `None` for
/// reserved actions the engine does not resolve.
pub fn apply_action(
    action: &Action,
    actor: &mut HeroState,
    opponent: &mut HeroState,
    source: &str,
) -> Option<String> {
    let message = match *action {
        Action::DamageEnemy(v) => {
            let dealt = opponent.take_damage(v);
            format!("{}: Deals {} damage to enemy ({} after shield)", source, v, dealt)
        }
        Action::HealEnemy(v) => {
            opponent.heal(v);
            format!("{}: Heals enemy for {}", source, v)
        }
        Action::DamageSelf(v) => {
            let dealt = actor.take_damage(v);
            format!("{}: Deals {} damage to self ({} after shield)", source, v, dealt)
        }
        Action::HealSelf(v) => {
            actor.heal(v);
            format!("{}: Heals self for {}", source, v)
        }
        Action::SpendManaSelf(v) => {
            actor.spend(Resource::Mana, v);
            format!("{}: Spends {} mana", source, v)
        }
        Action::SpendManaEnemy(v) => {
            opponent.spend(Resource::Mana, v);
            format!("{}: Enemy spends {} mana", source, v)
        }
        Action::RestoreManaSelf(v) => {
            actor.restore(Resource::Mana, v);
            format!("{}: Restores {} mana to self", source, v)
        }
        Action::RestoreManaEnemy(v) => {
            opponent.restore(Resource::Mana, v);
            format!("{}: Restores {} mana to enemy", source, v)
        }
        Action::SpendStaminaSelf(v) => {
            actor.spend(Resource::Stamina, v);
            format!("{}: Spends {} stamina", source, v)
        }
        Action::SpendStaminaEnemy(v) => {
            opponent.spend(Resource::Stamina, v);
            format!("{}: Enemy spends {} stamina", source, v)
        }
        Action::RestoreStaminaSelf(v) => {
            actor.restore(Resource::Stamina, v);
            format!("{}: Restores {} stamina to self", source, v)
        }
        Action::RestoreStaminaEnemy(v) => {
            opponent.restore(Resource::Stamina, v);
            format!("{}: Restores {} stamina to enemy", source, v)
        }
        Action::ShieldSelf(v) => {
            actor.add_shield(v);
            format!("{}: Gains {} shield", source, v)
        }
        Action::ShieldEnemy(v) => {
            opponent.add_shield(v);
            format!("{}: Enemy gains {} shield", source, v)
        }
        // Structural and reserved kinds have nothing to apply
        Action::EffectDuration(_)
        | Action::Cooldown(_)
        | Action::DrawCard(_)
        | Action::DiscardCard(_) => return None,
    };
    log::action("apply_action", &message);
    Some(message)
}

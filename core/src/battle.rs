use std::collections::BTreeMap;

use crate::actions::{apply_action, can_afford, resolve_card};
use crate::error::BalanceResult;
use crate::limits::BattleLimits;
use crate::log;
use crate::rng::BattleRng;
use crate::state::{ActiveEffect, BattleState, Outcome, Side};
use crate::types::{Card, CharacteristicCatalog, HeroSettings};

/// Turn-based battle between two heroes and their decks.
///
/// The engine owns the battle state and borrows the card lists and the
/// characteristic catalog from the caller. Each hero plays straight from the
/// remaining deck list: the first card that is off cooldown and affordable.
pub struct BattleEngine<'a> {
    state: BattleState,
    cards: BTreeMap<&'a str, &'a Card>,
    characteristics: &'a CharacteristicCatalog,
    limits: BattleLimits,
}

impl<'a> BattleEngine<'a> {
    /// Set up a battle at full resources. Fails only on non-positive hero capacities.
    pub fn new(
        hero1: HeroSettings,
        hero2: HeroSettings,
        hero1_cards: &'a [Card],
        hero2_cards: &'a [Card],
        characteristics: &'a CharacteristicCatalog,
    ) -> BalanceResult<Self> {
        hero1.validate(1)?;
        hero2.validate(2)?;

        let mut cards = BTreeMap::new();
        for card in hero1_cards.iter().chain(hero2_cards) {
            cards.entry(card.id.as_str()).or_insert(card);
        }

        let mut state = BattleState::new(hero1, hero2);
        state.hero1_deck = hero1_cards.iter().map(|c| c.id.clone()).collect();
        state.hero2_deck = hero2_cards.iter().map(|c| c.id.clone()).collect();
        state.push_log("Battle started!".to_string());

        log::debug(
            "BattleEngine::new",
            &format!(
                "hero1 deck={} hero2 deck={}",
                state.hero1_deck.len(),
                state.hero2_deck.len()
            ),
        );

        Ok(Self {
            state,
            cards,
            characteristics,
            limits: BattleLimits::new(),
        })
    }

    /// Shuffle both decks before the first turn
    pub fn with_shuffled_decks<R: BattleRng>(mut self, rng: &mut R) -> Self {
        rng.shuffle(&mut self.state.hero1_deck);
        rng.shuffle(&mut self.state.hero2_deck);
        self.state.push_log("Decks shuffled".to_string());
        self
    }

    /// Independent copy of the current state
    pub fn snapshot(&self) -> BattleState {
        self.state.clone()
    }

    /// Borrowed view of the live state
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Advance one turn. No-op once the battle is decided.
    pub fn next_turn(&mut self) {
        if self.is_finished() {
            return;
        }

        self.state.turn += 1;
        let turn = self.state.turn;
        self.state.push_log(format!("=== Turn {} ===", turn));

        for side in Side::BOTH {
            self.process_active_effects(side);
        }
        for side in Side::BOTH {
            for card_id in self.state.cooldowns_mut(side).tick() {
                let name = self
                    .cards
                    .get(card_id.as_str())
                    .map_or(card_id.as_str(), |c| c.name.as_str());
                let message = format!("Hero {}: {} is ready again", side.number(), name);
                self.state.push_log(message);
            }
        }

        let first = if turn % 2 == 1 { Side::Hero1 } else { Side::Hero2 };
        let mut cards_played = 0;
        for side in [first, first.opponent()] {
            if self.play_turn(side) {
                cards_played += 1;
            }
            if self.check_battle_end() {
                break;
            }
        }

        if !self.is_finished() && self.limits.record_turn(cards_played) {
            self.state.push_log(format!(
                "No cards played for {} consecutive turns - stalemate",
                self.limits.idle_turns
            ));
            let outcome =
                Outcome::by_health(self.state.hero1.current_health, self.state.hero2.current_health);
            self.finish(outcome);
        }

        for side in Side::BOTH {
            let line = self.state.hero(side).status_line(side);
            self.state.push_log(line);
        }

        log::battle_summary(
            turn,
            self.state.hero1.current_health,
            self.state.hero2.current_health,
            self.is_finished(),
        );
    }

    /// Run turns until decided or `max_turns` is reached, then return the final state.
    /// At the cap the healthier hero wins, equal health is a draw.
    pub fn run_full_simulation(&mut self, max_turns: u32) -> BattleState {
        while !self.is_finished() && self.state.turn < max_turns {
            self.next_turn();
        }

        if !self.is_finished() {
            self.state
                .push_log("Battle ended due to turn limit".to_string());
            let outcome =
                Outcome::by_health(self.state.hero1.current_health, self.state.hero2.current_health);
            self.finish(outcome);
        }

        log::info(&format!(
            "Battle finished after {} turns: {:?}",
            self.state.turn, self.state.winner
        ));
        self.snapshot()
    }

    /// Like [`Self::run_full_simulation`], but keeps the initial state and one
    /// snapshot per turn. A battle stopped by the turn cap gets its last turn's
    /// snapshot replaced by the decided state.
    pub fn replay(&mut self, max_turns: u32) -> Vec<BattleState> {
        let mut states = vec![self.snapshot()];
        while !self.is_finished() && self.state.turn < max_turns {
            self.next_turn();
            states.push(self.snapshot());
        }
        if !self.is_finished() {
            let decided = self.run_full_simulation(max_turns);
            if states.len() > 1 {
                states.pop();
            }
            states.push(decided);
        }
        states
    }

    fn process_active_effects(&mut self, side: Side) {
        let effects = std::mem::take(&mut self.state.hero_mut(side).active_effects);
        let mut remaining = Vec::with_capacity(effects.len());

        for mut effect in effects {
            if effect.remaining_duration == 0 {
                continue;
            }
            self.state.push_log(format!(
                "{}: Effect active ({} turns remaining)",
                effect.card_name, effect.remaining_duration
            ));
            for block in &effect.actions {
                let (actor, opponent) = self.state.heroes_mut(side);
                if let Some(message) = apply_action(&block.action, actor, opponent, &effect.card_name)
                {
                    self.state.push_log(message);
                }
            }

            effect.remaining_duration -= 1;
            if effect.remaining_duration > 0 {
                remaining.push(effect);
            } else {
                self.state
                    .push_log(format!("{}: Effect wore off", effect.card_name));
            }
        }

        self.state.hero_mut(side).active_effects = remaining;
    }

    /// Play the first ready and affordable card. Returns whether a card was played.
    fn play_turn(&mut self, side: Side) -> bool {
        let candidate = {
            let hero = self.state.hero(side);
            let cooldowns = self.state.cooldowns(side);
            self.state.deck(side).iter().position(|id| {
                self.cards.get(id.as_str()).is_some_and(|card| {
                    cooldowns.is_ready(id) && can_afford(card, hero, self.characteristics)
                })
            })
        };

        let Some(index) = candidate else {
            self.state
                .push_log(format!("Hero {} has no playable card", side.number()));
            return false;
        };

        let card_id = self.state.deck_mut(side).remove(index);
        let Some(&card) = self.cards.get(card_id.as_str()) else {
            return false;
        };
        self.play_card(side, card);
        self.state.played_mut(side).push(card_id);
        true
    }

    fn play_card(&mut self, side: Side, card: &'a Card) {
        self.state
            .push_log(format!("Hero {} plays: {}", side.number(), card.name));

        let resolved = resolve_card(card, self.characteristics);

        for block in &resolved.immediate {
            let (actor, opponent) = self.state.heroes_mut(side);
            if let Some(message) = apply_action(&block.action, actor, opponent, &card.name) {
                self.state.push_log(message);
            }
        }

        for lasting in resolved.lasting {
            self.state.push_log(format!(
                "{}: Effect will last for {} turns",
                card.name, lasting.duration
            ));
            self.state.hero_mut(side).active_effects.push(ActiveEffect {
                card_id: card.id.clone(),
                card_name: card.name.clone(),
                remaining_duration: lasting.duration,
                actions: lasting.actions,
            });
        }

        if resolved.cooldown > 0 {
            self.state.cooldowns_mut(side).set(&card.id, resolved.cooldown);
            self.state.push_log(format!(
                "{}: On cooldown for {} turns",
                card.name, resolved.cooldown
            ));
        }
    }

    /// Decide the battle if either hero is down. Both down is a draw.
    fn check_battle_end(&mut self) -> bool {
        let hero1_down = !self.state.hero1.is_alive();
        let hero2_down = !self.state.hero2.is_alive();
        let outcome = match (hero1_down, hero2_down) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::Hero2,
            (false, true) => Outcome::Hero1,
            (false, false) => return false,
        };
        self.finish(outcome);
        true
    }

    fn finish(&mut self, outcome: Outcome) {
        let message = match outcome.winner() {
            Some(side) => format!("Hero {} wins!", side.number()),
            None => "Battle ended in a draw!".to_string(),
        };
        self.state.push_log(message);
        self.state.winner = Some(outcome);
    }
}

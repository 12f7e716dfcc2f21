use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ActionBlock, CardId, HeroSettings};

/// One of the two heroes in a battle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Hero1,
    Hero2,
}

impl Side {
    /// Hero-number order
    pub const BOTH: [Side; 2] = [Side::Hero1, Side::Hero2];

    pub fn opponent(self) -> Side {
        match self {
            Side::Hero1 => Side::Hero2,
            Side::Hero2 => Side::Hero1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Side::Hero1 => 1,
            Side::Hero2 => 2,
        }
    }
}

/// Terminal result of a battle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Hero1,
    Hero2,
    Draw,
}

/// A battle outcome seen from one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideResult {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Hero1 => Outcome::Hero1,
            Side::Hero2 => Outcome::Hero2,
        }
    }

    /// Higher current health wins, equal health is a draw
    pub fn by_health(hero1_health: f64, hero2_health: f64) -> Self {
        if hero1_health > hero2_health {
            Outcome::Hero1
        } else if hero2_health > hero1_health {
            Outcome::Hero2
        } else {
            Outcome::Draw
        }
    }

    pub fn result_for(self, side: Side) -> SideResult {
        match (self, side) {
            (Outcome::Draw, _) => SideResult::Draw,
            (Outcome::Hero1, Side::Hero1) | (Outcome::Hero2, Side::Hero2) => SideResult::Win,
            _ => SideResult::Loss,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Hero1 => Some(Side::Hero1),
            Outcome::Hero2 => Some(Side::Hero2),
            Outcome::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Mana,
    Stamina,
}

/// A card's actions re-applied once per turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEffect {
    pub card_id: CardId,
    pub card_name: String,
    pub remaining_duration: u32,
    /// Already scaled by the card multiplier
    pub actions: Vec<ActionBlock>,
}

/// Battle-scoped hero: base capacities plus current values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroState {
    pub health: i32,
    pub mana: i32,
    pub stamina: i32,
    /// Not clamped at zero; the exact value matters for end-of-battle comparison
    pub current_health: f64,
    pub current_mana: f64,
    pub current_stamina: f64,
    pub shield: f64,
    pub active_effects: Vec<ActiveEffect>,
}

impl HeroState {
    pub fn from_settings(settings: HeroSettings) -> Self {
        Self {
            health: settings.health,
            mana: settings.mana,
            stamina: settings.stamina,
            current_health: settings.health as f64,
            current_mana: settings.mana as f64,
            current_stamina: settings.stamina as f64,
            shield: 0.0,
            active_effects: Vec::new(),
        }
    }

    pub fn settings(&self) -> HeroSettings {
        HeroSettings::new(self.health, self.mana, self.stamina)
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    /// Shield absorbs first. Returns the damage that reached health.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let effective = (amount - self.shield).max(0.0);
        self.shield -= self.shield.min(amount);
        self.current_health -= effective;
        effective
    }

    pub fn heal(&mut self, amount: f64) {
        self.current_health = (self.current_health + amount).min(self.health as f64);
    }

    pub fn add_shield(&mut self, amount: f64) {
        self.shield += amount;
    }

    pub fn current(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Mana => self.current_mana,
            Resource::Stamina => self.current_stamina,
        }
    }

    pub fn spend(&mut self, resource: Resource, amount: f64) {
        let slot = self.resource_mut(resource);
        *slot = (*slot - amount).max(0.0);
    }

    pub fn restore(&mut self, resource: Resource, amount: f64) {
        let capacity = match resource {
            Resource::Mana => self.mana,
            Resource::Stamina => self.stamina,
        } as f64;
        let slot = self.resource_mut(resource);
        *slot = (*slot + amount).min(capacity);
    }

    fn resource_mut(&mut self, resource: Resource) -> &mut f64 {
        match resource {
            Resource::Mana => &mut self.current_mana,
            Resource::Stamina => &mut self.current_stamina,
        }
    }

    pub fn status_line(&self, side: Side) -> String {
        format!(
            "Hero {}: HP {}/{}, Mana {}/{}, Stamina {}/{}",
            side.number(),
            self.current_health,
            self.health,
            self.current_mana,
            self.mana,
            self.current_stamina,
            self.stamina
        )
    }
}

/// Turns remaining per card id, in id order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CooldownMap(BTreeMap<CardId, u32>);

impl CooldownMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, card_id: &str) -> u32 {
        self.0.get(card_id).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, card_id: &str) -> bool {
        self.remaining(card_id) == 0
    }

    pub fn set(&mut self, card_id: &str, turns: u32) {
        self.0.insert(card_id.to_string(), turns);
    }

    /// Decrement every positive entry by one turn, returning the cards that just came off cooldown
    pub fn tick(&mut self) -> Vec<CardId> {
        let mut ready = Vec::new();
        for (card_id, turns) in self.0.iter_mut() {
            if *turns > 0 {
                *turns -= 1;
                if *turns == 0 {
                    ready.push(card_id.clone());
                }
            }
        }
        ready
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &u32)> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleLogEntry {
    pub turn: u32,
    pub message: String,
}

/// Complete battle snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub turn: u32,
    pub hero1: HeroState,
    pub hero2: HeroState,
    /// Remaining card ids, in play-scan order
    pub hero1_deck: Vec<CardId>,
    pub hero2_deck: Vec<CardId>,
    /// Played card ids, in play order
    pub hero1_played: Vec<CardId>,
    pub hero2_played: Vec<CardId>,
    pub cooldowns1: CooldownMap,
    pub cooldowns2: CooldownMap,
    pub log: Vec<BattleLogEntry>,
    /// `None` while the battle is in progress
    pub winner: Option<Outcome>,
}

impl BattleState {
    pub fn new(hero1: HeroSettings, hero2: HeroSettings) -> Self {
        Self {
            turn: 0,
            hero1: HeroState::from_settings(hero1),
            hero2: HeroState::from_settings(hero2),
            hero1_deck: Vec::new(),
            hero2_deck: Vec::new(),
            hero1_played: Vec::new(),
            hero2_played: Vec::new(),
            cooldowns1: CooldownMap::new(),
            cooldowns2: CooldownMap::new(),
            log: Vec::new(),
            winner: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn hero(&self, side: Side) -> &HeroState {
        match side {
            Side::Hero1 => &self.hero1,
            Side::Hero2 => &self.hero2,
        }
    }

    pub fn hero_mut(&mut self, side: Side) -> &mut HeroState {
        match side {
            Side::Hero1 => &mut self.hero1,
            Side::Hero2 => &mut self.hero2,
        }
    }

    /// (acting hero, opponent) borrowed mutably at once
    pub fn heroes_mut(&mut self, side: Side) -> (&mut HeroState, &mut HeroState) {
        match side {
            Side::Hero1 => (&mut self.hero1, &mut self.hero2),
            Side::Hero2 => (&mut self.hero2, &mut self.hero1),
        }
    }

    pub fn deck(&self, side: Side) -> &Vec<CardId> {
        match side {
            Side::Hero1 => &self.hero1_deck,
            Side::Hero2 => &self.hero2_deck,
        }
    }

    pub fn deck_mut(&mut self, side: Side) -> &mut Vec<CardId> {
        match side {
            Side::Hero1 => &mut self.hero1_deck,
            Side::Hero2 => &mut self.hero2_deck,
        }
    }

    pub fn played_mut(&mut self, side: Side) -> &mut Vec<CardId> {
        match side {
            Side::Hero1 => &mut self.hero1_played,
            Side::Hero2 => &mut self.hero2_played,
        }
    }

    pub fn cooldowns(&self, side: Side) -> &CooldownMap {
        match side {
            Side::Hero1 => &self.cooldowns1,
            Side::Hero2 => &self.cooldowns2,
        }
    }

    pub fn cooldowns_mut(&mut self, side: Side) -> &mut CooldownMap {
        match side {
            Side::Hero1 => &mut self.cooldowns1,
            Side::Hero2 => &mut self.cooldowns2,
        }
    }

    pub fn push_log(&mut self, message: String) {
        self.log.push(BattleLogEntry {
            turn: self.turn,
            message,
        });
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, BalanceResult};

/// Unique identifier for cards
pub type CardId = String;
/// Unique identifier for characteristics
pub type CharacteristicId = String;
/// Unique identifier for decks
pub type DeckId = String;

/// Whether a characteristic helps or hinders its owner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// A single game action with its magnitude.
///
/// "Self" is always the hero playing the card, "enemy" is the opponent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    // ==========================================
    // HEALTH
    // ==========================================
    DamageEnemy(f64),
    HealEnemy(f64),
    DamageSelf(f64),
    HealSelf(f64),

    // ==========================================
    // RESOURCES
    // ==========================================
    SpendManaSelf(f64),
    SpendManaEnemy(f64),
    RestoreManaSelf(f64),
    RestoreManaEnemy(f64),
    SpendStaminaSelf(f64),
    SpendStaminaEnemy(f64),
    RestoreStaminaSelf(f64),
    RestoreStaminaEnemy(f64),

    // ==========================================
    // SHIELDS
    // ==========================================
    ShieldSelf(f64),
    ShieldEnemy(f64),

    // ==========================================
    // STRUCTURAL MODIFIERS
    // ==========================================
    /// Turns the sibling actions into a recurring effect (0 = one-time)
    EffectDuration(f64),
    /// Turns before the card can be replayed
    Cooldown(f64),

    // Reserved: not resolved by the battle engine
    DrawCard(f64),
    DiscardCard(f64),
}

impl Action {
    /// The numeric payload of this action
    pub fn value(&self) -> f64 {
        match *self {
            Action::DamageEnemy(v)
            | Action::HealEnemy(v)
            | Action::DamageSelf(v)
            | Action::HealSelf(v)
            | Action::SpendManaSelf(v)
            | Action::SpendManaEnemy(v)
            | Action::RestoreManaSelf(v)
            | Action::RestoreManaEnemy(v)
            | Action::SpendStaminaSelf(v)
            | Action::SpendStaminaEnemy(v)
            | Action::RestoreStaminaSelf(v)
            | Action::RestoreStaminaEnemy(v)
            | Action::ShieldSelf(v)
            | Action::ShieldEnemy(v)
            | Action::EffectDuration(v)
            | Action::Cooldown(v)
            | Action::DrawCard(v)
            | Action::DiscardCard(v) => v,
        }
    }

    /// Same action kind with its payload multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Action {
        let v = self.value() * factor;
        match self {
            Action::DamageEnemy(_) => Action::DamageEnemy(v),
            Action::HealEnemy(_) => Action::HealEnemy(v),
            Action::DamageSelf(_) => Action::DamageSelf(v),
            Action::HealSelf(_) => Action::HealSelf(v),
            Action::SpendManaSelf(_) => Action::SpendManaSelf(v),
            Action::SpendManaEnemy(_) => Action::SpendManaEnemy(v),
            Action::RestoreManaSelf(_) => Action::RestoreManaSelf(v),
            Action::RestoreManaEnemy(_) => Action::RestoreManaEnemy(v),
            Action::SpendStaminaSelf(_) => Action::SpendStaminaSelf(v),
            Action::SpendStaminaEnemy(_) => Action::SpendStaminaEnemy(v),
            Action::RestoreStaminaSelf(_) => Action::RestoreStaminaSelf(v),
            Action::RestoreStaminaEnemy(_) => Action::RestoreStaminaEnemy(v),
            Action::ShieldSelf(_) => Action::ShieldSelf(v),
            Action::ShieldEnemy(_) => Action::ShieldEnemy(v),
            Action::EffectDuration(_) => Action::EffectDuration(v),
            Action::Cooldown(_) => Action::Cooldown(v),
            Action::DrawCard(_) => Action::DrawCard(v),
            Action::DiscardCard(_) => Action::DiscardCard(v),
        }
    }

    /// Timing modifiers that shape how a card resolves rather than doing anything
    pub fn is_structural(&self) -> bool {
        matches!(self, Action::EffectDuration(_) | Action::Cooldown(_))
    }

    /// Resource costs are paid immediately and exactly once, even on lasting cards
    pub fn is_resource_cost(&self) -> bool {
        matches!(
            self,
            Action::SpendManaSelf(_)
                | Action::SpendStaminaSelf(_)
                | Action::SpendManaEnemy(_)
                | Action::SpendStaminaEnemy(_)
        )
    }
}

/// One atomic effect instruction inside a characteristic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionBlock {
    pub id: String,
    #[serde(flatten)]
    pub action: Action,
}

impl ActionBlock {
    pub fn new(id: &str, action: Action) -> Self {
        Self {
            id: id.to_string(),
            action,
        }
    }
}

/// A reusable stat/effect template with a cost weight
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Characteristic {
    pub id: CharacteristicId,
    pub name: String,
    #[serde(rename = "type")]
    pub polarity: Polarity,
    /// Signed cost/value weight
    pub power_points: f64,
    pub actions: Vec<ActionBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Characteristic {
    pub fn new(id: &str, name: &str, polarity: Polarity, power_points: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            polarity,
            power_points,
            actions: vec![],
            description: None,
        }
    }

    pub fn with_actions(mut self, actions: Vec<ActionBlock>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        let id = format!("{}-a{}", self.id, self.actions.len() + 1);
        self.actions.push(ActionBlock::new(&id, action));
        self
    }
}

/// Read-only characteristic lookup, keyed by id.
///
/// Owned by the caller; battles and reports only borrow it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CharacteristicCatalog(BTreeMap<CharacteristicId, Characteristic>);

impl CharacteristicCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, characteristic: Characteristic) {
        self.0.insert(characteristic.id.clone(), characteristic);
    }

    pub fn get(&self, id: &str) -> Option<&Characteristic> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Characteristic> {
        self.0.values()
    }
}

impl FromIterator<Characteristic> for CharacteristicCatalog {
    fn from_iter<I: IntoIterator<Item = Characteristic>>(iter: I) -> Self {
        Self(iter.into_iter().map(|c| (c.id.clone(), c)).collect())
    }
}

/// A characteristic used on a card, with the multiplier applied to all its actions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardCharacteristic {
    pub characteristic_id: CharacteristicId,
    pub value: f64,
}

impl CardCharacteristic {
    pub fn new(characteristic_id: &str, value: f64) -> Self {
        Self {
            characteristic_id: characteristic_id.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub characteristics: Vec<CardCharacteristic>,
    /// Derived from `characteristics`; see [`Card::recompute_power_points`].
    /// Never read from input, so a freshly parsed card reports 0 until recomputed.
    #[serde(skip_deserializing)]
    total_power_points: f64,
}

impl Card {
    pub fn new(
        id: &str,
        name: &str,
        characteristics: Vec<CardCharacteristic>,
        catalog: &CharacteristicCatalog,
    ) -> Self {
        let mut card = Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            characteristics,
            total_power_points: 0.0,
        };
        card.recompute_power_points(catalog);
        card
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Σ(power points × multiplier); unknown characteristics contribute nothing
    pub fn compute_power_points(&self, catalog: &CharacteristicCatalog) -> f64 {
        self.characteristics
            .iter()
            .filter_map(|cc| {
                catalog
                    .get(&cc.characteristic_id)
                    .map(|c| c.power_points * cc.value)
            })
            .sum()
    }

    pub fn recompute_power_points(&mut self, catalog: &CharacteristicCatalog) {
        self.total_power_points = self.compute_power_points(catalog);
    }

    pub fn total_power_points(&self) -> f64 {
        self.total_power_points
    }
}

/// A named multiset of card ids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub card_ids: Vec<CardId>,
}

impl Deck {
    pub fn new(id: &str, name: &str, card_ids: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            card_ids: card_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Expand the deck into cards, keeping duplicates and order; unknown ids are dropped
    pub fn resolve(&self, cards: &[Card]) -> Vec<Card> {
        let by_id: BTreeMap<&str, &Card> = cards.iter().map(|c| (c.id.as_str(), c)).collect();
        self.card_ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).map(|c| (*c).clone()))
            .collect()
    }

    pub fn total_power_points(&self, cards: &[Card]) -> f64 {
        self.resolve(cards).iter().map(Card::total_power_points).sum()
    }

    pub fn average_power_points(&self, cards: &[Card]) -> f64 {
        let resolved = self.resolve(cards);
        if resolved.is_empty() {
            return 0.0;
        }
        resolved.iter().map(Card::total_power_points).sum::<f64>() / resolved.len() as f64
    }
}

/// Base capacities of a hero
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeroSettings {
    pub health: i32,
    pub mana: i32,
    pub stamina: i32,
}

impl HeroSettings {
    pub fn new(health: i32, mana: i32, stamina: i32) -> Self {
        Self {
            health,
            mana,
            stamina,
        }
    }

    /// All capacities must be strictly positive; `hero` names the hero in the error
    pub fn validate(&self, hero: u8) -> BalanceResult<()> {
        let fields = [
            ("health", self.health),
            ("mana", self.mana),
            ("stamina", self.stamina),
        ];
        for (field, value) in fields {
            if value <= 0 {
                return Err(BalanceError::InvalidHeroSettings {
                    hero,
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self::new(100, 50, 50)
    }
}

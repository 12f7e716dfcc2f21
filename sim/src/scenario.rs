//! Scenario files: the catalogs, decks and hero settings for one matchup.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use deckforge_core::{
    Card, Characteristic, CharacteristicCatalog, Deck, DeckId, HeroSettings, Matchup,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub characteristics: Vec<Characteristic>,
    pub cards: Vec<Card>,
    pub decks: Vec<Deck>,
    pub hero1_deck: DeckId,
    pub hero2_deck: DeckId,
    #[serde(default)]
    pub hero1: HeroSettings,
    #[serde(default)]
    pub hero2: HeroSettings,
}

/// A scenario ready to hand to the batch driver
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub catalog: CharacteristicCatalog,
    /// Power points recomputed against `catalog`
    pub cards: Vec<Card>,
    pub matchup: Matchup,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn deck(&self, id: &str) -> Result<Deck> {
        match self.decks.iter().find(|d| d.id == id) {
            Some(deck) => Ok(deck.clone()),
            None => bail!("deck '{}' is not defined in the scenario", id),
        }
    }

    pub fn into_loaded(self) -> Result<LoadedScenario> {
        let hero1_deck = self.deck(&self.hero1_deck)?;
        let hero2_deck = self.deck(&self.hero2_deck)?;

        let catalog: CharacteristicCatalog = self.characteristics.into_iter().collect();
        let mut cards = self.cards;
        for card in &mut cards {
            card.recompute_power_points(&catalog);
        }

        for deck in [&hero1_deck, &hero2_deck] {
            let resolved = deck.resolve(&cards).len();
            if resolved < deck.card_ids.len() {
                log::warn!(
                    "deck '{}': {} of {} card ids are unknown and will be skipped",
                    deck.name,
                    deck.card_ids.len() - resolved,
                    deck.card_ids.len()
                );
            }
        }

        Ok(LoadedScenario {
            catalog,
            cards,
            matchup: Matchup {
                hero1_deck,
                hero2_deck,
                hero1: self.hero1,
                hero2: self.hero2,
            },
        })
    }
}

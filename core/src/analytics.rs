//! Per-card statistics and balance recommendations over a set of battles.
//!
//! Everything here is a pure function of its inputs.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::batch::SimulationResult;
use crate::config::AnalyticsConfig;
use crate::state::{Side, SideResult};
use crate::types::{Card, CardId, HeroSettings};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardAnalytics {
    pub card_id: CardId,
    pub card_name: String,
    pub total_appearances: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// wins / (wins + losses) × 100; draws are left out of the denominator
    pub win_rate: f64,
    pub avg_health_when_win: f64,
    pub avg_mana_when_win: f64,
    pub avg_stamina_when_win: f64,
    pub avg_health_when_lose: f64,
    pub avg_mana_when_lose: f64,
    pub avg_stamina_when_lose: f64,
    pub impact_score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BalanceIssue {
    Overpowered,
    Underpowered,
    Balanced,
}

/// Ordered high to low
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecommendation {
    pub card_id: CardId,
    pub card_name: String,
    pub issue: BalanceIssue,
    pub severity: Severity,
    pub description: String,
    pub win_rate: f64,
    pub impact_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationAnalytics {
    pub total_simulations: usize,
    pub results: Vec<SimulationResult>,
    /// Sorted by descending impact score
    pub card_analytics: Vec<CardAnalytics>,
    pub recommendations: Vec<BalanceRecommendation>,
}

impl SimulationAnalytics {
    pub fn card(&self, card_id: &str) -> Option<&CardAnalytics> {
        self.card_analytics.iter().find(|c| c.card_id == card_id)
    }
}

/// Starting stats of the holding side, split by that side's result
#[derive(Debug, Default)]
struct CardTally {
    appearances: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    when_win: StatSums,
    when_lose: StatSums,
}

#[derive(Debug, Default)]
struct StatSums {
    count: u32,
    health: f64,
    mana: f64,
    stamina: f64,
}

impl StatSums {
    fn add(&mut self, settings: HeroSettings) {
        self.count += 1;
        self.health += settings.health as f64;
        self.mana += settings.mana as f64;
        self.stamina += settings.stamina as f64;
    }

    /// (health, mana, stamina) averages, zero when empty
    fn averages(&self) -> (f64, f64, f64) {
        if self.count == 0 {
            return (0.0, 0.0, 0.0);
        }
        let n = self.count as f64;
        (self.health / n, self.mana / n, self.stamina / n)
    }
}

/// Win rate from decisive outcomes only
pub fn decisive_win_rate(wins: u32, losses: u32) -> f64 {
    let decisive = wins + losses;
    if decisive == 0 {
        return 0.0;
    }
    wins as f64 / decisive as f64 * 100.0
}

/// |winRate − 50| weighted by min(appearances / full_weight, 1)
pub fn impact_score(win_rate: f64, appearances: u32, full_weight_appearances: f64) -> f64 {
    let weight = (appearances as f64 / full_weight_appearances).min(1.0);
    (win_rate - 50.0).abs() * weight
}

pub fn analyze_simulations(results: &[SimulationResult], cards: &[Card]) -> SimulationAnalytics {
    analyze_simulations_with(results, cards, &AnalyticsConfig::default())
}

/// Aggregate every catalog card over `results` and derive recommendations
pub fn analyze_simulations_with(
    results: &[SimulationResult],
    cards: &[Card],
    config: &AnalyticsConfig,
) -> SimulationAnalytics {
    let mut tallies: BTreeMap<&str, CardTally> = cards
        .iter()
        .map(|card| (card.id.as_str(), CardTally::default()))
        .collect();

    for result in results {
        for side in Side::BOTH {
            let settings = result.initial_settings(side);
            let side_result = result.winner.result_for(side);
            for card_id in result.cards(side) {
                let Some(tally) = tallies.get_mut(card_id.as_str()) else {
                    continue;
                };
                tally.appearances += 1;
                match side_result {
                    SideResult::Win => {
                        tally.wins += 1;
                        tally.when_win.add(settings);
                    }
                    SideResult::Loss => {
                        tally.losses += 1;
                        tally.when_lose.add(settings);
                    }
                    SideResult::Draw => tally.draws += 1,
                }
            }
        }
    }

    // Catalog order, so equal impact scores keep a stable order
    let mut card_analytics: Vec<CardAnalytics> = Vec::new();
    for card in cards {
        let Some(tally) = tallies.remove(card.id.as_str()) else {
            continue;
        };
        if tally.appearances == 0 {
            continue;
        }
        let win_rate = decisive_win_rate(tally.wins, tally.losses);
        let (avg_health_when_win, avg_mana_when_win, avg_stamina_when_win) =
            tally.when_win.averages();
        let (avg_health_when_lose, avg_mana_when_lose, avg_stamina_when_lose) =
            tally.when_lose.averages();

        card_analytics.push(CardAnalytics {
            card_id: card.id.clone(),
            card_name: card.name.clone(),
            total_appearances: tally.appearances,
            wins: tally.wins,
            losses: tally.losses,
            draws: tally.draws,
            win_rate,
            avg_health_when_win,
            avg_mana_when_win,
            avg_stamina_when_win,
            avg_health_when_lose,
            avg_mana_when_lose,
            avg_stamina_when_lose,
            impact_score: impact_score(win_rate, tally.appearances, config.full_weight_appearances),
        });
    }

    card_analytics.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));

    let recommendations = generate_recommendations(&card_analytics, config);

    SimulationAnalytics {
        total_simulations: results.len(),
        results: results.to_vec(),
        card_analytics,
        recommendations,
    }
}

/// First matching rule wins; cards under the appearance minimum are skipped
pub fn generate_recommendations(
    card_analytics: &[CardAnalytics],
    config: &AnalyticsConfig,
) -> Vec<BalanceRecommendation> {
    let mut recommendations: Vec<BalanceRecommendation> = card_analytics
        .iter()
        .filter(|a| a.total_appearances >= config.min_appearances)
        .filter_map(|a| classify(a, config))
        .collect();

    recommendations.sort_by(|a, b| match a.severity.cmp(&b.severity) {
        Ordering::Equal => b.impact_score.total_cmp(&a.impact_score),
        other => other,
    });
    recommendations
}

fn classify(analytics: &CardAnalytics, config: &AnalyticsConfig) -> Option<BalanceRecommendation> {
    let CardAnalytics {
        card_name,
        win_rate,
        impact_score,
        ..
    } = analytics;
    let (wr, impact) = (*win_rate, *impact_score);

    let (issue, severity, description) =
        if wr > config.overpowered_high.win_rate && impact > config.overpowered_high.impact {
            (
                BalanceIssue::Overpowered,
                Severity::High,
                format!(
                    "{} has a very high win rate of {:.1}% and strongly decides battles (impact {:.1}). Reduce its strength.",
                    card_name, wr, impact
                ),
            )
        } else if wr > config.overpowered_medium.win_rate
            && impact > config.overpowered_medium.impact
        {
            (
                BalanceIssue::Overpowered,
                Severity::Medium,
                format!(
                    "{} shows an elevated win rate of {:.1}% and noticeably shifts balance (impact {:.1}). Consider a small nerf.",
                    card_name, wr, impact
                ),
            )
        } else if wr < config.underpowered_high.win_rate
            && impact > config.underpowered_high.impact
        {
            (
                BalanceIssue::Underpowered,
                Severity::High,
                format!(
                    "{} has a very low win rate of {:.1}% and strongly decides battles (impact {:.1}). Strengthen the card.",
                    card_name, wr, impact
                ),
            )
        } else if wr < config.underpowered_medium.win_rate
            && impact > config.underpowered_medium.impact
        {
            (
                BalanceIssue::Underpowered,
                Severity::Medium,
                format!(
                    "{} shows a reduced win rate of {:.1}% and noticeably shifts balance (impact {:.1}). Consider a small buff.",
                    card_name, wr, impact
                ),
            )
        } else if wr >= config.balanced_band.0
            && wr <= config.balanced_band.1
            && impact > config.balanced_impact
        {
            (
                BalanceIssue::Balanced,
                Severity::Low,
                format!(
                    "{} has a balanced win rate of {:.1}% but weighs heavily on outcomes (impact {:.1}). It may be too central to the meta.",
                    card_name, wr, impact
                ),
            )
        } else {
            return None;
        };

    Some(BalanceRecommendation {
        card_id: analytics.card_id.clone(),
        card_name: card_name.clone(),
        issue,
        severity,
        description,
        win_rate: wr,
        impact_score: impact,
    })
}

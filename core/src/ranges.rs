//! Win rates restricted to regions of starting hero stats.
//!
//! Used to find where in (health, resource) space the card pool is most
//! balanced. Range bounds are inclusive on both ends.

use serde::{Deserialize, Serialize};

use crate::analytics::SimulationAnalytics;
use crate::config::AnalyticsConfig;
use crate::error::{BalanceError, BalanceResult};
use crate::state::Side;
use crate::types::{Card, CardId};

/// Inclusive `[min, max]`
pub type StatRange = (f64, f64);

fn contains(range: StatRange, value: i32) -> bool {
    let v = value as f64;
    v >= range.0 && v <= range.1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatWinRate {
    pub wins: u32,
    pub total: u32,
    /// wins / total × 100; draws count in `total`
    pub win_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardRangeStat {
    pub card_id: CardId,
    pub card_name: String,
    pub win_rate: f64,
    pub deviation: f64,
}

/// One grid cell that passed the sample-size gates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatRangeBalance {
    pub health_range: StatRange,
    pub resource_range: StatRange,
    /// Mean |winRate − 50| over the counted cards
    pub avg_win_rate_deviation: f64,
    /// Max battles seen by any counted card
    pub total_battles: u32,
    /// Sorted by ascending deviation
    pub card_stats: Vec<CardRangeStat>,
}

impl StatRangeBalance {
    pub fn health_midpoint(&self) -> f64 {
        (self.health_range.0 + self.health_range.1) / 2.0
    }

    pub fn resource_midpoint(&self) -> f64 {
        (self.resource_range.0 + self.resource_range.1) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardWinRateAtStats {
    pub card_id: CardId,
    pub card_name: String,
    pub win_rate: f64,
    pub wins: u32,
    pub total: u32,
    pub deviation: f64,
}

/// Win rate of `card_id` over battles where its side started with health in
/// `health_range` and mana or stamina in `resource_range`.
///
/// When both sides hold the card, hero 1's side is the one evaluated.
pub fn get_card_win_rate_by_stats(
    card_id: &str,
    analytics: &SimulationAnalytics,
    health_range: StatRange,
    resource_range: StatRange,
) -> StatWinRate {
    let mut wins = 0;
    let mut total = 0;

    for result in &analytics.results {
        let side = if result.holds(Side::Hero1, card_id) {
            Side::Hero1
        } else if result.holds(Side::Hero2, card_id) {
            Side::Hero2
        } else {
            continue;
        };

        let settings = result.initial_settings(side);
        let in_range = contains(health_range, settings.health)
            && (contains(resource_range, settings.mana)
                || contains(resource_range, settings.stamina));
        if !in_range {
            continue;
        }

        total += 1;
        if result.winner.winner() == Some(side) {
            wins += 1;
        }
    }

    StatWinRate {
        wins,
        total,
        win_rate: if total > 0 {
            wins as f64 / total as f64 * 100.0
        } else {
            0.0
        },
    }
}

pub fn find_best_balanced_ranges(
    analytics: &SimulationAnalytics,
    cards: &[Card],
    health_buckets: u32,
    resource_buckets: u32,
    base_health: f64,
    base_resource: f64,
) -> BalanceResult<Vec<StatRangeBalance>> {
    find_best_balanced_ranges_with(
        analytics,
        cards,
        health_buckets,
        resource_buckets,
        base_health,
        base_resource,
        &AnalyticsConfig::default(),
    )
}

/// Split `[0, base_health×10] × [0, base_resource×10]` into a grid and score
/// each qualifying cell by its cards' mean deviation from a 50% win rate.
/// Best balanced cell first.
pub fn find_best_balanced_ranges_with(
    analytics: &SimulationAnalytics,
    cards: &[Card],
    health_buckets: u32,
    resource_buckets: u32,
    base_health: f64,
    base_resource: f64,
    config: &AnalyticsConfig,
) -> BalanceResult<Vec<StatRangeBalance>> {
    if health_buckets == 0 || resource_buckets == 0 {
        return Err(BalanceError::InvalidBuckets {
            health: health_buckets,
            resource: resource_buckets,
        });
    }

    let health_step = base_health * 10.0 / health_buckets as f64;
    let resource_step = base_resource * 10.0 / resource_buckets as f64;

    let mut ranges = Vec::new();
    for h in 0..health_buckets {
        for r in 0..resource_buckets {
            let health_range = (h as f64 * health_step, (h + 1) as f64 * health_step);
            let resource_range = (r as f64 * resource_step, (r + 1) as f64 * resource_step);

            let mut total_battles = 0;
            let mut card_stats = Vec::new();
            for card in cards {
                let stats =
                    get_card_win_rate_by_stats(&card.id, analytics, health_range, resource_range);
                if stats.total < config.min_card_battles_in_range {
                    continue;
                }
                total_battles = total_battles.max(stats.total);
                card_stats.push(CardRangeStat {
                    card_id: card.id.clone(),
                    card_name: card.name.clone(),
                    win_rate: stats.win_rate,
                    deviation: (stats.win_rate - 50.0).abs(),
                });
            }

            if card_stats.len() < config.min_cards_in_range
                || total_battles < config.min_range_battles
            {
                continue;
            }

            let avg_win_rate_deviation =
                card_stats.iter().map(|s| s.deviation).sum::<f64>() / card_stats.len() as f64;
            card_stats.sort_by(|a, b| a.deviation.total_cmp(&b.deviation));

            ranges.push(StatRangeBalance {
                health_range,
                resource_range,
                avg_win_rate_deviation,
                total_battles,
                card_stats,
            });
        }
    }

    ranges.sort_by(|a, b| a.avg_win_rate_deviation.total_cmp(&b.avg_win_rate_deviation));
    Ok(ranges)
}

pub fn get_cards_win_rate_at_specific_stats(
    analytics: &SimulationAnalytics,
    cards: &[Card],
    health: f64,
    resource: f64,
    tolerance: Option<f64>,
) -> Vec<CardWinRateAtStats> {
    get_cards_win_rate_at_specific_stats_with(
        analytics,
        cards,
        health,
        resource,
        tolerance,
        &AnalyticsConfig::default(),
    )
}

/// Per-card win rate around a single (health, resource) point, highest first.
/// `tolerance` falls back to `config.point_tolerance` when `None`.
pub fn get_cards_win_rate_at_specific_stats_with(
    analytics: &SimulationAnalytics,
    cards: &[Card],
    health: f64,
    resource: f64,
    tolerance: Option<f64>,
    config: &AnalyticsConfig,
) -> Vec<CardWinRateAtStats> {
    let tolerance = tolerance.unwrap_or(config.point_tolerance);
    let health_range = (health - tolerance, health + tolerance);
    let resource_range = (resource - tolerance, resource + tolerance);

    let mut rates: Vec<CardWinRateAtStats> = cards
        .iter()
        .filter_map(|card| {
            let stats =
                get_card_win_rate_by_stats(&card.id, analytics, health_range, resource_range);
            (stats.total > 0).then(|| CardWinRateAtStats {
                card_id: card.id.clone(),
                card_name: card.name.clone(),
                win_rate: stats.win_rate,
                wins: stats.wins,
                total: stats.total,
                deviation: (stats.win_rate - 50.0).abs(),
            })
        })
        .collect();

    rates.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    rates
}

//! Power-point re-calibration and stat scaling suggestions

use serde::{Deserialize, Serialize};

use crate::analytics::SimulationAnalytics;
use crate::config::AnalyticsConfig;
use crate::ranges::StatRangeBalance;
use crate::types::{Card, CardId, CharacteristicCatalog};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerPointSuggestion {
    pub card_id: CardId,
    pub card_name: String,
    pub current_power_points: f64,
    pub suggested_power_points: f64,
    /// Signed, in half-point steps
    pub adjustment: f64,
    pub win_rate: f64,
    pub impact_score: f64,
    pub reason: String,
}

/// Hero stats at the centre of the best balanced range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatTarget {
    pub health: f64,
    pub resource: f64,
    /// target / raw midpoint
    pub health_scale: f64,
    pub resource_scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScalingSuggestion {
    /// `None` when no balanced range was available
    pub target: Option<StatTarget>,
    pub card_adjustments: Vec<PowerPointSuggestion>,
}

/// Nearest half point, halves rounding up
pub fn round_to_half(x: f64) -> f64 {
    (x * 2.0 + 0.5).floor() / 2.0
}

fn round_to_ten(x: f64) -> f64 {
    (x / 10.0 + 0.5).floor() * 10.0
}

pub fn calculate_power_point_suggestions(
    analytics: &SimulationAnalytics,
    cards: &[Card],
) -> Vec<PowerPointSuggestion> {
    calculate_power_point_suggestions_with(analytics, cards, &AnalyticsConfig::default())
}

/// Suggest a PP delta per well-sampled card, largest |delta| first
pub fn calculate_power_point_suggestions_with(
    analytics: &SimulationAnalytics,
    cards: &[Card],
    config: &AnalyticsConfig,
) -> Vec<PowerPointSuggestion> {
    let mut suggestions: Vec<PowerPointSuggestion> = analytics
        .card_analytics
        .iter()
        .filter(|a| a.total_appearances >= config.min_appearances)
        .filter_map(|a| {
            let card = cards.iter().find(|c| c.id == a.card_id)?;
            let confidence = (a.impact_score / config.impact_divisor).min(config.impact_cap);
            let adjustment =
                round_to_half((a.win_rate - 50.0) * config.power_point_factor * confidence);
            if adjustment.abs() < config.min_power_point_delta {
                return None;
            }

            let current = card.total_power_points();
            let reason = if a.win_rate > 60.0 {
                format!(
                    "Overperforming at {:.1}% win rate: raise its cost by {} PP",
                    a.win_rate, adjustment
                )
            } else if a.win_rate < 40.0 {
                format!(
                    "Underperforming at {:.1}% win rate: lower its cost by {} PP",
                    a.win_rate,
                    adjustment.abs()
                )
            } else {
                format!(
                    "Win rate {:.1}% is off parity: adjust by {:+} PP",
                    a.win_rate, adjustment
                )
            };

            Some(PowerPointSuggestion {
                card_id: a.card_id.clone(),
                card_name: a.card_name.clone(),
                current_power_points: current,
                suggested_power_points: current + adjustment,
                adjustment,
                win_rate: a.win_rate,
                impact_score: a.impact_score,
                reason,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.adjustment.abs().total_cmp(&a.adjustment.abs()));
    suggestions
}

pub fn calculate_scaling_suggestions(
    analytics: &SimulationAnalytics,
    cards: &[Card],
    best_range: Option<&StatRangeBalance>,
    characteristics: &CharacteristicCatalog,
) -> ScalingSuggestion {
    calculate_scaling_suggestions_with(
        analytics,
        cards,
        best_range,
        characteristics,
        &AnalyticsConfig::default(),
    )
}

/// Move hero stats toward the best range and power points toward parity.
/// Characteristic values are never rescaled here; only power points move.
pub fn calculate_scaling_suggestions_with(
    analytics: &SimulationAnalytics,
    cards: &[Card],
    best_range: Option<&StatRangeBalance>,
    characteristics: &CharacteristicCatalog,
    config: &AnalyticsConfig,
) -> ScalingSuggestion {
    let target = best_range.map(|range| {
        let health_mid = range.health_midpoint();
        let resource_mid = range.resource_midpoint();
        let health = round_to_ten(health_mid);
        let resource = round_to_ten(resource_mid);
        let scale = |target: f64, mid: f64| if mid > 0.0 { target / mid } else { 1.0 };
        StatTarget {
            health,
            resource,
            health_scale: scale(health, health_mid),
            resource_scale: scale(resource, resource_mid),
        }
    });

    let card_adjustments = calculate_power_point_suggestions_with(analytics, cards, config)
        .into_iter()
        .filter_map(|mut suggestion| {
            let card = cards.iter().find(|c| c.id == suggestion.card_id)?;
            let current = card.compute_power_points(characteristics);
            suggestion.current_power_points = current;
            suggestion.suggested_power_points = current + suggestion.adjustment;
            (suggestion.suggested_power_points != current).then_some(suggestion)
        })
        .collect();

    ScalingSuggestion {
        target,
        card_adjustments,
    }
}

//! Tunable constants for the analytics reports.
//!
//! The defaults are hand-tuned values, not derived ones; callers can load
//! their own from JSON and pass them to the `*_with` report functions.

use serde::{Deserialize, Serialize};

/// A (win rate %, impact score) gate; both must be exceeded or undercut as the rule says
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub win_rate: f64,
    pub impact: f64,
}

impl Threshold {
    pub const fn new(win_rate: f64, impact: f64) -> Self {
        Self { win_rate, impact }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    /// Appearances at which a card's impact score gets full weight
    pub full_weight_appearances: f64,
    /// Cards below this many appearances get no recommendation or PP suggestion
    pub min_appearances: u32,

    /// winRate > t.win_rate and impact > t.impact
    pub overpowered_high: Threshold,
    pub overpowered_medium: Threshold,
    /// winRate < t.win_rate and impact > t.impact
    pub underpowered_high: Threshold,
    pub underpowered_medium: Threshold,
    /// Inclusive win rate band for the "balanced but meta-critical" verdict
    pub balanced_band: (f64, f64),
    pub balanced_impact: f64,

    /// Battles a card needs inside a range cell to be counted
    pub min_card_battles_in_range: u32,
    /// Counted cards a range cell needs to qualify
    pub min_cards_in_range: usize,
    /// Battles (max across cards) a range cell needs to qualify
    pub min_range_battles: u32,
    /// Default ± window for point lookups
    pub point_tolerance: f64,

    /// PP delta per win-rate point away from 50
    pub power_point_factor: f64,
    pub impact_divisor: f64,
    pub impact_cap: f64,
    /// Suggestions with a smaller |delta| are dropped
    pub min_power_point_delta: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            full_weight_appearances: 10.0,
            min_appearances: 5,
            overpowered_high: Threshold::new(70.0, 15.0),
            overpowered_medium: Threshold::new(65.0, 10.0),
            underpowered_high: Threshold::new(30.0, 15.0),
            underpowered_medium: Threshold::new(35.0, 10.0),
            balanced_band: (45.0, 55.0),
            balanced_impact: 20.0,
            min_card_battles_in_range: 3,
            min_cards_in_range: 2,
            min_range_battles: 5,
            point_tolerance: 50.0,
            power_point_factor: 0.5,
            impact_divisor: 20.0,
            impact_cap: 1.5,
            min_power_point_delta: 0.5,
        }
    }
}

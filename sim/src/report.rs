//! Balance report for one batch: outcome totals plus every analytics view.

use anyhow::Result;
use deckforge_core::{
    analyze_simulations_with, calculate_power_point_suggestions_with,
    calculate_scaling_suggestions_with, find_best_balanced_ranges_with, AnalyticsConfig, Outcome,
    PowerPointSuggestion, ScalingSuggestion, SimulationAnalytics, SimulationResult,
    StatRangeBalance,
};
use serde::Serialize;

use crate::scenario::LoadedScenario;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeTotals {
    pub hero1_wins: u32,
    pub hero2_wins: u32,
    pub draws: u32,
    pub avg_turns: f64,
}

impl OutcomeTotals {
    fn from_results(results: &[SimulationResult]) -> Self {
        let mut totals = Self::default();
        for result in results {
            match result.winner {
                Outcome::Hero1 => totals.hero1_wins += 1,
                Outcome::Hero2 => totals.hero2_wins += 1,
                Outcome::Draw => totals.draws += 1,
            }
        }
        if !results.is_empty() {
            totals.avg_turns =
                results.iter().map(|r| r.turns as f64).sum::<f64>() / results.len() as f64;
        }
        totals
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub hero1_deck: String,
    pub hero2_deck: String,
    pub hero1_deck_power: f64,
    pub hero2_deck_power: f64,
    pub totals: OutcomeTotals,
    pub analytics: SimulationAnalytics,
    pub best_ranges: Vec<StatRangeBalance>,
    pub power_point_suggestions: Vec<PowerPointSuggestion>,
    pub scaling: ScalingSuggestion,
}

impl BalanceReport {
    /// Run every analytics pass over `results`. The range grid spans ten times
    /// hero 1's base health and larger base resource.
    pub fn build(
        scenario: &LoadedScenario,
        results: &[SimulationResult],
        buckets: u32,
        config: &AnalyticsConfig,
    ) -> Result<Self> {
        let matchup = &scenario.matchup;
        let cards = &scenario.cards;

        let analytics = analyze_simulations_with(results, cards, config);
        let base = matchup.hero1;
        let best_ranges = find_best_balanced_ranges_with(
            &analytics,
            cards,
            buckets,
            buckets,
            base.health as f64,
            base.mana.max(base.stamina) as f64,
            config,
        )?;
        let power_point_suggestions =
            calculate_power_point_suggestions_with(&analytics, cards, config);
        let scaling = calculate_scaling_suggestions_with(
            &analytics,
            cards,
            best_ranges.first(),
            &scenario.catalog,
            config,
        );

        Ok(Self {
            hero1_deck: matchup.hero1_deck.name.clone(),
            hero2_deck: matchup.hero2_deck.name.clone(),
            hero1_deck_power: matchup.hero1_deck.total_power_points(cards),
            hero2_deck_power: matchup.hero2_deck.total_power_points(cards),
            totals: OutcomeTotals::from_results(results),
            analytics,
            best_ranges,
            power_point_suggestions,
            scaling,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text summary; `top` caps each table
    pub fn to_text(&self, top: usize) -> String {
        let mut report = String::new();
        let total = self.analytics.total_simulations.max(1) as f64;
        let pct = |n: u32| n as f64 / total * 100.0;

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    DECKFORGE BALANCE REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "{} ({:.1} PP) vs {} ({:.1} PP)\n",
            self.hero1_deck, self.hero1_deck_power, self.hero2_deck, self.hero2_deck_power
        ));
        report.push_str(&format!(
            "Battles: {}, avg {:.1} turns\n\n",
            self.analytics.total_simulations, self.totals.avg_turns
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Hero 1 wins:  {:>5} ({:>5.1}%)\n",
            self.totals.hero1_wins,
            pct(self.totals.hero1_wins)
        ));
        report.push_str(&format!(
            "  Hero 2 wins:  {:>5} ({:>5.1}%)\n",
            self.totals.hero2_wins,
            pct(self.totals.hero2_wins)
        ));
        report.push_str(&format!(
            "  Draws:        {:>5} ({:>5.1}%)\n\n",
            self.totals.draws,
            pct(self.totals.draws)
        ));

        report.push_str("── CARDS BY IMPACT ──────────────────────────────────────────────\n");
        report.push_str("  Card                  Seen   W/L/D          Win%   Impact\n");
        for card in self.analytics.card_analytics.iter().take(top) {
            report.push_str(&format!(
                "  {:<20} {:>5}   {:<14} {:>5.1}  {:>6.1}\n",
                card.card_name,
                card.total_appearances,
                format!("{}/{}/{}", card.wins, card.losses, card.draws),
                card.win_rate,
                card.impact_score
            ));
        }
        report.push('\n');

        report.push_str("── RECOMMENDATIONS ──────────────────────────────────────────────\n");
        if self.analytics.recommendations.is_empty() {
            report.push_str("  None: no card has enough appearances and a clear skew.\n");
        }
        for rec in self.analytics.recommendations.iter().take(top) {
            report.push_str(&format!(
                "  [{:?}/{:?}] {}\n",
                rec.severity, rec.issue, rec.description
            ));
        }
        report.push('\n');

        report.push_str("── BALANCED STAT RANGES ─────────────────────────────────────────\n");
        if self.best_ranges.is_empty() {
            report.push_str("  Not enough battles per cell to rank ranges.\n");
        }
        for range in self.best_ranges.iter().take(top.min(5)) {
            report.push_str(&format!(
                "  HP {:>6.0}-{:<6.0} Res {:>6.0}-{:<6.0} dev {:>5.1}  ({} battles, {} cards)\n",
                range.health_range.0,
                range.health_range.1,
                range.resource_range.0,
                range.resource_range.1,
                range.avg_win_rate_deviation,
                range.total_battles,
                range.card_stats.len()
            ));
        }
        if let Some(target) = &self.scaling.target {
            report.push_str(&format!(
                "  Suggested hero stats: HP {:.0}, resource {:.0}\n",
                target.health, target.resource
            ));
        }
        report.push('\n');

        report.push_str("── POWER POINT SUGGESTIONS ──────────────────────────────────────\n");
        if self.power_point_suggestions.is_empty() {
            report.push_str("  None: every sampled card is within half a point of parity.\n");
        }
        for s in self.power_point_suggestions.iter().take(top) {
            report.push_str(&format!(
                "  {:<20} {:>6.1} -> {:>6.1}  ({:+.1})  {}\n",
                s.card_name,
                s.current_power_points,
                s.suggested_power_points,
                s.adjustment,
                s.reason
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_core::HeroSettings;

    fn result(winner: Outcome, turns: u32) -> SimulationResult {
        SimulationResult {
            id: "sim-1".to_string(),
            hero1_deck_id: "d1".to_string(),
            hero2_deck_id: "d2".to_string(),
            hero1_deck_name: "One".to_string(),
            hero2_deck_name: "Two".to_string(),
            hero1_initial_settings: HeroSettings::default(),
            hero2_initial_settings: HeroSettings::default(),
            winner,
            turns,
            hero1_cards: vec![],
            hero2_cards: vec![],
        }
    }

    #[test]
    fn test_outcome_totals() {
        let results = vec![
            result(Outcome::Hero1, 4),
            result(Outcome::Hero1, 6),
            result(Outcome::Draw, 11),
        ];

        let totals = OutcomeTotals::from_results(&results);

        assert_eq!(totals.hero1_wins, 2);
        assert_eq!(totals.hero2_wins, 0);
        assert_eq!(totals.draws, 1);
        assert_eq!(totals.avg_turns, 7.0);
    }

    #[test]
    fn test_outcome_totals_empty() {
        let totals = OutcomeTotals::from_results(&[]);

        assert_eq!(totals.avg_turns, 0.0);
    }
}

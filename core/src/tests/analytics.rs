use super::*;
use crate::analytics::*;
use crate::config::AnalyticsConfig;

// ==========================================
// CARD STATISTICS
// ==========================================

#[test]
fn test_draw_only_card_has_zero_win_rate() {
    let results = repeat_result(4, &["stall"], &["other"], Outcome::Draw);

    let analytics = analyze_simulations(&results, &named_cards(&["stall", "other"]));

    let stall = analytics.card("stall").expect("card appeared");
    assert_eq!(stall.total_appearances, 4);
    assert_eq!(stall.wins, 0);
    assert_eq!(stall.losses, 0);
    assert_eq!(stall.draws, 4);
    assert_eq!(stall.win_rate, 0.0);
}

#[test]
fn test_win_rate_leaves_draws_out() {
    let mut results = repeat_result(3, &["a"], &[], Outcome::Hero1);
    results.extend(repeat_result(1, &["a"], &[], Outcome::Hero2));
    results.extend(repeat_result(2, &["a"], &[], Outcome::Draw));

    let analytics = analyze_simulations(&results, &named_cards(&["a"]));

    let a = analytics.card("a").expect("card appeared");
    assert_eq!(a.total_appearances, 6);
    assert_eq!((a.wins, a.losses, a.draws), (3, 1, 2));
    assert_eq!(a.win_rate, 75.0);
    assert_eq!(analytics.total_simulations, 6);
}

#[test]
fn test_card_in_both_decks_counts_each_side() {
    let results = repeat_result(1, &["mirror"], &["mirror"], Outcome::Hero1);

    let analytics = analyze_simulations(&results, &named_cards(&["mirror"]));

    let mirror = analytics.card("mirror").expect("card appeared");
    assert_eq!(mirror.total_appearances, 2);
    assert_eq!((mirror.wins, mirror.losses), (1, 1));
    assert_eq!(mirror.win_rate, 50.0);
}

#[test]
fn test_duplicate_copies_count_per_copy() {
    let results = repeat_result(1, &["a", "a"], &[], Outcome::Hero1);

    let analytics = analyze_simulations(&results, &named_cards(&["a"]));

    assert_eq!(analytics.card("a").map(|a| a.wins), Some(2));
}

#[test]
fn test_average_stats_split_by_result() {
    let results = vec![
        sim_result(
            &["a"],
            &[],
            Outcome::Hero1,
            HeroSettings::new(120, 40, 60),
            hero(),
        ),
        sim_result(
            &["a"],
            &[],
            Outcome::Hero1,
            HeroSettings::new(80, 60, 40),
            hero(),
        ),
        sim_result(
            &["a"],
            &[],
            Outcome::Hero2,
            HeroSettings::new(50, 10, 20),
            hero(),
        ),
    ];

    let analytics = analyze_simulations(&results, &named_cards(&["a"]));

    let a = analytics.card("a").expect("card appeared");
    assert_eq!(a.avg_health_when_win, 100.0);
    assert_eq!(a.avg_mana_when_win, 50.0);
    assert_eq!(a.avg_stamina_when_win, 50.0);
    assert_eq!(a.avg_health_when_lose, 50.0);
    assert_eq!(a.avg_mana_when_lose, 10.0);
    assert_eq!(a.avg_stamina_when_lose, 20.0);
}

#[test]
fn test_unseen_and_unknown_cards_are_left_out() {
    let results = repeat_result(2, &["a", "not-in-catalog"], &[], Outcome::Hero1);

    let analytics = analyze_simulations(&results, &named_cards(&["a", "never-played"]));

    assert_eq!(analytics.card_analytics.len(), 1);
    assert!(analytics.card("never-played").is_none());
    assert!(analytics.card("not-in-catalog").is_none());
}

#[test]
fn test_sorted_by_impact_descending() {
    let mut results = repeat_result(10, &["winner"], &["loser"], Outcome::Hero1);
    results.extend(repeat_result(10, &["coin"], &["coin2"], Outcome::Hero1));
    results.extend(repeat_result(10, &["coin2"], &["coin"], Outcome::Hero1));

    let analytics =
        analyze_simulations(&results, &named_cards(&["coin", "coin2", "winner", "loser"]));

    let order: Vec<&str> = analytics
        .card_analytics
        .iter()
        .map(|a| a.card_id.as_str())
        .collect();
    assert_eq!(order, vec!["winner", "loser", "coin", "coin2"]);
}

// ==========================================
// IMPACT SCORE
// ==========================================

#[test]
fn test_impact_grows_then_plateaus() {
    let scores: Vec<f64> = (1..=15).map(|n| impact_score(70.0, n, 10.0)).collect();

    for n in 1..10 {
        assert!(
            scores[n] > scores[n - 1],
            "impact must grow below the cap ({} appearances)",
            n + 1
        );
    }
    for n in 10..15 {
        assert_eq!(scores[n], scores[9], "impact plateaus at the cap");
    }
    assert_eq!(scores[9], 20.0);
}

#[test]
fn test_impact_is_symmetric_around_parity() {
    assert_eq!(impact_score(80.0, 5, 10.0), impact_score(20.0, 5, 10.0));
    assert_eq!(impact_score(50.0, 100, 10.0), 0.0);
}

// ==========================================
// RECOMMENDATIONS
// ==========================================

#[test]
fn test_dominant_and_hopeless_cards_flagged_high() {
    let results = repeat_result(20, &["op"], &["dud"], Outcome::Hero1);

    let analytics = analyze_simulations(&results, &named_cards(&["op", "dud"]));

    let find = |id: &str| {
        analytics
            .recommendations
            .iter()
            .find(|r| r.card_id == id)
            .expect("recommendation present")
    };
    assert_eq!(find("op").issue, BalanceIssue::Overpowered);
    assert_eq!(find("op").severity, Severity::High);
    assert_eq!(find("dud").issue, BalanceIssue::Underpowered);
    assert_eq!(find("dud").severity, Severity::High);
    assert!(find("op").description.contains("op"));
}

#[test]
fn test_moderate_edge_is_medium_severity() {
    // 8 wins, 4 losses: 66.7% with impact 16.7
    let mut results = repeat_result(8, &["edge"], &[], Outcome::Hero1);
    results.extend(repeat_result(4, &["edge"], &[], Outcome::Hero2));

    let analytics = analyze_simulations(&results, &named_cards(&["edge"]));

    assert_eq!(analytics.recommendations.len(), 1);
    let rec = &analytics.recommendations[0];
    assert_eq!(rec.issue, BalanceIssue::Overpowered);
    assert_eq!(rec.severity, Severity::Medium);
}

#[test]
fn test_thin_sample_gets_no_recommendation() {
    let results = repeat_result(4, &["rare"], &[], Outcome::Hero1);

    let analytics = analyze_simulations(&results, &named_cards(&["rare"]));

    assert_eq!(analytics.card("rare").map(|a| a.win_rate), Some(100.0));
    assert!(analytics.recommendations.is_empty(), "4 < minimum appearances");
}

#[test]
fn test_high_severity_sorts_before_medium() {
    let mut results = repeat_result(20, &["op"], &[], Outcome::Hero1);
    results.extend(repeat_result(8, &["edge"], &[], Outcome::Hero1));
    results.extend(repeat_result(4, &["edge"], &[], Outcome::Hero2));

    let analytics = analyze_simulations(&results, &named_cards(&["edge", "op"]));

    let severities: Vec<Severity> = analytics.recommendations.iter().map(|r| r.severity).collect();
    assert_eq!(severities, vec![Severity::High, Severity::Medium]);
}

#[test]
fn test_custom_thresholds_flag_balanced_card() {
    // 6 wins, 5 losses: 54.5%, inside the balanced band
    let mut results = repeat_result(6, &["staple"], &[], Outcome::Hero1);
    results.extend(repeat_result(5, &["staple"], &[], Outcome::Hero2));
    let cards = named_cards(&["staple"]);

    let default_report = analyze_simulations(&results, &cards);
    assert!(default_report.recommendations.is_empty());

    let config = AnalyticsConfig {
        balanced_impact: 1.0,
        ..AnalyticsConfig::default()
    };
    let tuned = analyze_simulations_with(&results, &cards, &config);

    assert_eq!(tuned.recommendations.len(), 1);
    assert_eq!(tuned.recommendations[0].issue, BalanceIssue::Balanced);
    assert_eq!(tuned.recommendations[0].severity, Severity::Low);
}

#[test]
fn test_analysis_is_deterministic() {
    let mut results = repeat_result(7, &["a", "b"], &["c"], Outcome::Hero1);
    results.extend(repeat_result(5, &["c"], &["a"], Outcome::Draw));
    let cards = named_cards(&["a", "b", "c"]);

    assert_eq!(
        analyze_simulations(&results, &cards),
        analyze_simulations(&results, &cards)
    );
}

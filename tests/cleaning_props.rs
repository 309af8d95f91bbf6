use matchnorm::{
    clean, extract_matches, extract_statistics, Appearance, CleanedTable, RawTable,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn appearance() -> impl Strategy<Value = Appearance> {
    (1i64..6, 1i64..5, any::<bool>(), 1i64..8, 0u32..4, 0u32..=90).prop_map(
        |(match_id, team_id, is_home, player_id, goals_scored, minutes_played)| Appearance {
            match_id,
            match_name: format!("Match {}", match_id),
            team_id,
            team_name: format!("Team {}", team_id),
            is_home,
            player_id,
            player_name: format!("Player {}", player_id),
            goals_scored,
            minutes_played,
        },
    )
}

fn to_raw(rows: &[Appearance]) -> RawTable {
    let headers = [
        "match_id",
        "match_name",
        "team_id",
        "team_name",
        "is_home",
        "player_id",
        "player_name",
        "goals_scored",
        "minutes_played",
    ];
    RawTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|a| {
                vec![
                    a.match_id.to_string(),
                    a.match_name.clone(),
                    a.team_id.to_string(),
                    a.team_name.clone(),
                    a.is_home.to_string(),
                    a.player_id.to_string(),
                    a.player_name.clone(),
                    a.goals_scored.to_string(),
                    a.minutes_played.to_string(),
                ]
            })
            .collect(),
    )
}

proptest! {
    #[test]
    fn every_match_has_two_teams(rows in prop::collection::vec(appearance(), 0..40)) {
        let cleaned = clean(&to_raw(&rows)).unwrap();
        let mut teams: HashMap<i64, HashSet<i64>> = HashMap::new();
        for r in cleaned.rows() {
            teams.entry(r.match_id).or_default().insert(r.team_id);
        }
        prop_assert!(teams.values().all(|t| t.len() == 2));
    }

    #[test]
    fn appearances_are_unique(rows in prop::collection::vec(appearance(), 0..40)) {
        let cleaned = clean(&to_raw(&rows)).unwrap();
        let mut seen = HashSet::new();
        for r in cleaned.rows() {
            prop_assert!(seen.insert((r.match_id, r.team_id, r.player_id)));
        }
        let report = cleaned.report();
        prop_assert_eq!(
            report.input_rows,
            report.output_rows + report.unbalanced_rows_removed + report.duplicate_rows_removed
        );
    }

    #[test]
    fn kept_rows_are_an_ordered_subsequence(rows in prop::collection::vec(appearance(), 0..40)) {
        let cleaned = CleanedTable::from_appearances(rows.clone());
        let mut it = rows.iter();
        for kept in cleaned.rows() {
            prop_assert!(it.any(|r| r == kept));
        }
    }

    #[test]
    fn goal_fractions_sum_to_one_or_zero(rows in prop::collection::vec(appearance(), 0..40)) {
        let cleaned = CleanedTable::from_appearances(rows);
        let stats = extract_statistics(&cleaned, 90).unwrap();
        let mut per_match: HashMap<i64, (f64, u32)> = HashMap::new();
        for s in &stats {
            let e = per_match.entry(s.match_id).or_default();
            e.0 += s.fraction_of_total_goals_scored;
            e.1 += s.goals_scored;
            prop_assert!((0.0..=1.0).contains(&s.fraction_of_total_goals_scored));
        }
        for (total, goals) in per_match.values() {
            if *goals == 0 {
                prop_assert_eq!(*total, 0.0);
            } else {
                prop_assert!((total - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn match_goals_add_up(rows in prop::collection::vec(appearance(), 0..40)) {
        let cleaned = CleanedTable::from_appearances(rows);
        // side assignment may be inconsistent in random data; only check
        // matches that do extract
        if let Ok(matches) = extract_matches(&cleaned) {
            for m in matches {
                let total: i64 = cleaned
                    .rows()
                    .iter()
                    .filter(|r| r.match_id == m.match_id)
                    .map(|r| i64::from(r.goals_scored))
                    .sum();
                prop_assert_eq!(m.home_goals + m.away_goals, total);
            }
        }
    }
}

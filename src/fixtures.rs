/// Fixture board data for tests, the demo command, and benchmarks.
///
/// The demo board is shaped like a real quiz night: a mid-size field, one
/// runaway favourite, a couple of ties, and a team that bombed the last round.
use crate::snapshot::ScoreSnapshot;

/// A six-team, four-category board with fireworks enabled.
pub fn demo_snapshot() -> ScoreSnapshot {
    let mut snapshot = ScoreSnapshot {
        teams: vec![
            "The Quizzards of Oz".to_string(),
            "Sharp as a Bowling Ball".to_string(),
            "Les Incompris".to_string(),
            "Trivia Newton-John".to_string(),
            "Agatha Quiztie".to_string(),
            "The Brain Cells".to_string(),
        ],
        categories: vec![
            "History".to_string(),
            "Music".to_string(),
            "Science".to_string(),
            "Movies".to_string(),
        ],
        scores: vec![
            vec![14, 18, 9, 16, 11, 7],
            vec![12, 15, 13, 10, 11, 6],
            vec![16, 12, 13, 14, 8, 9],
            vec![18, 21, 15, 12, 16, 0],
        ],
        duration_ms: None,
        fireworks: true,
        score_on_fire: None,
        score_on_ice: None,
        trends: None,
        placements: None,
        perfect_score_teams: Vec::new(),
        zero_score_teams: Vec::new(),
    };
    snapshot.fill_derived();
    snapshot
}

/// A small board for quick unit tests.
pub fn small_snapshot() -> ScoreSnapshot {
    let mut snapshot = ScoreSnapshot {
        teams: vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()],
        categories: vec!["Round 1".to_string(), "Round 2".to_string()],
        scores: vec![vec![10, 24, 5], vec![4, 0, 5]],
        duration_ms: None,
        fireworks: false,
        score_on_fire: None,
        score_on_ice: None,
        trends: None,
        placements: None,
        perfect_score_teams: Vec::new(),
        zero_score_teams: Vec::new(),
    };
    snapshot.fill_derived();
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_snapshot_is_valid() {
        let snapshot = demo_snapshot();
        snapshot.validate().unwrap();
        assert!(snapshot.duration_ms.is_some());
        assert!(snapshot.trends.is_some());
        assert!(snapshot.placements.is_some());
        // The Brain Cells blanked the last round.
        assert_eq!(snapshot.zero_score_teams, vec!["The Brain Cells"]);
    }

    #[test]
    fn test_small_snapshot_is_valid() {
        small_snapshot().validate().unwrap();
    }
}

//! The scored-board snapshot handed to the render engine at boot.
//!
//! A snapshot is immutable for the duration of one animation run. The editing
//! side normally precomputes the derived fields (duration, trends, placements,
//! fire/ice scores); when loading a hand-written board file the helpers here
//! fill in whatever was omitted.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Maximum valid score for a single category. The editing side rejects
/// anything above this before a snapshot is ever produced.
pub const MAX_CATEGORY_SCORE: u32 = 24;

/// Immutable input to one animation run.
///
/// `scores` is indexed `[category][team]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreSnapshot {
    pub teams: Vec<String>,
    pub categories: Vec<String>,
    pub scores: Vec<Vec<u32>>,
    /// Total animation length in milliseconds. Filled from [`duration_for`]
    /// when absent.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub fireworks: bool,
    /// Highest last-category score; marks a team's final label.
    #[serde(default)]
    pub score_on_fire: Option<u32>,
    /// Lowest last-category score (only present in one snapshot variant).
    #[serde(default)]
    pub score_on_ice: Option<u32>,
    /// Rank delta per team, negative = moved up. Present only when the board
    /// has more than one category.
    #[serde(default)]
    pub trends: Option<Vec<i32>>,
    /// Ordinal labels ("1st", "2nd", ...) aligned with `trends`.
    #[serde(default)]
    pub placements: Option<Vec<String>>,
    #[serde(default)]
    pub perfect_score_teams: Vec<String>,
    #[serde(default)]
    pub zero_score_teams: Vec<String>,
}

impl ScoreSnapshot {
    /// Fail fast on malformed input instead of dividing by zero or drawing
    /// garbage later.
    pub fn validate(&self) -> Result<()> {
        if self.teams.is_empty() {
            bail!("snapshot has no teams");
        }
        if self.categories.is_empty() {
            bail!("snapshot has no categories");
        }
        if self.scores.len() != self.categories.len() {
            bail!(
                "snapshot has {} score rows for {} categories",
                self.scores.len(),
                self.categories.len()
            );
        }
        for (c, row) in self.scores.iter().enumerate() {
            if row.len() != self.teams.len() {
                bail!(
                    "category '{}' has {} scores for {} teams",
                    self.categories[c],
                    row.len(),
                    self.teams.len()
                );
            }
            for (t, &score) in row.iter().enumerate() {
                if score > MAX_CATEGORY_SCORE {
                    bail!(
                        "score {} for team '{}' in category '{}' exceeds the maximum of {}",
                        score,
                        self.teams[t],
                        self.categories[c],
                        MAX_CATEGORY_SCORE
                    );
                }
            }
        }
        if let Some(trends) = &self.trends {
            if trends.len() != self.teams.len() {
                bail!("trends length {} does not match team count", trends.len());
            }
        }
        if let Some(placements) = &self.placements {
            if placements.len() != self.teams.len() {
                bail!(
                    "placements length {} does not match team count",
                    placements.len()
                );
            }
        }
        if self.duration_ms == Some(0) {
            bail!("animation duration must be positive");
        }
        Ok(())
    }

    /// Fill the derived fields a hand-written board file may omit.
    ///
    /// Trends and placements only exist when more than one category is
    /// scored. `score_on_ice` is left untouched when absent: the ice marker
    /// belongs to an optional snapshot variant.
    pub fn fill_derived(&mut self) {
        if self.duration_ms.is_none() {
            self.duration_ms = Some(duration_for(
                self.teams.len(),
                self.categories.len(),
                self.fireworks,
            ));
        }
        if self.score_on_fire.is_none() {
            self.score_on_fire = last_category_scores(&self.scores).max().copied();
        }
        if self.categories.len() > 1 {
            if self.trends.is_none() {
                self.trends = Some(compute_trends(&self.scores));
            }
            if self.placements.is_none() {
                self.placements = Some(compute_placements(&self.scores));
            }
        }
        if self.perfect_score_teams.is_empty() {
            self.perfect_score_teams = self.teams_where_last_score_is(MAX_CATEGORY_SCORE);
        }
        if self.zero_score_teams.is_empty() {
            self.zero_score_teams = self.teams_where_last_score_is(0);
        }
    }

    /// The animation duration; callers must have run [`fill_derived`] or
    /// provided the field.
    pub fn duration(&self) -> f64 {
        self.duration_ms.unwrap_or_else(|| {
            duration_for(self.teams.len(), self.categories.len(), self.fireworks)
        }) as f64
    }

    /// Last-category score for one team.
    pub fn final_round_score(&self, team: usize) -> u32 {
        self.scores[self.scores.len() - 1][team]
    }

    /// Read a TOML board file, validate it, and fill the derived fields.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read board file {}", path.display()))?;
        let mut snapshot: ScoreSnapshot = toml::from_str(&content)
            .with_context(|| format!("failed to parse board file {}", path.display()))?;
        snapshot.validate()?;
        snapshot.fill_derived();
        Ok(snapshot)
    }

    fn teams_where_last_score_is(&self, score: u32) -> Vec<String> {
        last_category_scores(&self.scores)
            .zip(self.teams.iter())
            .filter(|(s, _)| **s == score)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

/// Values computed once per animation run from the snapshot, owned by the
/// engine.
#[derive(Debug, Clone)]
pub struct DerivedModel {
    /// One sum per team across all categories, in presentation order.
    pub total_scores: Vec<f64>,
    /// Maximum of `total_scores`.
    pub max_score: f64,
    /// `total_scores` sorted ascending, duplicates kept. These are the image
    /// bounds of the per-team reveal windows.
    pub animation_steps: Vec<f64>,
}

impl DerivedModel {
    pub fn new(snapshot: &ScoreSnapshot) -> Self {
        let mut total_scores = vec![0.0; snapshot.teams.len()];
        for row in &snapshot.scores {
            for (t, &score) in row.iter().enumerate() {
                total_scores[t] += score as f64;
            }
        }
        let max_score = total_scores.iter().copied().fold(0.0, f64::max);
        let mut animation_steps = total_scores.clone();
        animation_steps.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Self {
            total_scores,
            max_score,
            animation_steps,
        }
    }
}

/// Total animation length for a board shape. Single-category boards get a
/// shortened run since there is no per-category suspense to draw out.
pub fn duration_for(team_count: usize, category_count: usize, fireworks: bool) -> u64 {
    let mut duration = 6000 + category_count as u64 * 1000 + team_count as u64 * 500;
    if fireworks {
        duration += 2000;
    }
    if category_count < 2 {
        duration -= 2000;
    }
    duration
}

/// Rank delta per team between the totals including and excluding the final
/// category. Negative means the team moved up on the last round.
pub fn compute_trends(scores: &[Vec<u32>]) -> Vec<i32> {
    let totals = column_totals(scores);
    let previous: Vec<i64> = totals
        .iter()
        .zip(scores[scores.len() - 1].iter())
        .map(|(total, last)| total - *last as i64)
        .collect();
    let current_ranks = ranks_of(&totals);
    let previous_ranks = ranks_of(&previous);
    current_ranks
        .iter()
        .zip(previous_ranks.iter())
        .map(|(cur, prev)| *cur as i32 - *prev as i32)
        .collect()
}

/// Ordinal placement labels aligned with [`compute_trends`]. Tied totals share
/// the better ordinal.
pub fn compute_placements(scores: &[Vec<u32>]) -> Vec<String> {
    let totals = column_totals(scores);
    ranks_of(&totals)
        .into_iter()
        .map(|rank| ordinal(rank + 1))
        .collect()
}

fn ordinal(rank: usize) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{}th", n),
    }
}

/// Zero-based rank of every value within the slice, ties sharing the best
/// rank (the index of the first equal value in descending order).
fn ranks_of(values: &[i64]) -> Vec<usize> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    values
        .iter()
        .map(|v| sorted.iter().position(|s| s == v).unwrap_or(0))
        .collect()
}

fn column_totals(scores: &[Vec<u32>]) -> Vec<i64> {
    let teams = scores.first().map_or(0, Vec::len);
    let mut totals = vec![0i64; teams];
    for row in scores {
        for (t, &score) in row.iter().enumerate() {
            totals[t] += score as i64;
        }
    }
    totals
}

fn last_category_scores(scores: &[Vec<u32>]) -> std::slice::Iter<'_, u32> {
    scores[scores.len() - 1].iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(scores: Vec<Vec<u32>>) -> ScoreSnapshot {
        let teams = (0..scores[0].len()).map(|t| format!("Team {}", t + 1)).collect();
        let categories = (0..scores.len()).map(|c| format!("Round {}", c + 1)).collect();
        ScoreSnapshot {
            teams,
            categories,
            scores,
            duration_ms: None,
            fireworks: false,
            score_on_fire: None,
            score_on_ice: None,
            trends: None,
            placements: None,
            perfect_score_teams: Vec::new(),
            zero_score_teams: Vec::new(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_board() {
        let snap = snapshot(vec![vec![10, 24, 5, 0]]);
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_teams() {
        let mut snap = snapshot(vec![vec![1, 2]]);
        snap.teams.clear();
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_row_length_mismatch() {
        let mut snap = snapshot(vec![vec![1, 2], vec![3, 4]]);
        snap.scores[1].push(7);
        let err = snap.validate().unwrap_err().to_string();
        assert!(err.contains("Round 2"), "unexpected error: {}", err);
    }

    #[test]
    fn test_validate_rejects_score_above_maximum() {
        let snap = snapshot(vec![vec![25, 2]]);
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_maximum_score() {
        // 24 is the maximum valid score, not an exclusive bound.
        let snap = snapshot(vec![vec![24, 2]]);
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_duration_single_category_shortened() {
        // 6000 + 1*1000 + 4*500 - 2000 = 7000
        assert_eq!(duration_for(4, 1, false), 7000);
        // Two categories lose the shortening: 6000 + 2000 + 2000 = 10000
        assert_eq!(duration_for(4, 2, false), 10000);
    }

    #[test]
    fn test_duration_fireworks_extension() {
        assert_eq!(duration_for(4, 2, true), duration_for(4, 2, false) + 2000);
    }

    #[test]
    fn test_fill_derived_single_category_scenario() {
        // 4 teams, 1 category, scores [10, 24, 5, 0].
        let mut snap = snapshot(vec![vec![10, 24, 5, 0]]);
        snap.fill_derived();
        assert_eq!(snap.duration_ms, Some(7000));
        assert_eq!(snap.score_on_fire, Some(24));
        // Single category: no trends, no placements.
        assert!(snap.trends.is_none());
        assert!(snap.placements.is_none());
        assert_eq!(snap.perfect_score_teams, vec!["Team 2".to_string()]);
        assert_eq!(snap.zero_score_teams, vec!["Team 4".to_string()]);
    }

    #[test]
    fn test_fill_derived_keeps_caller_fields() {
        let mut snap = snapshot(vec![vec![1, 2]]);
        snap.duration_ms = Some(12345);
        snap.score_on_fire = Some(99);
        snap.fill_derived();
        assert_eq!(snap.duration_ms, Some(12345));
        assert_eq!(snap.score_on_fire, Some(99));
    }

    #[test]
    fn test_derived_model_totals_and_steps() {
        let snap = snapshot(vec![vec![10, 24, 5, 0], vec![4, 0, 5, 1]]);
        let derived = DerivedModel::new(&snap);
        assert_eq!(derived.total_scores, vec![14.0, 24.0, 10.0, 1.0]);
        assert_eq!(derived.max_score, 24.0);
        assert_eq!(derived.animation_steps, vec![1.0, 10.0, 14.0, 24.0]);
    }

    #[test]
    fn test_derived_model_keeps_duplicate_steps() {
        let snap = snapshot(vec![vec![7, 7]]);
        let derived = DerivedModel::new(&snap);
        assert_eq!(derived.animation_steps, vec![7.0, 7.0]);
    }

    #[test]
    fn test_compute_trends_last_round_shuffle() {
        // Totals: [15, 12]; before the last round: [5, 12].
        // Team 1 moved from rank 1 to rank 0 (up, negative delta).
        let scores = vec![vec![5, 12], vec![10, 0]];
        assert_eq!(compute_trends(&scores), vec![-1, 1]);
    }

    #[test]
    fn test_compute_trends_flat_when_order_unchanged() {
        let scores = vec![vec![10, 5], vec![3, 2]];
        assert_eq!(compute_trends(&scores), vec![0, 0]);
    }

    #[test]
    fn test_compute_placements_ordinals() {
        let scores = vec![vec![1, 9, 5, 3], vec![0, 0, 0, 0]];
        assert_eq!(
            compute_placements(&scores),
            vec!["4th", "1st", "2nd", "3rd"]
        );
    }

    #[test]
    fn test_compute_placements_ties_share_best_ordinal() {
        let scores = vec![vec![9, 9, 1]];
        assert_eq!(compute_placements(&scores), vec!["1st", "1st", "3rd"]);
    }

    #[test]
    fn test_snapshot_from_toml() {
        let doc = r#"
teams = ["The Quizzards", "Trivia Newton John"]
categories = ["History", "Sports"]
scores = [[12, 18], [20, 9]]
fireworks = true
"#;
        let mut snap: ScoreSnapshot = toml::from_str(doc).unwrap();
        snap.validate().unwrap();
        snap.fill_derived();
        assert!(snap.fireworks);
        assert_eq!(snap.score_on_fire, Some(20));
        assert_eq!(snap.trends.as_ref().unwrap().len(), 2);
    }
}

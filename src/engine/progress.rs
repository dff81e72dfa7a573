//! Elapsed-time to revealed-score mapping.
//!
//! One scalar progress cursor is shared by every bar on the board. During the
//! stepped phase time is folded into per-team reveal windows whose image
//! bounds are adjacent sorted totals, so each team's true rank becomes visible
//! in ascending-score order before the next bar starts moving.

use super::constants::WINNER_REVEAL_TIME_FACTOR;
use crate::snapshot::DerivedModel;

/// Maps `x` from the domain `[dlb, dub]` into the image `[ilb, iub]`.
pub fn linear_transform(x: f64, dlb: f64, dub: f64, ilb: f64, iub: f64) -> f64 {
    ilb + (x - dlb) * (iub - ilb) / (dub - dlb)
}

#[derive(Debug, Clone)]
pub struct ProgressMapper {
    max_score: f64,
    duration: f64,
    winner_reveal_time: f64,
    time_per_team: f64,
    /// Sorted totals, ascending, duplicates kept.
    steps: Vec<f64>,
    /// Whether the per-team stepped phase applies at all. It needs at least
    /// two teams (the window divisor is `teams - 1`) and at least two
    /// categories to be worth staging.
    stepped: bool,
}

impl ProgressMapper {
    pub fn new(derived: &DerivedModel, duration: f64, category_count: usize) -> Self {
        let team_count = derived.total_scores.len();
        let stepped = team_count >= 2 && category_count >= 2;
        let winner_reveal_time = WINNER_REVEAL_TIME_FACTOR * duration;
        let time_per_team = if team_count > 1 {
            winner_reveal_time / (team_count - 1) as f64
        } else {
            // Degenerate single-team board; the stepped phase is skipped, the
            // value only has to stay finite.
            winner_reveal_time
        };
        Self {
            max_score: derived.max_score,
            duration,
            winner_reveal_time,
            time_per_team,
            steps: derived.animation_steps.clone(),
            stepped,
        }
    }

    pub fn winner_reveal_time(&self) -> f64 {
        self.winner_reveal_time
    }

    pub fn time_per_team(&self) -> f64 {
        self.time_per_team
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// The revealed-score cursor for `elapsed` milliseconds since the first
    /// frame. Monotonically non-decreasing, bounded in `[0, max_score]`, and
    /// exactly `max_score` from `duration` onward.
    pub fn revealed(&self, elapsed: f64) -> f64 {
        if elapsed >= self.duration || self.max_score == 0.0 {
            return self.max_score;
        }
        if elapsed <= 0.0 {
            return 0.0;
        }

        if !self.stepped {
            // Single team or single category: one linear climb to the top.
            return linear_transform(elapsed, 0.0, self.duration, 0.0, self.max_score);
        }

        if elapsed < self.winner_reveal_time {
            let window_elapsed = elapsed % self.time_per_team;
            let window_index = (elapsed / self.time_per_team) as i64 - 1;
            let (image_lower, image_upper) = if window_index < 0 {
                (0.0, self.steps[0])
            } else {
                let i = window_index as usize;
                (self.steps[i], self.steps[i + 1])
            };
            // [0, timePerTeam] -> [0, 100] -> sqrt ease -> back into the
            // window image. Fast climb, then deceleration into the step.
            let eased =
                10.0 * linear_transform(window_elapsed, 0.0, self.time_per_team, 0.0, 100.0).sqrt();
            return linear_transform(eased, 0.0, 100.0, image_lower, image_upper);
        }

        // Final linear climb from the runner-up total to the winner's.
        let runner_up = self.steps[self.steps.len() - 2];
        linear_transform(
            elapsed - self.winner_reveal_time,
            0.0,
            self.duration - self.winner_reveal_time,
            runner_up,
            self.max_score,
        )
    }

    /// True once the cursor has reached the top score.
    pub fn is_complete(&self, elapsed: f64) -> bool {
        self.revealed(elapsed) >= self.max_score
    }
}

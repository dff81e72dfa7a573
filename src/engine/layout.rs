//! Per-frame board geometry.
//!
//! Everything is derived from the surface size and the team/category counts,
//! recomputed on every frame so a surface resize takes effect immediately.
//!
//! ```text
//!  ---------------------------------------------------------------------------
//! |                               outer padding                               |
//! |    -------------------------------------------------------------------    |
//! |   |         |                                                     |   |   |
//! |   |         |                    score labels                     |   |   |
//! |   |         |                                                     |   |   |
//! |   |    c    |--------------------------------------------- --- ---| l |   |
//! |   |    a    |           | |           | |           | |   |   |   | e |   |
//! |   |    t    |    ---    | |           | |           | |   | m |   | g |   |
//! |   |    e    |   |   |   | |           | |    ---    | |   | a |   | e |   |
//! |   |    g    |   |   |   | |    ---    | |   |   |   | |   | x |   | n |   |
//! |   |    o    |   |   |   | |   |   |   | |   |   |   | |   |   |   | d |   |
//! |   |    r    |   |   |   | |   |   |   | |   |   |   | |   |   |   |   |   |
//! |   |    i    |   |   |   | |   |   |   | |   |   |   | |   |   |   |   |   |
//! |   |    e    |-----------| |-----------| |-----------| |-----------|   |   |
//! |   |    s    |   team    | |   team    | |   team    | |   team    |   |   |
//! |   |         |   name    | |   name    | |   name    | |   name    |   |   |
//! |    -------------------------------------------------------------------    |
//! |                                                                           |
//!  ---------------------------------------------------------------------------
//! ```

use super::constants::*;

/// All rectangular regions of one frame, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub team_count: usize,
    pub category_count: usize,

    pub drawable_left: f32,
    pub drawable_right: f32,
    pub drawable_top: f32,
    pub drawable_bottom: f32,
    pub drawable_width: f32,
    pub drawable_height: f32,

    /// Grid-legend column on the right edge.
    pub legend_width: f32,
    /// Category-label gutter on the left edge.
    pub categories_width: f32,
    pub categories_mid_x: f32,

    /// Main score area between gutter and legend.
    pub main_left: f32,
    pub main_right: f32,
    pub main_width: f32,

    pub team_column_width: f32,
    /// Width of the stacked-bar column inside a team column.
    pub bar_width: f32,
    /// Gap between adjacent team columns.
    pub whitespace_width: f32,
    /// Distance between the left edges of adjacent team columns.
    pub column_stride: f32,

    /// Bar area between the score-label strip and the team-name strip.
    pub scores_top: f32,
    pub scores_bottom: f32,
    pub scores_height: f32,
    pub score_label_height: f32,
    /// Vertical center of the team-name strip.
    pub team_names_baseline: f32,
}

impl BoardLayout {
    /// Pure function of the inputs; no hidden state.
    pub fn compute(
        surface_width: f32,
        surface_height: f32,
        team_count: usize,
        category_count: usize,
    ) -> Self {
        let drawable_left = OUTER_PADDING_PCT * surface_width;
        let drawable_right = (1.0 - OUTER_PADDING_PCT) * surface_width;
        let drawable_width = drawable_right - drawable_left;
        let legend_width = LEGEND_SECTION_WIDTH_PCT * drawable_width;
        let categories_width = CATEGORIES_SECTION_WIDTH_PCT * drawable_width;
        let main_left = drawable_left + categories_width;
        let main_right = drawable_right - legend_width;
        let main_width = main_right - main_left;

        let teams = team_count.max(1);
        let team_column_width =
            main_width * (1.0 - MAIN_SECTION_WHITESPACE_WIDTH_PCT) / teams as f32;
        // Bars shrink relative to their column as the board gets crowded.
        let bar_weight = 1.0 - (teams.clamp(4, 10) - 4) as f32 / 6.0;
        let bar_width = team_column_width / (2.0 + bar_weight);
        // A single column has no gaps to distribute.
        let whitespace_width = if teams > 1 {
            main_width * MAIN_SECTION_WHITESPACE_WIDTH_PCT / (teams - 1) as f32
        } else {
            0.0
        };

        let drawable_top = OUTER_PADDING_PCT * surface_height;
        let drawable_bottom = (1.0 - OUTER_PADDING_PCT) * surface_height;
        let drawable_height = drawable_bottom - drawable_top;
        let scores_top = drawable_top + SCORE_LABEL_HEIGHT_PCT * drawable_height;
        let scores_bottom = drawable_bottom - TEAM_NAMES_SECTION_HEIGHT_PCT * drawable_height;

        Self {
            team_count,
            category_count,
            drawable_left,
            drawable_right,
            drawable_top,
            drawable_bottom,
            drawable_width,
            drawable_height,
            legend_width,
            categories_width,
            categories_mid_x: drawable_left + categories_width / 2.0,
            main_left,
            main_right,
            main_width,
            team_column_width,
            bar_width,
            whitespace_width,
            column_stride: team_column_width + whitespace_width,
            scores_top,
            scores_bottom,
            scores_height: scores_bottom - scores_top,
            score_label_height: scores_top - drawable_top,
            team_names_baseline: (drawable_bottom + scores_bottom) / 2.0,
        }
    }

    /// Left edge of team `t`'s column.
    pub fn team_column_left(&self, t: usize) -> f32 {
        self.main_left + t as f32 * self.column_stride
    }

    /// Left edge of team `t`'s bar, centered in its column.
    pub fn bar_left(&self, t: usize) -> f32 {
        self.team_column_left(t) + self.team_column_width / 2.0 - self.bar_width / 2.0
    }

    /// Vertical position of a score value on the chart.
    pub fn score_y(&self, score: f64, max_score: f64) -> f32 {
        self.scores_bottom - (score * self.scores_height as f64 / max_score) as f32
    }

    /// Vertical center of category `c`'s gutter label.
    pub fn category_label_y(&self, c: usize) -> f32 {
        self.scores_bottom
            - (c + 1) as f32 * self.scores_height / (self.category_count + 1) as f32
    }
}

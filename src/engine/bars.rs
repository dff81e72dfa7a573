//! Stacked-bar chart drawn incrementally under the shared progress cursor.
//!
//! Every team stacks its category segments bottom-up until the cursor is
//! reached; teams whose totals sit below the cursor are fully grown while the
//! rest are still climbing. This module also owns the grid, the legend, the
//! score and team-name labels, the category gutter, and the highlight glow.

use super::constants::*;
use super::highlight::HighlightBoard;
use super::layout::BoardLayout;
use super::state::FontCache;
use super::surface::{RasterSurface, Rgba};
use crate::snapshot::{DerivedModel, ScoreSnapshot};

/// Board colors; defaults match the classic scoreboard look.
#[derive(Debug, Clone, Copy)]
pub struct BoardTheme {
    pub chart_background: Rgba,
    pub grid: Rgba,
    pub text: Rgba,
    pub highlight: Rgba,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self {
            chart_background: Rgba::rgba(32, 28, 40, 0.5),
            grid: Rgba::rgb(128, 128, 128),
            text: Rgba::rgb(179, 89, 0),
            highlight: Rgba::rgb(255, 255, 255),
        }
    }
}

/// Suffix on a fully revealed score label whose last-category score matches
/// the board's best final round.
pub const FIRE_MARKER: &str = "*";
/// Suffix for the worst final round (only in snapshots carrying an ice score).
pub const ICE_MARKER: &str = ".";

/// Fill hue of category `c`'s segments: a red-to-yellow ramp.
pub fn category_color(c: usize, category_count: usize) -> Rgba {
    let green = 128 + c * 128 / category_count.max(3);
    Rgba::rgb(255, green.min(255) as u8, 0)
}

/// Darker shade drawn behind a segment to separate it from the one below.
pub fn category_separator_color(c: usize, category_count: usize) -> Rgba {
    let green = 128 + (c as i64 - 4) * 128 / category_count.max(9) as i64;
    Rgba::rgb(255, green.clamp(0, 255) as u8, 0)
}

/// Greedy word wrap against the surface's text metrics. The first word of a
/// line is always kept even if it overflows on its own.
pub fn wrap_text<S: RasterSurface + ?Sized>(
    surface: &S,
    text: &str,
    max_width: f32,
    size: f32,
) -> Vec<String> {
    let mut words = text.split_whitespace();
    let mut current = match words.next() {
        Some(word) => word.to_string(),
        None => return vec![String::new()],
    };
    let mut lines = Vec::new();
    for word in words {
        let candidate = format!("{} {}", current, word);
        if surface.measure_text(&candidate, size) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Draw one frame of the chart. `revealed` is the shared progress cursor;
/// `highlights` is mutated when a bar finishes its final segment.
#[allow(clippy::too_many_arguments)]
pub fn draw_board<S: RasterSurface>(
    surface: &mut S,
    snapshot: &ScoreSnapshot,
    derived: &DerivedModel,
    layout: &BoardLayout,
    fonts: &FontCache,
    highlights: &mut HighlightBoard,
    theme: &BoardTheme,
    elapsed: f64,
    revealed: f64,
) {
    surface.fill_rect(
        layout.main_left,
        layout.drawable_top,
        layout.main_width,
        layout.scores_bottom - layout.drawable_top,
        theme.chart_background,
    );

    draw_grid(surface, layout, theme, fonts, derived.max_score, revealed);

    let team_count = snapshot.teams.len();
    let category_count = snapshot.categories.len();
    let mut category_alphas = vec![0.0f64; category_count];
    let alpha_increment = 1.0 / team_count as f64;
    let highlight_pad = HIGHLIGHT_AREA_FACTOR * layout.bar_width;
    let column_semi_width = layout.team_column_width / 2.0;

    for t in 0..team_count {
        let column_left = layout.team_column_left(t);
        let column_mid = column_left + column_semi_width;

        draw_team_name(surface, layout, fonts, theme, &snapshot.teams[t], column_mid);

        // Glow behind the bar while the highlight is expanding or fading.
        if let (Some(alpha), Some(highlight)) =
            (highlights.alpha(t, elapsed), highlights.get(t))
        {
            let glow_top = layout.scores_bottom + highlight.bar_top_offset + highlight_pad;
            let glow_height = -highlight.bar_top_offset - 2.0 * highlight_pad;
            if glow_height > 0.0 {
                surface.fill_rect(
                    layout.bar_left(t) - highlight_pad,
                    glow_top,
                    layout.bar_width + 2.0 * highlight_pad,
                    glow_height,
                    theme.highlight.with_alpha(alpha as f32),
                );
            }
        }

        // Stack category segments up to the cursor.
        let bar_left = layout.bar_left(t);
        let mut score = 0.0f64;
        let mut bottom = layout.scores_bottom;
        let mut growing = true;
        for c in 0..category_count {
            if !growing {
                break;
            }
            let segment = snapshot.scores[c][t] as f64;
            let mut next_score = score + segment;
            if next_score > revealed {
                if segment > 0.0 {
                    category_alphas[c] += (revealed - score) / segment * alpha_increment;
                }
                next_score = revealed;
                growing = false;
            } else {
                category_alphas[c] += alpha_increment;
            }

            let next_bottom = layout.score_y(next_score, derived.max_score.max(1.0));
            surface.fill_rect(
                bar_left,
                next_bottom,
                layout.bar_width,
                bottom - next_bottom,
                category_separator_color(c, category_count),
            );
            let inset_height = (bottom - next_bottom - SEGMENT_SEPARATOR_PX).max(0.0);
            surface.fill_rect(
                bar_left,
                next_bottom + SEGMENT_SEPARATOR_PX,
                layout.bar_width,
                inset_height,
                category_color(c, category_count),
            );

            score = next_score;
            bottom = next_bottom;

            // The bar just finished climbing into its final segment.
            if growing && c == category_count - 1 {
                highlights.trigger(t, elapsed, bottom - layout.scores_bottom);
            }
        }

        draw_score_label(
            surface, snapshot, layout, fonts, theme, highlights, t, column_mid, bottom, score,
        );

        if let (Some(_), Some(trends)) = (highlights.get(t), snapshot.trends.as_ref()) {
            draw_trend(
                surface, snapshot, layout, fonts, theme, trends[t], t, column_mid, bottom,
            );
        }
    }

    draw_category_labels(surface, snapshot, layout, fonts, &category_alphas);
}

fn draw_grid<S: RasterSurface>(
    surface: &mut S,
    layout: &BoardLayout,
    theme: &BoardTheme,
    fonts: &FontCache,
    max_score: f64,
    revealed: f64,
) {
    let legend_mid = layout.main_right + layout.legend_width / 2.0;
    let top_bound = revealed.min(max_score);
    let top_grid_score = top_bound - top_bound % GRID_LINES_SPACING_PTS;
    let scale = max_score.max(1.0);

    let mut line = 0.0;
    while line <= top_grid_score {
        let y = layout.score_y(line, scale);
        surface.stroke_line(layout.main_left, y, layout.main_right, y, theme.grid);
        surface.draw_text(
            &format!("{}", line as u32),
            legend_mid,
            y,
            layout.legend_width,
            fonts.scores,
            theme.grid,
        );
        line += GRID_LINES_SPACING_PTS;
    }

    // Fade in the next grid line as the cursor approaches it.
    let next_line = top_grid_score + GRID_LINES_SPACING_PTS;
    if next_line <= max_score {
        let alpha = (1.0 - (next_line - revealed) / GRID_LINES_SPACING_PTS).clamp(0.0, 1.0);
        let color = theme.grid.with_alpha(alpha as f32);
        let y = layout.score_y(next_line, scale);
        surface.stroke_line(layout.main_left, y, layout.main_right, y, color);
        surface.draw_text(
            &format!("{}", next_line as u32),
            legend_mid,
            y,
            layout.legend_width,
            fonts.scores,
            color,
        );
    }
}

fn draw_team_name<S: RasterSurface>(
    surface: &mut S,
    layout: &BoardLayout,
    fonts: &FontCache,
    theme: &BoardTheme,
    name: &str,
    column_mid: f32,
) {
    let size = fonts.team_names;
    let lines = wrap_text(surface, name, layout.team_column_width, size);
    let line_count = lines.len();
    for (l, line) in lines.into_iter().enumerate() {
        let y = layout.team_names_baseline
            + (l as f32 - (line_count - 1) as f32 / 2.0) * size;
        surface.draw_text(&line, column_mid, y, layout.team_column_width, size, theme.text);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_score_label<S: RasterSurface>(
    surface: &mut S,
    snapshot: &ScoreSnapshot,
    layout: &BoardLayout,
    fonts: &FontCache,
    theme: &BoardTheme,
    highlights: &HighlightBoard,
    t: usize,
    column_mid: f32,
    bar_top: f32,
    score: f64,
) {
    let final_round = snapshot.final_round_score(t);
    let label = if highlights.get(t).is_some() {
        let mut label = format!("{}", score.round() as i64);
        if snapshot.score_on_fire == Some(final_round) {
            label.push_str(FIRE_MARKER);
        } else if snapshot.score_on_ice == Some(final_round) {
            label.push_str(ICE_MARKER);
        }
        label
    } else {
        format!("{:.1}", score)
    };
    surface.draw_text(
        &label,
        column_mid,
        bar_top - layout.score_label_height / 2.0,
        layout.team_column_width,
        fonts.scores,
        theme.text,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_trend<S: RasterSurface>(
    surface: &mut S,
    snapshot: &ScoreSnapshot,
    layout: &BoardLayout,
    fonts: &FontCache,
    theme: &BoardTheme,
    trend: i32,
    t: usize,
    column_mid: f32,
    bar_top: f32,
) {
    // Negative delta means the team moved up on the final round.
    let (glyph, color) = if trend < 0 {
        ("▲", Rgba::rgb(0, 200, 80))
    } else if trend > 0 {
        ("▼", Rgba::rgb(220, 40, 40))
    } else {
        ("■", Rgba::rgb(128, 128, 128))
    };
    let glyph_y = bar_top + fonts.scores;
    surface.draw_text(glyph, column_mid, glyph_y, layout.bar_width, fonts.scores, color);

    if snapshot.fireworks {
        if let Some(placements) = snapshot.placements.as_ref() {
            surface.draw_text(
                &placements[t],
                column_mid,
                glyph_y + fonts.scores,
                layout.bar_width,
                fonts.scores,
                theme.text,
            );
        }
    }
}

fn draw_category_labels<S: RasterSurface>(
    surface: &mut S,
    snapshot: &ScoreSnapshot,
    layout: &BoardLayout,
    fonts: &FontCache,
    category_alphas: &[f64],
) {
    let count = snapshot.categories.len();
    for (c, name) in snapshot.categories.iter().enumerate() {
        let color = category_color(c, count).with_alpha(category_alphas[c].clamp(0.0, 1.0) as f32);
        surface.draw_text(
            name,
            layout.categories_mid_x,
            layout.category_label_y(c),
            layout.categories_width,
            fonts.categories,
            color,
        );
    }
}

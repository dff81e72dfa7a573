//! Shared tuning constants for the render/animation engine.
//!
//! Percentages are fractions of the drawable area so the board scales with
//! the surface. Pixel values are in surface pixels (the terminal backend maps
//! one cell to two vertical pixels).

/// Score-point spacing between horizontal grid lines.
pub const GRID_LINES_SPACING_PTS: f64 = 10.0;

/// Outer margin on each edge, fraction of the surface dimension.
pub const OUTER_PADDING_PCT: f32 = 0.01;

/// Fraction of the main section width reserved for inter-column gaps.
pub const MAIN_SECTION_WHITESPACE_WIDTH_PCT: f32 = 0.1;

/// Height of the team-name strip at the bottom, fraction of drawable height.
pub const TEAM_NAMES_SECTION_HEIGHT_PCT: f32 = 0.1;

/// Width of the category-label gutter on the left, fraction of drawable width.
pub const CATEGORIES_SECTION_WIDTH_PCT: f32 = 0.11;

/// Height of the score-label strip above the bars, fraction of drawable height.
pub const SCORE_LABEL_HEIGHT_PCT: f32 = 0.05;

/// Width of the grid-legend column on the right, fraction of drawable width.
pub const LEGEND_SECTION_WIDTH_PCT: f32 = 0.05;

/// Starting candidate for the font fitter.
pub const DEFAULT_FONT_SIZE: f32 = 6.0;

/// Floor for fitted font sizes; one terminal row.
pub const MIN_FONT_SIZE: f32 = 2.0;

/// Convergence tolerance of the font-fit binary search, in pixels.
pub const FONT_FIT_TOLERANCE: f32 = 0.5;

/// Separator inset between stacked category segments, in pixels.
pub const SEGMENT_SEPARATOR_PX: f32 = 1.0;

/// Share of the total duration spent before the final linear climb.
pub const WINNER_REVEAL_TIME_FACTOR: f64 = 0.98;

// Highlights

/// Alpha ramp-up time of a fresh highlight, in milliseconds.
pub const HIGHLIGHTS_EXPAND_TIME: f64 = 250.0;

/// Total lifetime of a highlight, in milliseconds.
pub const HIGHLIGHTS_LIFE_TIME: f64 = 800.0;

/// Glow border around a highlighted bar, fraction of the bar width.
pub const HIGHLIGHT_AREA_FACTOR: f32 = 0.08;

// Fireworks

/// Fixed pool capacity.
pub const FIREWORKS_MAX_NUMBER: usize = 8;

pub const FIREWORKS_FUSE_MIN: f64 = 400.0;
pub const FIREWORKS_FUSE_WINDOW: f64 = 800.0;
pub const FIREWORKS_LIFE_TIME_MIN: f64 = 1000.0;
pub const FIREWORKS_LIFE_TIME_WINDOW: f64 = 3000.0;
pub const FIREWORKS_RESPAWN_TIME_MIN: f64 = 0.0;
pub const FIREWORKS_RESPAWN_TIME_WINDOW: f64 = 2500.0;
pub const FIREWORKS_EXPAND_TIME_MIN: f64 = 100.0;
pub const FIREWORKS_EXPAND_TIME_WINDOW: f64 = 100.0;
pub const FIREWORKS_PARTICLES_MIN: f64 = 16.0;
pub const FIREWORKS_PARTICLES_WINDOW: f64 = 20.0;

/// Launch points keep this fraction of the width clear on either side.
pub const FIREWORKS_HORIZONTAL_PADDING: f64 = 0.1;

/// Burst radius range, fraction of the smaller drawable dimension.
pub const FIREWORKS_RADIUS_MIN: f64 = 0.07;
pub const FIREWORKS_RADIUS_WINDOW: f64 = 0.10;

/// Burst target drifts horizontally within this window around the launch x.
pub const FIREWORKS_TARGET_X_OFFSET: f64 = -0.15;
pub const FIREWORKS_TARGET_X_RANGE: f64 = 0.3;

/// Downward drift of burst particles, fraction of drawable height per ms².
pub const FIREWORKS_GRAVITY_FACTOR: f64 = 4.5e-9;

/// Bezier samples along a smoke trail and the parameter step between them.
pub const FIREWORKS_SMOKE_TRAIL_SEGMENTS: u32 = 20;
pub const FIREWORKS_SMOKE_TRAIL_SEGMENT_STEP: f64 = 0.02;

/// Concentric glow-dot radii of one burst particle, outermost first.
pub const FIREWORKS_GLOW_RADII: [f32; 3] = [1.8, 1.2, 0.6];

// Scheduler

/// Settle delay between the start trigger and the first frame, in
/// milliseconds.
pub const BOOT_DELAY_MS: f64 = 250.0;

//! Per-run animation state: fitted font sizes plus everything that resets
//! when a reveal restarts.

use rand::Rng;

use super::constants::DEFAULT_FONT_SIZE;
use super::fireworks::FireworkPool;
use super::fit::fit_font_size;
use super::highlight::HighlightBoard;
use super::layout::BoardLayout;
use super::progress::ProgressMapper;
use super::surface::RasterSurface;
use crate::snapshot::{DerivedModel, ScoreSnapshot};

/// Fitted font sizes for the three text roles on the board.
///
/// Fitting is driven by the widest sample of each role so every label of the
/// role shares one size, and it is refreshed every frame so a surface resize
/// takes hold immediately.
#[derive(Debug, Clone)]
pub struct FontCache {
    /// Score labels, grid legend, trend glyphs.
    pub scores: f32,
    pub team_names: f32,
    pub categories: f32,
    max_team_name: String,
    max_category: String,
}

impl FontCache {
    pub fn new(snapshot: &ScoreSnapshot) -> Self {
        let widest = |names: &[String]| {
            names
                .iter()
                .max_by_key(|n| n.chars().count())
                .cloned()
                .unwrap_or_default()
        };
        Self {
            scores: DEFAULT_FONT_SIZE,
            team_names: DEFAULT_FONT_SIZE,
            categories: DEFAULT_FONT_SIZE,
            max_team_name: widest(&snapshot.teams),
            max_category: widest(&snapshot.categories),
        }
    }

    /// Re-fit all three roles against the current layout.
    pub fn refresh<S: RasterSurface + ?Sized>(&mut self, surface: &S, layout: &BoardLayout) {
        // Widest score label the board can show.
        self.scores = fit_font_size(surface, None, layout.team_column_width, "000.0");
        // Team names wrap on whitespace, so fit against the longest word.
        let longest_word = self
            .max_team_name
            .split_whitespace()
            .max_by_key(|w| w.chars().count())
            .unwrap_or("");
        self.team_names =
            fit_font_size(surface, None, layout.team_column_width, longest_word);
        self.categories =
            fit_font_size(surface, None, layout.categories_width, &self.max_category);
    }
}

/// Everything that belongs to one animation run and is rebuilt on restart.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    pub snapshot: ScoreSnapshot,
    pub derived: DerivedModel,
    pub mapper: ProgressMapper,
    pub fonts: FontCache,
    pub highlights: HighlightBoard,
    pub fireworks: FireworkPool,
    /// Clock time of the first rendered frame; captured lazily so the boot
    /// delay never eats into the reveal.
    pub start_time: Option<f64>,
    pub completed: bool,
}

impl AnimationRun {
    pub fn new(snapshot: ScoreSnapshot) -> Self {
        let derived = DerivedModel::new(&snapshot);
        let duration = snapshot.duration();
        let mapper = ProgressMapper::new(&derived, duration, snapshot.categories.len());
        let fonts = FontCache::new(&snapshot);
        let highlights = HighlightBoard::new(snapshot.teams.len());
        Self {
            snapshot,
            derived,
            mapper,
            fonts,
            highlights,
            fireworks: FireworkPool::new(),
            start_time: None,
            completed: false,
        }
    }

    /// Milliseconds since the first rendered frame, zero before it.
    pub fn elapsed(&self, now: f64) -> f64 {
        self.start_time.map_or(0.0, |start| now - start)
    }

    /// Whether fireworks should play at `elapsed`.
    pub fn fireworks_active(&self, elapsed: f64) -> bool {
        self.snapshot.fireworks && self.mapper.is_complete(elapsed)
    }

    /// Step the firework pool for this frame.
    pub fn step_fireworks<R: Rng>(&mut self, elapsed: f64, rng: &mut R) {
        self.fireworks.respawn_due(elapsed, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::RecordingSurface;

    fn snapshot() -> ScoreSnapshot {
        let mut snap = ScoreSnapshot {
            teams: vec![
                "The Quizzards of Oz".into(),
                "Sharp".into(),
                "Les Incompris".into(),
            ],
            categories: vec!["History".into(), "Music".into()],
            scores: vec![vec![10, 24, 5], vec![4, 0, 5]],
            duration_ms: None,
            fireworks: true,
            score_on_fire: None,
            score_on_ice: None,
            trends: None,
            placements: None,
            perfect_score_teams: Vec::new(),
            zero_score_teams: Vec::new(),
        };
        snap.fill_derived();
        snap
    }

    #[test]
    fn test_font_cache_fits_widest_samples() {
        let surface = RecordingSurface::new(160.0, 96.0);
        let snap = snapshot();
        let layout = BoardLayout::compute(160.0, 96.0, 3, 2);
        let mut fonts = FontCache::new(&snap);
        fonts.refresh(&surface, &layout);
        // "Quizzards" is the longest word of the longest name.
        assert!(surface.measure_text("Quizzards", fonts.team_names) <= layout.team_column_width);
        assert!(surface.measure_text("000.0", fonts.scores) <= layout.team_column_width);
        assert!(surface.measure_text("History", fonts.categories) <= layout.categories_width);
    }

    #[test]
    fn test_font_cache_shrinks_on_narrow_surface() {
        let wide = RecordingSurface::new(300.0, 96.0);
        let narrow = RecordingSurface::new(40.0, 96.0);
        let snap = snapshot();
        let mut fonts = FontCache::new(&snap);
        fonts.refresh(&wide, &BoardLayout::compute(300.0, 96.0, 3, 2));
        let wide_size = fonts.team_names;
        fonts.refresh(&narrow, &BoardLayout::compute(40.0, 96.0, 3, 2));
        assert!(fonts.team_names < wide_size);
    }

    #[test]
    fn test_elapsed_is_zero_before_first_frame() {
        let run = AnimationRun::new(snapshot());
        assert_eq!(run.elapsed(12_345.0), 0.0);
    }

    #[test]
    fn test_fireworks_wait_for_reveal_completion() {
        let mut run = AnimationRun::new(snapshot());
        run.start_time = Some(0.0);
        let duration = run.mapper.duration();
        assert!(!run.fireworks_active(duration / 2.0));
        assert!(run.fireworks_active(duration + 1.0));
    }

    #[test]
    fn test_fireworks_disabled_by_snapshot_flag() {
        let mut snap = snapshot();
        snap.fireworks = false;
        let run = AnimationRun::new(snap);
        assert!(!run.fireworks_active(run.mapper.duration() + 1.0));
    }
}

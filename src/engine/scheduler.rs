//! Frame scheduler driving the reveal from an external clock.
//!
//! The engine is polled once per frame with the current clock time in
//! milliseconds. It owns the phase machine (idle board, boot delay, running
//! reveal, completed) and rebuilds the per-run state whenever a new run
//! starts, so a restart is indistinguishable from a first start.

use anyhow::Result;
use rand::Rng;
use tracing::debug;

use super::bars::{draw_board, BoardTheme};
use super::layout::BoardLayout;
use super::state::AnimationRun;
use super::surface::RasterSurface;
use crate::snapshot::ScoreSnapshot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnginePhase {
    /// Board shown with empty bars, waiting for a start trigger.
    Idle,
    /// Start trigger received, waiting out the settle delay.
    Booting { since: f64 },
    Running,
    /// Reveal finished and every highlight expired.
    Completed,
}

pub struct Engine<R: Rng> {
    snapshot: ScoreSnapshot,
    run: AnimationRun,
    phase: EnginePhase,
    restart_requested: bool,
    theme: BoardTheme,
    boot_delay: f64,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Validates the snapshot and computes its derived fields up front, so a
    /// bad board file fails here rather than mid-frame.
    pub fn new(
        mut snapshot: ScoreSnapshot,
        theme: BoardTheme,
        boot_delay: f64,
        rng: R,
    ) -> Result<Self> {
        snapshot.validate()?;
        snapshot.fill_derived();
        let run = AnimationRun::new(snapshot.clone());
        Ok(Self {
            snapshot,
            run,
            phase: EnginePhase::Idle,
            restart_requested: false,
            theme,
            boot_delay,
            rng,
        })
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn run(&self) -> &AnimationRun {
        &self.run
    }

    /// React to the start key. Idle and completed boards boot a new run, a
    /// running reveal restarts from scratch, and a booting one is left alone
    /// so key mashing cannot stack runs.
    pub fn trigger_animation(&mut self, now: f64) {
        match self.phase {
            EnginePhase::Booting { .. } => {}
            EnginePhase::Running => self.restart_requested = true,
            EnginePhase::Idle | EnginePhase::Completed => {
                debug!("booting animation run at {:.0} ms", now);
                self.phase = EnginePhase::Booting { since: now };
            }
        }
    }

    /// Render one frame at clock time `now`.
    pub fn on_frame<S: RasterSurface>(&mut self, surface: &mut S, now: f64) {
        if self.restart_requested {
            self.restart_requested = false;
            self.run = AnimationRun::new(self.snapshot.clone());
            self.phase = EnginePhase::Booting { since: now };
        }

        if let EnginePhase::Booting { since } = self.phase {
            if now - since >= self.boot_delay {
                self.run = AnimationRun::new(self.snapshot.clone());
                self.phase = EnginePhase::Running;
            }
        }

        match self.phase {
            EnginePhase::Idle | EnginePhase::Booting { .. } => {
                self.draw_frame(surface, 0.0, 0.0);
            }
            EnginePhase::Running => {
                if self.run.start_time.is_none() {
                    self.run.start_time = Some(now);
                }
                let elapsed = self.run.elapsed(now);
                let revealed = self.run.mapper.revealed(elapsed);
                self.draw_frame(surface, elapsed, revealed);

                let finished = elapsed > self.run.mapper.duration()
                    && !self.run.snapshot.fireworks
                    && !self.run.highlights.any_pending(elapsed);
                if finished {
                    debug!("animation run completed after {:.0} ms", elapsed);
                    self.run.completed = true;
                    self.phase = EnginePhase::Completed;
                }
            }
            EnginePhase::Completed => {
                let elapsed = self.run.elapsed(now);
                self.draw_frame(surface, elapsed, self.run.mapper.max_score());
            }
        }
    }

    fn draw_frame<S: RasterSurface>(&mut self, surface: &mut S, elapsed: f64, revealed: f64) {
        surface.clear();
        let layout = BoardLayout::compute(
            surface.width(),
            surface.height(),
            self.run.snapshot.teams.len(),
            self.run.snapshot.categories.len(),
        );
        self.run.fonts.refresh(surface, &layout);
        draw_board(
            surface,
            &self.run.snapshot,
            &self.run.derived,
            &layout,
            &self.run.fonts,
            &mut self.run.highlights,
            &self.theme,
            elapsed,
            revealed,
        );
        if self.run.fireworks_active(elapsed) {
            self.run.step_fireworks(elapsed, &mut self.rng);
            self.run.fireworks.draw(surface, &layout, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::constants::HIGHLIGHTS_LIFE_TIME;
    use crate::engine::testing::RecordingSurface;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot(fireworks: bool) -> ScoreSnapshot {
        ScoreSnapshot {
            teams: vec!["Alpha".into(), "Beta".into(), "Gamma".into()],
            categories: vec!["History".into(), "Music".into()],
            scores: vec![vec![10, 24, 5], vec![4, 0, 5]],
            duration_ms: Some(2_000),
            fireworks,
            score_on_fire: None,
            score_on_ice: None,
            trends: None,
            placements: None,
            perfect_score_teams: Vec::new(),
            zero_score_teams: Vec::new(),
        }
    }

    fn engine(fireworks: bool) -> Engine<StdRng> {
        Engine::new(
            snapshot(fireworks),
            BoardTheme::default(),
            250.0,
            StdRng::seed_from_u64(42),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_snapshot() {
        let mut snap = snapshot(false);
        snap.scores[0][1] = 99;
        assert!(Engine::new(
            snap,
            BoardTheme::default(),
            250.0,
            StdRng::seed_from_u64(0)
        )
        .is_err());
    }

    #[test]
    fn test_idle_frame_draws_empty_board() {
        let mut engine = engine(false);
        let mut surface = RecordingSurface::new(160.0, 96.0);
        engine.on_frame(&mut surface, 0.0);
        assert_eq!(engine.phase(), EnginePhase::Idle);
        assert!(surface.rect_count() > 0, "background and grid still drawn");
    }

    #[test]
    fn test_boot_delay_holds_before_running() {
        let mut engine = engine(false);
        let mut surface = RecordingSurface::new(160.0, 96.0);
        engine.trigger_animation(1_000.0);
        assert!(matches!(engine.phase(), EnginePhase::Booting { .. }));

        engine.on_frame(&mut surface, 1_100.0);
        assert!(matches!(engine.phase(), EnginePhase::Booting { .. }));

        engine.on_frame(&mut surface, 1_300.0);
        assert_eq!(engine.phase(), EnginePhase::Running);
        assert_eq!(engine.run().start_time, Some(1_300.0));
    }

    #[test]
    fn test_trigger_while_booting_is_ignored() {
        let mut engine = engine(false);
        engine.trigger_animation(1_000.0);
        engine.trigger_animation(1_200.0);
        assert_eq!(engine.phase(), EnginePhase::Booting { since: 1_000.0 });
    }

    #[test]
    fn test_trigger_while_running_restarts() {
        let mut engine = engine(false);
        let mut surface = RecordingSurface::new(160.0, 96.0);
        engine.trigger_animation(0.0);
        engine.on_frame(&mut surface, 300.0);
        engine.on_frame(&mut surface, 1_000.0);
        assert_eq!(engine.phase(), EnginePhase::Running);

        engine.trigger_animation(1_100.0);
        engine.on_frame(&mut surface, 1_116.0);
        assert!(matches!(engine.phase(), EnginePhase::Booting { .. }));
        // A fresh run, nothing carried over.
        assert!(engine.run().start_time.is_none());
    }

    #[test]
    fn test_completes_after_duration_and_highlights() {
        let mut engine = engine(false);
        let mut surface = RecordingSurface::new(160.0, 96.0);
        engine.trigger_animation(0.0);
        engine.on_frame(&mut surface, 300.0);
        // Walk well past duration plus the highlight fade.
        let mut now = 300.0;
        while now < 300.0 + 2_000.0 + 2.0 * HIGHLIGHTS_LIFE_TIME {
            now += 16.0;
            engine.on_frame(&mut surface, now);
        }
        assert_eq!(engine.phase(), EnginePhase::Completed);
        assert!(engine.run().completed);

        // A completed board can be retriggered.
        engine.trigger_animation(now);
        assert!(matches!(engine.phase(), EnginePhase::Booting { .. }));
    }

    #[test]
    fn test_fireworks_keep_engine_running() {
        let mut engine = engine(true);
        let mut surface = RecordingSurface::new(160.0, 96.0);
        engine.trigger_animation(0.0);
        engine.on_frame(&mut surface, 300.0);
        let mut now = 300.0;
        while now < 300.0 + 2_000.0 + 2.0 * HIGHLIGHTS_LIFE_TIME {
            now += 16.0;
            engine.on_frame(&mut surface, now);
        }
        assert_eq!(engine.phase(), EnginePhase::Running);

        // Fireworks keep drawing: any pooled rocket younger than its fuse
        // leaves trail lines and older live ones burst into dots.
        let mut late = RecordingSurface::new(160.0, 96.0);
        for i in 0..20 {
            engine.on_frame(&mut late, now + 2_000.0 + i as f64 * 200.0);
        }
        assert!(late.dot_count() + late.line_count() > 0);
    }
}

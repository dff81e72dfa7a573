//! Pooled firework effects played once the reveal completes.
//!
//! A firework launches along a cubic bezier (a fading comet-tail smoke trail)
//! and then bursts into a radial particle ring that expands, sags under
//! gravity, and fades on a half-sine envelope. Slots respawn once their
//! occupant's respawn time passes; all randomness flows through the caller's
//! RNG so tests can pin a seed.

use rand::Rng;

use super::constants::*;
use super::layout::BoardLayout;
use super::surface::{RasterSurface, Rgba};

/// Evaluate a 4-point cubic bezier at `t`.
pub fn cubic_bezier(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * t * mt * mt * p1 + 3.0 * t * t * mt * p2 + t * t * t * p3
}

/// One pooled firework. Coordinates are fractions of the drawable area,
/// x from the left and y up from the bottom; times are absolute milliseconds
/// on the animation clock.
#[derive(Debug, Clone, Copy)]
pub struct Firework {
    pub start_time: f64,
    /// Launch phase length.
    pub fuse_time: f64,
    /// Absolute end of life.
    pub life_time: f64,
    /// Absolute time after which the slot may be reused.
    pub respawn_time: f64,
    /// Burst-radius ramp-up length.
    pub expand_time: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub control_a_x: f64,
    pub control_a_y: f64,
    pub control_b_x: f64,
    pub control_b_y: f64,
    pub target_x: f64,
    pub target_y: f64,
    /// Burst radius, fraction of the smaller drawable dimension.
    pub radius: f64,
    pub particle_count: u32,
    /// Hue in degrees.
    pub hue: f64,
}

impl Firework {
    pub fn spawn<R: Rng>(elapsed: f64, rng: &mut R) -> Self {
        let fuse_time = FIREWORKS_FUSE_MIN + rng.gen::<f64>() * FIREWORKS_FUSE_WINDOW;
        let life_time = elapsed
            + fuse_time
            + FIREWORKS_LIFE_TIME_MIN
            + rng.gen::<f64>() * FIREWORKS_LIFE_TIME_WINDOW;

        let start_x = FIREWORKS_HORIZONTAL_PADDING
            + rng.gen::<f64>() * (1.0 - 2.0 * FIREWORKS_HORIZONTAL_PADDING);
        let target_x =
            start_x + FIREWORKS_TARGET_X_OFFSET + rng.gen::<f64>() * FIREWORKS_TARGET_X_RANGE;
        let target_y = 0.5 + rng.gen::<f64>() / 2.0;

        // Control points sit between launch and target so the trail bows
        // instead of kinking.
        let a = rng.gen::<f64>();
        let b = rng.gen::<f64>();

        Self {
            start_time: elapsed,
            fuse_time,
            life_time,
            respawn_time: life_time
                + FIREWORKS_RESPAWN_TIME_MIN
                + rng.gen::<f64>() * FIREWORKS_RESPAWN_TIME_WINDOW,
            expand_time: FIREWORKS_EXPAND_TIME_MIN
                + rng.gen::<f64>() * FIREWORKS_EXPAND_TIME_WINDOW,
            start_x,
            start_y: 0.0,
            control_a_x: start_x * a + target_x * (1.0 - a),
            control_a_y: rng.gen::<f64>() * target_y,
            control_b_x: start_x * b + target_x * (1.0 - b),
            control_b_y: rng.gen::<f64>() * target_y,
            target_x,
            target_y,
            radius: FIREWORKS_RADIUS_MIN + rng.gen::<f64>() * FIREWORKS_RADIUS_WINDOW,
            particle_count: (FIREWORKS_PARTICLES_MIN + rng.gen::<f64>() * FIREWORKS_PARTICLES_WINDOW)
                .round() as u32,
            hue: rng.gen::<f64>() * 360.0,
        }
    }

    fn draw<S: RasterSurface>(&self, surface: &mut S, layout: &BoardLayout, elapsed: f64) {
        let age = elapsed - self.start_time;
        if age < self.fuse_time {
            self.draw_smoke_trail(surface, layout, age / self.fuse_time);
        } else {
            self.draw_burst(surface, layout, age - self.fuse_time);
        }
    }

    /// Shrinking comet tail along the launch bezier: only the samples closest
    /// to the rocket are drawn, brightest at the head.
    fn draw_smoke_trail<S: RasterSurface>(&self, surface: &mut S, layout: &BoardLayout, head: f64) {
        let mut prev: Option<(f32, f32)> = None;
        let mut td = head;
        let mut i = FIREWORKS_SMOKE_TRAIL_SEGMENTS;
        while i > 0 && td >= 0.0 {
            let fx = cubic_bezier(td, self.start_x, self.control_a_x, self.control_b_x, self.target_x);
            let fy = cubic_bezier(td, self.start_y, self.control_a_y, self.control_b_y, self.target_y);
            let x = layout.drawable_left + layout.drawable_width * fx as f32;
            let y = layout.drawable_bottom - layout.drawable_height * fy as f32;

            if let Some((px, py)) = prev {
                let alpha = i as f32 / FIREWORKS_SMOKE_TRAIL_SEGMENTS as f32;
                surface.stroke_line(px, py, x, y, Rgba::rgba(255, 255, 255, alpha));
            }
            prev = Some((x, y));

            i -= 1;
            td -= FIREWORKS_SMOKE_TRAIL_SEGMENT_STEP;
        }
    }

    fn draw_burst<S: RasterSurface>(&self, surface: &mut S, layout: &BoardLayout, burst_age: f64) {
        let mut radius = self.radius;
        if burst_age < self.expand_time {
            radius *= burst_age / self.expand_time;
        }
        let radius_scale = layout.drawable_width.min(layout.drawable_height) as f64;
        let gravity_y =
            FIREWORKS_GRAVITY_FACTOR * burst_age * burst_age * layout.drawable_height as f64;

        // Half-sine envelope over the burst lifetime: rises, peaks, falls.
        let lifespan = self.life_time - self.start_time - self.fuse_time;
        let alpha = (std::f64::consts::PI * (burst_age / lifespan).clamp(0.0, 1.0)).sin() as f32;

        let inner = Rgba::from_hsl(self.hue as f32, 1.0, 0.7).with_alpha(alpha);
        let mid = Rgba::from_hsl(self.hue as f32, 1.0, 0.6).with_alpha(0.7 * alpha);
        let outer = Rgba::from_hsl(self.hue as f32, 1.0, 0.5).with_alpha(0.3 * alpha);

        let center_x = layout.drawable_left + self.target_x as f32 * layout.drawable_width;
        let center_y = layout.drawable_bottom + gravity_y as f32
            - self.target_y as f32 * layout.drawable_height;

        for p in 0..self.particle_count {
            let angle = std::f64::consts::TAU * p as f64 / self.particle_count as f64;
            let x = center_x + (angle.cos() * radius * radius_scale) as f32;
            let y = center_y + (angle.sin() * radius * radius_scale) as f32;

            surface.fill_dot(x, y, FIREWORKS_GLOW_RADII[0], outer);
            surface.fill_dot(x, y, FIREWORKS_GLOW_RADII[1], mid);
            surface.fill_dot(x, y, FIREWORKS_GLOW_RADII[2], inner);
        }
    }
}

/// Fixed-capacity slot pool.
#[derive(Debug, Clone, Default)]
pub struct FireworkPool {
    slots: Vec<Option<Firework>>,
}

impl FireworkPool {
    pub fn new() -> Self {
        Self {
            slots: vec![None; FIREWORKS_MAX_NUMBER],
        }
    }

    pub fn capacity(&self) -> usize {
        FIREWORKS_MAX_NUMBER
    }

    pub fn slots(&self) -> &[Option<Firework>] {
        &self.slots
    }

    /// Fill empty slots and replace occupants whose respawn time has passed.
    pub fn respawn_due<R: Rng>(&mut self, elapsed: f64, rng: &mut R) {
        for slot in &mut self.slots {
            let due = match slot {
                None => true,
                Some(firework) => firework.respawn_time < elapsed,
            };
            if due {
                *slot = Some(Firework::spawn(elapsed, rng));
            }
        }
    }

    /// Draw every live firework. Slots past their lifetime are skipped until
    /// they respawn.
    pub fn draw<S: RasterSurface>(&self, surface: &mut S, layout: &BoardLayout, elapsed: f64) {
        for firework in self.slots.iter().flatten() {
            if firework.life_time < elapsed {
                continue;
            }
            firework.draw(surface, layout, elapsed);
        }
    }
}

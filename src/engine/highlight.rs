//! Per-team transient pulse fired the moment a bar finishes growing.
//!
//! One nullable slot per team. A slot is filled exactly once per run and then
//! ages purely by time: alpha ramps up during the expand window, fades for the
//! rest of the lifetime, and the slot stays occupied after expiry so the pulse
//! can never retrigger.

use super::constants::{HIGHLIGHTS_EXPAND_TIME, HIGHLIGHTS_LIFE_TIME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightPhase {
    Expanding,
    Fading,
    Expired,
}

#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    /// End of the alpha ramp-up.
    pub expand_at: f64,
    /// End of life; the glow is no longer drawn past this.
    pub expire_at: f64,
    /// Bar top relative to the chart baseline (negative, bars grow upward).
    pub bar_top_offset: f32,
}

impl Highlight {
    pub fn phase(&self, now: f64) -> HighlightPhase {
        if now >= self.expire_at {
            HighlightPhase::Expired
        } else if now < self.expand_at {
            HighlightPhase::Expanding
        } else {
            HighlightPhase::Fading
        }
    }

    /// Glow opacity at `now`, `None` once expired.
    pub fn alpha(&self, now: f64) -> Option<f64> {
        match self.phase(now) {
            HighlightPhase::Expired => None,
            HighlightPhase::Expanding => {
                Some(1.0 - (self.expand_at - now) / HIGHLIGHTS_EXPAND_TIME)
            }
            HighlightPhase::Fading => Some((self.expire_at - now) / HIGHLIGHTS_LIFE_TIME),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HighlightBoard {
    slots: Vec<Option<Highlight>>,
}

impl HighlightBoard {
    pub fn new(team_count: usize) -> Self {
        Self {
            slots: vec![None; team_count],
        }
    }

    /// Record the pulse for `team` if it has not fired yet this run.
    pub fn trigger(&mut self, team: usize, now: f64, bar_top_offset: f32) {
        let slot = &mut self.slots[team];
        if slot.is_none() {
            *slot = Some(Highlight {
                expand_at: now + HIGHLIGHTS_EXPAND_TIME,
                expire_at: now + HIGHLIGHTS_LIFE_TIME,
                bar_top_offset,
            });
        }
    }

    pub fn get(&self, team: usize) -> Option<&Highlight> {
        self.slots[team].as_ref()
    }

    /// Glow opacity for `team` at `now`, `None` when idle or expired.
    pub fn alpha(&self, team: usize, now: f64) -> Option<f64> {
        self.slots[team].as_ref().and_then(|h| h.alpha(now))
    }

    /// True while any team has not been highlighted yet or its highlight is
    /// still fading. Rendering after the reveal only stops once this clears.
    pub fn any_pending(&self, now: f64) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.map_or(true, |h| now < h.expire_at))
    }
}

/// Lifecycle of the globe split animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPhase {
    #[default]
    Idle,
    Splitting,
    Split,
    Reassembling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    OutCubic,
    InOutQuad,
}

/// Evaluate an easing curve at t in [0, 1]. Both curves are monotonic and
/// hit 0 at t=0 and exactly 1 at t=1.
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::InOutQuad => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Ramp {
    start_time: f64,
    start_value: f32,
    target: f32,
    duration: f32,
    easing: Easing,
}

impl Ramp {
    /// Progress recomputed from absolute elapsed time, so the ramp speed
    /// never depends on framerate. Reaches the exact target at the nominal
    /// duration.
    fn value_at(&self, now: f64) -> (f32, bool) {
        if self.duration <= f32::EPSILON {
            return (self.target, true);
        }
        let t = ((now - self.start_time) as f32 / self.duration).clamp(0.0, 1.0);
        if t >= 1.0 {
            (self.target, true)
        } else {
            let k = ease(self.easing, t);
            (self.start_value + (self.target - self.start_value) * k, false)
        }
    }
}

/// Owns the split lifecycle and its [0, 1] progress value. Progress is
/// mutated only here; every other component reads it.
///
/// Invalid trigger calls (splitting while not idle, reassembling while not
/// split) are silent no-ops rather than errors: they are reachable through
/// ordinary UI races.
pub struct SplitMachine {
    phase: SplitPhase,
    progress: f32,
    ramp: Option<Ramp>,
    split_duration: f32,
    reassemble_duration: f32,
}

impl SplitMachine {
    pub fn new(split_duration: f32, reassemble_duration: f32) -> Self {
        Self {
            phase: SplitPhase::Idle,
            progress: 0.0,
            ramp: None,
            split_duration: split_duration.max(0.0),
            reassemble_duration: reassemble_duration.max(0.0),
        }
    }

    pub fn phase(&self) -> SplitPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// True for the whole split lifecycle, false only when fully idle.
    pub fn is_active(&self) -> bool {
        self.phase != SplitPhase::Idle
    }

    /// Begin the split if idle. Returns whether the trigger was accepted.
    pub fn trigger_split(&mut self, now: f64) -> bool {
        if self.phase != SplitPhase::Idle {
            return false;
        }
        self.phase = SplitPhase::Splitting;
        self.ramp = Some(Ramp {
            start_time: now,
            start_value: 0.0,
            target: 1.0,
            duration: self.split_duration,
            easing: Easing::OutCubic,
        });
        true
    }

    /// Begin reassembly if fully split. Returns whether the trigger was
    /// accepted.
    pub fn trigger_reassemble(&mut self, now: f64) -> bool {
        if self.phase != SplitPhase::Split {
            return false;
        }
        self.phase = SplitPhase::Reassembling;
        self.ramp = Some(Ramp {
            start_time: now,
            start_value: self.progress,
            target: 0.0,
            duration: self.reassemble_duration,
            easing: Easing::InOutQuad,
        });
        true
    }

    /// Advance the active ramp to the given wall-clock time. Idempotent per
    /// timestamp; a no-op when no ramp is running.
    pub fn update(&mut self, now: f64) {
        let Some(ramp) = self.ramp else {
            return;
        };
        let (value, done) = ramp.value_at(now);
        self.progress = value.clamp(0.0, 1.0);
        if done {
            self.ramp = None;
            self.phase = match self.phase {
                SplitPhase::Splitting => SplitPhase::Split,
                SplitPhase::Reassembling => SplitPhase::Idle,
                other => other,
            };
            if self.phase == SplitPhase::Idle {
                self.progress = 0.0;
            }
        }
    }
}

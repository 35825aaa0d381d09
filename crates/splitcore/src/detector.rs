use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

/// One orbit-controller orientation, captured once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSample {
    pub azimuth: f32,
    pub polar: f32,
}

/// Smooths per-frame angular deltas over a bounded FIFO and reports when
/// the averaged speed crosses the trigger threshold.
///
/// The detector knows nothing about the split phase; the caller guards the
/// actual trigger (the state machine re-checks anyway).
pub struct RotationSpeedDetector {
    last: Option<RotationSample>,
    history: VecDeque<f32>,
    window: usize,
    threshold: f32,
}

impl RotationSpeedDetector {
    pub fn new(window: usize, threshold: f32) -> Self {
        let window = window.max(1);
        Self {
            last: None,
            history: VecDeque::with_capacity(window),
            window,
            threshold,
        }
    }

    /// Forget all history. The next sample is stored without producing a
    /// speed, so re-initialization never manufactures a spike.
    pub fn reset(&mut self) {
        self.last = None;
        self.history.clear();
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feed this frame's orientation and get back the smoothed speed.
    pub fn sample(&mut self, sample: RotationSample) -> f32 {
        let Some(last) = self.last else {
            self.last = Some(sample);
            return 0.0;
        };

        let mut d_azimuth = sample.azimuth - last.azimuth;
        // A drag across the +-pi boundary is a small motion, not a full lap.
        if d_azimuth > PI {
            d_azimuth -= TAU;
        } else if d_azimuth < -PI {
            d_azimuth += TAU;
        }
        let d_polar = sample.polar - last.polar;

        let mut speed = (d_azimuth * d_azimuth + d_polar * d_polar).sqrt();
        if !speed.is_finite() {
            speed = 0.0;
        }

        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(speed);
        self.last = Some(sample);

        self.smoothed()
    }

    /// Arithmetic mean of the history; zero while the history is empty.
    pub fn smoothed(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }

    pub fn over_threshold(&self) -> bool {
        self.smoothed() > self.threshold
    }
}

//! Input-to-velocity physics.
//!
//! Raw per-frame input deltas become an impulse, the impulse accelerates a
//! velocity, friction damps it multiplicatively and the velocity is integrated
//! into an unbounded progress value. This is the only place raw input is read.

use crate::config::{PhysicsTuning, VELOCITY_THRESHOLD};

/// Input gathered since the previous frame, each a signed scalar.
/// Positive values move forward (zoom in).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    pub wheel: f32,
    pub touch: f32,
    /// Keyboard impulse, in wheel units.
    pub keys: f32,
}

impl InputSample {
    pub fn wheel(delta: f32) -> Self {
        Self {
            wheel: delta,
            ..Self::default()
        }
    }

    pub fn touch(delta: f32) -> Self {
        Self {
            touch: delta,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.wheel == 0.0 && self.touch == 0.0 && self.keys == 0.0
    }

    /// Sum of two samples; inputs arriving in the same frame add up.
    pub fn merged(self, other: InputSample) -> Self {
        Self {
            wheel: self.wheel + other.wheel,
            touch: self.touch + other.touch,
            keys: self.keys + other.keys,
        }
    }
}

/// What one physics step produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsFrame {
    pub velocity: f32,
    pub progress: f32,
    /// Progress gained this frame (equal to `velocity`).
    pub delta: f32,
    /// Velocity is below the settle threshold. It is still reported as-is.
    pub settled: bool,
}

#[derive(Clone, Debug)]
pub struct PhysicsEngine {
    tuning: PhysicsTuning,
    velocity_threshold: f32,
    velocity: f32,
    progress: f32,
    last_input_at: Option<f64>,
}

impl PhysicsEngine {
    pub fn new(tuning: PhysicsTuning) -> Self {
        Self {
            tuning,
            velocity_threshold: VELOCITY_THRESHOLD,
            velocity: 0.0,
            progress: 0.0,
            last_input_at: None,
        }
    }

    pub fn with_velocity_threshold(mut self, threshold: f32) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    #[inline]
    pub fn tuning(&self) -> PhysicsTuning {
        self.tuning
    }

    pub fn set_tuning(&mut self, tuning: PhysicsTuning) {
        self.tuning = tuning;
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Time of the last non-empty input, in the caller's clock.
    #[inline]
    pub fn last_input_at(&self) -> Option<f64> {
        self.last_input_at
    }

    /// Impulse contributed by `input` before acceleration.
    #[inline]
    pub fn impulse(&self, input: &InputSample) -> f32 {
        (input.wheel + input.keys) * self.tuning.wheel_sensitivity
            + input.touch * self.tuning.touch_sensitivity
    }

    /// Advance one animation frame.
    pub fn step(&mut self, input: &InputSample, now_sec: f64) -> PhysicsFrame {
        if !input.is_empty() {
            self.last_input_at = Some(now_sec);
        }
        self.velocity += self.impulse(input) * self.tuning.acceleration;
        self.velocity *= 1.0 - self.tuning.friction;
        self.progress += self.velocity;
        PhysicsFrame {
            velocity: self.velocity,
            progress: self.progress,
            delta: self.velocity,
            settled: self.is_settled(),
        }
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < self.velocity_threshold
    }

    /// Drop all momentum, keeping the accumulated progress.
    pub fn halt(&mut self) {
        self.velocity = 0.0;
    }
}

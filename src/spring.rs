//! Spring interpolation for view animation.
//!
//! A [`Spring`] chases a target value under a damped spring force. Setting a
//! new target while the spring is still moving retargets it: velocity carries
//! over, nothing is queued, and the latest target always wins. The spring is
//! polled, never callback-driven: call [`Spring::tick`] once per frame and
//! read [`Spring::value`].

#[cfg(test)]
#[path = "spring_test.rs"]
mod spring_test;

use serde::{Deserialize, Serialize};

use crate::consts::{SPRING_DAMPING, SPRING_MAX_DT_S, SPRING_MAX_STEP_S, SPRING_REST_EPSILON, SPRING_STIFFNESS};

/// Spring tuning.
///
/// `stiffness` is the squared natural frequency (rad²/s²). `damping` is the
/// damping ratio: 1.0 is critically damped, below 1.0 overshoots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self { stiffness: SPRING_STIFFNESS, damping: SPRING_DAMPING }
    }
}

impl SpringConfig {
    /// Natural frequency in rad/s.
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        self.stiffness.sqrt()
    }
}

/// A scalar animated toward a target.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    current: f64,
    target: f64,
    velocity: f64,
    config: SpringConfig,
}

impl Spring {
    #[must_use]
    pub fn new(initial: f64, config: SpringConfig) -> Self {
        Self { current: initial, target: initial, velocity: 0.0, config }
    }

    /// Retarget the spring. In-flight velocity is kept.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` with no animation.
    pub fn set_immediate(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The animated value for the current frame.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.current != self.target || self.velocity != 0.0
    }

    /// Advance by `dt` seconds.
    ///
    /// Integrates `a = -k·x - 2ζ√k·v` with semi-implicit Euler in sub-steps
    /// of at most [`SPRING_MAX_STEP_S`], so long frames stay stable.
    pub fn tick(&mut self, dt: f64) {
        if !self.is_animating() || dt <= 0.0 {
            return;
        }
        let mut remaining = dt.min(SPRING_MAX_DT_S);
        let k = self.config.stiffness;
        let c = 2.0 * self.config.damping * k.sqrt();

        while remaining > 0.0 {
            let step = remaining.min(SPRING_MAX_STEP_S);
            let displacement = self.current - self.target;
            let acceleration = -k * displacement - c * self.velocity;
            self.velocity += acceleration * step;
            self.current += self.velocity * step;
            remaining -= step;
        }

        if (self.current - self.target).abs() < SPRING_REST_EPSILON && self.velocity.abs() < SPRING_REST_EPSILON {
            self.current = self.target;
            self.velocity = 0.0;
        }
    }
}

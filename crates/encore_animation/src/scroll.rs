//! Smooth scroll animation
//!
//! A [`ScrollAnimation`] moves one scroll offset (the window's vertical offset,
//! or a list's horizontal offset) toward a clamped destination. The host frame
//! clock calls [`ScrollAnimation::tick`]; there is no abort path other than
//! retargeting or dropping the animation.

use crate::spring::{Spring, SpringConfig};

/// Largest integration step; longer frames are split
const MAX_STEP: f64 = 1.0 / 120.0;

/// How a scroll request moves the offset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately
    Instant,
    /// Animate over several frames
    #[default]
    Smooth,
}

/// An in-flight scroll toward a destination
#[derive(Clone, Copy, Debug)]
pub struct ScrollAnimation {
    spring: Spring,
    /// Reachable range of the offset
    min: f64,
    max: f64,
}

impl ScrollAnimation {
    /// Start animating from `from` toward `to`, clamped to `[min, max]`
    pub fn new(config: SpringConfig, from: f64, to: f64, min: f64, max: f64) -> Self {
        let mut spring = Spring::new(config, from);
        let max = max.max(min);
        spring.set_target(to.clamp(min, max));
        tracing::trace!(from, to = spring.target(), "scroll animation started");
        Self { spring, min, max }
    }

    /// Current offset
    pub fn value(&self) -> f64 {
        self.spring.value().clamp(self.min, self.max)
    }

    /// Clamped destination
    pub fn target(&self) -> f64 {
        self.spring.target()
    }

    /// Point the animation at a new destination, keeping its velocity
    pub fn retarget(&mut self, to: f64) {
        self.spring.set_target(to.clamp(self.min, self.max));
    }

    pub fn is_finished(&self) -> bool {
        self.spring.is_settled()
    }

    /// Advance by `dt` seconds and return the new offset.
    ///
    /// Snaps to the destination once settled so callers see an exact final value.
    pub fn tick(&mut self, dt: f64) -> f64 {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 && !self.spring.is_settled() {
            let step = remaining.min(MAX_STEP);
            self.spring.step(step);
            remaining -= step;
        }
        if self.spring.is_settled() {
            // One more step snaps value to target and zeroes velocity
            self.spring.step(0.0);
            return self.target();
        }
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(anim: &mut ScrollAnimation) -> Vec<f64> {
        let mut values = Vec::new();
        for _ in 0..180 {
            values.push(anim.tick(1.0 / 60.0));
            if anim.is_finished() {
                break;
            }
        }
        values
    }

    #[test]
    fn test_reaches_exact_destination() {
        let mut anim = ScrollAnimation::new(SpringConfig::smooth_scroll(), 0.0, 640.0, 0.0, 2000.0);
        let values = run(&mut anim);

        assert!(anim.is_finished());
        assert_eq!(*values.last().unwrap(), 640.0);
        // Monotonic approach
        assert!(values.windows(2).all(|w| w[1] >= w[0] - 1e-6));
    }

    #[test]
    fn test_destination_is_clamped() {
        let anim = ScrollAnimation::new(SpringConfig::smooth_scroll(), 100.0, -300.0, 0.0, 2000.0);
        assert_eq!(anim.target(), 0.0);

        let anim = ScrollAnimation::new(SpringConfig::smooth_scroll(), 100.0, 9000.0, 0.0, 2000.0);
        assert_eq!(anim.target(), 2000.0);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let mut anim = ScrollAnimation::new(SpringConfig::smooth_scroll(), 0.0, 500.0, 0.0, 2000.0);
        anim.tick(0.1);
        let midway = anim.value();
        assert!(midway > 0.0 && midway < 500.0);

        anim.retarget(1000.0);
        run(&mut anim);
        assert_eq!(anim.value(), 1000.0);
    }

    #[test]
    fn test_long_frame_is_split() {
        let mut anim = ScrollAnimation::new(SpringConfig::smooth_scroll(), 0.0, 300.0, 0.0, 300.0);
        // A two second hitch still converges instead of exploding
        assert_eq!(anim.tick(2.0), 300.0);
    }
}

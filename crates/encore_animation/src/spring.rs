//! Damped spring for scroll offsets
//!
//! A mass on a spring pulled toward a target offset, integrated with
//! fourth-order Runge-Kutta. Offsets are document pixels, so everything is
//! `f64` like the rest of the geometry.
//!
//! ```text
//! x'' = (-stiffness * (x - target) - damping * x') / mass
//! ```

/// Distance from the target that counts as arrived (px)
const SETTLE_DISTANCE: f64 = 0.5;
/// Speed below which the spring counts as at rest (px/s)
const SETTLE_SPEED: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit mass, damped just enough to never overshoot
    pub fn critical(stiffness: f64) -> Self {
        Self::new(stiffness, 2.0 * stiffness.sqrt(), 1.0)
    }

    /// Close to the feel of native smooth scrolling
    pub fn smooth_scroll() -> Self {
        Self::critical(170.0)
    }

    /// Faster, for short list steps
    pub fn snappy() -> Self {
        Self::critical(400.0)
    }

    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Whether the spring overshoots and oscillates around its target
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::smooth_scroll()
    }
}

/// Position and velocity of the simulated mass
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Motion {
    offset: f64,
    velocity: f64,
}

impl Motion {
    fn advanced(self, rate: Motion, dt: f64) -> Motion {
        Motion {
            offset: self.offset + rate.offset * dt,
            velocity: self.velocity + rate.velocity * dt,
        }
    }
}

/// One scroll offset chasing a target
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    motion: Motion,
    target: f64,
}

impl Spring {
    /// At rest on `offset`
    pub fn new(config: SpringConfig, offset: f64) -> Self {
        Self {
            config,
            motion: Motion {
                offset,
                velocity: 0.0,
            },
            target: offset,
        }
    }

    pub fn value(&self) -> f64 {
        self.motion.offset
    }

    pub fn velocity(&self) -> f64 {
        self.motion.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retarget mid-flight; current velocity carries over
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        (self.motion.offset - self.target).abs() < SETTLE_DISTANCE
            && self.motion.velocity.abs() < SETTLE_SPEED
    }

    /// Advance by `dt` seconds. A settled spring snaps onto its target.
    pub fn step(&mut self, dt: f64) {
        if self.is_settled() {
            self.motion = Motion {
                offset: self.target,
                velocity: 0.0,
            };
            return;
        }

        let m = self.motion;
        let k1 = self.rate(m);
        let k2 = self.rate(m.advanced(k1, dt / 2.0));
        let k3 = self.rate(m.advanced(k2, dt / 2.0));
        let k4 = self.rate(m.advanced(k3, dt));

        let weighted =
            |f: fn(&Motion) -> f64| (f(&k1) + 2.0 * f(&k2) + 2.0 * f(&k3) + f(&k4)) / 6.0;
        self.motion = Motion {
            offset: m.offset + weighted(|k| k.offset) * dt,
            velocity: m.velocity + weighted(|k| k.velocity) * dt,
        };
    }

    /// Time derivative of `m`: (velocity, acceleration)
    fn rate(&self, m: Motion) -> Motion {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        Motion {
            offset: m.velocity,
            velocity: (-stiffness * (m.offset - self.target) - damping * m.velocity) / mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn frames_to_settle(spring: &mut Spring, limit: usize) -> Option<usize> {
        (1..=limit).find(|_| {
            spring.step(FRAME);
            spring.is_settled()
        })
    }

    #[test]
    fn test_presets_are_critically_damped() {
        for config in [SpringConfig::smooth_scroll(), SpringConfig::snappy()] {
            assert!(!config.is_underdamped());
            assert!((config.damping - config.critical_damping()).abs() < 1e-9);
        }
        assert!(SpringConfig::new(170.0, 5.0, 1.0).is_underdamped());
    }

    #[test]
    fn test_scroll_to_section_never_overshoots() {
        let mut spring = Spring::new(SpringConfig::smooth_scroll(), 0.0);
        spring.set_target(1620.0);

        let mut peak: f64 = 0.0;
        let frames = (0..180).find(|_| {
            spring.step(FRAME);
            peak = peak.max(spring.value());
            spring.is_settled()
        });

        assert!(frames.is_some());
        assert!(peak <= 1620.0 + SETTLE_DISTANCE);
    }

    #[test]
    fn test_snappy_settles_sooner() {
        let mut smooth = Spring::new(SpringConfig::smooth_scroll(), 0.0);
        let mut snappy = Spring::new(SpringConfig::snappy(), 0.0);
        smooth.set_target(880.0);
        snappy.set_target(880.0);

        let smooth_frames = frames_to_settle(&mut smooth, 600).unwrap();
        let snappy_frames = frames_to_settle(&mut snappy, 600).unwrap();
        assert!(snappy_frames < smooth_frames);
    }

    #[test]
    fn test_retarget_keeps_momentum() {
        let mut spring = Spring::new(SpringConfig::smooth_scroll(), 0.0);
        spring.set_target(2000.0);
        for _ in 0..6 {
            spring.step(FRAME);
        }
        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(500.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_settled_step_snaps() {
        let mut spring = Spring::new(SpringConfig::smooth_scroll(), 99.8);
        spring.set_target(100.0);
        assert!(spring.is_settled());
        spring.step(FRAME);
        assert_eq!(spring.value(), 100.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_large_steps_stay_bounded() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        spring.set_target(3200.0);
        for _ in 0..50 {
            spring.step(0.05);
            assert!(spring.value().is_finite());
            assert!(spring.value() > -100.0 && spring.value() < 3300.0);
        }
    }
}

//! Scripted hazard motion

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a hazard moves each step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardMotion {
    /// Never moves
    Fixed,
    /// Back and forth within `range` of the spawn column
    Oscillate {
        origin_x: f32,
        range: f32,
        /// Signed speed (units/s); sign flips at the bounds
        speed: f32,
    },
    /// One direction only, and only while water has been collected
    Drift { speed: f32 },
}

impl HazardMotion {
    pub fn oscillate(origin_x: f32) -> Self {
        Self::Oscillate {
            origin_x,
            range: MOVING_FIRE_RANGE,
            speed: MOVING_FIRE_SPEED,
        }
    }

    pub fn drift() -> Self {
        Self::Drift {
            speed: -LAST_FIRE_SPEED,
        }
    }

    /// Advance `pos` by one step
    pub fn step(&mut self, pos: &mut Vec2, water_collected: bool, dt: f32) {
        match self {
            Self::Fixed => {}
            Self::Oscillate {
                origin_x,
                range,
                speed,
            } => {
                // Bounds are checked before moving, so the fire overshoots by one step
                if pos.x > *origin_x + *range || pos.x < *origin_x - *range {
                    *speed = -*speed;
                }
                pos.x += *speed * dt;
            }
            Self::Drift { speed } => {
                if water_collected {
                    pos.x += *speed * dt;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_never_moves() {
        let mut m = HazardMotion::Fixed;
        let mut pos = Vec2::new(3.0, 4.0);
        for _ in 0..100 {
            m.step(&mut pos, true, SIM_DT);
        }
        assert_eq!(pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_oscillation_stays_near_spawn() {
        let mut m = HazardMotion::oscillate(5.0);
        let mut pos = Vec2::new(5.0, -70.0);
        let mut min_x = pos.x;
        let mut max_x = pos.x;
        for _ in 0..2000 {
            m.step(&mut pos, false, SIM_DT);
            min_x = min_x.min(pos.x);
            max_x = max_x.max(pos.x);
        }
        let step = MOVING_FIRE_SPEED * SIM_DT;
        assert!(max_x <= 5.0 + MOVING_FIRE_RANGE + 2.0 * step);
        assert!(min_x >= 5.0 - MOVING_FIRE_RANGE - 2.0 * step);
        // It actually reaches both ends
        assert!(max_x > 5.0 + MOVING_FIRE_RANGE);
        assert!(min_x < 5.0 - MOVING_FIRE_RANGE);
        assert_eq!(pos.y, -70.0);
    }

    #[test]
    fn test_oscillation_reverses_at_bound() {
        let mut m = HazardMotion::oscillate(0.0);
        let mut pos = Vec2::new(MOVING_FIRE_RANGE + 0.1, 0.0);
        m.step(&mut pos, false, SIM_DT);
        assert!(pos.x < MOVING_FIRE_RANGE + 0.1);
        assert!(matches!(m, HazardMotion::Oscillate { speed, .. } if speed < 0.0));
    }

    #[test]
    fn test_drift_waits_for_water() {
        let mut m = HazardMotion::drift();
        let mut pos = Vec2::new(-10.0, -106.0);
        for _ in 0..60 {
            m.step(&mut pos, false, SIM_DT);
        }
        assert_eq!(pos.x, -10.0);

        for _ in 0..60 {
            m.step(&mut pos, true, SIM_DT);
        }
        assert!((pos.x - (-10.0 - LAST_FIRE_SPEED)).abs() < 1e-3);
    }
}

//! Wall-impact damage model.
//!
//! Damage is estimated from deltaV (the change in scalar speed over the recent
//! speed history) and modulated by the vertical velocity at the moment of
//! contact:
//!
//! | Condition                                    | Damage             |
//! |----------------------------------------------|--------------------|
//! | `deltaV > 50` and `-50 < dy < 50`            | `deltaV × 0.1`     |
//! | `dy >= 50` or `dy <= -50`                    | `deltaV × 0.05`    |
//! | otherwise                                    | `0`                |
//!
//! Negative deltaV (the ship was already slowing down) is clamped to zero for
//! the multiplication, so a rebound never heals.  The "otherwise" row is a real
//! gap: a low-vertical-speed hit with `0 < deltaV <= 50` is free.

use crate::config::LanderConfig;
use crate::constants::{
    DAMAGE_DELTA_V_THRESHOLD, DAMAGE_VERTICAL_SPEED_THRESHOLD, FULL_DAMAGE_COEFFICIENT,
    HALF_DAMAGE_COEFFICIENT,
};
use bevy::math::Vec2;

/// Thresholds and coefficients of the wall-impact damage table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageModel {
    pub delta_v_threshold: f32,
    pub vertical_speed_threshold: f32,
    pub full_coefficient: f64,
    pub half_coefficient: f64,
}

impl Default for DamageModel {
    fn default() -> Self {
        Self {
            delta_v_threshold: DAMAGE_DELTA_V_THRESHOLD,
            vertical_speed_threshold: DAMAGE_VERTICAL_SPEED_THRESHOLD,
            full_coefficient: FULL_DAMAGE_COEFFICIENT,
            half_coefficient: HALF_DAMAGE_COEFFICIENT,
        }
    }
}

impl DamageModel {
    pub fn from_config(config: &LanderConfig) -> Self {
        Self {
            delta_v_threshold: config.damage_delta_v_threshold,
            vertical_speed_threshold: config.damage_vertical_speed_threshold,
            full_coefficient: config.full_damage_coefficient,
            half_coefficient: config.half_damage_coefficient,
        }
    }

    /// Health deduction for a wall impact.
    ///
    /// `_speed` is carried for parity with the contact site; the table only
    /// reads `velocity.y` and `delta_v`.
    pub fn damage(&self, _speed: f32, velocity: Vec2, delta_v: f32) -> f64 {
        let clamped = delta_v.max(0.0) as f64;
        let dy = velocity.y;
        let limit = self.vertical_speed_threshold;

        if delta_v > self.delta_v_threshold && dy < limit && dy > -limit {
            clamped * self.full_coefficient
        } else if dy >= limit || dy <= -limit {
            clamped * self.half_coefficient
        } else {
            0.0
        }
    }
}

/// [`DamageModel::damage`] with the compiled default table.
#[inline]
pub fn calculate_damage(speed: f32, velocity: Vec2, delta_v: f32) -> f64 {
    DamageModel::default().damage(speed, velocity, delta_v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn head_on_low_vertical_speed_takes_full_coefficient() {
        let d = calculate_damage(60.0, Vec2::new(60.0, 0.0), 60.0);
        assert!(approx(d, 6.0), "got {d}");
    }

    #[test]
    fn high_vertical_speed_takes_half_coefficient() {
        let up = calculate_damage(80.0, Vec2::new(0.0, 50.0), 80.0);
        let down = calculate_damage(80.0, Vec2::new(0.0, -70.0), 80.0);
        assert!(approx(up, 4.0), "got {up}");
        assert!(approx(down, 4.0), "got {down}");
    }

    #[test]
    fn high_vertical_speed_applies_below_delta_v_threshold() {
        let d = calculate_damage(30.0, Vec2::new(0.0, -55.0), 20.0);
        assert!(approx(d, 1.0), "got {d}");
    }

    #[test]
    fn gap_case_is_free() {
        // Low vertical speed and deltaV at or below the threshold.
        assert_eq!(calculate_damage(40.0, Vec2::new(40.0, 10.0), 40.0), 0.0);
        assert_eq!(calculate_damage(50.0, Vec2::new(50.0, 0.0), 50.0), 0.0);
    }

    #[test]
    fn negative_delta_v_behaves_like_zero() {
        for velocity in [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 60.0),
            Vec2::new(-5.0, -90.0),
        ] {
            assert_eq!(
                calculate_damage(70.0, velocity, -35.0),
                calculate_damage(70.0, velocity, 0.0),
                "velocity {velocity:?}"
            );
            assert_eq!(calculate_damage(70.0, velocity, -35.0), 0.0);
        }
    }

    #[test]
    fn damage_is_repeatable() {
        let v = Vec2::new(12.5, -49.0);
        let first = calculate_damage(90.0, v, 77.0);
        for _ in 0..10 {
            assert_eq!(calculate_damage(90.0, v, 77.0), first);
        }
    }

    #[test]
    fn configured_table_overrides_coefficients() {
        let model = DamageModel {
            full_coefficient: 1.0,
            ..Default::default()
        };
        assert!(approx(model.damage(60.0, Vec2::ZERO, 60.0), 60.0));
    }
}

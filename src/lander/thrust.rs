//! Thruster arming, force vectors and fuel gating.
//!
//! Each frame, every armed thruster fires in the fixed order
//! Main → Left → Right as long as the tank is not empty *at that moment*; each
//! firing pushes its force into the body and burns its per-frame cost.  When
//! the tank reads empty after the burn, every thruster is disarmed.
//!
//! | Thruster | Force vector (θ = ship angle, F = magnitude)   | Cost/frame |
//! |----------|-----------------------------------------------|------------|
//! | Main     | `(-sin θ · F, cos θ · F)`                     | 0.04       |
//! | Left     | `( cos θ · F, cos θ · F)`                     | 0.02       |
//! | Right    | `(-cos θ · F, -cos θ · F)`                    | 0.02       |
//!
//! The lateral vectors are not perpendicular to the ship's up axis; both
//! components follow `cos θ`.  Gameplay is tuned around that, keep it.

use super::body::ShipBody;
use super::state::ShipState;
use crate::config::LanderConfig;
use crate::constants::{LATERAL_FUEL_COST, LATERAL_THRUST_FORCE, MAIN_FUEL_COST, MAIN_THRUST_FORCE};
use bevy::math::Vec2;

/// One of the three directional thrusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thruster {
    /// Fires downward, pushing the ship along its local up axis.
    Main,
    Left,
    Right,
}

impl Thruster {
    /// Firing order within a frame.
    pub const ALL: [Thruster; 3] = [Thruster::Main, Thruster::Left, Thruster::Right];
}

/// World-space force produced by `thruster` at ship angle `angle`.
pub fn thrust_vector(thruster: Thruster, angle: f32, magnitude: f32) -> Vec2 {
    match thruster {
        Thruster::Main => Vec2::new(-magnitude * angle.sin(), magnitude * angle.cos()),
        Thruster::Left => Vec2::splat(magnitude * angle.cos()),
        Thruster::Right => Vec2::splat(-magnitude * angle.cos()),
    }
}

// ── Arming ────────────────────────────────────────────────────────────────────

/// Per-thruster on/off switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrustState {
    main: bool,
    left: bool,
    right: bool,
}

impl ThrustState {
    pub fn set_armed(&mut self, thruster: Thruster, armed: bool) {
        *self.slot_mut(thruster) = armed;
    }

    pub fn is_armed(&self, thruster: Thruster) -> bool {
        match thruster {
            Thruster::Main => self.main,
            Thruster::Left => self.left,
            Thruster::Right => self.right,
        }
    }

    pub fn any_armed(&self) -> bool {
        self.main || self.left || self.right
    }

    /// Switch every thruster off.  Returns whether anything was armed.
    pub fn disarm_all(&mut self) -> bool {
        let was_armed = self.any_armed();
        *self = Self::default();
        was_armed
    }

    fn slot_mut(&mut self, thruster: Thruster) -> &mut bool {
        match thruster {
            Thruster::Main => &mut self.main,
            Thruster::Left => &mut self.left,
            Thruster::Right => &mut self.right,
        }
    }
}

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Force magnitudes and per-frame fuel costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrusterTuning {
    pub main_force: f32,
    pub lateral_force: f32,
    pub main_cost: f64,
    pub lateral_cost: f64,
}

impl Default for ThrusterTuning {
    fn default() -> Self {
        Self {
            main_force: MAIN_THRUST_FORCE,
            lateral_force: LATERAL_THRUST_FORCE,
            main_cost: MAIN_FUEL_COST,
            lateral_cost: LATERAL_FUEL_COST,
        }
    }
}

impl ThrusterTuning {
    pub fn from_config(config: &LanderConfig) -> Self {
        Self {
            main_force: config.main_thrust_force,
            lateral_force: config.lateral_thrust_force,
            main_cost: config.main_fuel_cost,
            lateral_cost: config.lateral_fuel_cost,
        }
    }

    #[inline]
    pub fn magnitude(&self, thruster: Thruster) -> f32 {
        match thruster {
            Thruster::Main => self.main_force,
            Thruster::Left | Thruster::Right => self.lateral_force,
        }
    }

    #[inline]
    pub fn cost(&self, thruster: Thruster) -> f64 {
        match thruster {
            Thruster::Main => self.main_cost,
            Thruster::Left | Thruster::Right => self.lateral_cost,
        }
    }
}

// ── Firing ────────────────────────────────────────────────────────────────────

/// What one frame of thruster activity did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrustReport {
    /// Sum of all forces pushed into the body this frame.
    pub force: Vec2,
    pub fuel_burned: f64,
    /// `true` on the frame the empty tank switched armed thrusters off.
    pub cut_off: bool,
}

/// Fire every armed thruster that still has fuel, then cut all thrusters if
/// the tank is empty.
pub fn fire_thrusters<B: ShipBody + ?Sized>(
    thrust: &mut ThrustState,
    tuning: &ThrusterTuning,
    ship: &mut ShipState,
    body: &mut B,
) -> ThrustReport {
    let mut report = ThrustReport::default();
    let angle = body.angle();

    for thruster in Thruster::ALL {
        if !thrust.is_armed(thruster) || !ship.has_fuel() {
            continue;
        }
        let force = thrust_vector(thruster, angle, tuning.magnitude(thruster));
        body.apply_force(force);
        report.force += force;

        let before = ship.fuel();
        ship.burn_fuel(tuning.cost(thruster));
        report.fuel_burned += before - ship.fuel();
    }

    if !ship.has_fuel() {
        report.cut_off = thrust.disarm_all();
    }

    report
}

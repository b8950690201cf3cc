//! Physics body seam.
//!
//! The simulation reads orientation and velocity from the ship's body and
//! writes forces and torques back to it.  [`ShipBody`] captures exactly that
//! surface so the per-frame logic runs against Rapier in the game and against
//! a [`PlainBody`] in tests and headless runs.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalForce, Velocity};

/// The part of a physics body the lander simulation talks to.
pub trait ShipBody {
    /// Orientation around Z in radians, `0` = upright.
    fn angle(&self) -> f32;

    /// Linear velocity, or `None` when the body cannot report one.
    fn velocity(&self) -> Option<Vec2>;

    fn angular_velocity(&self) -> f32;

    /// Accumulate a world-space force for the current frame.
    fn apply_force(&mut self, force: Vec2);

    /// Accumulate a torque for the current frame.
    fn apply_torque(&mut self, torque: f32);
}

// ── PlainBody ─────────────────────────────────────────────────────────────────

/// Detached plain-data body.
///
/// Nothing integrates it; callers set `angle`/`velocity` directly and read
/// back the force and torque accumulated since the last [`clear_forces`].
///
/// [`clear_forces`]: PlainBody::clear_forces
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlainBody {
    pub angle: f32,
    pub velocity: Option<Vec2>,
    pub angular_velocity: f32,
    pub force: Vec2,
    pub torque: f32,
}

impl PlainBody {
    pub fn at_rest() -> Self {
        Self {
            velocity: Some(Vec2::ZERO),
            ..Default::default()
        }
    }

    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}

impl ShipBody for PlainBody {
    fn angle(&self) -> f32 {
        self.angle
    }

    fn velocity(&self) -> Option<Vec2> {
        self.velocity
    }

    fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }
}

// ── RapierShipBody ────────────────────────────────────────────────────────────

/// Borrowed view over the ship's Rapier components for one frame.
///
/// Rapier keeps `ExternalForce` applied until it is changed, so the caller
/// must zero it before building the view each frame.
pub struct RapierShipBody<'a> {
    transform: &'a Transform,
    velocity: Option<&'a Velocity>,
    external: &'a mut ExternalForce,
}

impl<'a> RapierShipBody<'a> {
    pub fn new(
        transform: &'a Transform,
        velocity: Option<&'a Velocity>,
        external: &'a mut ExternalForce,
    ) -> Self {
        Self {
            transform,
            velocity,
            external,
        }
    }
}

impl ShipBody for RapierShipBody<'_> {
    fn angle(&self) -> f32 {
        self.transform.rotation.to_euler(EulerRot::ZYX).0
    }

    fn velocity(&self) -> Option<Vec2> {
        self.velocity.map(|v| v.linvel)
    }

    fn angular_velocity(&self) -> f32 {
        self.velocity.map_or(0.0, |v| v.angvel)
    }

    fn apply_force(&mut self, force: Vec2) {
        self.external.force += force;
    }

    fn apply_torque(&mut self, torque: f32) {
        self.external.torque += torque;
    }
}

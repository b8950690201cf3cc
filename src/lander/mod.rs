//! Lander module: ship entity, thrusters, state bookkeeping and input.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `ShipState` (fuel, health, death latches), `SpeedHistory`, `FrameClock` |
//! | [`thrust`] | `Thruster`, `ThrustState`, force vectors and fuel-gated firing |
//! | [`body`] | `ShipBody` physics seam, with Rapier and plain-data implementations |
//! | [`control`] | Touch / mouse / keyboard systems that arm and disarm thrusters |
//!
//! All commonly used items are re-exported at this level.

pub mod body;
pub mod control;
pub mod state;
pub mod thrust;

pub use body::{PlainBody, RapierShipBody, ShipBody};
pub use control::{ControlLayout, PointerTracker, ThrottleRegion};
pub use state::{speed_of, FrameClock, ShipState, SpeedHistory};
pub use thrust::{fire_thrusters, thrust_vector, ThrustReport, ThrustState, Thruster, ThrusterTuning};

// ── Ship spawn ─────────────────────────────────────────────────────────────────

use crate::config::LanderConfig;
use crate::contact::{ContactCategory, ContactTag};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Marker component for the lander entity.
#[derive(Component)]
pub struct Ship;

/// Mass given to the ship collider so the configured thrust can lift it
/// against gravity.
pub const SHIP_MASS: f32 = 1.5;

/// Spawn the lander at `config.ship_start`.
///
/// Collision groups:
/// - belongs to `Ship`
/// - collides with / reports contacts against `Wall | Box | Pad | Star`
///   (stars are sensors, so they only ever report)
pub fn spawn_ship(commands: &mut Commands, config: &LanderConfig) -> Entity {
    let [hx, hy] = config.ship_half_extents;
    let [x, y] = config.ship_start;
    let entity = commands
        .spawn((
            Ship,
            ContactTag(ContactCategory::Ship),
            // Physics
            RigidBody::Dynamic,
            Collider::cuboid(hx, hy),
            ColliderMassProperties::Mass(SHIP_MASS),
            Velocity::zero(),
            ExternalForce::default(),
            Damping {
                linear_damping: 0.0,
                angular_damping: config.ship_angular_damping,
            },
            Ccd::enabled(),
            ContactCategory::Ship.collision_groups(ContactCategory::ship_filter()),
            ActiveEvents::COLLISION_EVENTS,
            // Transform / visibility
            Transform::from_xyz(x, y, 0.0),
            Visibility::default(),
        ))
        .id();

    info!("Lander spawned at ({x}, {y})");
    entity
}

//! Centralised physics and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::LanderConfig`] mirrors every value below and can override
//! any of them at startup from `assets/lander.toml`.
//!
//! ## Tuning guidance
//!
//! Thrust and fuel numbers are per-frame quantities: the simulation deducts
//! fuel once per rendered frame, not per second.  Changing the frame rate
//! therefore changes how long a full tank lasts.

// ── World ─────────────────────────────────────────────────────────────────────

/// World gravity (units/s²).  Negative Y pulls the lander toward the floor.
///
/// 1.75 m/s² at 150 world units per metre.  Rapier runs with
/// `pixels_per_meter(1.0)`, so the scaling is baked in here.
pub const GRAVITY_Y: f32 = -262.5;

/// Width of the playable arena enclosed by the edge walls (world units).
pub const ARENA_WIDTH: f32 = 1536.0;

/// Height of the playable arena enclosed by the edge walls (world units).
pub const ARENA_HEIGHT: f32 = 864.0;

/// Thickness of each edge wall collider.
pub const WALL_THICKNESS: f32 = 20.0;

// ── Thrusters ─────────────────────────────────────────────────────────────────

/// Force magnitude of the main (downward-firing) thruster.
pub const MAIN_THRUST_FORCE: f32 = 600.0;

/// Force magnitude of each lateral thruster.
pub const LATERAL_THRUST_FORCE: f32 = 300.0;

/// Fuel burned per frame while the main thruster fires.
///
/// A full tank of [`FUEL_CAPACITY`] lasts exactly 2500 frames of main thrust.
pub const MAIN_FUEL_COST: f64 = 0.04;

/// Fuel burned per frame while a lateral thruster fires.
pub const LATERAL_FUEL_COST: f64 = 0.02;

/// Fuel in a full tank.
pub const FUEL_CAPACITY: f64 = 100.0;

/// Fuel levels within this distance of zero are snapped to exactly zero.
///
/// Repeated subtraction of `0.04` accumulates binary rounding error; without
/// the snap a tank could end a few ulps above zero and burn one extra frame.
pub const FUEL_EPSILON: f64 = 1e-9;

// ── Health ────────────────────────────────────────────────────────────────────

/// Starting health of the ship.
///
/// The damage coefficients below were tuned against a 0–100 health scale, so
/// at 1.0 almost any scoring wall impact is fatal.  Raise to 100.0 in
/// `assets/lander.toml` for the forgiving variant.
pub const STARTING_HEALTH: f64 = 1.0;

// ── Stabilization ─────────────────────────────────────────────────────────────

/// Absolute orientation (radians) below which no corrective torque is applied.
pub const STABILIZE_DEADBAND: f32 = 0.05;

/// Magnitude of the constant corrective torque applied outside the deadband.
pub const STABILIZE_TORQUE: f32 = 0.5;

/// Angular damping applied to the ship body by Rapier.
pub const SHIP_ANGULAR_DAMPING: f32 = 0.75;

// ── Speed tracking ────────────────────────────────────────────────────────────

/// Number of recent speed samples retained for the deltaV estimate.
///
/// Once the history holds this many samples, each new frame evicts the oldest
/// one and that evicted sample becomes the reference speed for the next frame.
pub const SPEED_HISTORY_CAPACITY: usize = 26;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Bar width (HUD units) per unit of fuel or health.
pub const BAR_WIDTH_SCALE: f64 = 3.0;

// ── Contacts ──────────────────────────────────────────────────────────────────

/// Both signed velocity components must be below this for a pad contact to
/// count as a landing.
pub const LANDING_SPEED_THRESHOLD: f32 = 1.0;

/// deltaV above which a low-vertical-speed wall impact deals full damage.
pub const DAMAGE_DELTA_V_THRESHOLD: f32 = 50.0;

/// Vertical speed at or beyond which a wall impact deals half damage.
pub const DAMAGE_VERTICAL_SPEED_THRESHOLD: f32 = 50.0;

/// Damage per unit deltaV for near-head-on, low-vertical-speed impacts.
pub const FULL_DAMAGE_COEFFICIENT: f64 = 0.1;

/// Damage per unit deltaV for high-vertical-speed impacts.
pub const HALF_DAMAGE_COEFFICIENT: f64 = 0.05;

// ── Entities ──────────────────────────────────────────────────────────────────

/// Half extents of the ship's cuboid collider.
pub const SHIP_HALF_WIDTH: f32 = 40.0;
pub const SHIP_HALF_HEIGHT: f32 = 50.0;

/// Half extents of the landing pad collider.
pub const PAD_HALF_WIDTH: f32 = 120.0;
pub const PAD_HALF_HEIGHT: f32 = 10.0;

/// Half extent of the square crate collider.
pub const CRATE_HALF_SIZE: f32 = 30.0;

/// Radius of a star pickup's sensor.
pub const STAR_RADIUS: f32 = 24.0;

//! Runtime gameplay configuration loaded from `assets/lander.toml`.
//!
//! [`LanderConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_lander_config`] reads
//! `assets/lander.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! starting_health = 100.0
//! main_thrust_force = 750.0
//! star_positions = [[500.0, 500.0], [500.0, 600.0], [-300.0, 200.0]]
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `LanderConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_history_capacity, validate_non_negative, validate_positive, SimError, SimResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Path the startup loader reads overrides from.
pub const CONFIG_PATH: &str = "assets/lander.toml";

/// Runtime-tunable physics and gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub gravity_y: f32,
    pub arena_width: f32,
    pub arena_height: f32,
    pub wall_thickness: f32,

    // ── Thrusters ────────────────────────────────────────────────────────────
    pub main_thrust_force: f32,
    pub lateral_thrust_force: f32,
    pub main_fuel_cost: f64,
    pub lateral_fuel_cost: f64,
    pub fuel_capacity: f64,

    // ── Health ───────────────────────────────────────────────────────────────
    pub starting_health: f64,

    // ── Stabilization ────────────────────────────────────────────────────────
    pub stabilize_deadband: f32,
    pub stabilize_torque: f32,
    pub ship_angular_damping: f32,

    // ── Speed tracking / HUD ─────────────────────────────────────────────────
    pub speed_history_capacity: usize,
    pub bar_width_scale: f64,

    // ── Contacts ─────────────────────────────────────────────────────────────
    pub landing_speed_threshold: f32,
    pub damage_delta_v_threshold: f32,
    pub damage_vertical_speed_threshold: f32,
    pub full_damage_coefficient: f64,
    pub half_damage_coefficient: f64,

    // ── Layout ───────────────────────────────────────────────────────────────
    pub ship_half_extents: [f32; 2],
    pub ship_start: [f32; 2],
    pub pad_position: [f32; 2],
    pub crate_positions: Vec<[f32; 2]>,
    pub star_radius: f32,
    pub star_positions: Vec<[f32; 2]>,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            // World
            gravity_y: GRAVITY_Y,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            // Thrusters
            main_thrust_force: MAIN_THRUST_FORCE,
            lateral_thrust_force: LATERAL_THRUST_FORCE,
            main_fuel_cost: MAIN_FUEL_COST,
            lateral_fuel_cost: LATERAL_FUEL_COST,
            fuel_capacity: FUEL_CAPACITY,
            // Health
            starting_health: STARTING_HEALTH,
            // Stabilization
            stabilize_deadband: STABILIZE_DEADBAND,
            stabilize_torque: STABILIZE_TORQUE,
            ship_angular_damping: SHIP_ANGULAR_DAMPING,
            // Speed tracking / HUD
            speed_history_capacity: SPEED_HISTORY_CAPACITY,
            bar_width_scale: BAR_WIDTH_SCALE,
            // Contacts
            landing_speed_threshold: LANDING_SPEED_THRESHOLD,
            damage_delta_v_threshold: DAMAGE_DELTA_V_THRESHOLD,
            damage_vertical_speed_threshold: DAMAGE_VERTICAL_SPEED_THRESHOLD,
            full_damage_coefficient: FULL_DAMAGE_COEFFICIENT,
            half_damage_coefficient: HALF_DAMAGE_COEFFICIENT,
            // Layout
            ship_half_extents: [SHIP_HALF_WIDTH, SHIP_HALF_HEIGHT],
            ship_start: [0.0, 200.0],
            pad_position: [-400.0, -ARENA_HEIGHT / 2.0 + PAD_HALF_HEIGHT],
            crate_positions: vec![[300.0, -ARENA_HEIGHT / 2.0 + CRATE_HALF_SIZE]],
            star_radius: STAR_RADIUS,
            star_positions: vec![[500.0, 0.0], [500.0, 100.0]],
        }
    }
}

impl LanderConfig {
    /// Parse a TOML document and validate the result.
    ///
    /// Keys absent from `contents` keep their compiled defaults.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        let config: LanderConfig =
            toml::from_str(contents).map_err(|e| SimError::ConfigParse {
                path: CONFIG_PATH.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// Health is allowed to start at any positive value; the damage model does
    /// not rescale with it.
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("fuel_capacity", self.fuel_capacity)?;
        validate_positive("starting_health", self.starting_health)?;
        validate_non_negative("main_thrust_force", self.main_thrust_force as f64)?;
        validate_non_negative("lateral_thrust_force", self.lateral_thrust_force as f64)?;
        validate_non_negative("main_fuel_cost", self.main_fuel_cost)?;
        validate_non_negative("lateral_fuel_cost", self.lateral_fuel_cost)?;
        validate_non_negative("stabilize_deadband", self.stabilize_deadband as f64)?;
        validate_non_negative("stabilize_torque", self.stabilize_torque as f64)?;
        validate_non_negative("bar_width_scale", self.bar_width_scale)?;
        validate_non_negative("full_damage_coefficient", self.full_damage_coefficient)?;
        validate_non_negative("half_damage_coefficient", self.half_damage_coefficient)?;
        validate_positive("arena_width", self.arena_width as f64)?;
        validate_positive("arena_height", self.arena_height as f64)?;
        validate_positive("star_radius", self.star_radius as f64)?;
        validate_history_capacity(self.speed_history_capacity)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/lander.toml` and overwrite the
/// `LanderConfig` resource with any values present in the file.
///
/// A missing file is not an error.  Parse or validation failures are logged
/// and the compiled defaults stay in place.
pub fn load_lander_config(mut config: ResMut<LanderConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match LanderConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded lander config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(LanderConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = LanderConfig::from_toml_str("starting_health = 100.0\n").unwrap();
        assert_eq!(config.starting_health, 100.0);
        assert_eq!(config.main_thrust_force, MAIN_THRUST_FORCE);
        assert_eq!(config.speed_history_capacity, SPEED_HISTORY_CAPACITY);
    }

    #[test]
    fn star_positions_override() {
        let config =
            LanderConfig::from_toml_str("star_positions = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]\n")
                .unwrap();
        assert_eq!(config.star_positions.len(), 3);
        assert_eq!(config.star_positions[2], [5.0, 6.0]);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = LanderConfig::from_toml_str("fuel_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }), "got {err:?}");
    }

    #[test]
    fn negative_fuel_capacity_is_rejected() {
        let err = LanderConfig::from_toml_str("fuel_capacity = -5.0").unwrap_err();
        assert!(matches!(
            err,
            SimError::UnsafeConstant {
                name: "fuel_capacity",
                ..
            }
        ));
    }

    #[test]
    fn zero_history_capacity_is_rejected() {
        let err = LanderConfig::from_toml_str("speed_history_capacity = 0").unwrap_err();
        assert_eq!(err, SimError::EmptySpeedHistory);
    }
}

//! Ship bookkeeping that survives between frames.
//!
//! - [`ShipState`]: fuel, health and the one-way death/explosion latches.
//! - [`SpeedHistory`]: bounded window of recent scalar speeds and the deltaV
//!   estimate derived from it.
//! - [`FrameClock`]: elapsed time between consecutive `step` calls.

use crate::config::LanderConfig;
use crate::constants::{FUEL_CAPACITY, FUEL_EPSILON, SPEED_HISTORY_CAPACITY, STARTING_HEALTH};
use bevy::math::Vec2;
use std::collections::VecDeque;

// ── ShipState ─────────────────────────────────────────────────────────────────

/// Fuel, health and death state of the lander.
///
/// Fuel is kept in `[0, capacity]`.  Health is deliberately *not* clamped:
/// a hard wall hit can push it well below zero, and death is detected on
/// `health <= 0` by the next simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipState {
    fuel: f64,
    health: f64,
    died: bool,
    exploded: bool,
}

impl Default for ShipState {
    fn default() -> Self {
        Self::new(FUEL_CAPACITY, STARTING_HEALTH)
    }
}

impl ShipState {
    pub fn new(fuel: f64, health: f64) -> Self {
        Self {
            fuel: fuel.max(0.0),
            health,
            died: false,
            exploded: false,
        }
    }

    pub fn from_config(config: &LanderConfig) -> Self {
        Self::new(config.fuel_capacity, config.starting_health)
    }

    #[inline]
    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    #[inline]
    pub fn health(&self) -> f64 {
        self.health
    }

    #[inline]
    pub fn has_fuel(&self) -> bool {
        self.fuel > 0.0
    }

    #[inline]
    pub fn died(&self) -> bool {
        self.died
    }

    #[inline]
    pub fn exploded(&self) -> bool {
        self.exploded
    }

    /// Deduct `cost` from the tank.
    ///
    /// Anything at or below [`FUEL_EPSILON`] after the deduction becomes
    /// exactly `0.0`, so the tank never goes negative and never strands a
    /// rounding residue that would buy one more frame of thrust.
    pub fn burn_fuel(&mut self, cost: f64) {
        self.fuel -= cost;
        if self.fuel <= FUEL_EPSILON {
            self.fuel = 0.0;
        }
    }

    /// Subtract wall-impact damage.  No clamping.
    pub fn apply_damage(&mut self, damage: f64) {
        self.health -= damage;
    }

    /// Latch `died` once health is exhausted and report the explosion edge.
    ///
    /// Returns `true` exactly once: on the first call that observes the ship
    /// dead but not yet exploded.  Every later call returns `false` no matter
    /// how far below zero health sits.
    pub fn update_death(&mut self) -> bool {
        if self.health <= 0.0 {
            self.died = true;
        }
        if self.died && !self.exploded {
            self.exploded = true;
            return true;
        }
        false
    }

    /// HUD fuel-bar width: `fuel × scale`.
    #[inline]
    pub fn fuel_bar_width(&self, scale: f64) -> f64 {
        self.fuel * scale
    }

    /// HUD health-bar width: `max(health × scale, 0)`.
    #[inline]
    pub fn health_bar_width(&self, scale: f64) -> f64 {
        (self.health * scale).max(0.0)
    }
}

// ── SpeedHistory ──────────────────────────────────────────────────────────────

/// Rolling window of recent scalar speeds.
///
/// deltaV is `current_speed - old_speed`, where `old_speed` is the sample most
/// recently evicted from the window (zero until the first eviction).  The
/// difference is taken *before* this frame's eviction, so the sample evicted
/// on frame `n` is the reference for frame `n + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedHistory {
    samples: VecDeque<f32>,
    capacity: usize,
    ship_speed: f32,
    old_speed: f32,
    delta_v: f32,
}

impl Default for SpeedHistory {
    fn default() -> Self {
        Self::with_capacity(SPEED_HISTORY_CAPACITY)
    }
}

impl SpeedHistory {
    /// `capacity` is clamped to at least one sample.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            ship_speed: 0.0,
            old_speed: 0.0,
            delta_v: 0.0,
        }
    }

    /// Record this frame's speed and return the resulting deltaV.
    pub fn record(&mut self, speed: f32) -> f32 {
        self.ship_speed = speed;
        self.delta_v = speed - self.old_speed;
        if self.samples.len() >= self.capacity {
            if let Some(oldest) = self.samples.pop_front() {
                self.old_speed = oldest;
            }
        }
        self.samples.push_back(speed);
        self.delta_v
    }

    #[inline]
    pub fn ship_speed(&self) -> f32 {
        self.ship_speed
    }

    #[inline]
    pub fn old_speed(&self) -> f32 {
        self.old_speed
    }

    #[inline]
    pub fn delta_v(&self) -> f32 {
        self.delta_v
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained sample, if any.
    #[inline]
    pub fn oldest(&self) -> Option<f32> {
        self.samples.front().copied()
    }
}

/// Euclidean speed of an optional velocity.
///
/// Absent or non-finite velocity reads as stationary.
pub fn speed_of(velocity: Option<Vec2>) -> f32 {
    let speed = velocity.unwrap_or(Vec2::ZERO).length();
    if speed.is_finite() {
        speed
    } else {
        0.0
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Derives per-frame `dt` from absolute timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last_update: Option<f64>,
    dt: f64,
}

impl FrameClock {
    /// Advance to `now` (seconds) and return the elapsed time.  The first
    /// call yields `0.0`.
    pub fn tick(&mut self, now: f64) -> f64 {
        self.dt = match self.last_update {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last_update = Some(now);
        self.dt
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

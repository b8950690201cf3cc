//! Player input → thruster arming.
//!
//! ## Pipeline (runs first in every `Update` frame)
//!
//! 1. [`keyboard_thrust_system`]: S/↓, A/←, D/→ arm on press, disarm on release.
//! 2. [`touch_thrust_system`]: each touch is hit-tested against the
//!    [`ControlLayout`]; the thruster it lands on stays armed until *that*
//!    touch lifts.
//! 3. [`mouse_thrust_system`]: the left mouse button behaves like one more
//!    pointer, so the touch layout is usable on desktop.
//!
//! Input systems only flip arming flags on [`LanderSim`].  Whether an armed
//! thruster actually fires is decided by the simulation step (fuel gating).

use super::thrust::Thruster;
use crate::simulation::LanderSim;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::HashMap;

/// Pointer id used for the left mouse button.
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

// ── Layout / hit testing ──────────────────────────────────────────────────────

/// A named on-screen throttle button.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrottleRegion {
    pub name: &'static str,
    pub thruster: Thruster,
    /// Normalised viewport rectangle: `(0,0)` top-left, `(1,1)` bottom-right.
    pub rect: Rect,
}

/// The set of throttle buttons, in normalised viewport coordinates.
///
/// Regions are tested in order; the first one containing the point wins.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ControlLayout {
    pub regions: Vec<ThrottleRegion>,
}

impl Default for ControlLayout {
    fn default() -> Self {
        Self {
            regions: vec![
                ThrottleRegion {
                    name: "throttle",
                    thruster: Thruster::Main,
                    rect: Rect::new(0.40, 0.80, 0.60, 1.00),
                },
                ThrottleRegion {
                    name: "leftThrust",
                    thruster: Thruster::Left,
                    rect: Rect::new(0.00, 0.80, 0.20, 1.00),
                },
                ThrottleRegion {
                    name: "rightThrust",
                    thruster: Thruster::Right,
                    rect: Rect::new(0.80, 0.80, 1.00, 1.00),
                },
            ],
        }
    }
}

impl ControlLayout {
    /// Thruster under a normalised viewport point, if any.
    pub fn hit_test(&self, point: Vec2) -> Option<Thruster> {
        self.regions
            .iter()
            .find(|region| region.rect.contains(point))
            .map(|region| region.thruster)
    }

    /// Hit-test a point in window pixels against a window of `window_size`.
    pub fn hit_test_window(&self, point: Vec2, window_size: Vec2) -> Option<Thruster> {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return None;
        }
        self.hit_test(point / window_size)
    }
}

// ── Pointer tracking ──────────────────────────────────────────────────────────

/// Remembers which pointer armed which thruster, so lifting one finger only
/// releases the thruster that finger pressed.
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    active: HashMap<u64, Thruster>,
}

impl PointerTracker {
    /// Register a press.  Returns the thruster it landed on, if any.
    pub fn press_start(&mut self, pointer: u64, target: Option<Thruster>) -> Option<Thruster> {
        let thruster = target?;
        self.active.insert(pointer, thruster);
        Some(thruster)
    }

    /// Register a release.  Returns the thruster this pointer had armed.
    pub fn press_end(&mut self, pointer: u64) -> Option<Thruster> {
        self.active.remove(&pointer)
    }

    pub fn held(&self, pointer: u64) -> Option<Thruster> {
        self.active.get(&pointer).copied()
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

const KEY_BINDINGS: [(Thruster, [KeyCode; 2]); 3] = [
    (Thruster::Main, [KeyCode::KeyS, KeyCode::ArrowDown]),
    (Thruster::Left, [KeyCode::KeyA, KeyCode::ArrowLeft]),
    (Thruster::Right, [KeyCode::KeyD, KeyCode::ArrowRight]),
];

/// Keyboard fallback for the on-screen throttles.
pub fn keyboard_thrust_system(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<LanderSim>) {
    for (thruster, bound) in KEY_BINDINGS {
        if keys.any_just_pressed(bound) {
            sim.set_armed(thruster, true);
        }
        if keys.any_just_released(bound) {
            sim.set_armed(thruster, false);
        }
    }
}

/// Touch presses and releases against the throttle layout.
pub fn touch_thrust_system(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<ControlLayout>,
    mut tracker: ResMut<PointerTracker>,
    mut sim: ResMut<LanderSim>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.size();

    for touch in touches.iter_just_pressed() {
        let target = layout.hit_test_window(touch.position(), size);
        if let Some(thruster) = tracker.press_start(touch.id(), target) {
            sim.set_armed(thruster, true);
        }
    }
    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        if let Some(thruster) = tracker.press_end(touch.id()) {
            sim.set_armed(thruster, false);
        }
    }
}

/// Left mouse button as a single extra pointer.
pub fn mouse_thrust_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<ControlLayout>,
    mut tracker: ResMut<PointerTracker>,
    mut sim: ResMut<LanderSim>,
) {
    if buttons.just_pressed(MouseButton::Left) {
        let Ok(window) = windows.single() else {
            return;
        };
        let target = window
            .cursor_position()
            .and_then(|cursor| layout.hit_test_window(cursor, window.size()));
        if let Some(thruster) = tracker.press_start(MOUSE_POINTER_ID, target) {
            sim.set_armed(thruster, true);
        }
    }
    if buttons.just_released(MouseButton::Left) {
        if let Some(thruster) = tracker.press_end(MOUSE_POINTER_ID) {
            sim.set_armed(thruster, false);
        }
    }
}

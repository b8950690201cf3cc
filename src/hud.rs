//! HUD readout and signal publishing.
//!
//! The simulation does not draw anything.  Each frame it leaves a
//! [`HudReadout`] (bar widths and star count) and a batch of
//! [`LanderSignal`]s; [`publish_lander_state_system`] copies the readout into
//! a resource and forwards the signals as Bevy messages for whatever UI layer
//! is listening.

use crate::simulation::{LanderSignal, LanderSim};
use bevy::prelude::*;

/// Values the HUD layer renders.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HudReadout {
    /// `fuel × 3`.
    pub fuel_bar_width: f64,
    /// `max(health × 3, 0)`.
    pub health_bar_width: f64,
    pub stars: u32,
}

/// Copy the simulation's HUD readout and forward its signals.
pub fn publish_lander_state_system(
    mut sim: ResMut<LanderSim>,
    mut hud: ResMut<HudReadout>,
    mut signals: MessageWriter<LanderSignal>,
) {
    let readout = sim.hud();
    if *hud != readout {
        *hud = readout;
    }
    for signal in sim.drain_signals() {
        signals.write(signal);
    }
}

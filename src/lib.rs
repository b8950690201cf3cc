//! Orbital Lander simulation library.
//!
//! A thruster-driven lander must be flown onto a pad without running out of
//! fuel or smashing into the walls, picking up stars along the way.  The
//! per-frame rules (thrust, fuel, damage, self-righting, pickups) live in a
//! plain-data core driven by [`simulation::LanderSim`]; Bevy and Rapier only
//! supply input, physics bodies and contact events.

pub mod config;
pub mod constants;
pub mod contact;
pub mod damage;
pub mod error;
pub mod hud;
pub mod lander;
pub mod pickup;
pub mod session;
pub mod simulation;
pub mod world;

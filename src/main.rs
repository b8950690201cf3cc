use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use orbital_lander::config::{self, LanderConfig};
use orbital_lander::{simulation, world};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbital Lander".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_lander_config overwrites them from
        // assets/lander.toml (if present) before anything else starts.
        .insert_resource(LanderConfig::default())
        // World units are physics units.  See constants::GRAVITY_Y.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(RapierDebugRenderPlugin::default())
        .add_plugins(simulation::SimulationPlugin)
        .add_systems(
            Startup,
            (
                config::load_lander_config,
                world::setup_camera,
                world::configure_gravity.after(config::load_lander_config),
                world::setup_world.after(config::load_lander_config),
            ),
        )
        .run();
}

//! Arena construction: camera, gravity, walls, pad, crates, stars and ship.
//!
//! Everything is spawned from [`LanderConfig`] in one startup system,
//! [`setup_world`], which also builds the [`LanderSim`] resource so every
//! game object can be registered in the arena as its entity is created.

use crate::config::LanderConfig;
use crate::contact::{ContactCategory, ContactTag};
use crate::constants::{CRATE_HALF_SIZE, PAD_HALF_HEIGHT, PAD_HALF_WIDTH};
use crate::lander::spawn_ship;
use crate::pickup::{Crate, GameObject, ObjectHandle, Star};
use crate::simulation::LanderSim;
use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::*;

/// Spawn the 2D camera.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Point Rapier gravity at the configured value.
pub fn configure_gravity(
    mut rapier: Query<&mut RapierConfiguration>,
    config: Res<LanderConfig>,
) {
    for mut cfg in rapier.iter_mut() {
        cfg.gravity = Vec2::new(0.0, config.gravity_y);
    }
}

/// Startup system: spawn the arena and insert a fresh [`LanderSim`].
pub fn setup_world(mut commands: Commands, config: Res<LanderConfig>) {
    let mut sim = LanderSim::new(&config);

    spawn_walls(&mut commands, &config);
    spawn_pad(&mut commands, Vec2::from(config.pad_position));

    for &position in &config.crate_positions {
        let id = sim.spawn_object(GameObject::Crate(Crate));
        spawn_crate(&mut commands, Vec2::from(position), ObjectHandle(id));
    }
    for &position in &config.star_positions {
        let id = sim.spawn_object(GameObject::Star(Star::default()));
        spawn_star(
            &mut commands,
            Vec2::from(position),
            config.star_radius,
            ObjectHandle(id),
        );
    }

    spawn_ship(&mut commands, &config);

    info!(
        "Arena ready: {} stars, {} crates",
        config.star_positions.len(),
        config.crate_positions.len()
    );
    commands.insert_resource(sim);
}

/// Four static walls enclosing the arena.
fn spawn_walls(commands: &mut Commands, config: &LanderConfig) {
    let half_w = config.arena_width / 2.0;
    let half_h = config.arena_height / 2.0;
    let t = config.wall_thickness;

    let walls = [
        // floor, ceiling
        (Vec2::new(0.0, -half_h - t / 2.0), Vec2::new(half_w + t, t / 2.0)),
        (Vec2::new(0.0, half_h + t / 2.0), Vec2::new(half_w + t, t / 2.0)),
        // left, right
        (Vec2::new(-half_w - t / 2.0, 0.0), Vec2::new(t / 2.0, half_h + t)),
        (Vec2::new(half_w + t / 2.0, 0.0), Vec2::new(t / 2.0, half_h + t)),
    ];

    for (center, half_extents) in walls {
        commands.spawn((
            ContactTag(ContactCategory::Wall),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
            ContactCategory::Wall.collision_groups(Group::ALL),
            Transform::from_translation(center.extend(0.0)),
        ));
    }
}

fn spawn_pad(commands: &mut Commands, position: Vec2) {
    commands.spawn((
        ContactTag(ContactCategory::Pad),
        RigidBody::Fixed,
        Collider::cuboid(PAD_HALF_WIDTH, PAD_HALF_HEIGHT),
        ContactCategory::Pad.collision_groups(Group::ALL),
        Transform::from_translation(position.extend(0.0)),
    ));
}

fn spawn_crate(commands: &mut Commands, position: Vec2, handle: ObjectHandle) {
    commands.spawn((
        ContactTag(ContactCategory::Box),
        handle,
        RigidBody::Dynamic,
        Collider::cuboid(CRATE_HALF_SIZE, CRATE_HALF_SIZE),
        ColliderMassProperties::Mass(4.0),
        ContactCategory::Box.collision_groups(Group::ALL),
        Transform::from_translation(position.extend(0.0)),
    ));
}

/// Stars are sensors: they report contacts with the ship but never push it.
fn spawn_star(commands: &mut Commands, position: Vec2, radius: f32, handle: ObjectHandle) {
    commands.spawn((
        ContactTag(ContactCategory::Star),
        handle,
        RigidBody::Fixed,
        Collider::ball(radius),
        Sensor,
        ContactCategory::Star.collision_groups(ContactCategory::Ship.group()),
        Transform::from_translation(position.extend(0.0)),
    ));
}

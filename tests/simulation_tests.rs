//! Headless scenario tests for [`LanderSim`].
//!
//! These drive the simulation core directly with a [`PlainBody`]: no Bevy
//! `App`, no Rapier.  Each test walks one gameplay rule end to end:
//!
//! 1. An empty tank never produces thrust and leaves every thruster disarmed.
//! 2. A full tank lasts exactly 2500 frames of main thrust.
//! 3. A star is counted once however many contacts it receives.
//! 4. A hard wall hit at unit health is fatal and explodes exactly once.
//! 5. Pad contacts land only below the speed threshold.
//! 6. The self-righting torque is constant outside the deadband.
//! 7. The speed history stays bounded and deltaV reads before eviction.

use bevy::math::Vec2;
use orbital_lander::config::LanderConfig;
use orbital_lander::contact::{ContactCategory, Participant};
use orbital_lander::damage::calculate_damage;
use orbital_lander::lander::{PlainBody, ShipState, Thruster};
use orbital_lander::pickup::{Crate, GameObject, Star};
use orbital_lander::simulation::{LanderSignal, LanderSim};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ship() -> Participant {
    Participant::new(ContactCategory::Ship)
}

fn wall() -> Participant {
    Participant::new(ContactCategory::Wall)
}

fn pad() -> Participant {
    Participant::new(ContactCategory::Pad)
}

/// Run one frame and return the force the body received.
fn frame(sim: &mut LanderSim, body: &mut PlainBody, now: f64) -> Vec2 {
    body.clear_forces();
    sim.step(now, body);
    body.force
}

fn count(signals: &[LanderSignal], wanted: LanderSignal) -> usize {
    signals.iter().filter(|s| **s == wanted).count()
}

// ── Fuel ──────────────────────────────────────────────────────────────────────

#[test]
fn empty_tank_never_thrusts() {
    let mut sim = LanderSim::with_ship(ShipState::new(0.0, 1.0));
    let mut body = PlainBody::at_rest();

    for i in 0..10 {
        for thruster in Thruster::ALL {
            sim.set_armed(thruster, true);
        }
        let force = frame(&mut sim, &mut body, i as f64 / 60.0);
        assert_eq!(force, Vec2::ZERO, "frame {i} applied thrust on an empty tank");
        for thruster in Thruster::ALL {
            assert!(
                !sim.thrust().is_armed(thruster),
                "{thruster:?} still armed at end of frame {i}"
            );
        }
    }
    assert_eq!(sim.ship().fuel(), 0.0);
}

#[test]
fn full_tank_lasts_exactly_2500_main_thrust_frames() {
    let mut sim = LanderSim::with_ship(ShipState::new(100.0, 1.0));
    let mut body = PlainBody::at_rest();
    sim.set_armed(Thruster::Main, true);

    for i in 1..2500 {
        let force = frame(&mut sim, &mut body, i as f64 / 60.0);
        assert!(force.y > 0.0, "frame {i} lost thrust early");
    }
    assert!(sim.ship().fuel() > 0.0);
    assert!(sim.thrust().is_armed(Thruster::Main));

    let force = frame(&mut sim, &mut body, 2500.0 / 60.0);
    assert!(force.y > 0.0, "frame 2500 should still fire");
    assert_eq!(sim.ship().fuel(), 0.0);
    assert!(!sim.thrust().any_armed());

    // Nothing more comes out of an empty tank.
    for i in 2501..2510 {
        assert_eq!(frame(&mut sim, &mut body, i as f64 / 60.0), Vec2::ZERO);
    }

    let signals = sim.drain_signals();
    assert_eq!(count(&signals, LanderSignal::ThrustersCut), 1);
}

#[test]
fn rearming_after_depletion_is_cut_again_without_force() {
    let mut sim = LanderSim::with_ship(ShipState::new(0.02, 1.0));
    let mut body = PlainBody::at_rest();
    sim.set_armed(Thruster::Left, true);
    frame(&mut sim, &mut body, 0.0);
    assert!(!sim.thrust().any_armed());

    sim.set_armed(Thruster::Left, true);
    assert_eq!(frame(&mut sim, &mut body, 0.1), Vec2::ZERO);
    assert!(!sim.thrust().any_armed());
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn star_is_counted_once_across_repeated_contacts() {
    let mut sim = LanderSim::default();
    let id = sim.spawn_object(GameObject::Star(Star::default()));
    let star = Participant::with_object(ContactCategory::Star, id);

    let first = sim.begin_contact(ship(), star, Some(Vec2::new(3.0, -2.0)));
    assert!(first.refresh_hud);
    assert_eq!(first.removed, Some(id));

    for _ in 0..5 {
        let again = sim.begin_contact(star, ship(), Some(Vec2::ZERO));
        assert!(!again.refresh_hud);
        assert_eq!(again.removed, None);
    }

    assert_eq!(sim.session().stars_collected(), 1);
    assert_eq!(sim.hud().stars, 1);
    assert!(!sim.objects().is_alive(id));

    let signals = sim.drain_signals();
    assert_eq!(count(&signals, LanderSignal::StarCollected { total: 1 }), 1);
    assert_eq!(signals.len(), 1);
}

#[test]
fn each_star_counts_independently() {
    let mut sim = LanderSim::default();
    let a = sim.spawn_object(GameObject::Star(Star::default()));
    let b = sim.spawn_object(GameObject::Star(Star::default()));

    sim.begin_contact(ship(), Participant::with_object(ContactCategory::Star, a), None);
    sim.begin_contact(ship(), Participant::with_object(ContactCategory::Star, a), None);
    sim.begin_contact(ship(), Participant::with_object(ContactCategory::Star, b), None);

    assert_eq!(sim.session().stars_collected(), 2);
    assert!(sim.objects().is_empty());
}

#[test]
fn crate_contact_keeps_the_crate() {
    let mut sim = LanderSim::default();
    let id = sim.spawn_object(GameObject::Crate(Crate));
    let report = sim.begin_contact(
        ship(),
        Participant::with_object(ContactCategory::Box, id),
        Some(Vec2::new(80.0, 0.0)),
    );
    assert!(!report.refresh_hud);
    assert_eq!(report.removed, None);
    assert_eq!(report.damage, 0.0);
    assert!(sim.objects().is_alive(id));
}

#[test]
fn contact_end_leaves_touching_flag_clear() {
    let mut sim = LanderSim::default();
    sim.end_contact();
    sim.end_contact();
    assert!(!sim.touching_pickup());
}

// ── Damage and death ──────────────────────────────────────────────────────────

#[test]
fn hard_wall_hit_at_unit_health_explodes_once() {
    let mut sim = LanderSim::with_ship(ShipState::new(100.0, 1.0));
    let mut body = PlainBody {
        velocity: Some(Vec2::new(60.0, 0.0)),
        ..Default::default()
    };

    // One frame at 60 u/s establishes shipSpeed = 60, deltaV = 60.
    frame(&mut sim, &mut body, 0.0);
    assert_eq!(sim.speeds().ship_speed(), 60.0);
    assert_eq!(sim.speeds().delta_v(), 60.0);

    let report = sim.begin_contact(ship(), wall(), body.velocity);
    assert!((report.damage - 6.0).abs() < 1e-9, "damage {}", report.damage);
    assert!((sim.ship().health() - -5.0).abs() < 1e-9);
    assert!(!sim.ship().died(), "death is detected by the next step");

    for i in 1..10 {
        frame(&mut sim, &mut body, i as f64 / 60.0);
    }
    assert!(sim.ship().died());
    assert!(sim.ship().exploded());
    assert_eq!(sim.hud().health_bar_width, 0.0);

    let signals = sim.drain_signals();
    assert_eq!(count(&signals, LanderSignal::Exploded), 1);
}

/// Health starts at 1.0 while the damage table was tuned for a 0–100 scale.
/// The same impact that destroys the default ship only scratches a ship
/// configured with 100 health.
#[test]
fn damage_table_is_not_rescaled_with_starting_health() {
    let config = LanderConfig {
        starting_health: 100.0,
        ..Default::default()
    };
    let mut sim = LanderSim::new(&config);
    let mut body = PlainBody {
        velocity: Some(Vec2::new(60.0, 0.0)),
        ..Default::default()
    };
    frame(&mut sim, &mut body, 0.0);
    sim.begin_contact(wall(), ship(), body.velocity);
    frame(&mut sim, &mut body, 1.0 / 60.0);

    assert!((sim.ship().health() - 94.0).abs() < 1e-9);
    assert!(!sim.ship().died());
}

#[test]
fn gentle_wall_touch_is_free() {
    let mut sim = LanderSim::default();
    let mut body = PlainBody {
        velocity: Some(Vec2::new(20.0, -10.0)),
        ..Default::default()
    };
    frame(&mut sim, &mut body, 0.0);
    let report = sim.begin_contact(ship(), wall(), body.velocity);
    assert_eq!(report.damage, 0.0);
    assert_eq!(sim.ship().health(), 1.0);
}

#[test]
fn damage_ignores_negative_delta_v() {
    let v = Vec2::new(0.0, -80.0);
    assert_eq!(calculate_damage(10.0, v, -40.0), calculate_damage(10.0, v, 0.0));
}

#[test]
fn contacts_without_the_ship_are_ignored() {
    let mut sim = LanderSim::default();
    let report = sim.begin_contact(wall(), pad(), Some(Vec2::new(900.0, 900.0)));
    assert_eq!(report.damage, 0.0);
    assert!(!report.landed);
    assert_eq!(sim.ship().health(), 1.0);
    assert!(sim.drain_signals().is_empty());
}

// ── Landing ───────────────────────────────────────────────────────────────────

#[test]
fn slow_pad_contact_lands() {
    let mut sim = LanderSim::default();
    let report = sim.begin_contact(ship(), pad(), Some(Vec2::new(0.5, 0.5)));
    assert!(report.landed);
    assert_eq!(sim.session().landings(), 1);
    assert_eq!(sim.drain_signals(), vec![LanderSignal::Landed]);
}

#[test]
fn sideways_drift_on_pad_does_not_land() {
    let mut sim = LanderSim::default();
    let report = sim.begin_contact(pad(), ship(), Some(Vec2::new(5.0, 0.5)));
    assert!(!report.landed);
    assert_eq!(sim.session().landings(), 0);
    assert!(sim.drain_signals().is_empty());
}

#[test]
fn pad_contact_does_not_damage() {
    let mut sim = LanderSim::default();
    let mut body = PlainBody {
        velocity: Some(Vec2::new(0.0, -200.0)),
        ..Default::default()
    };
    frame(&mut sim, &mut body, 0.0);
    let report = sim.begin_contact(ship(), pad(), body.velocity);
    assert_eq!(report.damage, 0.0);
    assert_eq!(sim.ship().health(), 1.0);
}

// ── Stabilization ─────────────────────────────────────────────────────────────

#[test]
fn righting_torque_has_constant_magnitude() {
    let mut sim = LanderSim::default();
    for (angle, expected) in [
        (0.0_f32, 0.0_f32),
        (0.04, 0.0),
        (-0.04, 0.0),
        (0.06, -0.5),
        (0.9, -0.5),
        (-0.06, 0.5),
        (-2.5, 0.5),
    ] {
        let mut body = PlainBody {
            angle,
            ..PlainBody::at_rest()
        };
        sim.step(0.0, &mut body);
        assert_eq!(body.torque, expected, "angle {angle}");
    }
}

// ── Speed history ─────────────────────────────────────────────────────────────

#[test]
fn speed_history_is_bounded_and_reads_before_evicting() {
    let mut sim = LanderSim::default();
    let mut body = PlainBody::at_rest();
    let mut evicted = 0.0_f32;

    for i in 1..=60 {
        let speed = i as f32;
        body.velocity = Some(Vec2::new(0.0, speed));
        let oldest_before = sim.speeds().oldest();
        let full_before = sim.speeds().len() == sim.speeds().capacity();

        let report = sim.step(i as f64 / 60.0, &mut body);

        assert!(sim.speeds().len() <= 26);
        // deltaV is measured against the sample evicted on the previous frame.
        assert_eq!(report.delta_v, speed - evicted, "frame {i}");
        if full_before {
            evicted = oldest_before.unwrap();
        }
    }
    assert_eq!(sim.speeds().len(), 26);
}

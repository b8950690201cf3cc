//! Per-frame lander simulation and its Bevy plugin.
//!
//! [`LanderSim`] owns every piece of mutable game state: ship fuel/health,
//! thruster flags, speed history, the object arena and the session counters.
//! Nothing else mutates them.  Two entry points drive it:
//!
//! - [`LanderSim::begin_contact`] / [`LanderSim::end_contact`] (see
//!   [`crate::contact`]) for physics contact events.
//! - [`LanderSim::step`] once per rendered frame.
//!
//! ## Frame order
//!
//! ```text
//! Update:  input ─▶ contacts ─▶ step ─▶ publish
//! PostUpdate (Rapier): physics step, emits next frame's CollisionEvents
//! ```
//!
//! Contacts reported by the previous physics step are always resolved before
//! the step of the frame that consumes them, so wall damage is seen by the
//! death check of that same step.

use crate::config::LanderConfig;
use crate::contact::{ContactResolver, ContactTag, Participant};
use crate::constants::{BAR_WIDTH_SCALE, STABILIZE_DEADBAND, STABILIZE_TORQUE};
use crate::hud::{publish_lander_state_system, HudReadout};
use crate::lander::control::{keyboard_thrust_system, mouse_thrust_system, touch_thrust_system};
use crate::lander::{
    fire_thrusters, speed_of, ControlLayout, FrameClock, PointerTracker, RapierShipBody, Ship,
    ShipBody, ShipState, SpeedHistory, ThrustState, Thruster, ThrusterTuning,
};
use crate::pickup::{GameObject, ObjectArena, ObjectHandle, ObjectId};
use crate::session::GameSession;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Signals ───────────────────────────────────────────────────────────────────

/// One-off events for the presentation layer.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum LanderSignal {
    /// Ship touched the pad slowly enough.
    Landed,
    /// Health ran out.  Emitted once per run.
    Exploded,
    /// The tank emptied while thrusters were armed; all were switched off.
    ThrustersCut,
    StarCollected { total: u32 },
}

// ── Stabilization ─────────────────────────────────────────────────────────────

/// Constant-magnitude self-righting torque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stabilizer {
    pub deadband: f32,
    pub torque: f32,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self {
            deadband: STABILIZE_DEADBAND,
            torque: STABILIZE_TORQUE,
        }
    }
}

impl Stabilizer {
    /// `-torque` when tilted positive beyond the deadband, `+torque` when
    /// tilted negative, `0` inside it.  No proportional term.
    pub fn corrective_torque(&self, angle: f32) -> f32 {
        if angle.abs() <= self.deadband {
            0.0
        } else if angle > 0.0 {
            -self.torque
        } else {
            self.torque
        }
    }
}

// ── LanderSim ─────────────────────────────────────────────────────────────────

/// What one call to [`LanderSim::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub dt: f64,
    pub thrust_force: Vec2,
    pub torque: f32,
    pub speed: f32,
    pub delta_v: f32,
    pub cut_off: bool,
    pub exploded: bool,
}

/// The whole simulation state of one run.
#[derive(Resource, Debug, Clone)]
pub struct LanderSim {
    pub(crate) ship: ShipState,
    pub(crate) thrust: ThrustState,
    pub(crate) tuning: ThrusterTuning,
    pub(crate) speeds: SpeedHistory,
    pub(crate) clock: FrameClock,
    pub(crate) stabilizer: Stabilizer,
    pub(crate) resolver: ContactResolver,
    pub(crate) objects: ObjectArena,
    pub(crate) session: GameSession,
    pub(crate) hud: HudReadout,
    pub(crate) bar_width_scale: f64,
    pub(crate) touching_pickup: bool,
    pub(crate) signals: Vec<LanderSignal>,
}

impl Default for LanderSim {
    fn default() -> Self {
        let mut sim = Self {
            ship: ShipState::default(),
            thrust: ThrustState::default(),
            tuning: ThrusterTuning::default(),
            speeds: SpeedHistory::default(),
            clock: FrameClock::default(),
            stabilizer: Stabilizer::default(),
            resolver: ContactResolver::default(),
            objects: ObjectArena::default(),
            session: GameSession::default(),
            hud: HudReadout::default(),
            bar_width_scale: BAR_WIDTH_SCALE,
            touching_pickup: false,
            signals: Vec::new(),
        };
        sim.refresh_hud();
        sim
    }
}

impl LanderSim {
    pub fn new(config: &LanderConfig) -> Self {
        let mut sim = Self {
            ship: ShipState::from_config(config),
            tuning: ThrusterTuning::from_config(config),
            speeds: SpeedHistory::with_capacity(config.speed_history_capacity),
            stabilizer: Stabilizer {
                deadband: config.stabilize_deadband,
                torque: config.stabilize_torque,
            },
            resolver: ContactResolver::from_config(config),
            bar_width_scale: config.bar_width_scale,
            ..Default::default()
        };
        sim.refresh_hud();
        sim
    }

    /// Start from an explicit ship state (default tuning otherwise).
    pub fn with_ship(ship: ShipState) -> Self {
        let mut sim = Self {
            ship,
            ..Default::default()
        };
        sim.refresh_hud();
        sim
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn thrust(&self) -> &ThrustState {
        &self.thrust
    }

    pub fn speeds(&self) -> &SpeedHistory {
        &self.speeds
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn objects(&self) -> &ObjectArena {
        &self.objects
    }

    pub fn hud(&self) -> HudReadout {
        self.hud
    }

    pub fn touching_pickup(&self) -> bool {
        self.touching_pickup
    }

    pub fn dt(&self) -> f64 {
        self.clock.dt()
    }

    // ── Mutation ─────────────────────────────────────────────────────────────

    pub fn set_armed(&mut self, thruster: Thruster, armed: bool) {
        self.thrust.set_armed(thruster, armed);
    }

    pub fn spawn_object(&mut self, object: GameObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Hand over the signals emitted since the last drain.
    pub fn drain_signals(&mut self) -> Vec<LanderSignal> {
        std::mem::take(&mut self.signals)
    }

    pub(crate) fn refresh_hud(&mut self) {
        self.hud = HudReadout {
            fuel_bar_width: self.ship.fuel_bar_width(self.bar_width_scale),
            health_bar_width: self.ship.health_bar_width(self.bar_width_scale),
            stars: self.session.stars_collected(),
        };
    }

    /// Advance one frame at absolute time `now` (seconds).
    ///
    /// 1. `dt` from the previous call (first call: 0).
    /// 2. Fire armed thrusters, cut them all if the tank is empty.
    /// 3. Death check; the explosion edge fires once.
    /// 4. Self-righting torque outside the deadband.
    /// 5. HUD bar widths.
    /// 6. Record speed and derive deltaV.
    pub fn step<B: ShipBody + ?Sized>(&mut self, now: f64, body: &mut B) -> StepReport {
        let dt = self.clock.tick(now);

        let thrust = fire_thrusters(&mut self.thrust, &self.tuning, &mut self.ship, body);
        if thrust.cut_off {
            info!("Out of fuel: thrusters cut");
            self.signals.push(LanderSignal::ThrustersCut);
        }

        let exploded = self.ship.update_death();
        if exploded {
            warn!("Ship destroyed (health {:.3}) BOOM", self.ship.health());
            self.signals.push(LanderSignal::Exploded);
        }

        let torque = self.stabilizer.corrective_torque(body.angle());
        if torque != 0.0 {
            body.apply_torque(torque);
        }

        self.refresh_hud();

        let speed = speed_of(body.velocity());
        let delta_v = self.speeds.record(speed);

        StepReport {
            dt,
            thrust_force: thrust.force,
            torque,
            speed,
            delta_v,
            cut_off: thrust.cut_off,
            exploded,
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LanderSignal>()
            .init_resource::<HudReadout>()
            .init_resource::<ControlLayout>()
            .init_resource::<PointerTracker>()
            .add_systems(
                Update,
                (
                    (
                        keyboard_thrust_system,
                        touch_thrust_system,
                        mouse_thrust_system,
                    ),
                    contact_event_system,
                    lander_step_system,
                    publish_lander_state_system,
                )
                    .chain()
                    .run_if(resource_exists::<LanderSim>),
            );
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

fn participant(
    entity: Entity,
    q_tags: &Query<(&ContactTag, Option<&ObjectHandle>)>,
) -> Participant {
    match q_tags.get(entity) {
        Ok((tag, Some(handle))) => Participant::with_object(tag.0, handle.0),
        Ok((tag, None)) => Participant::new(tag.0),
        Err(_) => Participant::default(),
    }
}

/// Feed Rapier contact events into [`LanderSim`].
///
/// `Started` → [`LanderSim::begin_contact`]; an object the resolver frees is
/// despawned.  `Stopped` → [`LanderSim::end_contact`].
pub fn contact_event_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_tags: Query<(&ContactTag, Option<&ObjectHandle>)>,
    q_ship: Query<&Velocity, With<Ship>>,
    mut sim: ResMut<LanderSim>,
) {
    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => {
                sim.end_contact();
                continue;
            }
        };

        let velocity = q_ship.single().ok().map(|v| v.linvel);
        let a = participant(e1, &q_tags);
        let b = participant(e2, &q_tags);
        let report = sim.begin_contact(a, b, velocity);

        if let Some(removed) = report.removed {
            for (entity, side) in [(e1, a), (e2, b)] {
                if side.object == Some(removed) {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

/// Run one [`LanderSim::step`] against the ship's Rapier body.
///
/// `ExternalForce` is zeroed first: Rapier keeps applying it until changed,
/// whereas thrust and righting torque only last one frame.
pub fn lander_step_system(
    time: Res<Time>,
    mut q_ship: Query<(&Transform, Option<&Velocity>, &mut ExternalForce), With<Ship>>,
    mut sim: ResMut<LanderSim>,
) {
    let Ok((transform, velocity, mut external)) = q_ship.single_mut() else {
        return;
    };
    external.force = Vec2::ZERO;
    external.torque = 0.0;

    let mut body = RapierShipBody::new(transform, velocity, &mut *external);
    sim.step(time.elapsed_secs_f64(), &mut body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lander::PlainBody;

    #[test]
    fn corrective_torque_is_constant_outside_deadband() {
        let s = Stabilizer::default();
        assert_eq!(s.corrective_torque(0.0), 0.0);
        assert_eq!(s.corrective_torque(0.05), 0.0);
        assert_eq!(s.corrective_torque(-0.05), 0.0);
        assert_eq!(s.corrective_torque(0.051), -0.5);
        assert_eq!(s.corrective_torque(1.2), -0.5);
        assert_eq!(s.corrective_torque(-0.3), 0.5);
        assert_eq!(s.corrective_torque(-3.0), 0.5);
    }

    #[test]
    fn step_applies_righting_torque_to_body() {
        let mut sim = LanderSim::default();
        let mut body = PlainBody {
            angle: 0.4,
            ..PlainBody::at_rest()
        };
        let report = sim.step(0.0, &mut body);
        assert_eq!(report.torque, -0.5);
        assert_eq!(body.torque, -0.5);
    }

    #[test]
    fn step_reports_dt_from_previous_call() {
        let mut sim = LanderSim::default();
        let mut body = PlainBody::at_rest();
        assert_eq!(sim.step(3.0, &mut body).dt, 0.0);
        assert!((sim.step(3.5, &mut body).dt - 0.5).abs() < 1e-12);
    }

    #[test]
    fn hud_tracks_fuel_and_health() {
        let mut sim = LanderSim::with_ship(ShipState::new(100.0, 1.0));
        assert_eq!(sim.hud().fuel_bar_width, 300.0);
        assert_eq!(sim.hud().health_bar_width, 3.0);

        sim.set_armed(Thruster::Main, true);
        let mut body = PlainBody::at_rest();
        sim.step(0.0, &mut body);
        assert!((sim.hud().fuel_bar_width - 99.96 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn absent_velocity_reads_as_stationary() {
        let mut sim = LanderSim::default();
        let mut body = PlainBody::default();
        let report = sim.step(0.0, &mut body);
        assert_eq!(report.speed, 0.0);
        assert_eq!(report.delta_v, 0.0);
    }

    #[test]
    fn config_values_flow_into_the_simulation() {
        let config = LanderConfig {
            starting_health: 100.0,
            fuel_capacity: 50.0,
            speed_history_capacity: 4,
            ..Default::default()
        };
        let sim = LanderSim::new(&config);
        assert_eq!(sim.ship().health(), 100.0);
        assert_eq!(sim.ship().fuel(), 50.0);
        assert_eq!(sim.speeds().capacity(), 4);
        assert_eq!(sim.hud().fuel_bar_width, 150.0);
    }
}

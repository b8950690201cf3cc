//! Contact categories and the ship contact resolver.
//!
//! Every collider in the arena is tagged with one [`ContactCategory`].  The
//! tags double as Rapier collision-group bits, so the same values decide which
//! pairs the physics engine reports and how [`LanderSim::begin_contact`]
//! reacts to them:
//!
//! | Pair        | Reaction                                                   |
//! |-------------|------------------------------------------------------------|
//! | Ship ∩ Pad  | `Landed` when both signed velocity components are `< 1`    |
//! | Ship ∩ Wall | health −= damage(speed, velocity, deltaV)                  |
//! | Ship ∩ any  | the other participant's game object (if any) is notified   |
//!
//! Contacts not involving the ship are ignored.

use crate::config::LanderConfig;
use crate::constants::LANDING_SPEED_THRESHOLD;
use crate::damage::DamageModel;
use crate::pickup::ObjectId;
use crate::simulation::{LanderSignal, LanderSim};
use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::CollisionGroups;

/// Collision category of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ContactCategory {
    #[default]
    None = 0,
    Ship = 0b1,
    Wall = 0b10,
    Box = 0b100,
    Pad = 0b1000,
    Star = 0b10000,
}

impl ContactCategory {
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Rapier group with this category's bit.
    #[inline]
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self.bits())
    }

    /// Membership in this category, interacting with `filter`.
    pub fn collision_groups(self, filter: Group) -> CollisionGroups {
        CollisionGroups::new(self.group(), filter)
    }

    /// Everything the ship touches: walls, crates, the pad and stars.
    pub fn ship_filter() -> Group {
        ContactCategory::Wall.group()
            | ContactCategory::Box.group()
            | ContactCategory::Pad.group()
            | ContactCategory::Star.group()
    }
}

/// Category tag carried by every collider entity the resolver should know.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactTag(pub ContactCategory);

/// Combined bits of a contact pair.
#[inline]
pub fn pair_bits(a: ContactCategory, b: ContactCategory) -> u32 {
    a.bits() | b.bits()
}

/// One side of a reported contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Participant {
    pub category: ContactCategory,
    pub object: Option<ObjectId>,
}

impl Participant {
    pub fn new(category: ContactCategory) -> Self {
        Self {
            category,
            object: None,
        }
    }

    pub fn with_object(category: ContactCategory, object: ObjectId) -> Self {
        Self {
            category,
            object: Some(object),
        }
    }
}

/// Thresholds used when resolving ship contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResolver {
    pub landing_speed_threshold: f32,
    pub damage: DamageModel,
}

impl Default for ContactResolver {
    fn default() -> Self {
        Self {
            landing_speed_threshold: LANDING_SPEED_THRESHOLD,
            damage: DamageModel::default(),
        }
    }
}

impl ContactResolver {
    pub fn from_config(config: &LanderConfig) -> Self {
        Self {
            landing_speed_threshold: config.landing_speed_threshold,
            damage: DamageModel::from_config(config),
        }
    }

    /// Signed comparison: a ship falling onto the pad has negative `dy` and
    /// passes the vertical check at any descent rate.
    #[inline]
    pub fn is_landing(&self, velocity: Vec2) -> bool {
        velocity.x < self.landing_speed_threshold && velocity.y < self.landing_speed_threshold
    }
}

/// What resolving one contact did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactReport {
    pub landed: bool,
    pub damage: f64,
    /// The other participant's handler asked for a HUD refresh.
    pub refresh_hud: bool,
    /// Arena object freed by this contact; its entity should be despawned.
    pub removed: Option<ObjectId>,
}

impl LanderSim {
    /// Resolve a contact-begin event between `a` and `b`.
    ///
    /// `ship_velocity` is read live from the body; speed and deltaV come from
    /// the most recent simulation step.
    pub fn begin_contact(
        &mut self,
        a: Participant,
        b: Participant,
        ship_velocity: Option<Vec2>,
    ) -> ContactReport {
        let mut report = ContactReport::default();
        let ship = ContactCategory::Ship;
        if a.category != ship && b.category != ship {
            return report;
        }

        let velocity = ship_velocity.unwrap_or(Vec2::ZERO);
        let bits = pair_bits(a.category, b.category);

        if bits == pair_bits(ship, ContactCategory::Pad) && self.resolver.is_landing(velocity) {
            report.landed = true;
            let landings = self.session.record_landing();
            info!("Landed (landing #{landings})");
            self.signals.push(LanderSignal::Landed);
        }

        if bits == pair_bits(ship, ContactCategory::Wall) {
            let damage = self.resolver.damage.damage(
                self.speeds.ship_speed(),
                velocity,
                self.speeds.delta_v(),
            );
            self.ship.apply_damage(damage);
            report.damage = damage;
            if damage > 0.0 {
                debug!(
                    "Wall impact: deltaV {:.2}, damage {:.3}, health {:.3}",
                    self.speeds.delta_v(),
                    damage,
                    self.ship.health()
                );
            }
        }

        let other = if a.category != ship { a } else { b };
        if let Some(id) = other.object {
            let before = self.session.stars_collected();
            if let Some(outcome) =
                self.objects
                    .dispatch_ship_contact(id, &self.ship, &mut self.session)
            {
                report.refresh_hud = outcome.refresh_hud;
                if outcome.remove {
                    report.removed = Some(id);
                }
                let total = self.session.stars_collected();
                if total != before {
                    self.signals.push(LanderSignal::StarCollected { total });
                }
                if outcome.refresh_hud {
                    self.refresh_hud();
                }
            }
        }

        report
    }

    /// Resolve a contact-end event.  Only resets the touching-pickup flag.
    pub fn end_contact(&mut self) {
        self.touching_pickup = false;
    }
}

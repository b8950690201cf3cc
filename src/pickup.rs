//! Collidable game objects and their arena.
//!
//! Anything the ship can touch that has behaviour of its own (stars, crates)
//! lives in an [`ObjectArena`] rather than in the scene graph.  The ECS entity
//! carrying the collider holds an [`ObjectHandle`] back into the arena; when an
//! object asks to be removed the arena frees its slot and the glue despawns the
//! entity.  Stale handles simply stop resolving.
//!
//! ## Star lifecycle
//!
//! ```text
//! Active ──(first ship contact)──▶ Collected   (terminal)
//! ```
//!
//! The transition bumps the session's star counter and asks for removal.
//! A contact delivered to a collected star (or to a freed handle) is a no-op.

use crate::lander::ShipState;
use crate::session::GameSession;
use bevy::prelude::*;

/// Result of a ship touching a game object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactOutcome {
    /// The HUD should be refreshed.
    pub refresh_hud: bool,
    /// The object is finished and should leave the simulation.
    pub remove: bool,
}

/// Behaviour triggered when the ship touches an object.
pub trait Collidable {
    /// Default: inert, nothing to refresh, nothing to remove.
    fn on_ship_contact(&mut self, _ship: &ShipState, _session: &mut GameSession) -> ContactOutcome {
        ContactOutcome::default()
    }
}

// ── Variants ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StarState {
    #[default]
    Active,
    Collected,
}

/// One-shot collectible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Star {
    state: StarState,
}

impl Star {
    pub fn state(&self) -> StarState {
        self.state
    }

    pub fn is_collected(&self) -> bool {
        self.state == StarState::Collected
    }
}

impl Collidable for Star {
    fn on_ship_contact(&mut self, _ship: &ShipState, session: &mut GameSession) -> ContactOutcome {
        if self.state == StarState::Collected {
            return ContactOutcome::default();
        }
        self.state = StarState::Collected;
        let total = session.record_star();
        info!("Star collected ({total} total)");
        ContactOutcome {
            refresh_hud: true,
            remove: true,
        }
    }
}

/// Pushable obstacle.  Touching it does nothing beyond the physics response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crate;

impl Collidable for Crate {}

/// Every kind of object the arena can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameObject {
    Star(Star),
    Crate(Crate),
}

impl Collidable for GameObject {
    fn on_ship_contact(&mut self, ship: &ShipState, session: &mut GameSession) -> ContactOutcome {
        match self {
            GameObject::Star(star) => star.on_ship_contact(ship, session),
            GameObject::Crate(c) => c.on_ship_contact(ship, session),
        }
    }
}

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Generation-checked index into an [`ObjectArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

/// ECS-side link from a collider entity to its arena object.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHandle(pub ObjectId);

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    object: Option<GameObject>,
}

/// Slot storage for game objects.  Freed slots are reused with a bumped
/// generation so old ids never alias a new object.
#[derive(Debug, Clone, Default)]
pub struct ObjectArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ObjectArena {
    pub fn insert(&mut self, object: GameObject) -> ObjectId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return ObjectId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        ObjectId {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.object.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.object.as_mut())
    }

    #[inline]
    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Free the slot.  Returns the object, or `None` for a stale id.
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(object)
    }

    /// Number of live objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live objects with their ids, for whatever draws them.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object.as_ref().map(|object| {
                (
                    ObjectId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    object,
                )
            })
        })
    }

    /// Deliver a ship contact to `id` and free it if it asks to be removed.
    ///
    /// Returns `None` when `id` no longer resolves.
    pub fn dispatch_ship_contact(
        &mut self,
        id: ObjectId,
        ship: &ShipState,
        session: &mut GameSession,
    ) -> Option<ContactOutcome> {
        let outcome = self.get_mut(id)?.on_ship_contact(ship, session);
        if outcome.remove {
            self.remove(id);
        }
        Some(outcome)
    }
}

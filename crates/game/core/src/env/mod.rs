//! Oracles describing the world an activation runs in.
//!
//! The engine never owns map or randomness state. Callers hand it an
//! [`Env`] bundling a collision oracle, a random source and a message
//! catalog for the duration of one call.
mod collision;
mod messages;
mod rng;

pub use collision::{CollisionOracle, MapDimensions, MovementType, TileGrid, TileKind};
pub use messages::{MessageOracle, PassthroughMessages};
pub use rng::{PcgRng, RngOracle};

use crate::geometry::{FPoint, Point};

/// Aggregates the oracles an activation consults.
pub struct Env<'a> {
    collider: &'a mut (dyn CollisionOracle + 'a),
    rng: &'a mut (dyn RngOracle + 'a),
    messages: &'a (dyn MessageOracle + 'a),
}

impl<'a> Env<'a> {
    pub fn new(
        collider: &'a mut (dyn CollisionOracle + 'a),
        rng: &'a mut (dyn RngOracle + 'a),
        messages: &'a (dyn MessageOracle + 'a),
    ) -> Self {
        Self {
            collider,
            rng,
            messages,
        }
    }

    pub fn collider(&self) -> &(dyn CollisionOracle + 'a) {
        &*self.collider
    }

    pub fn collider_mut(&mut self) -> &mut (dyn CollisionOracle + 'a) {
        &mut *self.collider
    }

    pub fn rng(&mut self) -> &mut (dyn RngOracle + 'a) {
        &mut *self.rng
    }

    pub fn messages(&self) -> &(dyn MessageOracle + 'a) {
        self.messages
    }

    /// Picks a random neighbor tile of `center` within `radius`, drawing
    /// from this environment's random source.
    pub fn random_neighbor(
        &mut self,
        center: Point,
        radius: u32,
        ignore_blocked: bool,
    ) -> Option<FPoint> {
        self.collider
            .random_neighbor(center, radius, ignore_blocked, &mut *self.rng)
    }
}

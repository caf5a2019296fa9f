//! Ability activation pipeline.
//!
//! The [`PowerEngine`] is the entry point for everything that fires an
//! ability. Every activation flows through the same stages:
//! precheck → dispatch → executor → {hazard builder, effect applier} → cost
//!
//! The engine itself is immutable after load. Per-call state lives in the
//! caster (borrowed exclusively), the [`Env`] oracles and the
//! [`OutputQueues`] the caller drains once per tick.

mod buff;
mod context;
mod cost;
mod error;
mod executors;
mod formula;
mod hazard;
mod output;
mod passive;
mod pipeline;
mod validation;

pub use error::ActivationError;
pub use formula::EffectOrigin;
pub use output::OutputQueues;

use crate::artifact::{Hazard, SpawnRequest};
use crate::caster::CasterState;
use crate::catalog::{AbilityCatalog, AbilityId, EffectCatalog};
use crate::config::EngineConfig;
use crate::env::Env;
use crate::error::GameError;
use crate::geometry::{Direction, FPoint, Point};

use context::ActivationContext;

/// Ability execution engine over read-only catalogs.
#[derive(Clone, Debug, Default)]
pub struct PowerEngine {
    abilities: AbilityCatalog,
    effects: EffectCatalog,
    config: EngineConfig,
}

impl PowerEngine {
    pub fn new(abilities: AbilityCatalog, effects: EffectCatalog, config: EngineConfig) -> Self {
        Self {
            abilities,
            effects,
            config,
        }
    }

    pub fn abilities(&self) -> &AbilityCatalog {
        &self.abilities
    }

    pub fn effects(&self) -> &EffectCatalog {
        &self.effects
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Checks
    // ========================================================================

    /// True when `caster` could activate `id` right now. Pure.
    pub fn can_activate(&self, id: AbilityId, caster: &CasterState) -> bool {
        self.check(id, caster).is_ok()
    }

    /// Like [`can_activate`](Self::can_activate), with the reason on failure.
    pub fn check(&self, id: AbilityId, caster: &CasterState) -> Result<(), ActivationError> {
        let def = pipeline::resolve(self, id, caster)?;
        validation::precheck(def, caster)
    }

    /// False when `id` is a teleport aimed at a blocked or wall tile, or is
    /// not a valid id at all.
    pub fn has_valid_target(
        &self,
        id: AbilityId,
        caster: &CasterState,
        target: FPoint,
        env: &Env<'_>,
    ) -> bool {
        match pipeline::resolve(self, id, caster) {
            Ok(def) => validation::has_valid_target(def, caster, target, env.collider()),
            Err(_) => false,
        }
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Activates `id` for `caster` aimed at `target`.
    ///
    /// On error nothing was paid and no artifact was queued.
    pub fn try_activate(
        &self,
        id: AbilityId,
        caster: &mut CasterState,
        target: FPoint,
        env: &mut Env<'_>,
        out: &mut OutputQueues,
    ) -> Result<(), ActivationError> {
        let mut cx = ActivationContext::new(self, env, out);
        pipeline::activate(&mut cx, id, caster, target)
    }

    /// Activates `id`, reporting only whether it fired.
    pub fn activate(
        &self,
        id: AbilityId,
        caster: &mut CasterState,
        target: FPoint,
        env: &mut Env<'_>,
        out: &mut OutputQueues,
    ) -> bool {
        match self.try_activate(id, caster, target, env, out) {
            Ok(()) => {
                tracing::debug!(ability = %id, caster = caster.id.0, "power activated");
                true
            }
            Err(error) => {
                tracing::debug!(
                    ability = %id,
                    caster = caster.id.0,
                    code = error.error_code(),
                    %error,
                    "power rejected"
                );
                false
            }
        }
    }

    /// Runs one pass of the caster's passive abilities.
    pub fn activate_passives(
        &self,
        caster: &mut CasterState,
        env: &mut Env<'_>,
        out: &mut OutputQueues,
    ) {
        let mut cx = ActivationContext::new(self, env, out);
        passive::activate_passives(&mut cx, caster);
    }

    /// Fires a newly unlocked untriggered passive immediately.
    pub fn activate_single_passive(
        &self,
        caster: &mut CasterState,
        id: AbilityId,
        env: &mut Env<'_>,
        out: &mut OutputQueues,
    ) {
        let mut cx = ActivationContext::new(self, env, out);
        passive::activate_single_passive(&mut cx, caster, id);
    }

    // ========================================================================
    // Services for the hazard and map systems
    // ========================================================================

    /// Overlays ability `id` onto `hazard`, e.g. when a hazard is re-armed
    /// by a chained power.
    pub fn init_hazard(
        &self,
        id: AbilityId,
        caster: &CasterState,
        target: FPoint,
        env: &mut Env<'_>,
        hazard: &mut Hazard,
    ) -> Result<(), ActivationError> {
        let def = self.abilities.lookup(id)?;
        hazard::init_hazard(def, caster, target, env, hazard);
        Ok(())
    }

    /// Applies the post effects of `id` to `target`, e.g. when a hazard
    /// carrying the ability hits.
    pub fn apply_effects(
        &self,
        id: AbilityId,
        origin: &EffectOrigin,
        target: &mut CasterState,
        env: &mut Env<'_>,
        out: &mut OutputQueues,
    ) -> Result<(), ActivationError> {
        let def = self.abilities.lookup(id)?;
        buff::apply_effects(
            &self.effects,
            def,
            def.passive_trigger,
            origin,
            target,
            env,
            out,
        );
        Ok(())
    }

    /// Queues a creature for a map event. The creature faces a random
    /// direction.
    pub fn spawn_creature(
        &self,
        creature: &str,
        tile: Point,
        env: &mut Env<'_>,
        out: &mut OutputQueues,
    ) {
        let direction = Direction::new(env.rng().below(u32::from(Direction::COUNT)) as u8);
        out.spawns.push(SpawnRequest {
            creature: creature.to_string(),
            pos: tile,
            direction,
            summoner: None,
            summon_ability: None,
            hero_ally: false,
            level: None,
        });
    }
}

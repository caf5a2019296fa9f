//! Per-caster passive trigger latches.
//!
//! Each trigger owns a small state machine:
//!
//! ```text
//! Idle ──arm──▶ Armed ──fire──▶ Fired ──reset──▶ Idle
//!  └─────────────fire─────────────┘
//! ```
//!
//! Signal triggers (block, hit, death) are armed by the simulation and fire
//! while armed. Edge triggers (first opportunity, half health, join combat)
//! go straight from idle to fired when their condition holds and stay fired
//! until reset.

use crate::catalog::PassiveTrigger;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LatchState {
    #[default]
    Idle,
    Armed,
    Fired,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerLatches {
    first_opportunity: LatchState,
    block: LatchState,
    hit: LatchState,
    half_health: LatchState,
    join_combat: LatchState,
    death: LatchState,
}

impl TriggerLatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, trigger: PassiveTrigger) -> LatchState {
        match trigger {
            PassiveTrigger::OnFirstOpportunity => self.first_opportunity,
            PassiveTrigger::OnBlock => self.block,
            PassiveTrigger::OnHit => self.hit,
            PassiveTrigger::OnHalfHealth => self.half_health,
            PassiveTrigger::OnJoinCombat => self.join_combat,
            PassiveTrigger::OnDeath => self.death,
        }
    }

    pub fn is_armed(&self, trigger: PassiveTrigger) -> bool {
        self.state(trigger) == LatchState::Armed
    }

    pub fn is_idle(&self, trigger: PassiveTrigger) -> bool {
        self.state(trigger) == LatchState::Idle
    }

    /// Raises a signal (the caster was hit, died, started blocking).
    pub fn arm(&mut self, trigger: PassiveTrigger) {
        *self.slot_mut(trigger) = LatchState::Armed;
    }

    pub fn fire(&mut self, trigger: PassiveTrigger) {
        *self.slot_mut(trigger) = LatchState::Fired;
    }

    pub fn reset(&mut self, trigger: PassiveTrigger) {
        *self.slot_mut(trigger) = LatchState::Idle;
    }

    fn slot_mut(&mut self, trigger: PassiveTrigger) -> &mut LatchState {
        match trigger {
            PassiveTrigger::OnFirstOpportunity => &mut self.first_opportunity,
            PassiveTrigger::OnBlock => &mut self.block,
            PassiveTrigger::OnHit => &mut self.hit,
            PassiveTrigger::OnHalfHealth => &mut self.half_health,
            PassiveTrigger::OnJoinCombat => &mut self.join_combat,
            PassiveTrigger::OnDeath => &mut self.death,
        }
    }
}

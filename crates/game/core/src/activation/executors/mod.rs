//! Per-kind execution algorithms.
//!
//! Each executor runs after the precheck has passed. An executor that
//! rejects does so before touching the caster or the output queues, apart
//! from the user-facing message explaining the rejection.

pub(super) mod block;
pub(super) mod fixed;
pub(super) mod missile;
pub(super) mod repeater;
pub(super) mod spawn;
pub(super) mod transform;

use crate::catalog::AbilityDefinition;
use crate::env::Env;

use super::{OutputQueues, PowerEngine};

/// Everything one activation call works with besides its caster.
pub(crate) struct ActivationContext<'c, 'e> {
    pub engine: &'c PowerEngine,
    pub env: &'c mut Env<'e>,
    pub out: &'c mut OutputQueues,
    /// Nesting level of chained activations; 0 for a direct call.
    pub depth: u32,
}

impl<'c, 'e> ActivationContext<'c, 'e> {
    pub fn new(engine: &'c PowerEngine, env: &'c mut Env<'e>, out: &'c mut OutputQueues) -> Self {
        Self {
            engine,
            env,
            out,
            depth: 0,
        }
    }

    /// Context for an activation chained off the current one.
    pub fn nested(&mut self) -> ActivationContext<'_, 'e> {
        ActivationContext {
            engine: self.engine,
            env: &mut *self.env,
            out: &mut *self.out,
            depth: self.depth + 1,
        }
    }

    pub fn play_sound(&mut self, def: &AbilityDefinition) {
        if let Some(sound) = &def.visuals.sound {
            self.out.sounds.push(sound.clone());
        }
    }

    /// Localizes and queues a user-facing message.
    pub fn message(&mut self, key: &str) {
        let text = self.env.messages().get(key);
        tracing::info!(message = %text, "activation message");
        self.out.messages.push(text);
    }
}

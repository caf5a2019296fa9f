/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EngineConfig {
    /// Simulation frames per second. Durations and speeds authored in
    /// seconds are converted with this rate.
    pub frames_per_second: u32,

    /// Maximum nesting of chained activations (post powers triggered by
    /// the abilities they follow).
    pub max_chain_depth: u32,

    /// Health threshold for the half-health passive trigger, in percent of
    /// maximum health.
    pub half_health_percent: u32,

    /// Element ids, indexed by `trait_elemental`.
    pub elements: Vec<String>,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;
    pub const DEFAULT_MAX_CHAIN_DEPTH: u32 = 8;
    pub const DEFAULT_HALF_HEALTH_PERCENT: u32 = 50;

    pub fn new() -> Self {
        Self {
            frames_per_second: Self::DEFAULT_FRAMES_PER_SECOND,
            max_chain_depth: Self::DEFAULT_MAX_CHAIN_DEPTH,
            half_health_percent: Self::DEFAULT_HALF_HEALTH_PERCENT,
            elements: Vec::new(),
        }
    }

    pub fn with_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            ..Self::new()
        }
    }

    /// Index of the element named `id`.
    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|element| element == id)
    }

    /// Converts milliseconds to whole frames, rounding to nearest.
    ///
    /// Any non-zero duration lasts at least one frame.
    pub fn frames_from_millis(&self, millis: u32) -> u32 {
        if millis == 0 {
            return 0;
        }
        let frames = (u64::from(millis) * u64::from(self.frames_per_second) + 500) / 1000;
        u32::try_from(frames).unwrap_or(u32::MAX).max(1)
    }

    pub fn frames_from_seconds(&self, seconds: u32) -> u32 {
        seconds.saturating_mul(self.frames_per_second)
    }

    /// Converts an authored per-second speed to per-frame.
    pub fn per_frame(&self, per_second: f32) -> f32 {
        if self.frames_per_second == 0 {
            return per_second;
        }
        per_second / self.frames_per_second as f32
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_to_frames() {
        let config = EngineConfig::new();
        assert_eq!(config.frames_from_millis(1000), 60);
        assert_eq!(config.frames_from_millis(250), 15);
        assert_eq!(config.frames_from_millis(1), 1);
        assert_eq!(config.frames_from_millis(0), 0);
        assert_eq!(config.frames_from_seconds(2), 120);
    }

    #[test]
    fn element_lookup() {
        let config = EngineConfig::with_elements(["fire", "ice"]);
        assert_eq!(config.element_index("ice"), Some(1));
        assert_eq!(config.element_index("wind"), None);
        assert_eq!(config.frames_per_second, 60);
    }
}

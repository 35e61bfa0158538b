//! Difficulty curve: which mob kind a generated slot receives.

use std::time::Duration;

use crate::config::{DifficultyTier, GenerationConfig};
use crate::state::{MobKind, ProgressState};

impl DifficultyTier {
    /// Roll the kind needs to beat at distance `near` after `secs` seconds.
    pub fn threshold(&self, near: i32, secs: f64) -> f64 {
        let near = f64::from(near);
        self.base - self.near_cap.min(near / self.near_div) - self.time_cap.min(secs / self.time_div)
    }
}

/// Picks a kind for one slot from a uniform `unit` in `[0, 1)`.
///
/// Tiers are tested strongest first; a Walker is the fallback.
pub fn pick(config: &GenerationConfig, near: i32, elapsed: Duration, unit: f64) -> MobKind {
    let roll = unit * config.roll_scale;
    let secs = elapsed.as_secs_f64();
    config
        .tiers
        .iter()
        .find(|tier| near >= tier.min_near && roll > tier.threshold(near, secs))
        .map_or(MobKind::Walker, |tier| tier.kind)
}

/// Strongest kind whose distance threshold is crossed but which has not yet
/// appeared this session.
pub fn forced(config: &GenerationConfig, progress: &ProgressState, near: i32) -> Option<MobKind> {
    config
        .tiers
        .iter()
        .find(|tier| near >= tier.min_near && !progress.is_introduced(tier.kind))
        .map(|tier| tier.kind)
}

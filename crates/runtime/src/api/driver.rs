//! Asynchronous abstraction for playing visual transitions.
//!
//! The simulation does not advance past a transition until it is completed.
//! A [`VisualDriver`] decides how long that takes: a renderer animates it,
//! tests and headless runs finish it immediately.
use std::time::Duration;

use async_trait::async_trait;
use game_core::{VisualKind, VisualRequest};

/// Plays one visual transition. Returning signals completion.
///
/// Implementations must return exactly once per call; the runtime reports
/// the completion to the simulation afterwards.
#[async_trait]
pub trait VisualDriver: Send + Sync {
    async fn play(&self, request: &VisualRequest);
}

/// Completes every transition immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantDriver;

#[async_trait]
impl VisualDriver for InstantDriver {
    async fn play(&self, _request: &VisualRequest) {
        tokio::task::yield_now().await;
    }
}

/// Waits a fixed multiple of `beat` per transition kind.
///
/// With the default beat of 100 ms a move or death lasts 250 ms and an
/// attack 350 ms.
#[derive(Debug, Clone, Copy)]
pub struct PacedDriver {
    beat: Duration,
}

impl PacedDriver {
    pub const DEFAULT_BEAT: Duration = Duration::from_millis(100);

    pub fn new(beat: Duration) -> Self {
        Self { beat }
    }

    pub fn duration_of(&self, kind: &VisualKind) -> Duration {
        match kind {
            VisualKind::Move { .. } | VisualKind::Death { .. } => self.beat * 5 / 2,
            VisualKind::Attack { .. } => self.beat * 7 / 2,
        }
    }
}

impl Default for PacedDriver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BEAT)
    }
}

#[async_trait]
impl VisualDriver for PacedDriver {
    async fn play(&self, request: &VisualRequest) {
        tokio::time::sleep(self.duration_of(&request.kind)).await;
    }
}

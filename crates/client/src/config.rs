//! Client configuration read from the environment.
use std::env;
use std::time::Duration;

use runtime::PacedDriver;

/// Terminal client configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Seed of the first session; later sessions derive their own.
    pub seed: u64,
    /// Beat of the paced visual driver. Zero plays transitions instantly.
    pub animation_beat: Duration,
    /// Log directory name; a timestamped one is used when unset.
    pub session_id: Option<String>,
    /// Input poll and redraw interval.
    pub frame_interval: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            animation_beat: PacedDriver::DEFAULT_BEAT,
            session_id: None,
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CRYPT_SEED` - Seed of the first session (default: current time)
    /// - `CRYPT_ANIMATION_MS` - Animation beat in milliseconds (default: 100)
    /// - `CRYPT_SESSION_ID` - Log session directory name
    /// - `CLI_FRAME_MS` - Frame interval in milliseconds (default: 16)
    pub fn from_env() -> Self {
        let mut config = Self {
            seed: clock_seed(),
            ..Self::default()
        };

        if let Some(seed) = read_env::<u64>("CRYPT_SEED") {
            config.seed = seed;
        }
        if let Some(ms) = read_env::<u64>("CRYPT_ANIMATION_MS") {
            config.animation_beat = Duration::from_millis(ms);
        }
        if let Ok(session_id) = env::var("CRYPT_SESSION_ID")
            && !session_id.is_empty()
        {
            config.session_id = Some(session_id);
        }
        if let Some(ms) = read_env::<u64>("CLI_FRAME_MS") {
            config.frame_interval = Duration::from_millis(ms.max(1));
        }

        config
    }
}

/// Seed derived from the wall clock.
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

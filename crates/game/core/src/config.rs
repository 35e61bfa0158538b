use crate::state::{MobKind, Position, PropKind};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Leftmost enterable lane.
    pub lane_min: i32,
    /// Rightmost enterable lane.
    pub lane_max: i32,

    /// Cell the hero starts a session on.
    pub hero_start: Position,

    /// Score is the hero's best y minus this offset.
    pub progress_offset: i32,

    /// Per-axis cap on a charge's reach.
    pub charge_range: i32,

    /// Window advance policy and difficulty curve.
    pub generation: GenerationConfig,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Number of lanes across the corridor.
    pub const LANE_COUNT: usize = 9;
    /// Upper bound on candidate paths any mob evaluates.
    pub const MAX_CANDIDATES: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LANE_MIN: i32 = -4;
    pub const DEFAULT_LANE_MAX: i32 = 4;
    pub const DEFAULT_HERO_START: Position = Position::new(0, 2);
    pub const DEFAULT_PROGRESS_OFFSET: i32 = 2;
    pub const DEFAULT_CHARGE_RANGE: i32 = 6;

    pub fn new() -> Self {
        Self {
            lane_min: Self::DEFAULT_LANE_MIN,
            lane_max: Self::DEFAULT_LANE_MAX,
            hero_start: Self::DEFAULT_HERO_START,
            progress_offset: Self::DEFAULT_PROGRESS_OFFSET,
            charge_range: Self::DEFAULT_CHARGE_RANGE,
            generation: GenerationConfig::default(),
        }
    }

    #[inline]
    pub fn in_lanes(&self, x: i32) -> bool {
        (self.lane_min..=self.lane_max).contains(&x)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of one `extend` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnWindow {
    /// First y of the window.
    pub near: i32,
    /// Number of rows; the window covers `[near, near + wideness)`.
    pub wideness: i32,
    /// Minimum number of mobs.
    pub min_mobs: u32,
    /// Mob count is drawn from `[min_mobs, min_mobs + variance)`.
    pub variance: u32,
}

impl SpawnWindow {
    pub const fn new(near: i32, wideness: i32, min_mobs: u32, variance: u32) -> Self {
        Self {
            near,
            wideness,
            min_mobs,
            variance,
        }
    }

    #[inline]
    pub fn contains_row(&self, y: i32) -> bool {
        (self.near..self.near + self.wideness).contains(&y)
    }
}

/// Threshold and roll curve for one stronger mob kind.
///
/// A roll `U * roll_scale` selects the kind when `near >= min_near` and
/// `roll > base - min(near_cap, near / near_div) - min(time_cap, secs / time_div)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyTier {
    pub kind: MobKind,
    pub min_near: i32,
    pub base: f64,
    pub near_cap: f64,
    pub near_div: f64,
    pub time_cap: f64,
    pub time_div: f64,
}

/// Streaming generator tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationConfig {
    /// Props placed before anything else when a session starts.
    pub landmarks: Vec<(PropKind, Position)>,
    /// Windows generated when a session starts.
    pub opening: Vec<SpawnWindow>,

    /// Score must reach `max_boundary + trigger_margin` to advance.
    pub trigger_margin: i32,
    /// New trailing edge is `max_boundary - trailing_gap`.
    pub trailing_gap: i32,
    /// Rows added per advance (also the new window's wideness).
    pub window_span: i32,

    /// `min_mobs = base_min_mobs + score / min_mobs_score_div`.
    pub base_min_mobs: u32,
    pub min_mobs_score_div: i32,
    /// `variance = base_variance + score / variance_score_div`.
    pub base_variance: u32,
    pub variance_score_div: i32,

    /// Props per window relative to the (re-rolled) mob count.
    pub prop_ratio: f64,

    /// Multiplier for the difficulty roll.
    pub roll_scale: f64,
    /// Stronger kinds, strongest first. Anything else is a Walker.
    pub tiers: Vec<DifficultyTier>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            landmarks: vec![
                (PropKind::Grave, Position::new(0, 1)),
                (PropKind::Tree, Position::new(3, 3)),
            ],
            opening: vec![SpawnWindow::new(4, 8, 3, 3), SpawnWindow::new(9, 15, 3, 6)],
            trigger_margin: 10,
            trailing_gap: 5,
            window_span: 20,
            base_min_mobs: 7,
            min_mobs_score_div: 60,
            base_variance: 12,
            variance_score_div: 40,
            prop_ratio: 0.7,
            roll_scale: 3.0,
            tiers: vec![
                DifficultyTier {
                    kind: MobKind::ChargerB,
                    min_near: 120,
                    base: 3.0,
                    near_cap: 0.2,
                    near_div: 1000.0,
                    time_cap: 0.1,
                    time_div: 3600.0,
                },
                DifficultyTier {
                    kind: MobKind::ChargerA,
                    min_near: 60,
                    base: 2.8,
                    near_cap: 0.3,
                    near_div: 600.0,
                    time_cap: 0.2,
                    time_div: 1800.0,
                },
                DifficultyTier {
                    kind: MobKind::Floater,
                    min_near: 20,
                    base: 2.5,
                    near_cap: 0.5,
                    near_div: 500.0,
                    time_cap: 0.2,
                    time_div: 1200.0,
                },
            ],
        }
    }
}

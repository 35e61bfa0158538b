use super::{Direction, EntityId, Position};

/// Aggregate state for every non-hero entity in the corridor.
///
/// Lists are unordered: removal uses swap-remove, so indices are never
/// stable across removals. Look entities up by [`EntityId`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub mobs: Vec<ActorState>,
    pub props: Vec<PropState>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn mob(&self, id: EntityId) -> Option<&ActorState> {
        self.mobs.iter().find(|mob| mob.id == id)
    }

    pub fn mob_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.mobs.iter_mut().find(|mob| mob.id == id)
    }

    /// Removes a mob by id (swap-remove). Returns the removed mob.
    pub fn remove_mob(&mut self, id: EntityId) -> Option<ActorState> {
        let index = self.mobs.iter().position(|mob| mob.id == id)?;
        Some(self.mobs.swap_remove(index))
    }

    /// Iterator over mobs that still take part in the simulation.
    pub fn alive_mobs(&self) -> impl Iterator<Item = &ActorState> {
        self.mobs.iter().filter(|mob| mob.alive)
    }
}

/// The five actor variants. Behaviour dispatch happens on [`MobKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Hero,
    Mob(MobKind),
}

/// Hostile creature kinds, weakest first.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MobKind {
    /// Shambles forward along its facing, turning one axis at a time.
    Walker,
    /// Drifts diagonally, flanking around obstacles.
    Floater,
    /// Charges in straight lines, trampling mobs in the way.
    ChargerA,
    /// Charges straight or diagonally, refusing to stop beside the hero.
    ChargerB,
}

impl MobKind {
    /// Creature name shown to the player ("a Bull got you").
    pub const fn title(self) -> &'static str {
        match self {
            MobKind::Walker => "Zombie",
            MobKind::Floater => "Specter",
            MobKind::ChargerA => "Bull",
            MobKind::ChargerB => "Reaper",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Hero or mob.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub kind: ActorKind,
    pub position: Position,
    /// Always axis-aligned.
    pub facing: Direction,
    pub alive: bool,
    /// A gating transition is in flight; new intents are ignored.
    pub busy: bool,
    /// Destination of an in-flight move. The cell is reserved until the
    /// move completes.
    pub moving_to: Option<Position>,
}

impl ActorState {
    pub fn new(id: EntityId, kind: ActorKind, position: Position, facing: Direction) -> Self {
        Self {
            id,
            kind,
            position,
            facing: facing.facing().unwrap_or_default(),
            alive: true,
            busy: false,
            moving_to: None,
        }
    }

    pub fn hero(position: Position) -> Self {
        Self::new(EntityId::HERO, ActorKind::Hero, position, Direction::SOUTH)
    }

    pub fn mob(id: EntityId, kind: MobKind, position: Position) -> Self {
        Self::new(id, ActorKind::Mob(kind), position, Direction::SOUTH)
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.turn_to(facing);
        self
    }

    pub fn mob_kind(&self) -> Option<MobKind> {
        match self.kind {
            ActorKind::Mob(kind) => Some(kind),
            ActorKind::Hero => None,
        }
    }

    #[inline]
    pub fn kind_is(&self, kind: MobKind) -> bool {
        self.kind == ActorKind::Mob(kind)
    }

    /// Updates the facing from an arbitrary vector; zero vectors are ignored.
    pub fn turn_to(&mut self, direction: Direction) {
        if let Some(facing) = direction.facing() {
            self.facing = facing;
        }
    }

    /// True if this actor currently claims `position` (own cell or reserved
    /// destination). Dead actors claim nothing.
    #[inline]
    pub fn claims(&self, position: Position) -> bool {
        self.alive && (self.position == position || self.moving_to == Some(position))
    }
}

/// Decorative obstacle kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PropKind {
    Grave,
    Cross,
    Tomb,
    Stones,
    Tree,
}

impl PropKind {
    /// Roll table; stones and trees appear twice as often as each grave.
    pub const TABLE: [PropKind; 7] = [
        PropKind::Grave,
        PropKind::Cross,
        PropKind::Tomb,
        PropKind::Stones,
        PropKind::Tree,
        PropKind::Stones,
        PropKind::Tree,
    ];
}

/// Inert obstacle occupying one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropState {
    pub id: EntityId,
    pub position: Position,
    pub facing: Direction,
    pub kind: PropKind,
}

impl PropState {
    pub fn new(id: EntityId, position: Position, facing: Direction, kind: PropKind) -> Self {
        Self {
            id,
            position,
            facing: facing.facing().unwrap_or_default(),
            kind,
        }
    }
}

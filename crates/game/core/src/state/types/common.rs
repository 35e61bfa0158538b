use std::fmt;

/// Unique identifier for any entity tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable hero.
    pub const HERO: Self = Self(0);

    /// Returns true if this entity represents the hero.
    #[inline]
    pub const fn is_hero(self) -> bool {
        self.0 == Self::HERO.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::HERO
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position. `x` is the lane, `y` the forward distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by an arbitrary delta.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the position one step along `direction`.
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        self.offset(direction.dx, direction.dy)
    }

    /// Manhattan distance between two cells.
    #[inline]
    pub const fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Vector pointing from `self` to `other`.
    #[inline]
    pub const fn delta_to(self, other: Position) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit-sign pair. Diagonals exist transiently (floater/charger paths), but
/// facings stored on entities are always axis-aligned, see [`Direction::facing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const NONE: Self = Self { dx: 0, dy: 0 };
    /// Forward along the corridor.
    pub const NORTH: Self = Self { dx: 0, dy: 1 };
    /// Back toward the trailing edge.
    pub const SOUTH: Self = Self { dx: 0, dy: -1 };
    pub const EAST: Self = Self { dx: 1, dy: 0 };
    pub const WEST: Self = Self { dx: -1, dy: 0 };

    pub const CARDINALS: [Direction; 4] = [
        Direction::WEST,
        Direction::EAST,
        Direction::NORTH,
        Direction::SOUTH,
    ];

    /// Builds a direction from the signs of an arbitrary vector.
    #[inline]
    pub const fn from_signs(x: i32, y: i32) -> Self {
        Self {
            dx: x.signum(),
            dy: y.signum(),
        }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Normalises the direction into an axis-aligned facing.
    ///
    /// Diagonals collapse onto the y axis, the corridor's primary axis.
    /// A zero vector yields `None`.
    pub const fn facing(self) -> Option<Self> {
        match (self.dx.signum(), self.dy.signum()) {
            (0, 0) => None,
            (sx, 0) => Some(Self { dx: sx, dy: 0 }),
            (_, sy) => Some(Self { dx: 0, dy: sy }),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::SOUTH
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.dx, self.dy)
    }
}

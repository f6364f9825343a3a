use std::fmt::{Display, Formatter};

use crate::location::Location;

/// Identity of a [`Space`], unique within its board.
/// Built-in layouts number their spaces from 1 in row-major order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SpaceId(pub usize);

impl Display for SpaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single cell of a board, holding a peg or not.
///
/// Spaces carry no topology of their own; adjacency and jump targets live on the owning [`Board`](crate::Board).
/// Nothing here is validated, the board checks legality before touching occupancy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Space {
    id: SpaceId,
    location: Location,
    occupied: bool,
}

impl Space {
    /// A new, empty space.
    pub fn new(id: SpaceId, location: Location) -> Self {
        Self { id, location, occupied: false }
    }

    pub fn id(&self) -> SpaceId {
        self.id
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Place a peg here, whether or not one is already present.
    pub fn fill(&mut self) {
        self.occupied = true;
    }

    /// Remove the peg here, if any.
    pub fn empty(&mut self) {
        self.occupied = false;
    }

    pub(crate) fn display(&self) -> char {
        if self.occupied { '*' } else { 'O' }
    }
}

/// One registered jump out of a space: over `jump`, landing on `land`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Target {
    pub jump: SpaceId,
    pub land: SpaceId,
}

/// A move of the peg on `jump` to the empty space `land`.
/// The space jumped over is not stored; it is resolved from the targets of `jump`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Move {
    pub jump: SpaceId,
    pub land: SpaceId,
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.jump, self.land)
    }
}

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

use itertools::Itertools;
use log::trace;
use unordered_pair::UnorderedPair;

use crate::board::{Board, BoardError};
use crate::location::{Dimension, Location};
use crate::shape::{BoardShape, Step, TriangleStep};
use crate::space::{Space, SpaceId};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A space was named which a board of the configured size does not have.
    SpaceOutOfBounds(SpaceId),
    /// Wiring the spaces together failed.
    /// This indicates a faulty [`Step`] implementation rather than bad configuration.
    Topology(BoardError),
}

impl Display for BuilderInvalidReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpaceOutOfBounds(id) => write!(f, "space {} is outside the board", id),
            Self::Topology(err) => write!(f, "could not wire board: {}", err),
        }
    }
}

impl std::error::Error for BuilderInvalidReason {}

/// Builds boards of shape `Sh`: one space per location, neighbors and jump targets derived from the shape's geometry,
/// and every space filled except those marked with [`empty_at`](Self::empty_at).
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Building is deterministic; two builders with the same configuration produce boards with identical topology.
#[derive(Clone, Debug)]
pub struct BoardBuilder<Sh: Step> {
    size: Dimension,
    space_count: usize,
    empty: BTreeSet<SpaceId>,
    invalid_reasons: Vec<BuilderInvalidReason>,
    shape: PhantomData<Sh>,
}

/// A builder for boards with triangular layout, as in the common 15-hole peg game.
pub type TriangleBoardBuilder = BoardBuilder<TriangleStep>;

impl<Sh: Step> BoardBuilder<Sh> {
    /// Construct a new [`Self`] for a board of the given size; for a triangle, the number of rows.
    pub fn with_size(size: Dimension) -> Self {
        Self {
            size,
            space_count: Sh::locations(size).len(),
            empty: Default::default(),
            invalid_reasons: Default::default(),
            shape: PhantomData,
        }
    }

    /// Start the board with no peg on `id`. May be called several times.
    ///
    /// Causes the builder to enter a [`SpaceOutOfBounds`](BuilderInvalidReason::SpaceOutOfBounds) invalid state if `id` is not on the board.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn empty_at(&mut self, id: SpaceId) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !(1..=self.space_count).contains(&id.0) {
            self.invalid_reasons.push(BuilderInvalidReason::SpaceOutOfBounds(id));
            return self;
        }

        self.empty.insert(id);
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Lay this builder's spaces, topology and initial occupancy onto `board`, which should be fresh.
    pub fn populate(&self, board: &mut Board<Sh>) -> Result<(), BoardError> {
        let locations = Sh::locations(self.size);
        // ids are 1-indexed to match most available diagrams
        let ids: HashMap<Location, SpaceId> = locations.iter()
            .enumerate()
            .map(|(index, location)| (*location, SpaceId(index + 1)))
            .collect();
        let numbered = locations.iter()
            .enumerate()
            .map(|(index, location)| (SpaceId(index + 1), *location))
            .collect_vec();

        for (id, location) in &numbered {
            board.add_space(Space::new(*id, *location));
        }

        for (id, location) in &numbered {
            for (_, neighbor) in Sh::neighbors_of(*location) {
                if let Some(other) = ids.get(&neighbor) {
                    board.set_adjacent(UnorderedPair(*id, *other))?;
                }
            }

            // the reverse jump is registered alongside, so only the forward half of the lines is walked
            for direction in Sh::FORWARD_VARIANTS {
                let (over, land) = direction.jump_from(*location);
                if let (Some(over), Some(land)) = (ids.get(&over), ids.get(&land)) {
                    board.add_target(*id, *over, *land)?;
                }
            }
        }

        for (id, _) in &numbered {
            if self.empty.contains(id) {
                board.set_empty(*id)?;
            } else {
                board.set_occupied(*id)?;
            }
        }

        Ok(())
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board<Sh>, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let mut board = Board::new();
        self.populate(&mut board)
            .map_err(|err| vec![BuilderInvalidReason::Topology(err)])?;

        trace!("built board of {} spaces, {} empty", self.space_count, self.empty.len());
        Ok(board)
    }
}

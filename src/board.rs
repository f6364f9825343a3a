use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

use itertools::Itertools;
use log::warn;
use ndarray::Array2;
use petgraph::graphmap::{DiGraphMap, UnGraphMap};
use petgraph::Direction;
use unordered_pair::UnorderedPair;

use crate::location::Location;
use crate::shape::Step;
use crate::space::{Move, Space, SpaceId, Target};

/// Reasons an operation on a [`Board`] may fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoardError {
    /// No space with this id is on the board.
    UnknownSpace(SpaceId),
    /// The peg on `from` cannot jump to `land`; nothing on the board was changed.
    InvalidJump { from: SpaceId, land: SpaceId },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSpace(id) => write!(f, "no space {} on this board", id),
            Self::InvalidJump { from, land } => write!(f, "invalid jump from {} to {}", from, land),
        }
    }
}

impl std::error::Error for BoardError {}

/// Adjacency and jump targets. Fixed once a board is built.
#[derive(Clone, Debug, Default)]
pub(crate) struct Topology {
    pub(crate) adjacency: UnGraphMap<SpaceId, ()>,
    // space -> land, weighted by the space jumped over; edge order is registration order
    pub(crate) targets: DiGraphMap<SpaceId, SpaceId>,
}

/// A board of [`Space`]s laid out as specified by `Sh`.
///
/// The board owns the topology of its spaces as two graphs: physical adjacency, and the directed "targets" relation of jumps.
/// Boards should be built using a [`Builder`](crate::builder::Builder) such as [`TriangleBoardBuilder`](crate::builder::TriangleBoardBuilder).
///
/// Cloning a board copies occupancy and shares the topology.
/// Mutating the topology of either board afterwards copies it first, so no board ever observes another's changes.
#[derive(Clone, Debug)]
pub struct Board<Sh>
where
    Sh: Step,
{
    spaces: BTreeMap<SpaceId, Space>,
    topology: Arc<Topology>,
    shape: PhantomData<Sh>,
}

impl<Sh: Step> Default for Board<Sh> {
    fn default() -> Self {
        Self {
            spaces: Default::default(),
            topology: Default::default(),
            shape: PhantomData,
        }
    }
}

impl<Sh> Board<Sh>
where
    Sh: Step,
{
    /// A board with no spaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a space, failing with [`BoardError::UnknownSpace`] if `id` is not on this board.
    pub fn space(&self, id: SpaceId) -> Result<&Space, BoardError> {
        self.spaces.get(&id).ok_or(BoardError::UnknownSpace(id))
    }

    fn space_mut(&mut self, id: SpaceId) -> Result<&mut Space, BoardError> {
        self.spaces.get_mut(&id).ok_or(BoardError::UnknownSpace(id))
    }

    /// Add `space` to the board with no neighbors or targets, replacing any space with the same id.
    pub fn add_space(&mut self, space: Space) {
        let id = space.id();
        self.spaces.insert(id, space);

        let topology = self.topology_mut();
        topology.adjacency.add_node(id);
        topology.targets.add_node(id);
    }

    /// All spaces, ascending by id.
    pub fn spaces(&self) -> &BTreeMap<SpaceId, Space> {
        &self.spaces
    }

    pub fn set_occupied(&mut self, id: SpaceId) -> Result<(), BoardError> {
        self.space_mut(id).map(Space::fill)
    }

    pub fn set_empty(&mut self, id: SpaceId) -> Result<(), BoardError> {
        self.space_mut(id).map(Space::empty)
    }

    #[inline]
    fn topology_mut(&mut self) -> &mut Topology {
        Arc::make_mut(&mut self.topology)
    }

    fn ensure_known(&self, ids: impl IntoIterator<Item = SpaceId>) -> Result<(), BoardError> {
        match ids.into_iter().find(|id| !self.spaces.contains_key(id)) {
            Some(id) => Err(BoardError::UnknownSpace(id)),
            None => Ok(()),
        }
    }

    /// Mark the two `spaces` as neighbors of one another.
    pub fn set_adjacent(&mut self, spaces: UnorderedPair<SpaceId>) -> Result<(), BoardError> {
        let UnorderedPair(a, b) = spaces;
        self.ensure_known([a, b])?;

        self.topology_mut().adjacency.add_edge(a, b, ());
        Ok(())
    }

    /// The neighbors of `id`.
    pub fn adjacent(&self, id: SpaceId) -> Result<BTreeSet<SpaceId>, BoardError> {
        self.ensure_known([id])?;
        Ok(self.topology.adjacency.neighbors(id).collect())
    }

    /// Register that a peg on `space` may jump over `jump` to land on `land`, and the reverse jump from `land` to `space`.
    ///
    /// This is the only way targets are created, so the targets relation is always symmetric and `targeted_by` is always its inverse.
    /// Registering the same line twice has no further effect.
    pub fn add_target(&mut self, space: SpaceId, jump: SpaceId, land: SpaceId) -> Result<(), BoardError> {
        self.ensure_known([space, jump, land])?;

        let targets = &mut self.topology_mut().targets;
        targets.add_edge(space, land, jump);
        targets.add_edge(land, space, jump);
        Ok(())
    }

    /// Every jump out of `id`, in the order registered.
    pub fn targets(&self, id: SpaceId) -> Result<Vec<Target>, BoardError> {
        self.ensure_known([id])?;
        Ok(self.topology.targets.edges(id)
            .map(|(_, land, jump)| Target { jump: *jump, land })
            .collect_vec())
    }

    /// Every space with a jump landing on `id`, in the order registered.
    pub fn targeted_by(&self, id: SpaceId) -> Result<Vec<SpaceId>, BoardError> {
        self.ensure_known([id])?;
        Ok(self.topology.targets.neighbors_directed(id, Direction::Incoming).collect_vec())
    }

    /// The space jumped over when moving from `from` to `land`, if that jump is registered at all.
    #[inline]
    fn jumped(&self, from: SpaceId, land: SpaceId) -> Option<SpaceId> {
        self.topology.targets.edge_weight(from, land).copied()
    }

    fn is_legal(&self, space: &Space, target: &Space) -> bool {
        // resolve the jumped space only once `target` is known to be a landing of `space`
        let jumped_occupied = match self.jumped(space.id(), target.id()) {
            None => return false,
            Some(over) => self.spaces.get(&over).is_some_and(Space::is_occupied),
        };

        space.is_occupied() && jumped_occupied && !target.is_occupied()
    }

    /// Whether the peg on `space` can currently jump to `target`.
    ///
    /// This holds when `space` is occupied, `target` is one of its registered landings,
    /// the space between them is occupied and `target` is empty.
    pub fn validate_jump(&self, space: SpaceId, target: SpaceId) -> Result<bool, BoardError> {
        Ok(self.is_legal(self.space(space)?, self.space(target)?))
    }

    /// Jump the peg on `space` to `target`, removing the peg jumped over.
    ///
    /// If the jump is not legal, nothing changes and [`BoardError::InvalidJump`] is returned.
    pub fn jump(&mut self, space: SpaceId, target: SpaceId) -> Result<(), BoardError> {
        let invalid = BoardError::InvalidJump { from: space, land: target };

        if !self.validate_jump(space, target)? {
            warn!("{}", invalid);
            return Err(invalid);
        }
        let over = self.jumped(space, target).ok_or(invalid)?;

        // all three ids were checked above, so none of these can fail partway through
        self.set_empty(space)?;
        self.set_empty(over)?;
        self.set_occupied(target)
    }

    /// Spaces without a peg, ascending by id.
    pub fn empty_spaces(&self) -> Vec<&Space> {
        self.spaces.values()
            .filter(|space| !space.is_occupied())
            .collect_vec()
    }

    /// Every legal move on the board.
    ///
    /// Moves are grouped by landing space, ascending by id; within a group they follow the order in which the jumping spaces were registered.
    /// No move appears twice.
    pub fn valid_moves(&self) -> Vec<Move> {
        self.empty_spaces()
            .into_iter()
            .flat_map(|empty| self.topology.targets
                .neighbors_directed(empty.id(), Direction::Incoming)
                .filter_map(|id| self.spaces.get(&id))
                .filter(move |space| self.is_legal(space, empty))
                .map(move |space| Move { jump: space.id(), land: empty.id() }))
            .unique()
            .collect_vec()
    }

    /// The number of pegs left on the board.
    pub fn score(&self) -> usize {
        self.spaces.values()
            .filter(|space| space.is_occupied())
            .count()
    }

    /// Whether `other` has the same spaces, neighbors and targets as this board, the latter in the same order.
    /// Occupancy is not compared.
    pub fn same_topology(&self, other: &Self) -> bool {
        if !self.spaces.keys().eq(other.spaces.keys()) {
            return false;
        }
        if Arc::ptr_eq(&self.topology, &other.topology) {
            return true;
        }

        self.spaces.keys().all(|id| {
            self.adjacent(*id) == other.adjacent(*id)
                && self.targets(*id) == other.targets(*id)
        })
    }
}

impl<Sh: Step> Display for Board<Sh> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut grid = Array2::from_elem(Location::extent(self.spaces.values().map(Space::location)), None);
        for space in self.spaces.values() {
            grid[space.location().as_index()] = Some(space.display());
        }

        write!(f, "{}", Sh::print(grid))
    }
}

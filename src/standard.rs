use std::fmt::{Display, Formatter};

use crate::board::{Board, BoardError};
use crate::builder::{BuilderInvalidReason, TriangleBoardBuilder};
use crate::location::Dimension;
use crate::shape::TriangleStep;
use crate::space::{Move, SpaceId};

/// Lay the standard 15-space triangle onto a fresh `board`: five rows of one through five spaces, numbered row-major from the apex,
/// every space filled except the apex.
pub fn create_standard_board(board: &mut Board<TriangleStep>) -> Result<(), BoardError> {
    StandardBoard::builder().populate(board)
}

/// The common 15-space triangular peg game, keeping a history of the positions it has moved through.
///
/// ```
/// use pegboard::{Move, SpaceId, StandardBoard};
///
/// let mut board = StandardBoard::create().unwrap();
/// board.make_move(Move { jump: SpaceId(4), land: SpaceId(1) }).unwrap();
/// assert_eq!(board.score(), 13);
/// ```
#[derive(Debug)]
pub struct StandardBoard {
    board: Board<TriangleStep>,
    history: Vec<String>,
}

impl StandardBoard {
    /// Rows of the triangle.
    pub const ROWS: Dimension = match Dimension::new(5) {
        Some(rows) => rows,
        None => unreachable!(),
    };
    /// Spaces on the board.
    pub const SPACE_COUNT: usize = 15;
    /// The one space without a peg at the start of a game.
    pub const START_EMPTY: SpaceId = SpaceId(1);

    /// The builder producing the standard layout, should a caller want to vary it.
    pub fn builder() -> TriangleBoardBuilder {
        let mut builder = TriangleBoardBuilder::with_size(Self::ROWS);
        builder.empty_at(Self::START_EMPTY);
        builder
    }

    /// A new game with an empty history.
    pub fn create() -> Result<Self, Vec<BuilderInvalidReason>> {
        Ok(Self {
            board: Self::builder().build()?,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board<TriangleStep> {
        &self.board
    }

    pub fn valid_moves(&self) -> Vec<Move> {
        self.board.valid_moves()
    }

    /// Jump without recording history; see [`Board::jump`].
    pub fn jump(&mut self, space: SpaceId, target: SpaceId) -> Result<(), BoardError> {
        self.board.jump(space, target)
    }

    /// Play `mv`, recording the resulting position in the history.
    /// A move which is not legal leaves both the board and the history untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), BoardError> {
        self.board.jump(mv.jump, mv.land)?;
        self.add_history(self.board.to_string());
        Ok(())
    }

    /// Pegs remaining. One is a perfect game.
    pub fn score(&self) -> usize {
        Self::SPACE_COUNT - self.board.empty_spaces().len()
    }

    /// Every position reached by [`make_move`](Self::make_move), oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn add_history(&mut self, snapshot: String) {
        self.history.push(snapshot);
    }

    /// An independent copy of this game with the same pegs and a fresh history.
    pub fn fork(&self) -> Self {
        Self {
            board: self.board.clone(),
            history: Vec::new(),
        }
    }

    /// Write the board to stdout.
    pub fn print_board(&self) {
        print!("{}", self);
    }
}

impl Display for StandardBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}

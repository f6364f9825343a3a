use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};

use log::{debug, error};

use crate::board::{Board, BoardError};
use crate::shape::Step;
use crate::space::Move;
use crate::standard::StandardBoard;

/// Constraint on positions given to [`search`].
///
/// Implementations must agree with themselves: every move returned by [`valid_moves`](Self::valid_moves)
/// must be accepted by [`make_move`](Self::make_move), and every accepted move must lower the [`score`](Self::score) by one.
pub trait Permutable: Sized {
    type Move: Copy + Debug + Display;
    type Error: Debug + Display;

    fn valid_moves(&self) -> Vec<Self::Move>;
    /// A copy which can be moved on without affecting `self`.
    fn fork(&self) -> Self;
    fn make_move(&mut self, mv: Self::Move) -> Result<(), Self::Error>;
    fn score(&self) -> usize;
}

impl<Sh: Step> Permutable for Board<Sh> {
    type Move = Move;
    type Error = BoardError;

    fn valid_moves(&self) -> Vec<Move> {
        Board::valid_moves(self)
    }

    fn fork(&self) -> Self {
        self.clone()
    }

    fn make_move(&mut self, mv: Move) -> Result<(), BoardError> {
        self.jump(mv.jump, mv.land)
    }

    fn score(&self) -> usize {
        Board::score(self)
    }
}

impl Permutable for StandardBoard {
    type Move = Move;
    type Error = BoardError;

    fn valid_moves(&self) -> Vec<Move> {
        StandardBoard::valid_moves(self)
    }

    fn fork(&self) -> Self {
        StandardBoard::fork(self)
    }

    fn make_move(&mut self, mv: Move) -> Result<(), BoardError> {
        StandardBoard::make_move(self, mv)
    }

    fn score(&self) -> usize {
        StandardBoard::score(self)
    }
}

/// How many finished games ended with each number of pegs left.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScoreTally(BTreeMap<usize, u64>);

impl ScoreTally {
    pub fn record(&mut self, score: usize) {
        *self.0.entry(score).or_insert(0) += 1;
    }

    /// Games ending on `score`; zero if none did.
    pub fn get(&self, score: usize) -> u64 {
        self.0.get(&score).copied().unwrap_or(0)
    }

    /// Games counted, i.e. the number of distinct lines of play.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// The lowest score any game reached.
    pub fn best(&self) -> Option<usize> {
        self.0.keys().next().copied()
    }

    /// `(score, games)` pairs, ascending by score.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.0.iter().map(|(score, count)| (*score, *count))
    }
}

impl From<ScoreTally> for BTreeMap<usize, u64> {
    fn from(value: ScoreTally) -> Self {
        value.0
    }
}

/// A move listed as valid which the position then refused.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation<M, E> {
    /// The moves leading from the searched position to the one that refused `mv`.
    pub line: Vec<M>,
    pub mv: M,
    pub error: E,
}

/// Reasons a [`search`] may fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchFailure<M, E> {
    /// Some position disagreed with itself about which moves are legal, see [`Permutable`].
    /// The branches below each refused move were skipped; `partial` counts every other branch.
    InvariantViolation {
        violations: Vec<Violation<M, E>>,
        partial: ScoreTally,
    },
}

impl<M: Display, E: Display> Display for SearchFailure<M, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvariantViolation { violations, .. } => match violations.first() {
                Some(first) => write!(f, "{} listed move(s) were refused, first {}: {}", violations.len(), first.mv, first.error),
                None => write!(f, "listed moves were refused"),
            },
        }
    }
}

impl<M: Debug + Display, E: Debug + Display> std::error::Error for SearchFailure<M, E> {}

/// Depth-first walk over every line of play from a position, each frame owning a fork of its parent.
struct PermutationSearch<P: Permutable> {
    tally: ScoreTally,
    line: Vec<P::Move>,
    violations: Vec<Violation<P::Move, P::Error>>,
}

impl<P: Permutable> PermutationSearch<P> {
    fn new() -> Self {
        Self {
            tally: Default::default(),
            line: Vec::new(),
            violations: Vec::new(),
        }
    }

    fn explore(&mut self, position: &P) {
        let moves = position.valid_moves();
        if moves.is_empty() {
            self.tally.record(position.score());
            return;
        }

        for mv in moves {
            let mut next = position.fork();
            match next.make_move(mv) {
                Ok(()) => {
                    self.line.push(mv);
                    self.explore(&next);
                    self.line.pop();
                }
                Err(err) => {
                    error!("listed move {} was refused after {:?}: {}", mv, self.line, err);
                    self.violations.push(Violation { line: self.line.clone(), mv, error: err });
                }
            }
        }
    }

    fn finish(self) -> Result<ScoreTally, SearchFailure<P::Move, P::Error>> {
        if self.violations.is_empty() {
            Ok(self.tally)
        } else {
            Err(SearchFailure::InvariantViolation { violations: self.violations, partial: self.tally })
        }
    }
}

/// Play out every sequence of legal moves from `position` until no move remains, counting the games by the score they end on.
///
/// `position` itself is never moved on.
/// Every move removes a peg, so the walk always terminates; its depth is bounded by the number of pegs.
pub fn search<P: Permutable>(position: &P) -> Result<ScoreTally, SearchFailure<P::Move, P::Error>> {
    debug!("searching from a position with {} moves", position.valid_moves().len());

    let mut walk = PermutationSearch::new();
    walk.explore(position);

    debug!("search reached {} terminal positions", walk.tally.total());
    walk.finish()
}

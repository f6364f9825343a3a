#![warn(missing_docs)]

//! # `pegboard`
//!
//! An engine for [peg solitaire](https://en.wikipedia.org/wiki/Peg_solitaire) and an exhaustive solver for it,
//! as played on the 15-hole triangular board found on restaurant tables everywhere.
//! Begin by building a [`StandardBoard`] with [`StandardBoard::create`], or a board of another size with a [`BoardBuilder`](builder::BoardBuilder).
//! Ask it for its [`valid_moves()`](crate::Board::valid_moves) and play them, or hand it to [`search()`] to play every game there is.
//!
//! `pegboard` can operate on generic board shapes, as encoded by the `Sh` type parameter.
//! These shapes must implement [`Step`](crate::shape::Step) and will automatically have [`BoardShape`](crate::shape::BoardShape) `impl`'d as well.
//!
//! # Internals
//! A board is a pair of graphs over its spaces.
//! The first is plain adjacency. The second holds the "targets" of each space: a directed edge from a space to every space it could land on,
//! weighted by the space it would jump over. Every such edge is registered together with its reverse, so the incoming edges of a space are
//! exactly the spaces which could jump into it.
//!
//! Finding legal moves therefore starts from the empty spaces, which are usually few, and walks backwards along the targets graph.
//! A move is legal when the jumping space and the jumped space are both occupied and the landing space is empty.
//!
//! The solver is a plain depth-first walk. Each branch forks the board, which copies occupancy and shares the topology, so no branch can see another's moves.

pub use board::{Board, BoardError};
pub use builder::{BoardBuilder, BuilderInvalidReason, TriangleBoardBuilder};
pub use location::{Dimension, Location};
pub use solver::{search, Permutable, ScoreTally, SearchFailure, Violation};
pub use space::{Move, Space, SpaceId, Target};
pub use standard::{create_standard_board, StandardBoard};

pub(crate) mod board;
pub(crate) mod location;
pub mod shape;
pub(crate) mod space;
pub mod builder;
pub(crate) mod solver;
pub(crate) mod standard;

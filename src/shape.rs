use std::hash::Hash;

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::location::{Dimension, Location};

/// Functionality that must be implemented on a case-by-case basis for any board shape.
///
/// [`TriangleStep`] is the built-in implementation.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside the board; callers check it against [`Step::locations`].
    fn attempt_from(&self, location: Location) -> Location;
    /// The static array of all "forward" directions.
    ///
    /// Forward directions are those which cause the destination to be numbered higher than the origin.
    /// Walking only these from every location visits each pair of neighbors, and each line of three, exactly once.
    const FORWARD_VARIANTS: &'static [Self];
    /// Every location on a board of this shape and `size`, in numbering order.
    /// The space at index `i` is given the id `i + 1`.
    fn locations(size: Dimension) -> Vec<Location>;
    /// Dump the specified [`ndarray::Array2`], laying out one character per space based on the geometry of the shape [`Self`].
    /// Grid cells holding no space are [`None`].
    fn print(board: Array2<Option<char>>) -> String;
}

/// Step directions on the triangular board, where row `y` holds the locations `(0, y)` through `(y, y)`.
///
/// Viewed as drawn, a space touches two neighbors in its own row and two in each of the rows above and below.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum TriangleStep {
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Step for TriangleStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
            Self::UpLeft => location.offset_by((-1, -1)),
            Self::UpRight => location.offset_by((0, -1)),
            Self::DownLeft => location.offset_by((0, 1)),
            Self::DownRight => location.offset_by((1, 1)),
        }
    }

    const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::DownLeft, Self::DownRight];

    fn locations(size: Dimension) -> Vec<Location> {
        (0..size.get())
            .flat_map(|y| (0..=y).map(move |x| Location(x, y)))
            .collect_vec()
    }

    fn print(board: Array2<Option<char>>) -> String {
        let rows = board.nrows();
        let mut out = String::with_capacity(rows * 2 * rows);

        for (y, row) in board.rows().into_iter().enumerate() {
            // centre each row under the apex
            let padding = " ".repeat(rows.saturating_sub(y + 1));
            out.push_str(&padding);
            out.push_str(&row.iter().flatten().join(" "));
            out.push_str(&padding);
            out.push('\n');
        }

        out
    }
}

/// Functionality on top of [`Step`] with identical implementation across all shapes.
pub trait BoardShape: Step {
    /// Get all neighbors of a [`Location`] in "theory", by attempting every step direction in `Self::VARIANTS`.
    fn neighbors_of(location: Location) -> Vec<(Self, Location)>;
    /// The location stepped over and the location landed on when jumping from `location` in the direction of `self`.
    fn jump_from(&self, location: Location) -> (Location, Location);
}

impl<Sh> BoardShape for Sh
where
    Sh: Step,
{
    fn neighbors_of(location: Location) -> Vec<(Self, Location)> {
        Self::VARIANTS.iter()
            .map(|dir| (*dir, dir.attempt_from(location)))
            .collect_vec()
    }

    fn jump_from(&self, location: Location) -> (Location, Location) {
        let over = self.attempt_from(location);
        (over, self.attempt_from(over))
    }
}

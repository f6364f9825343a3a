use std::num::NonZero;

type Coord = usize;
/// The size of a board, as understood by its shape; for a triangle, the number of rows.
pub type Dimension = NonZero<Coord>;

/// A location `(x, y)` in the grid a board shape is embedded in.
/// `x` counts spaces from the left of a row and `y` counts rows from the top, so the apex of a triangle is `Location(0, 0)`.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// `(row, column)` order, as used to index an [`ndarray::Array2`].
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    // stepping off the top or left edge wraps to a huge coordinate, which no shape contains
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// The `(rows, columns)` extent of the smallest grid holding every one of `locations`.
    pub(crate) fn extent(locations: impl IntoIterator<Item = Location>) -> (Coord, Coord) {
        locations.into_iter()
            .fold((0, 0), |(rows, cols), loc| (rows.max(loc.1 + 1), cols.max(loc.0 + 1)))
    }
}

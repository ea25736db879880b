use crate::ConfigError;

use super::piece::Color;

/// Largest accepted board side, in cells.
///
/// Keeps `width * height` and every board coordinate within `i32`.
pub const MAX_BOARD_SIDE: usize = 1024;

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Locked cell carrying the color of the piece that filled it.
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// Fixed-size grid of locked cells.
///
/// Cells are stored row-major, `(0, 0)` is the top-left corner and y grows
/// downward. The dimensions are fixed at construction.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Color};
///
/// let mut board = Board::new(4, 4).unwrap();
/// for x in 0..4 {
///     board.place(x, 3, Color::Red);
/// }
/// board.place(0, 2, Color::Blue);
///
/// assert_eq!(board.clear_full_rows(), 1);
/// assert!(board.is_occupied(0, 3));
/// assert!(!board.is_occupied(1, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width,
                height,
                max: MAX_BOARD_SIDE,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    /// Returns true when `(x, y)` lies on the board.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Returns the cell at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Returns true iff `(x, y)` is in bounds and filled.
    ///
    /// Out-of-bounds positions report `false`; use [`Self::contains`] to tell
    /// them apart from empty cells.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(Cell::is_filled)
    }

    /// Fills the cell at `(x, y)` with `color`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn place(&mut self, x: usize, y: usize, color: Color) {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside the {}x{} board",
            self.width,
            self.height
        );
        self.cells[y * self.width + x] = Cell::Filled(color);
    }

    /// Returns the row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..][..self.width]
    }

    /// Iterates the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|c| c.is_filled())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Number of filled cells on the board.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows above a removed row shift down by one for each removed row below
    /// them, and the same number of empty rows appear at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        for y in (0..self.height).rev() {
            if self.is_row_full(y) {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                let src = y * width;
                self.cells.copy_within(src..src + width, src + cleared * width);
            }
        }
        self.cells[..cleared * width].fill(Cell::Empty);
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: usize, color: Color) {
        for x in 0..board.width() {
            board.place(x, y, color);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20).unwrap();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.rows().count(), 20);
        assert!(board.rows().all(|row| row.len() == 10));
        assert!(board.is_empty());
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            Board::new(0, 20),
            Err(ConfigError::EmptyBoard {
                width: 0,
                height: 20
            })
        );
        assert!(Board::new(10, 0).is_err());
    }

    #[test]
    fn test_new_rejects_oversized_dimensions() {
        assert!(Board::new(MAX_BOARD_SIDE, MAX_BOARD_SIDE).is_ok());
        assert_eq!(
            Board::new(usize::MAX / 2, 20),
            Err(ConfigError::BoardTooLarge {
                width: usize::MAX / 2,
                height: 20,
                max: MAX_BOARD_SIDE
            })
        );
        assert!(Board::new(10, MAX_BOARD_SIDE + 1).is_err());
    }

    #[test]
    fn test_occupancy_distinguishes_out_of_bounds() {
        let mut board = Board::new(10, 20).unwrap();
        board.place(9, 19, Color::Green);

        assert!(board.is_occupied(9, 19));
        assert!(!board.is_occupied(0, 0));
        assert!(!board.is_occupied(-1, 0));
        assert!(!board.is_occupied(10, 0));
        assert!(!board.is_occupied(0, 20));

        assert!(board.contains(0, 0));
        assert!(!board.contains(-1, 0));
        assert_eq!(board.cell(9, 19), Some(Cell::Filled(Color::Green)));
        assert_eq!(board.cell(0, -1), None);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_place_out_of_bounds_panics() {
        let mut board = Board::new(10, 20).unwrap();
        board.place(10, 0, Color::Red);
    }

    #[test]
    fn test_clear_full_rows_none() {
        let mut board = Board::new(10, 20).unwrap();
        for x in 0..9 {
            board.place(x, 19, Color::Red);
        }
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_full_rows_bottom() {
        let mut board = Board::new(10, 20).unwrap();
        fill_row(&mut board, 19, Color::Cyan);
        board.place(3, 18, Color::Blue);

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.cell(3, 19), Some(Cell::Filled(Color::Blue)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        let mut board = Board::new(10, 20).unwrap();
        board.place(0, 0, Color::Red);
        board.place(1, 1, Color::Orange);
        fill_row(&mut board, 2, Color::Cyan);
        board.place(2, 3, Color::Yellow);
        board.place(3, 4, Color::Green);
        fill_row(&mut board, 5, Color::Cyan);
        board.place(4, 6, Color::Magenta);
        board.place(5, 19, Color::Blue);

        assert_eq!(board.clear_full_rows(), 2);

        // Above both cleared rows: down by two.
        assert_eq!(board.cell(0, 2), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.cell(1, 3), Some(Cell::Filled(Color::Orange)));
        // Between the cleared rows: down by one.
        assert_eq!(board.cell(2, 4), Some(Cell::Filled(Color::Yellow)));
        assert_eq!(board.cell(3, 5), Some(Cell::Filled(Color::Green)));
        // Below both: unchanged.
        assert_eq!(board.cell(4, 6), Some(Cell::Filled(Color::Magenta)));
        assert_eq!(board.cell(5, 19), Some(Cell::Filled(Color::Blue)));

        assert!(board.row(0).iter().all(|c| c.is_empty()));
        assert!(board.row(1).iter().all(|c| c.is_empty()));
        assert_eq!(board.filled_count(), 6);
    }

    #[test]
    fn test_clear_full_rows_four_at_once() {
        let mut board = Board::new(10, 20).unwrap();
        for y in 16..20 {
            fill_row(&mut board, y, Color::Cyan);
        }
        board.place(7, 15, Color::Red);

        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.cell(7, 19), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.rows().count(), 20);
    }

    #[test]
    fn test_clear_full_rows_entire_board() {
        let mut board = Board::new(4, 4).unwrap();
        for y in 0..4 {
            fill_row(&mut board, y, Color::Red);
        }
        assert_eq!(board.clear_full_rows(), 4);
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_resets_every_cell() {
        let mut board = Board::new(10, 20).unwrap();
        fill_row(&mut board, 10, Color::Red);
        board.clear();
        assert!(board.is_empty());
    }
}

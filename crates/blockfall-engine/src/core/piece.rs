use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::DefinitionError;

/// Number of cells every piece occupies.
pub const CELLS_PER_PIECE: usize = 4;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Palette color of the standard piece of this kind.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
            PieceKind::O => Color::Yellow,
            PieceKind::S => Color::Green,
            PieceKind::T => Color::Magenta,
            PieceKind::Z => Color::Red,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Fixed palette of cell colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Magenta,
    Red,
}

impl Color {
    /// Returns the color as an `(r, g, b)` triple.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Blue => (0, 0, 255),
            Color::Orange => (255, 165, 0),
            Color::Yellow => (255, 255, 0),
            Color::Green => (0, 255, 0),
            Color::Magenta => (255, 0, 255),
            Color::Red => (255, 0, 0),
        }
    }
}

/// One rotation state of a piece: a rectangular occupancy mask.
///
/// Layouts are parsed from rows of `'0'` (empty) and `'1'` (occupied)
/// characters. The top-left character is offset `(0, 0)`; x grows to the
/// right and y grows downward, matching board coordinates.
///
/// # Example
///
/// ```
/// use blockfall_engine::RotationLayout;
///
/// let layout = RotationLayout::parse(&["010", "111", "000"]).unwrap();
/// assert_eq!((layout.width(), layout.height()), (3, 3));
/// assert!(layout.is_occupied(1, 0));
/// assert!(!layout.is_occupied(0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationLayout {
    width: usize,
    height: usize,
    cells: ArrayVec<(usize, usize), CELLS_PER_PIECE>,
}

impl RotationLayout {
    pub fn parse(rows: &[&str]) -> Result<Self, DefinitionError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(DefinitionError::EmptyLayout);
        }

        let mut found = 0;
        for (y, row) in rows.iter().enumerate() {
            let mut row_width = 0;
            for cell in row.chars() {
                match cell {
                    '0' => {}
                    '1' => found += 1,
                    cell => return Err(DefinitionError::InvalidCell { cell }),
                }
                row_width += 1;
            }
            if row_width != width {
                return Err(DefinitionError::RaggedLayout {
                    row: y,
                    expected: width,
                    found: row_width,
                });
            }
        }
        if found != CELLS_PER_PIECE {
            return Err(DefinitionError::CellCount { found });
        }

        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, cell)| cell == '1')
                    .map(move |(x, _)| (x, y))
            })
            .collect();

        Ok(Self {
            width,
            height: rows.len(),
            cells,
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

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells.contains(&(x, y))
    }

    /// Occupied `(dx, dy)` offsets in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().copied()
    }
}

/// Immutable shape definition shared by every spawned instance of a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDefinition {
    kind: PieceKind,
    color: Color,
    layouts: Vec<RotationLayout>,
}

impl PieceDefinition {
    pub fn new(
        kind: PieceKind,
        color: Color,
        layouts: Vec<RotationLayout>,
    ) -> Result<Self, DefinitionError> {
        if layouts.is_empty() {
            return Err(DefinitionError::NoLayouts { kind });
        }
        Ok(Self {
            kind,
            color,
            layouts,
        })
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn layouts(&self) -> &[RotationLayout] {
        &self.layouts
    }

    #[must_use]
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    /// Returns the layout for `rotation`, wrapping modulo the layout count.
    #[must_use]
    pub fn layout(&self, rotation: usize) -> &RotationLayout {
        &self.layouts[rotation % self.layouts.len()]
    }

    /// Widest layout of this piece.
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.layouts
            .iter()
            .map(RotationLayout::width)
            .max()
            .unwrap_or(0)
    }
}

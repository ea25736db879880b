use std::sync::Arc;

use arrayvec::ArrayVec;

use super::piece::{CELLS_PER_PIECE, Color, PieceDefinition, PieceKind, RotationLayout};

/// Board-space cells covered by a piece.
pub type PieceCells = ArrayVec<(i32, i32), CELLS_PER_PIECE>;

/// A spawned piece: a shared definition plus position and rotation.
///
/// Movement methods return new values instead of mutating in place; the
/// session only commits a candidate after it passes the validity check.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, PieceCatalog, PieceKind};
///
/// let catalog = PieceCatalog::standard();
/// let t = ActivePiece::spawn(catalog.get(PieceKind::T).unwrap().clone(), 10);
/// assert_eq!(t.position(), (4, 0));
///
/// let moved = t.translated(1, 2);
/// assert_eq!(moved.position(), (5, 2));
/// assert_eq!(t.rotate_index(-1), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    definition: Arc<PieceDefinition>,
    x: i32,
    y: i32,
    rotation: usize,
}

impl ActivePiece {
    /// Spawns `definition` horizontally centered at the top of a board
    /// `board_width` columns wide, in rotation 0.
    #[must_use]
    pub fn spawn(definition: Arc<PieceDefinition>, board_width: usize) -> Self {
        let x = to_coord(board_width / 2) - to_coord(definition.layout(0).width() / 2);
        Self {
            definition,
            x,
            y: 0,
            rotation: 0,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &Arc<PieceDefinition> {
        &self.definition
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.definition.kind()
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.definition.color()
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn layout(&self) -> &RotationLayout {
        self.definition.layout(self.rotation)
    }

    /// Cells covered at the current rotation.
    #[must_use]
    pub fn occupied_cells(&self) -> PieceCells {
        self.occupied_cells_at(self.rotation)
    }

    /// Cells that would be covered at `rotation` without moving.
    #[must_use]
    pub fn occupied_cells_at(&self, rotation: usize) -> PieceCells {
        self.definition
            .layout(rotation)
            .cells()
            .map(|(dx, dy)| (self.x + to_coord(dx), self.y + to_coord(dy)))
            .collect()
    }

    /// Rotation index reached after `steps` quarter turns.
    ///
    /// Positive steps rotate forward, negative steps backward; the result
    /// wraps modulo the definition's layout count.
    #[must_use]
    pub fn rotate_index(&self, steps: isize) -> usize {
        let count = self.definition.layout_count();
        let offset = steps.rem_euclid(isize::try_from(count).unwrap_or(isize::MAX));
        (self.rotation + offset.unsigned_abs()) % count
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            x: self.x + dx,
            y: self.y + dy,
            rotation: self.rotation,
        }
    }

    #[must_use]
    pub fn with_rotation(&self, rotation: usize) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            x: self.x,
            y: self.y,
            rotation: rotation % self.definition.layout_count(),
        }
    }
}

/// Converts a board or layout size to a coordinate, saturating at `i32::MAX`.
fn to_coord(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use crate::PieceCatalog;

    use super::*;

    fn spawn(kind: PieceKind) -> ActivePiece {
        let catalog = PieceCatalog::standard();
        ActivePiece::spawn(Arc::clone(catalog.get(kind).unwrap()), 10)
    }

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(spawn(PieceKind::I).position(), (3, 0));
        for kind in [
            PieceKind::J,
            PieceKind::L,
            PieceKind::O,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ] {
            assert_eq!(spawn(kind).position(), (4, 0), "{kind:?}");
        }
        assert_eq!(spawn(PieceKind::T).rotation(), 0);
    }

    #[test]
    fn test_spawn_on_huge_width_does_not_wrap() {
        let catalog = PieceCatalog::standard();
        let t = ActivePiece::spawn(Arc::clone(catalog.get(PieceKind::T).unwrap()), usize::MAX);
        assert_eq!(t.x(), i32::MAX - 1);
    }

    #[test]
    fn test_occupied_cells_follow_position() {
        let t = spawn(PieceKind::T).translated(-4, 5);
        let cells: Vec<_> = t.occupied_cells().into_iter().collect();
        assert_eq!(cells, [(1, 5), (0, 6), (1, 6), (2, 6)]);
    }

    #[test]
    fn test_occupied_cells_at_other_rotation() {
        let i = spawn(PieceKind::I);
        let vertical: Vec<_> = i.occupied_cells_at(1).into_iter().collect();
        assert_eq!(vertical, [(5, 0), (5, 1), (5, 2), (5, 3)]);
        assert_eq!(i.rotation(), 0);
    }

    #[test]
    fn test_rotate_index_wraps_both_directions() {
        let t = spawn(PieceKind::T);
        assert_eq!(t.rotate_index(1), 1);
        assert_eq!(t.rotate_index(-1), 3);
        assert_eq!(t.rotate_index(4), 0);
        assert_eq!(t.rotate_index(-5), 3);

        let o = spawn(PieceKind::O);
        assert_eq!(o.rotate_index(1), 0);
        assert_eq!(o.rotate_index(-1), 0);
    }

    #[test]
    fn test_full_rotation_cycle_restores_index() {
        for kind in PieceKind::ALL {
            let start = spawn(kind);
            let mut piece = start.clone();
            for _ in 0..start.definition().layout_count() {
                piece = piece.with_rotation(piece.rotate_index(1));
            }
            assert_eq!(piece.rotation(), start.rotation(), "{kind:?}");
            assert_eq!(piece, start);
        }
    }
}

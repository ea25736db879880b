use std::iter;

use blockfall_engine::{ActivePiece, Board, PieceCells};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{Tile, TileDisplay};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<PieceCells>,
    active_piece: Option<&'a ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            active_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, cells: PieceCells) -> Self {
        Self {
            ghost: Some(cells),
            ..self
        }
    }

    pub fn active_piece(self, piece: &'a ActivePiece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::to_u16(self.board.width())
            .saturating_mul(TileDisplay::width())
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        super::to_u16(self.board.height())
            .saturating_mul(TileDisplay::height())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    /// Board tiles row by row, with the ghost and active piece overlaid.
    fn tiles(&self) -> Vec<Tile> {
        let width = self.board.width();
        let mut tiles: Vec<Tile> = self
            .board
            .rows()
            .flatten()
            .copied()
            .map(Tile::from)
            .collect();
        let mut overlay = |(x, y): (i32, i32), tile: Tile, only_empty: bool| {
            // Cells above the board are not drawn.
            if !self.board.contains(x, y) {
                return;
            }
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                return;
            };
            let slot = &mut tiles[y * width + x];
            if !only_empty || *slot == Tile::Empty {
                *slot = tile;
            }
        };

        if let Some(ghost) = &self.ghost {
            for &cell in ghost {
                overlay(cell, Tile::Ghost, true);
            }
        }
        if let Some(piece) = self.active_piece {
            for cell in piece.occupied_cells() {
                overlay(cell, Tile::Filled(piece.color()), false);
            }
        }
        tiles
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.board.width()).map(|_| Constraint::Length(TileDisplay::width()));
        let row_constraints =
            (0..self.board.height()).map(|_| Constraint::Length(TileDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .flat_map(|row| row.layout_vec(&horizontal));

        for (grid_cell, tile) in iter::zip(grid_cells, self.tiles()) {
            TileDisplay::from_tile(tile, true).render(grid_cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Color, GameSession, MAX_BOARD_SIDE, PieceKind, ScriptedPieceSource};

    use super::*;

    #[test]
    fn test_tiles_overlay_pieces() {
        let mut session = GameSession::with_defaults(ScriptedPieceSource::new([PieceKind::O]));
        session.hard_drop();
        let display = BoardDisplay::new(session.board())
            .ghost(session.ghost_cells())
            .active_piece(session.active_piece());
        let tiles = display.tiles();

        // Locked O on the floor, active O at the top, ghost resting on the locked one.
        assert_eq!(tiles[19 * 10 + 5], Tile::Filled(Color::Yellow));
        assert_eq!(tiles[5], Tile::Filled(Color::Yellow));
        assert_eq!(tiles[17 * 10 + 5], Tile::Ghost);
        assert_eq!(tiles[10 * 10], Tile::Empty);
    }

    #[test]
    fn test_size_includes_border() {
        let session = GameSession::with_defaults(ScriptedPieceSource::new([PieceKind::T]));
        let display = BoardDisplay::new(session.board()).block(BlockWidget::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 22);
    }

    #[test]
    fn test_size_of_largest_board_fits() {
        let board = Board::new(MAX_BOARD_SIDE, MAX_BOARD_SIDE).unwrap();
        let display = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!(display.width(), 2050);
        assert_eq!(display.height(), 1026);
    }
}

use blockfall_engine::PieceDefinition;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{Tile, TileDisplay};

/// Preview area size in cells; fits every standard piece at rotation 0.
const PREVIEW_SIZE: (u16, u16) = (4, 2);

/// Shows a piece at rotation 0, cropped to its occupied cells.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a PieceDefinition>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: &'a PieceDefinition) -> Self {
        Self {
            piece: Some(piece),
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
        let cols = self.bounds().map_or(0, |b| b.2).max(PREVIEW_SIZE.0);
        cols
            .saturating_mul(TileDisplay::width())
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        let rows = self.bounds().map_or(0, |b| b.3).max(PREVIEW_SIZE.1);
        rows
            .saturating_mul(TileDisplay::height())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    /// Returns `(min_x, min_y, width, height)` of the occupied cells.
    fn bounds(&self) -> Option<(usize, usize, u16, u16)> {
        let layout = self.piece?.layout(0);
        let min_x = layout.cells().map(|(x, _)| x).min()?;
        let max_x = layout.cells().map(|(x, _)| x).max()?;
        let min_y = layout.cells().map(|(_, y)| y).min()?;
        let max_y = layout.cells().map(|(_, y)| y).max()?;
        Some((
            min_x,
            min_y,
            super::to_u16(max_x - min_x + 1),
            super::to_u16(max_y - min_y + 1),
        ))
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_tile = TileDisplay::from_tile(Tile::Empty, false);
        Widget::render(&empty_tile, area, buf);

        let (Some(piece), Some((min_x, min_y, cols, rows))) = (self.piece, self.bounds()) else {
            return;
        };
        let piece_area = area.centered(
            Constraint::Length(cols.saturating_mul(TileDisplay::width())),
            Constraint::Length(rows.saturating_mul(TileDisplay::height())),
        );

        let col_constraints = (0..cols).map(|_| Constraint::Length(TileDisplay::width()));
        let row_constraints = (0..rows).map(|_| Constraint::Length(TileDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_tile = TileDisplay::from_tile(Tile::Filled(piece.color()), false);
        let layout = piece.layout(0);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if layout.is_occupied(min_x + x, min_y + y) {
                    Widget::render(&occupied_tile, grid_cell, buf);
                }
            }
        }
    }
}

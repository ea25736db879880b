use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Full play view: statistics, board and next-piece preview side by side,
/// with a banner over the board once the game is over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

struct Panels<'a> {
    board: BoardDisplay<'a>,
    next: PieceDisplay<'a>,
    stats: SessionStatsDisplay<'a>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn height(&self) -> u16 {
        let panels = self.panels();
        panels
            .board
            .height()
            .max(panels.stats.height())
            .max(panels.next.height())
    }

    fn panels(&self) -> Panels<'a> {
        let session = self.session;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match session.state() {
            SessionState::Falling => color::WHITE,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let board = {
            let widget = BoardDisplay::new(session.board()).block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            if session.is_game_over() {
                widget
            } else if self.show_ghost {
                widget
                    .ghost(session.ghost_cells())
                    .active_piece(session.active_piece())
            } else {
                widget.active_piece(session.active_piece())
            }
        };
        let next = PieceDisplay::new()
            .piece(session.next_piece())
            .block(panel("NEXT"));
        let stats = SessionStatsDisplay::new(session).block(panel("STATS"));

        Panels { board, next, stats }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let Panels { board, next, stats } = self.panels();

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next.height())]).areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        next.render(next_area, buf);

        if self.session.is_game_over() {
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::from(vec![
                Line::from("GAME OVER!!"),
                Line::from("Press R to restart"),
            ])
            .style(style::GAME_OVER)
            .centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(4));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PieceKind, ScriptedPieceSource};

    use super::*;

    fn render(session: &GameSession) -> String {
        let display = SessionDisplay::new(session, true);
        let area = Rect::new(0, 0, 80, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_panels() {
        let session = GameSession::with_defaults(ScriptedPieceSource::new([PieceKind::T]));
        let screen = render(&session);
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("STATS"));
        assert!(screen.contains("SCORE:"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut session = GameSession::with_defaults(ScriptedPieceSource::new([PieceKind::O]));
        while !session.is_game_over() {
            session.hard_drop();
        }
        let screen = render(&session);
        assert!(screen.contains("GAME OVER!!"));
        assert!(screen.contains("Press R to restart"));
    }
}

use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys that trigger an action, and the action's label.
pub type KeyBinding = (&'static [&'static str], &'static str);

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const LABEL_STYLE: Style = Style::new().fg(Color::White);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

/// One-line help bar such as `←/→ Move | Space Hard Drop`.
#[derive(Debug)]
pub struct KeyBindingDisplay {
    bindings: &'static [KeyBinding],
}

impl KeyBindingDisplay {
    pub fn new(bindings: &'static [KeyBinding]) -> Self {
        Self { bindings }
    }

    fn line(&self) -> Line<'static> {
        let spans = self
            .bindings
            .iter()
            .enumerate()
            .flat_map(|(i, &(keys, label))| {
                let separator = (i > 0).then(|| Span::styled(" | ", SEPARATOR_STYLE));
                separator.into_iter().chain([
                    Span::styled(keys.join("/"), KEY_STYLE),
                    Span::raw(" "),
                    Span::styled(label, LABEL_STYLE),
                ])
            });
        Line::from_iter(spans).centered()
    }
}

impl Widget for KeyBindingDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel;
use crate::tui::app::{App, Focus};

pub struct FilterBarWidget;

impl FilterBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let focused = app.focus == Focus::Filter;
        let query = app.list_view.query();

        let line = if query.is_empty() && !focused {
            Line::from(Span::styled("Filter by name (Tab to focus)", theme.input_placeholder))
        } else {
            let mut spans = vec![Span::styled(query, Style::default().fg(theme.input_text))];
            if focused {
                spans.push(Span::styled("█", theme.input_active));
            }
            Line::from(spans)
        };

        f.render_widget(Paragraph::new(line).block(panel("Filter", focused, theme)), area);
    }
}

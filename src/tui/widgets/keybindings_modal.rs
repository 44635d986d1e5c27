use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{centered_rect, panel};
use crate::tui::App;

pub struct KeybindingsModalWidget;

impl KeybindingsModalWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let entries = app.config.keybindings.entries();
        let height = entries.len() as u16 + 7;
        let popup_area = centered_rect(44, height, area);
        f.render_widget(Clear, popup_area);

        let block = panel("Keybindings", true, theme)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme.popup_border))
            .style(Style::default().fg(theme.primary_foreground).bg(theme.popup_background));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line> = entries
            .into_iter()
            .map(|(action, key)| {
                Line::from(vec![
                    Span::styled(format!("{:<12}", action.replace('_', " ")), bold),
                    Span::raw(key.to_string()),
                ])
            })
            .collect();
        lines.push(Line::from(vec![Span::styled(format!("{:<12}", "sort"), bold), Span::raw("1-5 (column number)")]));
        lines.push(Line::from(vec![Span::styled(format!("{:<12}", "confirm"), bold), Span::raw("y / n")]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Click a column header to sort. Esc closes.",
            Style::default().fg(theme.help_text),
        )));
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
    }
}

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{input_line, panel};
use crate::catalog::format_price;
use crate::tui::app::{App, Focus};

/// Price check by product code.
pub struct LookupWidget;

impl LookupWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let focused = app.focus == Focus::Lookup;

        let mut lines = vec![input_line("Code", &app.lookup_input, focused, false, theme), Line::from("")];

        match &app.lookup_result {
            Some(quote) => {
                let name = quote.name.as_deref().unwrap_or("(unnamed)");
                lines.push(Line::from(Span::styled(name, Style::default().fg(theme.primary_foreground))));
                if let Some(code) = &quote.code {
                    lines.push(Line::from(Span::styled(
                        format!("Code: {}", code),
                        Style::default().fg(theme.secondary_foreground),
                    )));
                }
                lines.push(Line::from(Span::styled(format_price(quote.price), theme.lookup_price)));
            }
            None => {
                lines.push(Line::from(Span::styled("Enter a code and press Enter", theme.input_placeholder)));
            }
        }

        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(panel("Price lookup", focused, theme)),
            area,
        );
    }
}

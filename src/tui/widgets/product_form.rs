use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{input_line, panel};
use crate::forms::ProductField;
use crate::tui::app::{App, Focus};

pub struct ProductFormWidget;

impl ProductFormWidget {
    // Five fields, a hint line and the borders.
    pub const HEIGHT: u16 = 8;

    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let focused = app.focus == Focus::Form;
        let title = match &app.product_form.editing {
            Some(_) => "Edit product",
            None => "New product",
        };

        let mut lines: Vec<Line> = ProductField::ALL
            .iter()
            .enumerate()
            .map(|(i, &field)| {
                let active = focused && app.form_field == i;
                input_line(field.label(), app.product_form.field(field), active, false, theme)
            })
            .collect();

        let hint = if focused {
            "Enter: save | Up/Down: field | Esc: cancel"
        } else {
            "Tab to focus"
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(theme.help_text))));

        f.render_widget(Paragraph::new(lines).block(panel(title, focused, theme)), area);
    }
}

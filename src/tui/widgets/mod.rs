pub mod credentials_form;
pub mod filter_bar;
pub mod keybindings_modal;
pub mod logs;
pub mod lookup;
pub mod product_form;
pub mod product_table;
pub mod status_bar;
pub mod toasts;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders},
};

use super::theme::AppTheme;

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Bordered block whose border lights up when the panel has focus.
pub fn panel<'a>(title: &'a str, focused: bool, theme: &AppTheme) -> Block<'a> {
    let border = if focused { theme.border_focused } else { theme.border_primary };
    Block::default()
        .title(Span::styled(title, theme.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// `label: value` with a cursor block on the active field.
pub fn input_line<'a>(label: &'a str, value: &'a str, active: bool, masked: bool, theme: &AppTheme) -> Line<'a> {
    let label_style = if active { theme.input_active } else { Style::default().fg(theme.secondary_foreground) };
    let shown = if masked { "*".repeat(value.chars().count()) } else { value.to_string() };
    let mut spans = vec![
        Span::styled(format!("{:<9}", format!("{}:", label)), label_style),
        Span::styled(shown, Style::default().fg(theme.input_text).bg(theme.input_background)),
    ];
    if active {
        spans.push(Span::styled("█", theme.input_active));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clipped_to_the_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }
}

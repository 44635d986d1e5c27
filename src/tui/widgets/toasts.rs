use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::toast::ToastLevel;
use crate::tui::app::App;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

/// Stacks live toasts in the top-right corner, newest at the bottom.
pub struct ToastsWidget;

impl ToastsWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let mut y = area.y;
        for toast in app.toasts.iter() {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let (color, label) = match toast.level {
                ToastLevel::Success => (theme.toast_success, "OK"),
                ToastLevel::Error => (theme.toast_error, "Error"),
                ToastLevel::Info => (theme.toast_info, "Info"),
            };
            let text_width = toast.message.width().min(TOAST_WIDTH as usize) as u16;
            let width = (text_width + 4).clamp(16, TOAST_WIDTH).min(area.width);
            let toast_area = Rect { x: area.x + area.width - width, y, width, height: TOAST_HEIGHT };

            f.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)))
                .style(Style::default().bg(theme.popup_background));
            f.render_widget(
                Paragraph::new(toast.message.as_str())
                    .style(Style::default().fg(theme.primary_foreground))
                    .wrap(Wrap { trim: true })
                    .block(block),
                toast_area,
            );
            y += TOAST_HEIGHT;
        }
    }
}

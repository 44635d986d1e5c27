use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{centered_rect, input_line, panel};
use crate::session::Route;
use crate::tui::app::App;

/// Login and register screens share one form: email and password.
pub struct CredentialsFormWidget;

impl CredentialsFormWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let registering = app.route == Route::Register;
        let title = if registering { "Create account" } else { "Log in" };

        let popup_area = centered_rect(50, 9, area);
        f.render_widget(Clear, popup_area);
        let block = panel(title, true, theme);
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let hint = if registering {
            "Enter: register | Esc: back to login | Tab: switch field".to_string()
        } else {
            format!("Enter: log in | {}: create account | Esc: quit", app.config.keybindings.register)
        };

        let lines = vec![
            Line::from(""),
            input_line("Email", &app.credentials.email, app.credentials_field == 0, false, theme),
            input_line("Password", &app.credentials.password, app.credentials_field == 1, true, theme),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(theme.help_text))),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
    }
}

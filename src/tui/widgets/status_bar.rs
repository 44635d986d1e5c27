use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::session::Route;
use crate::tui::app::{App, Focus, InputMode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        let status_bar_style = Style::default()
            .fg(theme.status_bar_foreground)
            .bg(theme.status_bar_background);

        let status_bar_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let route_name = match app.route {
            Route::Checking => "Checking",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Verifier => "Verifier",
        };

        let mut spans_left = vec![
            Span::styled(" Price Verifier | ", status_bar_style),
            Span::styled(
                route_name,
                Style::default().fg(theme.status_bar_route_fg).bg(theme.status_bar_background).bold(),
            ),
        ];

        if app.route == Route::Verifier {
            let (mode_label, mode_bg) = match app.input_mode {
                InputMode::Normal => (focus_label(app.focus), theme.status_bar_mode_normal_bg),
                InputMode::ConfirmingDelete => ("Confirm delete", theme.status_bar_mode_confirm_bg),
                InputMode::GoToPage => ("Go to page", theme.status_bar_mode_goto_bg),
            };
            spans_left.push(Span::styled(" | ", status_bar_style));
            spans_left.push(Span::styled(
                format!(" {} ", mode_label),
                Style::default().fg(theme.popup_background).bg(mode_bg).bold(),
            ));
            spans_left.push(Span::styled(
                format!(" | Products: {} ", app.list_view.collection().len()),
                status_bar_style,
            ));
        }

        f.render_widget(Paragraph::new(Line::from(spans_left)).style(status_bar_style), status_bar_layout[0]);

        let mut spans_right = vec![];
        if let Some(email) = &app.session.user_email {
            spans_right.push(Span::styled(format!("{} | ", email), status_bar_style));
        }
        spans_right.push(Span::from(Local::now().format("%H:%M:%S").to_string()));
        spans_right.push(Span::raw(" "));

        f.render_widget(
            Paragraph::new(Line::from(spans_right))
                .style(status_bar_style)
                .alignment(Alignment::Right),
            status_bar_layout[1],
        );
    }
}

fn focus_label(focus: Focus) -> &'static str {
    match focus {
        Focus::Table => "Table",
        Focus::Filter => "Filter",
        Focus::Form => "Form",
        Focus::Lookup => "Lookup",
    }
}

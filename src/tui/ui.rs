use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use super::widgets::{
    centered_rect,
    credentials_form::CredentialsFormWidget,
    filter_bar::FilterBarWidget,
    keybindings_modal::KeybindingsModalWidget,
    logs::LogsWidget,
    lookup::LookupWidget,
    product_form::ProductFormWidget,
    product_table::ProductTableWidget,
    status_bar::StatusBarWidget,
    toasts::ToastsWidget,
};
use crate::session::Route;

pub fn ui(f: &mut Frame, app: &mut App) {
    let main_layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main content
        ])
        .split(f.size());

    StatusBarWidget::render(f, app, main_layout_chunks[0]);
    let main_content_area = main_layout_chunks[1];

    if app.show_logs {
        LogsWidget::render(f, app, main_content_area);
    } else {
        match app.route {
            Route::Checking => render_checking(f, app, main_content_area),
            Route::Login | Route::Register => CredentialsFormWidget::render(f, app, main_content_area),
            Route::Verifier => render_verifier(f, app, main_content_area),
        }
    }

    if app.show_help {
        KeybindingsModalWidget::render(f, app, f.size());
    }
    // Toasts sit above everything else.
    ToastsWidget::render(f, app, main_content_area);
}

fn render_checking(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let theme = &app.theme;
    let popup = centered_rect(40, 5, area);
    let paragraph = Paragraph::new("Checking session...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.secondary_foreground))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border_primary)));
    f.render_widget(paragraph, popup);
}

fn render_verifier(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter
            Constraint::Min(5),    // Product table with its footer
        ])
        .split(columns[0]);
    FilterBarWidget::render(f, app, left[0]);
    ProductTableWidget::render(f, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ProductFormWidget::HEIGHT),
            Constraint::Min(6), // Price lookup
        ])
        .split(columns[1]);
    ProductFormWidget::render(f, app, right[0]);
    LookupWidget::render(f, app, right[1]);
}

// src/tui/events.rs

use anyhow::Result;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::{Duration, Instant};

use super::app::{App, AppEvent, Focus, InputMode};
use super::ui::ui;
use crate::catalog::Column;
use crate::session::Route;

// Redraw often enough for toasts to expire on time.
const FRAME_TICK: Duration = Duration::from_millis(250);

pub async fn run_app_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    let mut event_receiver = match app.event_receiver.take() {
        Some(receiver) => receiver,
        None => anyhow::bail!("App event receiver already taken"),
    };
    let mut crossterm_events = EventStream::new();
    let refresh_interval = Duration::from_millis(app.config.interface.refresh_interval_ms);
    let mut last_refresh = Instant::now();

    // Startup probe; nothing but the checking screen until it answers.
    app.send(AppEvent::CheckSession);

    loop {
        app.drain_logs();
        app.toasts.prune(Instant::now());
        terminal.draw(|f| ui(f, &mut app))?;

        tokio::select! {
            Some(event) = event_receiver.recv() => {
                app.handle_app_event(event).await;
            }

            Some(Ok(event)) = crossterm_events.next() => {
                match event {
                    CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => on_key(&mut app, key),
                    CrosstermEvent::Mouse(mouse) => on_mouse_event(&mut app, mouse),
                    _ => {}
                }
            }

            _ = tokio::time::sleep(FRAME_TICK) => {
                if app.route == Route::Verifier && last_refresh.elapsed() >= refresh_interval {
                    app.send(AppEvent::FetchProducts);
                    last_refresh = Instant::now();
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn on_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.route != Route::Verifier {
        return;
    }
    match mouse_event.kind {
        MouseEventKind::ScrollUp if app.show_logs => app.scroll_logs_up(),
        MouseEventKind::ScrollDown if app.show_logs => app.scroll_logs_down(),
        MouseEventKind::ScrollUp => app.select_previous_row(),
        MouseEventKind::ScrollDown => app.select_next_row(),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(column) = app.header_hitboxes.column_at(mouse_event.column, mouse_event.row) {
                app.focus = Focus::Table;
                app.toggle_sort(column);
            }
        }
        _ => {}
    }
}

pub fn on_key(app: &mut App, key_event: KeyEvent) {
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    if app.show_help {
        if app.keymap.matches("help", &key_event) || key_event.code == KeyCode::Esc {
            app.show_help = false;
        }
        return;
    }
    if app.keymap.matches("logs", &key_event) {
        app.show_logs = !app.show_logs;
        return;
    }
    if app.show_logs {
        handle_logs_key(app, key_event);
        return;
    }

    match app.route {
        Route::Checking => {
            if app.keymap.matches("quit", &key_event) {
                app.should_quit = true;
            }
        }
        Route::Login | Route::Register => handle_credentials_key(app, key_event),
        Route::Verifier => match app.input_mode {
            InputMode::ConfirmingDelete => handle_confirm_delete_key(app, key_event),
            InputMode::GoToPage => handle_go_to_page_key(app, key_event),
            InputMode::Normal => handle_verifier_key(app, key_event),
        },
    }
}

fn handle_logs_key(app: &mut App, key_event: KeyEvent) {
    if key_event.code == KeyCode::Esc {
        app.show_logs = false;
    } else if app.keymap.matches("up", &key_event) {
        app.scroll_logs_up();
    } else if app.keymap.matches("down", &key_event) {
        app.scroll_logs_down();
    }
}

fn handle_credentials_key(app: &mut App, key_event: KeyEvent) {
    let on_register = app.route == Route::Register;
    match key_event.code {
        KeyCode::Enter => app.send(if on_register { AppEvent::Register } else { AppEvent::Login }),
        KeyCode::Esc if on_register => app.navigate(Route::Login),
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
            app.credentials_field = (app.credentials_field + 1) % 2;
        }
        _ if !on_register && app.keymap.matches("register", &key_event) => {
            app.credentials.clear();
            app.navigate(Route::Register);
        }
        KeyCode::Backspace => {
            if let Some(field) = app.credentials.field_mut(app.credentials_field) {
                field.pop();
            }
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(field) = app.credentials.field_mut(app.credentials_field) {
                field.push(c);
            }
        }
        _ => {}
    }
}

fn handle_verifier_key(app: &mut App, key_event: KeyEvent) {
    if app.keymap.matches("next_focus", &key_event) {
        app.focus = app.focus.next();
        return;
    }
    if app.keymap.matches("prev_focus", &key_event) {
        app.focus = app.focus.previous();
        return;
    }
    match app.focus {
        Focus::Table => handle_table_key(app, key_event),
        Focus::Filter => handle_filter_key(app, key_event),
        Focus::Form => handle_form_key(app, key_event),
        Focus::Lookup => handle_lookup_key(app, key_event),
    }
}

fn handle_table_key(app: &mut App, key_event: KeyEvent) {
    if app.keymap.matches("quit", &key_event) {
        app.should_quit = true;
    } else if app.keymap.matches("help", &key_event) {
        app.show_help = true;
    } else if app.keymap.matches("down", &key_event) || key_event.code == KeyCode::Char('j') {
        app.select_next_row();
    } else if app.keymap.matches("up", &key_event) || key_event.code == KeyCode::Char('k') {
        app.select_previous_row();
    } else if app.keymap.matches("prev_page", &key_event) {
        app.previous_page();
    } else if app.keymap.matches("next_page", &key_event) {
        app.next_page();
    } else if app.keymap.matches("go_to_page", &key_event) {
        app.page_input.clear();
        app.input_mode = InputMode::GoToPage;
    } else if app.keymap.matches("edit", &key_event) {
        app.edit_selected();
    } else if app.keymap.matches("delete", &key_event) {
        app.request_delete();
    } else if app.keymap.matches("refresh", &key_event) {
        app.send(AppEvent::FetchProducts);
    } else if app.keymap.matches("logout", &key_event) {
        app.send(AppEvent::Logout);
    } else if let KeyCode::Char(c) = key_event.code {
        // Number keys pick a column by its position in the table.
        if let Some(column) = c.to_digit(10).and_then(|d| Column::from_index(d as usize)) {
            app.toggle_sort(column);
        }
    }
}

fn handle_filter_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Enter | KeyCode::Esc => app.focus = Focus::Table,
        KeyCode::Backspace => {
            let mut query = app.list_view.query().to_string();
            query.pop();
            app.set_query(query);
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut query = app.list_view.query().to_string();
            query.push(c);
            app.set_query(query);
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key_event: KeyEvent) {
    let field_count = crate::forms::ProductField::ALL.len();
    match key_event.code {
        KeyCode::Enter => app.send(AppEvent::SaveProduct),
        KeyCode::Esc => {
            app.product_form.clear();
            app.form_field = 0;
            app.focus = Focus::Table;
        }
        KeyCode::Down => app.form_field = (app.form_field + 1) % field_count,
        KeyCode::Up => app.form_field = (app.form_field + field_count - 1) % field_count,
        KeyCode::Backspace => {
            let field = app.current_form_field();
            app.product_form.field_mut(field).pop();
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            let field = app.current_form_field();
            app.product_form.field_mut(field).push(c);
        }
        _ => {}
    }
}

fn handle_lookup_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Enter => app.send(AppEvent::LookupPrice),
        KeyCode::Esc => app.focus = Focus::Table,
        KeyCode::Backspace => {
            app.lookup_input.pop();
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => app.lookup_input.push(c),
        _ => {}
    }
}

fn handle_confirm_delete_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(id) = app.pending_delete.take() {
                app.send(AppEvent::DeleteProduct(id));
            }
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_delete = None;
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn handle_go_to_page_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char(c) if c.is_ascii_digit() => app.page_input.push(c),
        KeyCode::Backspace => {
            app.page_input.pop();
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            match app.page_input.parse::<usize>() {
                Ok(n) => app.go_to_page(n),
                Err(_) => app.toasts.error("Enter a page number"),
            }
            app.page_input.clear();
        }
        KeyCode::Esc => {
            app.page_input.clear();
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductId;
    use crate::listview::SortDirection;
    use crate::tui::app::tests::{products, test_app};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            on_key(app, key(KeyCode::Char(c)));
        }
    }

    fn verifier_app() -> App {
        let mut app = test_app();
        app.session.probe_finished(true);
        app.route = Route::Verifier;
        app.list_view.set_collection(products(7));
        app.sync_selection();
        app
    }

    #[tokio::test]
    async fn number_keys_toggle_column_sort() {
        let mut app = verifier_app();
        on_key(&mut app, key(KeyCode::Char('5')));
        assert_eq!(app.list_view.sort_state().column, Column::Price);
        assert_eq!(app.list_view.sort_state().direction, SortDirection::Ascending);
        on_key(&mut app, key(KeyCode::Char('5')));
        assert_eq!(app.list_view.sort_state().direction, SortDirection::Descending);
        assert_eq!(app.selected_product().unwrap().id, ProductId::from("7"));
    }

    #[tokio::test]
    async fn typing_in_the_filter_returns_to_page_one() {
        let mut app = verifier_app();
        on_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.list_view.current_page(), 2);
        on_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Filter);
        type_text(&mut app, "item 0");
        assert_eq!(app.list_view.query(), "item 0");
        assert_eq!(app.list_view.current_page(), 1);
        on_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.list_view.query(), "item ");
    }

    #[tokio::test]
    async fn go_to_page_prompt_accepts_digits() {
        let mut app = verifier_app();
        on_key(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.input_mode, InputMode::GoToPage);
        type_text(&mut app, "2x");
        on_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.list_view.current_page(), 2);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mut app = verifier_app();
        let mut events = app.event_receiver.take().unwrap();
        on_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.input_mode, InputMode::ConfirmingDelete);
        on_key(&mut app, key(KeyCode::Char('n')));
        assert!(events.try_recv().is_err());

        on_key(&mut app, key(KeyCode::Char('d')));
        on_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(events.try_recv().unwrap(), AppEvent::DeleteProduct(ProductId::from("1")));
    }

    #[tokio::test]
    async fn edit_loads_the_selected_row_into_the_form() {
        let mut app = verifier_app();
        on_key(&mut app, key(KeyCode::Down));
        on_key(&mut app, key(KeyCode::Char('e')));
        assert_eq!(app.focus, Focus::Form);
        assert_eq!(app.product_form.editing, Some(ProductId::from("2")));
        assert_eq!(app.product_form.name, "Item 02");
        on_key(&mut app, key(KeyCode::Esc));
        assert!(!app.product_form.is_editing());
    }

    #[tokio::test]
    async fn login_screen_edits_fields_and_submits() {
        let mut app = test_app();
        let mut events = app.event_receiver.take().unwrap();
        app.session.probe_finished(false);
        app.route = Route::Login;
        type_text(&mut app, "ana@shop.mx");
        on_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret");
        on_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.credentials.email, "ana@shop.mx");
        assert_eq!(app.credentials.password, "secret");
        assert_eq!(events.try_recv().unwrap(), AppEvent::Login);
    }

    #[tokio::test]
    async fn q_is_text_on_the_login_screen() {
        let mut app = test_app();
        app.session.probe_finished(false);
        app.route = Route::Login;
        on_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.credentials.email, "q");
    }
}

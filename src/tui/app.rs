// src/tui/app.rs

use ratatui::layout::Rect;
use ratatui::widgets::{ListState, TableState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::api::CatalogClient;
use crate::catalog::{Column, PriceQuote, Product, ProductId};
use crate::config::Config;
use crate::errors::VerifierError;
use crate::forms::{CredentialsForm, ProductField, ProductForm};
use crate::listview::ListView;
use crate::session::{Route, Session};
use crate::toast::ToastQueue;

use super::keymap::KeyMap;
use super::theme::AppTheme;
use super::tracing_layer::UILogEntry;

/// Which panel of the verifier screen receives keystrokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Table,
    Filter,
    Form,
    Lookup,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Self::Table => Self::Filter,
            Self::Filter => Self::Form,
            Self::Form => Self::Lookup,
            Self::Lookup => Self::Table,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Table => Self::Lookup,
            Self::Filter => Self::Table,
            Self::Form => Self::Filter,
            Self::Lookup => Self::Form,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    ConfirmingDelete,
    GoToPage,
}

// Async work requested by key handlers and run by the event loop
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    CheckSession,
    Login,
    Register,
    Logout,
    FetchProducts,
    FetchProfile,
    SaveProduct,
    DeleteProduct(ProductId),
    LookupPrice,
}

/// Screen position of each clickable column header, filled in on render.
#[derive(Debug, Clone, Default)]
pub struct HeaderHitboxes {
    pub y: u16,
    pub columns: Vec<(Rect, Column)>,
}

impl HeaderHitboxes {
    pub fn column_at(&self, x: u16, y: u16) -> Option<Column> {
        if y != self.y {
            return None;
        }
        self.columns
            .iter()
            .find(|(rect, _)| x >= rect.x && x < rect.x + rect.width)
            .map(|(_, column)| *column)
    }
}

pub struct App {
    pub should_quit: bool,
    pub config: Arc<Config>,
    pub client: Arc<CatalogClient>,
    pub theme: Arc<AppTheme>,
    pub keymap: KeyMap,

    pub session: Session,
    pub route: Route,

    // Login and register screens
    pub credentials: CredentialsForm,
    pub credentials_field: usize,

    // Verifier screen
    pub list_view: ListView,
    pub table_state: TableState,
    pub header_hitboxes: HeaderHitboxes,
    pub product_form: ProductForm,
    pub form_field: usize,
    pub lookup_input: String,
    pub lookup_result: Option<PriceQuote>,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub page_input: String,
    pub pending_delete: Option<ProductId>,

    pub toasts: ToastQueue,
    pub show_help: bool,
    pub show_logs: bool,
    pub log_entries: Vec<UILogEntry>,
    pub log_list_state: ListState,
    pub log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>,

    pub event_sender: mpsc::UnboundedSender<AppEvent>,
    pub event_receiver: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        client: Arc<CatalogClient>,
        log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
        // Config::validate has already rejected a zero page size.
        let list_view = match config.list.page_size() {
            Ok(size) => ListView::new(size, config.list.reset_page_on_change),
            Err(_) => ListView::default(),
        };
        Self {
            should_quit: false,
            keymap: KeyMap::from_config(&config.keybindings),
            toasts: ToastQueue::new(Duration::from_millis(config.interface.toast_duration_ms)),
            config,
            client,
            theme: Arc::new(AppTheme::default()),
            session: Session::default(),
            route: Route::Checking,
            credentials: CredentialsForm::default(),
            credentials_field: 0,
            list_view,
            table_state: TableState::default(),
            header_hitboxes: HeaderHitboxes::default(),
            product_form: ProductForm::default(),
            form_field: 0,
            lookup_input: String::new(),
            lookup_result: None,
            focus: Focus::Table,
            input_mode: InputMode::Normal,
            page_input: String::new(),
            pending_delete: None,
            show_help: false,
            show_logs: false,
            log_entries: Vec::new(),
            log_list_state: ListState::default(),
            log_receiver: Some(log_receiver),
            event_sender: event_tx,
            event_receiver: Some(event_rx),
        }
    }

    pub fn send(&self, event: AppEvent) {
        if let Err(e) = self.event_sender.send(event) {
            error!("Event loop is gone, dropping {:?}", e.0);
        }
    }

    /// Moves to `requested`, applying the session guards.
    pub fn navigate(&mut self, requested: Route) {
        let route = self.session.navigate(requested);
        if route != self.route {
            debug!("Route {} -> {}", self.route.path(), route.path());
        }
        self.enter(route);
    }

    fn enter(&mut self, route: Route) {
        let entering_verifier = route == Route::Verifier && self.route != Route::Verifier;
        self.route = route;
        self.input_mode = InputMode::Normal;
        self.pending_delete = None;
        self.credentials_field = 0;
        if entering_verifier {
            self.focus = Focus::Table;
            self.send(AppEvent::FetchProducts);
            self.send(AppEvent::FetchProfile);
        }
    }

    pub async fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CheckSession => self.check_session().await,
            AppEvent::Login => self.login().await,
            AppEvent::Register => self.register().await,
            AppEvent::Logout => self.logout().await,
            AppEvent::FetchProducts => self.fetch_products().await,
            AppEvent::FetchProfile => self.fetch_profile().await,
            AppEvent::SaveProduct => self.save_product().await,
            AppEvent::DeleteProduct(id) => self.delete_product(id).await,
            AppEvent::LookupPrice => self.lookup_price().await,
        }
    }

    pub async fn check_session(&mut self) {
        let ok = self.client.check_session().await;
        let route = self.session.probe_finished(ok);
        self.enter(route);
    }

    pub async fn login(&mut self) {
        let credentials = match self.credentials.validate() {
            Ok(c) => c,
            Err(e) => return self.toasts.error(e.user_message()),
        };
        match self.client.login(&credentials).await {
            Ok(()) => {
                self.session.user_email = Some(credentials.email);
                self.credentials.clear();
                let route = self.session.logged_in();
                self.enter(route);
            }
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    pub async fn register(&mut self) {
        let credentials = match self.credentials.validate() {
            Ok(c) => c,
            Err(e) => return self.toasts.error(e.user_message()),
        };
        match self.client.register(&credentials).await {
            Ok(()) => {
                self.toasts.success("User registered");
                self.credentials.clear();
                self.navigate(Route::Login);
            }
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    pub async fn logout(&mut self) {
        if let Err(e) = self.client.logout().await {
            error!("Logout request failed: {}", e);
        }
        self.end_session();
        self.toasts.info("Session closed");
    }

    fn end_session(&mut self) {
        let route = self.session.logged_out();
        self.list_view.set_collection(Vec::new());
        self.product_form.clear();
        self.lookup_result = None;
        self.table_state.select(None);
        self.enter(route);
    }

    fn handle_unauthorized(&mut self) {
        info!("Session expired, returning to login");
        self.end_session();
        self.toasts.error("Session expired, please log in again");
    }

    pub async fn fetch_products(&mut self) {
        if !self.session.logged_in {
            return;
        }
        match self.client.list_products().await {
            Ok(products) => {
                self.list_view.set_collection(products);
                self.sync_selection();
            }
            Err(VerifierError::Unauthorized) => self.handle_unauthorized(),
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    pub async fn fetch_profile(&mut self) {
        match self.client.profile().await {
            Ok(profile) => self.session.user_email = Some(profile.email),
            Err(VerifierError::Unauthorized) => self.handle_unauthorized(),
            // Cosmetic only; the status bar falls back to the login email.
            Err(e) => debug!("Profile unavailable: {}", e),
        }
    }

    pub async fn save_product(&mut self) {
        let payload = match self.product_form.validate() {
            Ok(p) => p,
            Err(e) => return self.toasts.error(e.user_message()),
        };
        let result = match &self.product_form.editing {
            Some(id) => self.client.update_product(id, &payload).await,
            None => self.client.create_product(&payload).await,
        };
        match result {
            Ok(()) => {
                let message = if self.product_form.is_editing() { "Product updated" } else { "Product added" };
                self.toasts.success(message);
                self.product_form.clear();
                self.form_field = 0;
                self.fetch_products().await;
            }
            Err(VerifierError::Unauthorized) => self.handle_unauthorized(),
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    pub async fn delete_product(&mut self, id: ProductId) {
        match self.client.delete_product(&id).await {
            Ok(()) => {
                self.toasts.success("Product deleted");
                if self.product_form.editing.as_ref() == Some(&id) {
                    self.product_form.clear();
                }
                self.fetch_products().await;
            }
            Err(VerifierError::Unauthorized) => self.handle_unauthorized(),
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    pub async fn lookup_price(&mut self) {
        match self.client.lookup_price(&self.lookup_input).await {
            Ok(quote) => self.lookup_result = Some(quote),
            Err(e) => {
                self.lookup_result = None;
                self.toasts.error(e.user_message());
            }
        }
    }

    pub fn visible_len(&self) -> usize {
        self.list_view.view().visible_rows.len()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let index = self.table_state.selected()?;
        self.list_view.view().visible_rows.get(index).copied()
    }

    /// Keeps the table selection inside the rows of the current page.
    pub fn sync_selection(&mut self) {
        let len = self.visible_len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn select_next_row(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn select_previous_row(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn toggle_sort(&mut self, column: Column) {
        let state = self.list_view.toggle_sort(column);
        debug!("Sorting by {} {}", state.column, state.direction);
        self.sync_selection();
    }

    pub fn set_query(&mut self, query: String) {
        self.list_view.set_query(query);
        self.sync_selection();
    }

    pub fn previous_page(&mut self) {
        self.list_view.previous_page();
        self.table_state.select(Some(0));
        self.sync_selection();
    }

    pub fn next_page(&mut self) {
        self.list_view.next_page();
        self.table_state.select(Some(0));
        self.sync_selection();
    }

    pub fn go_to_page(&mut self, n: usize) {
        if self.list_view.go_to_page(n) {
            self.table_state.select(Some(0));
            self.sync_selection();
        } else {
            self.toasts.info(format!("Page {} does not exist", n));
        }
    }

    pub fn edit_selected(&mut self) {
        if let Some(product) = self.selected_product().cloned() {
            self.product_form.load(&product);
            self.form_field = 0;
            self.focus = Focus::Form;
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_product().map(|p| p.id.clone()) {
            self.pending_delete = Some(id);
            self.input_mode = InputMode::ConfirmingDelete;
        }
    }

    pub fn current_form_field(&self) -> ProductField {
        ProductField::ALL[self.form_field % ProductField::ALL.len()]
    }

    pub fn drain_logs(&mut self) {
        if let Some(ref mut receiver) = self.log_receiver {
            while let Ok(entry) = receiver.try_recv() {
                self.log_entries.push(entry);
            }
        }
        let max_logs = self.config.interface.max_log_entries;
        if self.log_entries.len() > max_logs {
            let overflow = self.log_entries.len() - max_logs;
            self.log_entries.drain(0..overflow);
        }
        if self.show_logs {
            let at_bottom = match self.log_list_state.selected() {
                Some(index) => index >= self.log_entries.len().saturating_sub(1),
                None => true,
            };
            if at_bottom && !self.log_entries.is_empty() {
                self.log_list_state.select(Some(self.log_entries.len() - 1));
            }
        }
    }

    pub fn scroll_logs_up(&mut self) {
        if let Some(selected) = self.log_list_state.selected() {
            self.log_list_state.select(Some(selected.saturating_sub(1)));
        }
    }

    pub fn scroll_logs_down(&mut self) {
        if let Some(selected) = self.log_list_state.selected() {
            if selected + 1 < self.log_entries.len() {
                self.log_list_state.select(Some(selected + 1));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ApiConfig;

    pub(crate) fn test_app() -> App {
        let config = Arc::new(Config::default());
        let client = CatalogClient::new(&ApiConfig::default()).unwrap();
        let (_tx, rx) = mpsc::unbounded_channel();
        App::new(config, Arc::new(client), rx)
    }

    pub(crate) fn products(n: usize) -> Vec<Product> {
        (1..=n)
            .map(|i| Product {
                id: ProductId(i.to_string()),
                name: Some(format!("Item {:02}", i)),
                barcode: None,
                quantity: Some(i as f64),
                price: i as f64 * 10.0,
                code: Some(format!("C{}", i)),
            })
            .collect()
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::Table;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Table);
        assert_eq!(Focus::Table.previous(), Focus::Lookup);
    }

    #[test]
    fn header_hitboxes_map_clicks_to_columns() {
        let hitboxes = HeaderHitboxes {
            y: 4,
            columns: vec![(Rect::new(0, 4, 10, 1), Column::Code), (Rect::new(10, 4, 20, 1), Column::Name)],
        };
        assert_eq!(hitboxes.column_at(12, 4), Some(Column::Name));
        assert_eq!(hitboxes.column_at(12, 5), None);
        assert_eq!(hitboxes.column_at(40, 4), None);
    }

    #[tokio::test]
    async fn entering_the_verifier_queues_fetches() {
        let mut app = test_app();
        let mut events = app.event_receiver.take().unwrap();
        app.session.probe_finished(true);
        app.navigate(Route::Verifier);
        assert_eq!(app.route, Route::Verifier);
        assert_eq!(events.try_recv().unwrap(), AppEvent::FetchProducts);
        assert_eq!(events.try_recv().unwrap(), AppEvent::FetchProfile);
    }

    #[tokio::test]
    async fn selection_wraps_within_the_page() {
        let mut app = test_app();
        app.list_view.set_collection(products(7));
        app.sync_selection();
        assert_eq!(app.table_state.selected(), Some(0));
        app.select_previous_row();
        assert_eq!(app.table_state.selected(), Some(4));
        app.next_page();
        assert_eq!(app.list_view.current_page(), 2);
        app.select_previous_row();
        assert_eq!(app.table_state.selected(), Some(1));
        assert_eq!(app.selected_product().unwrap().id, ProductId::from("7"));
    }

    #[tokio::test]
    async fn out_of_range_page_keeps_position_and_warns() {
        let mut app = test_app();
        app.list_view.set_collection(products(7));
        app.go_to_page(9);
        assert_eq!(app.list_view.current_page(), 1);
        let toast = app.toasts.iter().next().unwrap();
        assert_eq!(toast.level, crate::toast::ToastLevel::Info);
        assert_eq!(toast.message, "Page 9 does not exist");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_server() {
        let mut app = test_app();
        app.product_form.name = "Pan".into();
        app.save_product().await;
        let toast = app.toasts.iter().next().unwrap();
        assert_eq!(toast.message, crate::forms::MISSING_PRODUCT_FIELDS);
    }
}

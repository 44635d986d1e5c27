//! Client for a product catalog service: session handling, product CRUD,
//! price lookup by code, and a filter/sort/paginate list view, exposed as a
//! terminal UI and as one-shot commands.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod forms;
pub mod listview;
pub mod session;
pub mod toast;
pub mod tui;

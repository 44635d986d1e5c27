// src/cli.rs

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::api::CatalogClient;
use crate::catalog::{format_price, Column, PriceQuote, Product, ProductId};
use crate::config::Config;
use crate::forms::{CredentialsForm, ProductForm};
use crate::listview::{ListView, SortDirection, SortState, ViewResult};

/// Price Verifier: product catalog client
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to the configuration file
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog API base URL (overrides config and PRICE_VERIFIER_API_URL)
    #[clap(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Set log level (RUST_LOG takes precedence)
    #[clap(long, value_name = "LEVEL", value_enum)]
    pub log_level: Option<LogLevelCli>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new user account
    Register {
        #[clap(flatten)]
        auth: AuthArgs,
    },
    /// Look up the price of a product by its code
    Price {
        code: String,
    },
    /// List products with filtering, sorting and pagination
    List {
        /// Case-insensitive substring of the product name
        #[clap(long, short, default_value = "")]
        filter: String,
        /// Column to sort by: code, name, barcode, quantity or price
        #[clap(long, short, default_value = "name")]
        sort: Column,
        /// Sort in descending order
        #[clap(long)]
        desc: bool,
        /// Page to show, starting at 1
        #[clap(long, short, default_value_t = 1)]
        page: usize,
        #[clap(flatten)]
        auth: AuthArgs,
    },
    /// Add a product
    Add {
        #[clap(flatten)]
        product: ProductArgs,
        #[clap(flatten)]
        auth: AuthArgs,
    },
    /// Replace the fields of an existing product
    Update {
        id: String,
        #[clap(flatten)]
        product: ProductArgs,
        #[clap(flatten)]
        auth: AuthArgs,
    },
    /// Delete a product
    Delete {
        id: String,
        #[clap(flatten)]
        auth: AuthArgs,
    },
    /// Show the logged-in user
    Whoami {
        #[clap(flatten)]
        auth: AuthArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct AuthArgs {
    /// Account email (falls back to [auth] in the config file)
    #[clap(long)]
    pub email: Option<String>,
    /// Account password (falls back to [auth] in the config file)
    #[clap(long)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProductArgs {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub code: String,
    #[clap(long)]
    pub price: String,
    #[clap(long, default_value = "")]
    pub barcode: String,
    #[clap(long, default_value = "")]
    pub quantity: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum LogLevelCli {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevelCli {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevelCli::Trace => "trace",
            LogLevelCli::Debug => "debug",
            LogLevelCli::Info => "info",
            LogLevelCli::Warn => "warn",
            LogLevelCli::Error => "error",
        }
    }
}

impl AuthArgs {
    /// Flags first, then the config file.
    pub fn resolve(&self, config: &Config) -> Result<CredentialsForm> {
        let from_config = config.auth.clone().unwrap_or_default();
        let email = self.email.clone().or(from_config.email);
        let password = self.password.clone().or(from_config.password);
        match (email, password) {
            (Some(email), Some(password)) => Ok(CredentialsForm { email, password }),
            _ => Err(anyhow!(
                "credentials required: pass --email and --password or set [auth] in the config file"
            )),
        }
    }
}

impl ProductArgs {
    fn to_form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            barcode: self.barcode.clone(),
            quantity: self.quantity.clone(),
            price: self.price.clone(),
            code: self.code.clone(),
            editing: None,
        }
    }
}

async fn login(client: &CatalogClient, auth: &AuthArgs, config: &Config) -> Result<()> {
    let credentials = auth.resolve(config)?.validate()?;
    client.login(&credentials).await.context("Login failed")?;
    Ok(())
}

pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = CatalogClient::new(&config.api)?;
    match command {
        Commands::Register { auth } => {
            let credentials = auth.resolve(config)?.validate()?;
            client.register(&credentials).await?;
            println!("User registered: {}", credentials.email);
        }
        Commands::Price { code } => {
            let quote = client.lookup_price(&code).await?;
            println!("{}", render_quote(&code, &quote));
        }
        Commands::List { filter, sort, desc, page, auth } => {
            login(&client, &auth, config).await?;
            let products = client.list_products().await?;
            let mut view = ListView::new(config.list.page_size()?, config.list.reset_page_on_change);
            view.set_collection(products);
            view.set_query(filter);
            let direction = if desc { SortDirection::Descending } else { SortDirection::Ascending };
            view.set_sort(SortState::new(sort, direction));
            if page != 1 && !view.go_to_page(page) {
                info!("Page {} does not exist, showing page {}", page, view.current_page());
            }
            print!("{}", render_table(&view.view()));
        }
        Commands::Add { product, auth } => {
            let payload = product.to_form().validate()?;
            login(&client, &auth, config).await?;
            client.create_product(&payload).await?;
            println!("Product added");
        }
        Commands::Update { id, product, auth } => {
            let payload = product.to_form().validate()?;
            login(&client, &auth, config).await?;
            client.update_product(&ProductId(id), &payload).await?;
            println!("Product updated");
        }
        Commands::Delete { id, auth } => {
            login(&client, &auth, config).await?;
            client.delete_product(&ProductId(id)).await?;
            println!("Product deleted");
        }
        Commands::Whoami { auth } => {
            login(&client, &auth, config).await?;
            let profile = client.profile().await?;
            println!("Logged in as: {}", profile.email);
        }
    }
    Ok(())
}

pub fn render_quote(code: &str, quote: &PriceQuote) -> String {
    let name = quote.name.as_deref().unwrap_or("(unnamed)");
    let code = quote.code.as_deref().unwrap_or(code);
    format!("{} [{}]: {}", name, code, format_price(quote.price))
}

/// Plain-text table with a sort marker in the active header and a page
/// footer.
pub fn render_table(view: &ViewResult<'_>) -> String {
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|&c| {
            if c == view.sort.column {
                format!("{} {}", c.title(), view.sort.direction.arrow())
            } else {
                c.title().to_string()
            }
        })
        .collect();
    let rows: Vec<Vec<String>> = view
        .visible_rows
        .iter()
        .map(|p: &&Product| Column::ALL.iter().map(|&c| p.display_field(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    if rows.is_empty() {
        out.push_str("(no products)\n");
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&format!(
        "Page {} of {} ({} matching)\n",
        view.current_page,
        view.total_pages.max(1),
        view.matched
    ));
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{}{}", cell, " ".repeat(w.saturating_sub(cell.width()))))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    #[test]
    fn list_arguments_parse_columns() {
        let cli = Cli::parse_from([
            "price-verifier", "list", "--sort", "price", "--desc", "--page", "2", "--filter", "cola",
        ]);
        match cli.command {
            Some(Commands::List { sort, desc, page, filter, .. }) => {
                assert_eq!(sort, Column::Price);
                assert!(desc);
                assert_eq!(page, 2);
                assert_eq!(filter, "cola");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        assert!(Cli::try_parse_from(["price-verifier", "list", "--sort", "stock"]).is_err());
    }

    #[test]
    fn flags_override_config_credentials() {
        let mut config = Config::default();
        config.auth = Some(AuthConfig { email: Some("file@shop.mx".into()), password: Some("pw".into()) });
        let args = AuthArgs { email: Some("flag@shop.mx".into()), password: None };
        let form = args.resolve(&config).unwrap();
        assert_eq!(form.email, "flag@shop.mx");
        assert_eq!(form.password, "pw");
        assert!(AuthArgs::default().resolve(&Config::default()).is_err());
    }

    #[test]
    fn table_marks_active_sort_column() {
        let products = vec![Product {
            id: ProductId::from("1"),
            name: Some("Pan".into()),
            barcode: None,
            quantity: Some(3.0),
            price: 12.0,
            code: Some("P1".into()),
        }];
        let mut view = ListView::default();
        view.set_collection(products);
        let rendered = render_table(&view.view());
        let mut lines = rendered.lines();
        assert!(lines.next().unwrap().contains("Name ▲"));
        assert!(rendered.contains("$12.00"));
        assert!(rendered.ends_with("Page 1 of 1 (1 matching)\n"));
    }
}

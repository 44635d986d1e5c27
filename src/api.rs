// src/api.rs
// HTTP client for the product catalog service. Authentication is a session
// cookie set by /login and replayed from the client's cookie store.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::catalog::{PriceQuote, Product, ProductId, ProductPayload, Profile};
use crate::config::ApiConfig;
use crate::errors::{VerifierError, VerifierResult};
use crate::forms::Credentials;

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> VerifierResult<Self> {
        let base = config.base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(base).map_err(|e| VerifierError::InvalidUrl(format!("{}: {}", base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(VerifierError::InvalidUrl(base.to_string()));
        }
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        info!("Catalog client targeting {}", base_url);
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> VerifierResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VerifierError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> VerifierResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);
        Ok(self.http.request(method, url))
    }

    /// Probes the session by listing products. Any failure means "not
    /// logged in".
    pub async fn check_session(&self) -> bool {
        let request = match self.request(Method::GET, &["productos"]) {
            Ok(r) => r,
            Err(e) => {
                warn!("Session check could not be built: {}", e);
                return false;
            }
        };
        match request.send().await {
            Ok(resp) => {
                debug!("Session check returned {}", resp.status());
                resp.status().is_success()
            }
            Err(e) => {
                warn!("Session check failed: {}", e);
                false
            }
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> VerifierResult<()> {
        let resp = self.request(Method::POST, &["login"])?.json(credentials).send().await?;
        expect_success(resp, "Login failed").await?;
        info!("Logged in as {}", credentials.email);
        Ok(())
    }

    pub async fn register(&self, credentials: &Credentials) -> VerifierResult<()> {
        let resp = self.request(Method::POST, &["crear-usuario"])?.json(credentials).send().await?;
        expect_success(resp, "Registration failed").await?;
        info!("Registered user {}", credentials.email);
        Ok(())
    }

    pub async fn logout(&self) -> VerifierResult<()> {
        let resp = self.request(Method::POST, &["logout"])?.send().await?;
        expect_success(resp, "Could not log out").await?;
        Ok(())
    }

    pub async fn profile(&self) -> VerifierResult<Profile> {
        let resp = self.request(Method::GET, &["perfil"])?.send().await?;
        let resp = guarded(expect_success(resp, "Could not load profile").await)?;
        Ok(resp.json().await?)
    }

    pub async fn list_products(&self) -> VerifierResult<Vec<Product>> {
        let resp = self.request(Method::GET, &["productos"])?.send().await?;
        let resp = guarded(expect_success(resp, "Error loading products").await)?;
        let products: Vec<Product> = resp.json().await?;
        debug!("Fetched {} products", products.len());
        Ok(products)
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> VerifierResult<()> {
        let resp = self.request(Method::POST, &["producto"])?.json(payload).send().await?;
        guarded(expect_success(resp, "Could not save product").await)?;
        info!("Created product {}", payload.code);
        Ok(())
    }

    pub async fn update_product(&self, id: &ProductId, payload: &ProductPayload) -> VerifierResult<()> {
        let resp = self.request(Method::PUT, &["producto", &id.0])?.json(payload).send().await?;
        guarded(expect_success(resp, "Could not update product").await)?;
        info!("Updated product {}", id);
        Ok(())
    }

    pub async fn delete_product(&self, id: &ProductId) -> VerifierResult<()> {
        let resp = self.request(Method::DELETE, &["producto", &id.0])?.send().await?;
        guarded(expect_success(resp, "Could not delete product").await)?;
        info!("Deleted product {}", id);
        Ok(())
    }

    pub async fn lookup_price(&self, code: &str) -> VerifierResult<PriceQuote> {
        let code = code.trim();
        if code.is_empty() {
            return Err(VerifierError::Validation("Enter a code".to_string()));
        }
        let resp = self.request(Method::GET, &["precio", code])?.send().await?;
        let resp = expect_success(resp, "Product not found").await?;
        Ok(resp.json().await?)
    }
}

/// Turns a non-2xx response into `VerifierError::Api`, preferring the
/// server's `error` field over `fallback`.
async fn expect_success(resp: Response, fallback: &str) -> VerifierResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(ErrorBody { error: Some(message) }) if !message.trim().is_empty() => message,
        _ => fallback.to_string(),
    };
    warn!("Request failed with {}: {}", status, message);
    Err(VerifierError::Api { status: status.as_u16(), message })
}

/// Endpoints behind the session map 401/403 to `Unauthorized`.
fn guarded(result: VerifierResult<Response>) -> VerifierResult<Response> {
    match result {
        Err(VerifierError::Api { status: 401 | 403, .. }) => Err(VerifierError::Unauthorized),
        other => other,
    }
}

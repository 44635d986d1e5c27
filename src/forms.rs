// src/forms.rs
// Editable form state for the login/register screens and the product editor.

use serde::Serialize;

use crate::catalog::{Product, ProductId, ProductPayload};
use crate::errors::{VerifierError, VerifierResult};

pub const MISSING_CREDENTIALS: &str = "All fields are required";
pub const MISSING_PRODUCT_FIELDS: &str = "Name, code and price are required";

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

impl CredentialsForm {
    pub fn validate(&self) -> VerifierResult<Credentials> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(VerifierError::Validation(MISSING_CREDENTIALS.to_string()));
        }
        Ok(Credentials { email: email.to_string(), password: self.password.clone() })
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }

    pub fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.email),
            1 => Some(&mut self.password),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Barcode,
    Quantity,
    Price,
    Code,
}

impl ProductField {
    pub const ALL: [ProductField; 5] = [
        ProductField::Name,
        ProductField::Barcode,
        ProductField::Quantity,
        ProductField::Price,
        ProductField::Code,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProductField::Name => "Name",
            ProductField::Barcode => "Barcode",
            ProductField::Quantity => "Quantity",
            ProductField::Price => "Price",
            ProductField::Code => "Code",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub barcode: String,
    pub quantity: String,
    pub price: String,
    pub code: String,
    /// Set while editing an existing product.
    pub editing: Option<ProductId>,
}

impl ProductForm {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn field_mut(&mut self, field: ProductField) -> &mut String {
        match field {
            ProductField::Name => &mut self.name,
            ProductField::Barcode => &mut self.barcode,
            ProductField::Quantity => &mut self.quantity,
            ProductField::Price => &mut self.price,
            ProductField::Code => &mut self.code,
        }
    }

    pub fn field(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Barcode => &self.barcode,
            ProductField::Quantity => &self.quantity,
            ProductField::Price => &self.price,
            ProductField::Code => &self.code,
        }
    }

    pub fn validate(&self) -> VerifierResult<ProductPayload> {
        let name = self.name.trim();
        let code = self.code.trim();
        let price = self.price.trim();
        if name.is_empty() || code.is_empty() || price.is_empty() {
            return Err(VerifierError::Validation(MISSING_PRODUCT_FIELDS.to_string()));
        }
        let price = price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| VerifierError::Validation("Price must be a number".to_string()))?;
        let quantity = match self.quantity.trim() {
            "" => None,
            q => Some(q.parse::<f64>().ok().filter(|q| q.is_finite()).ok_or_else(|| {
                VerifierError::Validation("Quantity must be a number".to_string())
            })?),
        };
        Ok(ProductPayload {
            name: name.to_string(),
            barcode: self.barcode.trim().to_string(),
            code: code.to_string(),
            quantity,
            price,
        })
    }

    /// Fills the form from an existing product and enters edit mode.
    pub fn load(&mut self, product: &Product) {
        self.name = product.name.clone().unwrap_or_default();
        self.barcode = product.barcode.clone().unwrap_or_default();
        self.quantity = product.display_field(crate::catalog::Column::Quantity);
        self.price = product.price.to_string();
        self.code = product.code.clone().unwrap_or_default();
        self.editing = Some(product.id.clone());
    }

    pub fn clear(&mut self) {
        *self = ProductForm::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_need_both_fields() {
        let form = CredentialsForm { email: "  ".into(), password: "x".into() };
        assert_eq!(form.validate().unwrap_err().user_message(), MISSING_CREDENTIALS);
        let form = CredentialsForm { email: " me@shop.mx ".into(), password: "pw".into() };
        assert_eq!(form.validate().unwrap().email, "me@shop.mx");
    }

    #[test]
    fn product_requires_name_code_and_price() {
        let form = ProductForm { name: "Pan".into(), code: "P1".into(), ..Default::default() };
        assert_eq!(form.validate().unwrap_err().user_message(), MISSING_PRODUCT_FIELDS);
    }

    #[test]
    fn product_numbers_are_parsed() {
        let form = ProductForm {
            name: "Pan".into(),
            code: "P1".into(),
            price: "12.5".into(),
            quantity: "".into(),
            ..Default::default()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.price, 12.5);
        assert_eq!(payload.quantity, None);

        let bad = ProductForm { price: "twelve".into(), ..form.clone() };
        assert!(bad.validate().is_err());
        let bad_quantity = ProductForm { quantity: "lots".into(), ..form };
        assert!(bad_quantity.validate().is_err());
    }

    #[test]
    fn load_then_clear_round_trips_edit_mode() {
        let product = Product {
            id: ProductId::from("9"),
            name: Some("Leche".into()),
            barcode: None,
            quantity: Some(4.0),
            price: 23.5,
            code: Some("L1".into()),
        };
        let mut form = ProductForm::default();
        form.load(&product);
        assert!(form.is_editing());
        assert_eq!(form.quantity, "4");
        assert_eq!(form.price, "23.5");
        form.clear();
        assert!(!form.is_editing());
        assert!(form.name.is_empty());
    }
}

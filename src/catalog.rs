// src/catalog.rs
// Product records as served by the catalog API, plus the closed set of
// sortable columns.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier. The API has been seen to send both strings
/// (document ids) and integers, so both are normalised to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ProductId(s),
            RawId::Int(n) => ProductId(n.to_string()),
            RawId::Float(n) => ProductId(n.to_string()),
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "codigoBarras", default)]
    pub barcode: Option<String>,
    #[serde(rename = "cantidad", default, deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(rename = "precio", deserialize_with = "required_number")]
    pub price: f64,
    #[serde(rename = "codigo", default)]
    pub code: Option<String>,
}

/// Borrowed view of one cell, used by the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl Product {
    pub fn field(&self, column: Column) -> Option<FieldValue<'_>> {
        match column {
            Column::Code => self.code.as_deref().map(FieldValue::Text),
            Column::Name => self.name.as_deref().map(FieldValue::Text),
            Column::Barcode => self.barcode.as_deref().map(FieldValue::Text),
            Column::Quantity => self.quantity.map(FieldValue::Number),
            Column::Price => Some(FieldValue::Number(self.price)),
        }
    }

    /// Cell text as shown in tables.
    pub fn display_field(&self, column: Column) -> String {
        match column {
            Column::Price => format_price(self.price),
            Column::Quantity => self.quantity.map(format_quantity).unwrap_or_default(),
            _ => match self.field(column) {
                Some(FieldValue::Text(s)) => s.to_string(),
                _ => String::new(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Code,
    Name,
    Barcode,
    Quantity,
    Price,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Code,
        Column::Name,
        Column::Barcode,
        Column::Quantity,
        Column::Price,
    ];

    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Quantity | Column::Price)
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Code => "Code",
            Column::Name => "Name",
            Column::Barcode => "Barcode",
            Column::Quantity => "Quantity",
            Column::Price => "Price",
        }
    }

    /// Position in table order, starting at 1, as used by the header keys.
    pub fn from_index(index: usize) -> Option<Column> {
        index.checked_sub(1).and_then(|i| Column::ALL.get(i).copied())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "code" | "codigo" => Ok(Column::Code),
            "name" | "nombre" => Ok(Column::Name),
            "barcode" | "codigobarras" => Ok(Column::Barcode),
            "quantity" | "cantidad" => Ok(Column::Quantity),
            "price" | "precio" => Ok(Column::Price),
            other => Err(format!(
                "unknown column '{}' (expected one of: code, name, barcode, quantity, price)",
                other
            )),
        }
    }
}

/// Body of create/update requests.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProductPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigoBarras")]
    pub barcode: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "cantidad")]
    pub quantity: Option<f64>,
    #[serde(rename = "precio")]
    pub price: f64,
}

/// Result of a price lookup by code. The endpoint is public and only the
/// price is guaranteed.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PriceQuote {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "codigo", default)]
    pub code: Option<String>,
    #[serde(rename = "precio", deserialize_with = "required_number")]
    pub price: f64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub email: String,
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        quantity.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn parse_raw_number(raw: Option<RawNumber>) -> Result<Option<f64>, String> {
    match raw {
        None => Ok(None),
        Some(RawNumber::Number(n)) => Ok(Some(n)),
        Some(RawNumber::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawNumber::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("expected a number, found '{}'", s)),
    }
}

/// Accepts a JSON number, a numeric string, a blank string or null.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    parse_raw_number(raw).map_err(serde::de::Error::custom)
}

fn required_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    parse_raw_number(raw)
        .map_err(serde::de::Error::custom)?
        .ok_or_else(|| serde::de::Error::custom("price is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_wire_names_and_lenient_numbers() {
        let product: Product = serde_json::from_value(json!({
            "_id": "65a1",
            "nombre": "Leche",
            "codigoBarras": "7501",
            "cantidad": "",
            "precio": "23.5",
            "codigo": "L1"
        }))
        .unwrap();
        assert_eq!(product.id, ProductId::from("65a1"));
        assert_eq!(product.name.as_deref(), Some("Leche"));
        assert_eq!(product.quantity, None);
        assert_eq!(product.price, 23.5);
        assert_eq!(product.code.as_deref(), Some("L1"));
    }

    #[test]
    fn numeric_ids_become_text() {
        let product: Product =
            serde_json::from_value(json!({ "id": 42, "precio": 1, "cantidad": 3 })).unwrap();
        assert_eq!(product.id.to_string(), "42");
        assert_eq!(product.quantity, Some(3.0));
        assert_eq!(product.name, None);
    }

    #[test]
    fn missing_price_is_rejected() {
        let result: Result<Product, _> = serde_json::from_value(json!({ "id": 1, "nombre": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn payload_uses_wire_names() {
        let payload = ProductPayload {
            name: "Pan".into(),
            barcode: String::new(),
            code: "P1".into(),
            quantity: None,
            price: 12.0,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "nombre": "Pan", "codigoBarras": "", "codigo": "P1", "cantidad": null, "precio": 12.0 })
        );
    }

    #[test]
    fn column_parsing_is_closed() {
        assert_eq!("Price".parse::<Column>(), Ok(Column::Price));
        assert_eq!("codigoBarras".parse::<Column>(), Ok(Column::Barcode));
        assert!("stock".parse::<Column>().is_err());
        assert_eq!(Column::from_index(1), Some(Column::Code));
        assert_eq!(Column::from_index(0), None);
        assert_eq!(Column::from_index(6), None);
    }

    #[test]
    fn prices_render_with_two_decimals() {
        assert_eq!(format_price(5.0), "$5.00");
        assert_eq!(format_price(19.999), "$20.00");
    }
}

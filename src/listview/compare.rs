use std::cmp::Ordering;

use crate::catalog::{Column, FieldValue, Product};

/// Ascending-sense comparison of two products under `column`.
///
/// A product without a value for the column sorts after any product that has
/// one; two absent values compare equal. Numeric columns compare by value,
/// text columns compare case-insensitively.
pub fn compare(a: &Product, b: &Product, column: Column) -> Ordering {
    match (a.field(column), b.field(column)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => compare_values(x, y),
    }
}

pub(crate) fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => compare_text(x, y),
        // A column never mixes kinds; keep the order total anyway.
        (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
        (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().flat_map(char::to_lowercase);
    let mut right = b.chars().flat_map(char::to_lowercase);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => continue,
                unequal => return unequal,
            },
        }
    }
}

use std::cmp::Ordering;
use std::fmt;

use super::compare::compare_values;
use super::ListSorter;
use crate::catalog::{Column, Product};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self { column: Column::Name, direction: SortDirection::Ascending }
    }
}

impl SortState {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header click: the active column flips direction, any other column
    /// becomes active in ascending order.
    pub fn toggled(self, column: Column) -> Self {
        if self.column == column {
            Self { column, direction: self.direction.flipped() }
        } else {
            Self { column, direction: SortDirection::Ascending }
        }
    }
}

/// Orders products by one column. Direction only affects products that both
/// have a value; products without one stay at the end either way.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSorter {
    state: SortState,
}

impl ColumnSorter {
    pub fn new(state: SortState) -> Self {
        Self { state }
    }
}

impl ListSorter<Product> for ColumnSorter {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let column = self.state.column;
        match (a.field(column), b.field(column)) {
            (Some(x), Some(y)) => {
                let ordering = compare_values(x, y);
                match self.state.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
            _ => super::compare(a, b, column),
        }
    }
}

/// Stable sort of already-borrowed products.
pub fn sort<'a>(sequence: &[&'a Product], state: SortState) -> Vec<&'a Product> {
    let sorter = ColumnSorter::new(state);
    let mut sorted = sequence.to_vec();
    sorted.sort_by(|a, b| sorter.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductId;

    fn product(id: &str, name: &str, price: f64, quantity: Option<f64>) -> Product {
        Product {
            id: ProductId::from(id),
            name: Some(name.to_string()),
            barcode: None,
            quantity,
            price,
            code: Some(id.to_string()),
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.0.clone()).collect()
    }

    #[test]
    fn toggle_flips_same_column_and_resets_others() {
        let state = SortState::default().toggled(Column::Price);
        assert_eq!(state, SortState::new(Column::Price, SortDirection::Ascending));
        let state = state.toggled(Column::Price);
        assert_eq!(state, SortState::new(Column::Price, SortDirection::Descending));
        let state = state.toggled(Column::Name);
        assert_eq!(state, SortState::new(Column::Name, SortDirection::Ascending));
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let items = vec![
            product("c1", "B", 10.0, None),
            product("c2", "A", 5.0, None),
            product("c3", "C", 5.0, None),
            product("c4", "D", 20.0, None),
        ];
        let refs: Vec<&Product> = items.iter().collect();
        let asc = sort(&refs, SortState::new(Column::Price, SortDirection::Ascending));
        assert_eq!(ids(&asc), ["c2", "c3", "c1", "c4"]);
        let desc = sort(&refs, SortState::new(Column::Price, SortDirection::Descending));
        assert_eq!(ids(&desc), ["c4", "c1", "c2", "c3"]);
    }

    #[test]
    fn absent_values_stay_last_when_descending() {
        let items = vec![
            product("a", "a", 1.0, None),
            product("b", "b", 1.0, Some(2.0)),
            product("c", "c", 1.0, Some(7.0)),
        ];
        let refs: Vec<&Product> = items.iter().collect();
        let desc = sort(&refs, SortState::new(Column::Quantity, SortDirection::Descending));
        assert_eq!(ids(&desc), ["c", "b", "a"]);
        let asc = sort(&refs, SortState::new(Column::Quantity, SortDirection::Ascending));
        assert_eq!(ids(&asc), ["b", "c", "a"]);
    }
}

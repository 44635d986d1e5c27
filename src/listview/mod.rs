//! Client-side list view engine: filter, then sort, then paginate.
//!
//! Every stage borrows the collection and returns references, so the fetched
//! products are never reordered or mutated. [`ListView`] owns the state and
//! recomputes the page on demand; [`derive_view`] is the same pipeline as a
//! free function.

pub mod compare;
pub mod controller;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use compare::compare;
pub use controller::{derive_view, ListView, ViewResult};
pub use filter::{filter, NameFilter};
pub use paginate::{paginate, Page, Pagination};
pub use sort::{sort, ColumnSorter, SortDirection, SortState};

use std::cmp::Ordering;

pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

pub trait ListSorter<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Runs a filter and a sorter over `items`. The sort is stable, so items the
/// sorter considers equal keep their order from `items`.
pub fn apply<'a, T>(
    items: &'a [T],
    filter: &dyn ListFilter<T>,
    sorter: &dyn ListSorter<T>,
) -> Vec<&'a T> {
    let mut filtered: Vec<&T> = items.iter().filter(|item| filter.matches(item)).collect();
    filtered.sort_by(|a, b| sorter.compare(a, b));
    filtered
}

use std::num::NonZeroUsize;

use tracing::debug;

use super::filter::NameFilter;
use super::paginate::{paginate, total_pages, Pagination};
use super::sort::{ColumnSorter, SortState};
use super::{apply, ListFilter};
use crate::catalog::{Column, Product, ProductId};

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<'a> {
    pub visible_rows: Vec<&'a Product>,
    pub total_pages: usize,
    pub current_page: usize,
    pub sort: SortState,
    /// Number of products that passed the filter.
    pub matched: usize,
}

/// Filter, sort, then paginate. Pure: the same inputs always give the same
/// page and `collection` is left untouched.
pub fn derive_view<'a>(
    collection: &'a [Product],
    query: &str,
    sort_state: SortState,
    pagination: Pagination,
) -> ViewResult<'a> {
    let sorted = apply(collection, &NameFilter::new(query), &ColumnSorter::new(sort_state));
    let page = paginate(&sorted, pagination.page_size(), pagination.current_page());
    ViewResult {
        visible_rows: page.visible.to_vec(),
        total_pages: page.total_pages,
        current_page: pagination.current_page(),
        sort: sort_state,
        matched: sorted.len(),
    }
}

/// Owns the fetched collection and the filter, sort and page state.
#[derive(Debug, Clone)]
pub struct ListView {
    collection: Vec<Product>,
    query: String,
    sort: SortState,
    pagination: Pagination,
    reset_page_on_change: bool,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            query: String::new(),
            sort: SortState::default(),
            pagination: Pagination::default(),
            reset_page_on_change: true,
        }
    }
}

impl ListView {
    /// `reset_page_on_change` returns to page 1 whenever the filter or sort
    /// changes and clamps the page when the collection is replaced. Without
    /// it the current page is left alone, which can point past the end.
    pub fn new(page_size: NonZeroUsize, reset_page_on_change: bool) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            reset_page_on_change,
            ..Self::default()
        }
    }

    pub fn collection(&self) -> &[Product] {
        &self.collection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.pagination.page_size()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.collection.iter().find(|p| &p.id == id)
    }

    /// Replaces the collection wholesale with a newer fetch.
    pub fn set_collection(&mut self, products: Vec<Product>) {
        debug!("List view received {} products", products.len());
        self.collection = products;
        if self.reset_page_on_change {
            let total = self.total_pages();
            self.pagination.clamp(total);
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        if self.reset_page_on_change {
            self.pagination.reset();
        }
    }

    pub fn toggle_sort(&mut self, column: Column) -> SortState {
        self.sort = self.sort.toggled(column);
        if self.reset_page_on_change {
            self.pagination.reset();
        }
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortState) {
        if sort == self.sort {
            return;
        }
        self.sort = sort;
        if self.reset_page_on_change {
            self.pagination.reset();
        }
    }

    /// Page count for the current filter. Sorting cannot change it.
    pub fn total_pages(&self) -> usize {
        let name_filter = NameFilter::new(&self.query);
        let matched = self.collection.iter().filter(|p| name_filter.matches(p)).count();
        total_pages(matched, self.pagination.page_size())
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.pagination.next(total);
    }

    pub fn go_to_page(&mut self, n: usize) -> bool {
        let total = self.total_pages();
        self.pagination.go_to(n, total)
    }

    pub fn view(&self) -> ViewResult<'_> {
        derive_view(&self.collection, &self.query, self.sort, self.pagination)
    }
}

use super::ListFilter;
use crate::catalog::Product;

/// Case-insensitive substring match on the product name. The query is
/// matched as typed, surrounding spaces included; only an all-whitespace
/// query counts as blank.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    needle: String,
    blank: bool,
}

impl NameFilter {
    pub fn new(query: &str) -> Self {
        Self { needle: query.to_lowercase(), blank: query.trim().is_empty() }
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }
}

impl ListFilter<Product> for NameFilter {
    fn matches(&self, item: &Product) -> bool {
        if self.is_blank() {
            return true;
        }
        item.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&self.needle))
    }
}

/// Products whose name contains `query`, in collection order.
pub fn filter<'a>(collection: &'a [Product], query: &str) -> Vec<&'a Product> {
    let name_filter = NameFilter::new(query);
    collection.iter().filter(|p| name_filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductId;

    fn named(id: &str, name: Option<&str>) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.map(str::to_string),
            barcode: None,
            quantity: None,
            price: 1.0,
            code: None,
        }
    }

    #[test]
    fn blank_query_keeps_everything() {
        let items = vec![named("1", Some("b")), named("2", None), named("3", Some("a"))];
        let ids: Vec<_> = filter(&items, "   ").iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn match_is_case_insensitive_and_ordered() {
        let items = vec![
            named("1", Some("Coca Cola")),
            named("2", Some("Pan")),
            named("3", Some("cola light")),
            named("4", None),
        ];
        let ids: Vec<_> = filter(&items, "COLA").iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_query() {
        let items = vec![named("1", Some("ab")), named("2", Some("a b")), named("3", Some("Ca"))];
        let ids: Vec<_> = filter(&items, "a ").iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, ["2"]);
        let ids: Vec<_> = filter(&items, " a").iter().map(|p| p.id.0.as_str()).collect();
        assert!(ids.is_empty());
    }
}

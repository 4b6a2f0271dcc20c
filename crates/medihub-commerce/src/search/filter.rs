//! Category filter for the shop page.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Selector value that disables category filtering.
pub const ALL_SELECTOR: &str = "All";

/// Products rated at least this high are listed as featured.
pub const FEATURED_MIN_RATING: f32 = 4.8;

/// A category selector.
///
/// Matching is by substring on the category label, so a short selector such
/// as "Diagnostic" matches "Diagnostic & Monitoring".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category label contains the text.
    Containing(String),
}

impl CategoryFilter {
    /// Parse a selector string. `"All"` and the empty string select everything.
    pub fn from_selector(selector: &str) -> Self {
        if selector.is_empty() || selector == ALL_SELECTOR {
            CategoryFilter::All
        } else {
            CategoryFilter::Containing(selector.to_string())
        }
    }

    /// Check if a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Containing(text) => product.category.label().contains(text.as_str()),
        }
    }

    /// The selector string this filter was parsed from.
    pub fn selector(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_SELECTOR,
            CategoryFilter::Containing(text) => text,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(selector: &str) -> Self {
        Self::from_selector(selector)
    }
}

/// Filter products by category, preserving their order.
///
/// The input is only borrowed; the result references its elements.
pub fn filter_products<'a>(products: &'a [Product], filter: &CategoryFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Products for the home page: flagged as featured or rated at least
/// [`FEATURED_MIN_RATING`], in catalog order, at most `limit`.
pub fn featured_products(products: &[Product], limit: usize) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.featured || p.rating >= FEATURED_MIN_RATING)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ProductDraft};
    use crate::ids::ProductId;
    use crate::money::Money;

    fn product(id: &str, category: Category) -> Product {
        Product::from_draft(
            ProductId::new(id),
            ProductDraft::new(format!("Item {}", id), category, Money::new(1000), 5),
        )
    }

    fn sample() -> Vec<Product> {
        vec![
            product("1", Category::DiagnosticMonitoring),
            product("2", Category::MobilityRehabilitation),
            product("3", Category::Laboratory),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_all_returns_input_in_order() {
        let products = sample();
        let result = filter_products(&products, &CategoryFilter::All);

        assert_eq!(result.len(), products.len());
        for (filtered, source) in result.iter().zip(products.iter()) {
            assert_eq!(*filtered, source);
        }
    }

    #[test]
    fn test_substring_match() {
        let products = sample();
        let result = filter_products(&products, &CategoryFilter::from_selector("Mobility"));
        assert_eq!(ids(&result), vec!["2"]);

        let result = filter_products(&products, &"Diagnostic".into());
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_order_preserved_for_multiple_matches() {
        let products = vec![
            product("a", Category::ClinicalHospital),
            product("b", Category::Laboratory),
            product("c", Category::ClinicalHospital),
        ];
        let result = filter_products(&products, &CategoryFilter::from_selector("Hospital"));
        assert_eq!(ids(&result), vec!["a", "c"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let products = sample();
        let result = filter_products(&products, &CategoryFilter::from_selector("Dental"));
        assert!(result.is_empty());

        // Matching is case-sensitive, like the category labels
        let result = filter_products(&products, &CategoryFilter::from_selector("mobility"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_input_untouched_and_repeatable() {
        let products = sample();
        let before = products.clone();
        let filter = CategoryFilter::from_selector("Lab");

        let first = ids(&filter_products(&products, &filter));
        let second = ids(&filter_products(&products, &filter));

        assert_eq!(first, second);
        assert_eq!(products, before);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(CategoryFilter::from_selector("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_selector(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_selector("Lab").selector(), "Lab");
        assert_eq!(CategoryFilter::All.selector(), "All");
    }

    #[test]
    fn test_featured_products() {
        let mut products = sample();
        products[0].rating = 4.8;
        products[2].featured = true;
        products.push(product("4", Category::EmergencyFirstAid));
        products[3].featured = true;

        let featured = featured_products(&products, 2);
        assert_eq!(ids(&featured), vec!["1", "3"]);
    }
}

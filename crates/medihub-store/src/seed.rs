//! Built-in starter catalog.

use medihub_commerce::catalog::Product;

use crate::StoreError;

const INITIAL_PRODUCTS_JSON: &str = include_str!("../data/products.json");

/// The starter catalog the backend is seeded with.
pub fn initial_products() -> Result<Vec<Product>, StoreError> {
    Ok(serde_json::from_str(INITIAL_PRODUCTS_JSON)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medihub_commerce::search::featured_products;

    #[test]
    fn test_seed_catalog_parses() {
        let products = initial_products().unwrap();
        assert_eq!(products.len(), 18);
        assert_eq!(products[0].id.as_str(), "1");
        assert_eq!(products[0].name, "MediHub Pro Digital BP Monitor");
        assert!(products.iter().all(|p| p.gallery.images().contains(&p.image().to_string())));
    }

    #[test]
    fn test_seed_featured() {
        let products = initial_products().unwrap();
        let ids: Vec<_> = featured_products(&products, 4)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "5", "6", "7"]);
    }
}

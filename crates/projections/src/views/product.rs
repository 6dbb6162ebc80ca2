//! Product catalog view.

use domain::{Money, Product, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog entry as the API layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub stock_quantity: u32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().clone(),
            name: product.name().to_string(),
            price: product.price(),
            stock_quantity: product.stock_quantity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_view_mirrors_product() {
        let product = Product::register("SKU-001", "Widget", Money::new(50_000), 50).unwrap();
        let view = ProductView::from(&product);

        assert_eq!(view.id.as_str(), "SKU-001");
        assert_eq!(view.name, "Widget");
        assert_eq!(view.price.amount(), 50_000);
        assert_eq!(view.stock_quantity, 50);
    }

    #[test]
    fn test_view_reflects_reserved_stock() {
        let mut product = Product::register("SKU-001", "Widget", Money::new(50_000), 50).unwrap();
        product.reserve(30).unwrap();

        let view = ProductView::from(&product);
        assert_eq!(view.stock_quantity, 20);
    }
}

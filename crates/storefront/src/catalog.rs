//! The ready-print product catalog.
//!
//! Catalog data is seeded in memory - there is no product database. The
//! catalog is the authority on prices: cart additions by product id take
//! the price from here, never from the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cubed_core::cart::{NewCartItem, Specifications};
use cubed_core::types::{ItemId, ProductId, ServiceCategory};

/// Catalog shelf a product sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    Utilities,
    Art,
    Decor,
    Miniatures,
    Organization,
}

/// A ready-print catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub image: String,
    pub category: ProductCategory,
    pub rating: f64,
    pub reviews: u32,
    pub description: String,
    pub in_stock: bool,
    pub tags: Vec<String>,
    pub material: String,
    pub dimensions: String,
    /// Weight in grams; carried into the cart for shipping estimates.
    pub weight_grams: u32,
    pub featured: bool,
}

impl Product {
    /// Turn a product into a cart line candidate.
    #[must_use]
    pub fn to_cart_item(&self) -> NewCartItem {
        NewCartItem {
            id: ItemId::new(self.id.as_str()),
            name: self.name.clone(),
            price: self.price,
            image: Some(self.image.clone()),
            category: ServiceCategory::ReadyPrint,
            description: Some(self.description.clone()),
            specifications: Some(Specifications {
                material: Some(self.material.clone()),
                color: None,
                size: Some(self.dimensions.clone()),
                weight_grams: Some(self.weight_grams),
            }),
        }
    }
}

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Popular,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

/// Catalog listing filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// The in-memory product catalog.
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// The catalog the store ships with.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            products: seed_products(),
        }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products flagged for the home page.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|product| product.featured).collect()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products, unfiltered.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Apply search, category filter, and sort.
    #[must_use]
    pub fn list(&self, query: &CatalogQuery) -> Vec<Product> {
        let mut results: Vec<Product> = self
            .products
            .iter()
            .filter(|product| {
                query.category.is_none_or(|category| product.category == category)
            })
            .filter(|product| {
                query.search.as_deref().is_none_or(|term| {
                    let term = term.to_lowercase();
                    product.name.to_lowercase().contains(&term)
                        || product.description.to_lowercase().contains(&term)
                        || product.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
                })
            })
            .cloned()
            .collect();

        match query.sort.unwrap_or_default() {
            SortKey::Popular => results.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
            SortKey::PriceLow => results.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceHigh => results.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Rating => {
                results.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            }
            // Seed data carries no creation date; newest is the seed
            // order reversed.
            SortKey::Newest => results.reverse(),
        }

        results
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("1"),
            name: "Adjustable Phone Stand".to_owned(),
            price: Decimal::new(2590, 2),
            original_price: Some(Decimal::new(3590, 2)),
            image: "/images/products/phone-stand.jpg".to_owned(),
            category: ProductCategory::Utilities,
            rating: 4.8,
            reviews: 24,
            description: "Adjustable phone stand with a stable base and modern design".to_owned(),
            in_stock: true,
            tags: vec!["useful".to_owned(), "office".to_owned(), "phone".to_owned()],
            material: "PLA".to_owned(),
            dimensions: "12x8x6 cm".to_owned(),
            weight_grams: 45,
            featured: true,
        },
        Product {
            id: ProductId::new("2"),
            name: "Detailed Dragon Miniature".to_owned(),
            price: Decimal::new(4500, 2),
            original_price: None,
            image: "/images/products/dragon-miniature.jpg".to_owned(),
            category: ProductCategory::Art,
            rating: 4.9,
            reviews: 18,
            description: "Finely detailed dragon miniature for collectors and tabletop players"
                .to_owned(),
            in_stock: true,
            tags: vec!["art".to_owned(), "collectible".to_owned(), "fantasy".to_owned()],
            material: "PLA+".to_owned(),
            dimensions: "8x6x10 cm".to_owned(),
            weight_grams: 80,
            featured: true,
        },
        Product {
            id: ProductId::new("3"),
            name: "Universal Cable Organizer".to_owned(),
            price: Decimal::new(1990, 2),
            original_price: None,
            image: "/images/products/cable-organizer.jpg".to_owned(),
            category: ProductCategory::Organization,
            rating: 4.7,
            reviews: 31,
            description: "Practical organizer for cables and cords with a minimalist design"
                .to_owned(),
            in_stock: true,
            tags: vec!["organization".to_owned(), "home".to_owned(), "office".to_owned()],
            material: "PETG".to_owned(),
            dimensions: "15x10x3 cm".to_owned(),
            weight_grams: 60,
            featured: true,
        },
        Product {
            id: ProductId::new("4"),
            name: "Geometric Decorative Vase".to_owned(),
            price: Decimal::new(3500, 2),
            original_price: None,
            image: "/images/products/decorative-vase.jpg".to_owned(),
            category: ProductCategory::Decor,
            rating: 4.6,
            reviews: 12,
            description: "Modern vase with a geometric design for small plants".to_owned(),
            in_stock: true,
            tags: vec!["decor".to_owned(), "home".to_owned(), "plants".to_owned()],
            material: "PLA".to_owned(),
            dimensions: "10x10x12 cm".to_owned(),
            weight_grams: 120,
            featured: false,
        },
        Product {
            id: ProductId::new("5"),
            name: "Custom Key Holder".to_owned(),
            price: Decimal::new(1590, 2),
            original_price: None,
            image: "/images/products/key-holder.jpg".to_owned(),
            category: ProductCategory::Utilities,
            rating: 4.5,
            reviews: 8,
            description: "Practical key holder with a wall hook".to_owned(),
            in_stock: true,
            tags: vec!["useful".to_owned(), "home".to_owned(), "organization".to_owned()],
            material: "PLA".to_owned(),
            dimensions: "8x6x2 cm".to_owned(),
            weight_grams: 25,
            featured: false,
        },
        Product {
            id: ProductId::new("6"),
            name: "Futuristic Robot Miniature".to_owned(),
            price: Decimal::new(3800, 2),
            original_price: None,
            image: "/images/products/robot-miniature.jpg".to_owned(),
            category: ProductCategory::Miniatures,
            rating: 4.8,
            reviews: 15,
            description: "Robot miniature with a futuristic design and crisp details".to_owned(),
            in_stock: true,
            tags: vec!["miniatures".to_owned(), "sci-fi".to_owned(), "collectible".to_owned()],
            material: "PLA+".to_owned(),
            dimensions: "6x5x8 cm".to_owned(),
            weight_grams: 55,
            featured: true,
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_size() {
        let catalog = ProductCatalog::seeded();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = ProductCatalog::seeded();
        let product = catalog.get(&ProductId::new("1")).unwrap();
        assert_eq!(product.name, "Adjustable Phone Stand");
        assert!(catalog.get(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_default_sort_is_popularity() {
        let catalog = ProductCatalog::seeded();
        let results = catalog.list(&CatalogQuery::default());
        let reviews: Vec<u32> = results.iter().map(|product| product.reviews).collect();
        let mut sorted = reviews.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(reviews, sorted);
    }

    #[test]
    fn test_search_matches_tags() {
        let catalog = ProductCatalog::seeded();
        let results = catalog.list(&CatalogQuery {
            search: Some("sci-fi".to_owned()),
            ..CatalogQuery::default()
        });
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().id, ProductId::new("6"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = ProductCatalog::seeded();
        let results = catalog.list(&CatalogQuery {
            search: Some("DRAGON".to_owned()),
            ..CatalogQuery::default()
        });
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_category_filter() {
        let catalog = ProductCatalog::seeded();
        let results = catalog.list(&CatalogQuery {
            category: Some(ProductCategory::Utilities),
            ..CatalogQuery::default()
        });
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.category == ProductCategory::Utilities));
    }

    #[test]
    fn test_price_sorts() {
        let catalog = ProductCatalog::seeded();

        let ascending = catalog.list(&CatalogQuery {
            sort: Some(SortKey::PriceLow),
            ..CatalogQuery::default()
        });
        let first = ascending.first().unwrap();
        assert_eq!(first.id, ProductId::new("5"));

        let descending = catalog.list(&CatalogQuery {
            sort: Some(SortKey::PriceHigh),
            ..CatalogQuery::default()
        });
        let first = descending.first().unwrap();
        assert_eq!(first.id, ProductId::new("2"));
    }

    #[test]
    fn test_featured_subset() {
        let catalog = ProductCatalog::seeded();
        let featured = catalog.featured();
        assert_eq!(featured.len(), 4);
        assert!(featured.iter().all(|product| product.featured));
    }

    #[test]
    fn test_to_cart_item_carries_specs() {
        let catalog = ProductCatalog::seeded();
        let product = catalog.get(&ProductId::new("1")).unwrap();
        let item = product.to_cart_item().with_quantity(1);

        assert_eq!(item.id, ItemId::new("1"));
        assert_eq!(item.price, Decimal::new(2590, 2));
        assert_eq!(item.category, ServiceCategory::ReadyPrint);
        let specs = item.specifications.unwrap();
        assert_eq!(specs.weight_grams, Some(45));
        assert_eq!(specs.material.as_deref(), Some("PLA"));
    }
}

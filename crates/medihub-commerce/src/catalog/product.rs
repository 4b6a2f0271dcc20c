//! Product types.

use std::collections::BTreeMap;

use crate::catalog::{Category, Gallery};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};

/// Slug used when a name has no usable characters.
pub const FALLBACK_SLUG: &str = "new-product";

/// Highest possible product rating.
const MAX_RATING: f32 = 5.0;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier, assigned by the catalog store.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Catalog category.
    pub category: Category,
    /// Unit price in whole shillings.
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Money,
    /// Units in stock.
    pub stock: u32,
    /// Primary image and gallery.
    #[serde(flatten)]
    pub gallery: Gallery,
    /// One-line summary for listings.
    pub short_description: String,
    /// Full description for the product page.
    pub long_description: String,
    /// Technical specifications (e.g., "Power" -> "4xAA Batteries").
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    /// Average rating, 0.0 to 5.0.
    #[serde(deserialize_with = "deserialize_rating")]
    pub rating: f32,
    /// Number of reviews.
    pub reviews: u32,
    /// Highlighted on the storefront home page.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Build a stored product from a draft and its assigned ID.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            slug: draft.slug,
            category: draft.category,
            price: draft.price,
            stock: draft.stock,
            gallery: draft.gallery,
            short_description: draft.short_description,
            long_description: draft.long_description,
            specifications: draft.specifications,
            rating: clamp_rating(draft.rating),
            reviews: draft.reviews,
            featured: draft.featured,
        }
    }

    /// Check if at least one unit is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if stock is below the given threshold.
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock < threshold
    }

    /// The primary image.
    pub fn image(&self) -> &str {
        self.gallery.primary()
    }
}

/// A product that has not been assigned an ID yet.
///
/// Produced by the admin product form and by CSV import, and handed to the
/// catalog store's `create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub slug: String,
    pub category: Category,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Money,
    pub stock: u32,
    #[serde(flatten)]
    pub gallery: Gallery,
    pub short_description: String,
    pub long_description: String,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(deserialize_with = "deserialize_rating")]
    pub rating: f32,
    pub reviews: u32,
    #[serde(default)]
    pub featured: bool,
}

impl ProductDraft {
    /// Create a draft with a slug derived from the name.
    ///
    /// New products start unrated, with no reviews and a placeholder image.
    pub fn new(name: impl Into<String>, category: Category, price: Money, stock: u32) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            category,
            price,
            stock,
            gallery: Gallery::default(),
            short_description: String::new(),
            long_description: String::new(),
            specifications: BTreeMap::new(),
            rating: 0.0,
            reviews: 0,
            featured: false,
        }
    }

    /// Set the short and long descriptions.
    pub fn with_descriptions(
        mut self,
        short_description: impl Into<String>,
        long_description: impl Into<String>,
    ) -> Self {
        self.short_description = short_description.into();
        self.long_description = long_description.into();
        self
    }

    /// Set the gallery.
    pub fn with_gallery(mut self, gallery: Gallery) -> Self {
        self.gallery = gallery;
        self
    }

    /// Add a specification entry, replacing any existing value for the key.
    pub fn with_specification(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.specifications.insert(key.into(), value.into());
        self
    }

    /// Set the rating and review count.
    pub fn with_reviews(mut self, rating: f32, reviews: u32) -> Self {
        self.rating = clamp_rating(rating);
        self.reviews = reviews;
        self
    }

    /// Mark as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}

/// A partial update to a product. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category: Option<Category>,
    pub price: Option<Money>,
    pub stock: Option<u32>,
    pub gallery: Option<Gallery>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub rating: Option<f32>,
    pub reviews: Option<u32>,
    pub featured: Option<bool>,
}

impl ProductPatch {
    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    /// Apply the patch to a product. The ID is never changed.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(slug) = self.slug {
            product.slug = slug;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price.max(Money::ZERO);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(gallery) = self.gallery {
            product.gallery = gallery;
        }
        if let Some(short_description) = self.short_description {
            product.short_description = short_description;
        }
        if let Some(long_description) = self.long_description {
            product.long_description = long_description;
        }
        if let Some(specifications) = self.specifications {
            product.specifications = specifications;
        }
        if let Some(rating) = self.rating {
            product.rating = clamp_rating(rating);
        }
        if let Some(reviews) = self.reviews {
            product.reviews = reviews;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
    }
}

/// Derive a URL slug from a product name.
///
/// Lower-cases the name and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, with no leading or trailing hyphen.
///
/// ```
/// use medihub_commerce::catalog::slugify;
/// assert_eq!(slugify("AED Defibrillator!!"), "aed-defibrillator");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

// Loaded records get the same bounds as the constructors.
fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    Ok(Money::deserialize(deserializer)?.max(Money::ZERO))
}

fn deserialize_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    f32::deserialize(deserializer).map(clamp_rating)
}

fn clamp_rating(rating: f32) -> f32 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING)
    }
}

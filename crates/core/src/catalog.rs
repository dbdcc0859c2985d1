//! Item catalog - the fixed set of trash items the supplier draws from.
//!
//! Three items per category. The catalog is static data; nothing mutates it.

use crate::types::{Category, Item};

/// Number of items in [`CATALOG`].
pub const CATALOG_LEN: usize = 15;

/// Every item the game can present.
pub static CATALOG: [Item; CATALOG_LEN] = [
    Item::new(Category::Paper, "Newspaper", "📰"),
    Item::new(Category::Paper, "Cardboard box", "📦"),
    Item::new(Category::Paper, "Magazine", "📖"),
    Item::new(Category::Plastic, "PET bottle", "🥤"),
    Item::new(Category::Plastic, "Plastic bag", "🛍️"),
    Item::new(Category::Plastic, "Broken toy", "🧸"),
    Item::new(Category::Glass, "Glass bottle", "🍾"),
    Item::new(Category::Glass, "Glass jar", "🍯"),
    Item::new(Category::Glass, "Broken glass", "🍸"),
    Item::new(Category::Organic, "Banana peel", "🍌"),
    Item::new(Category::Organic, "Food scraps", "🍎"),
    Item::new(Category::Organic, "Dry leaf", "🍂"),
    Item::new(Category::Metal, "Aluminium can", "🥫"),
    Item::new(Category::Metal, "Steel drum", "🛢️"),
    Item::new(Category::Metal, "Metal lid", "⚙️"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_is_represented() {
        for category in Category::ALL {
            let count = CATALOG.iter().filter(|i| i.category == category).count();
            assert_eq!(count, 3, "{category:?}");
        }
    }

    #[test]
    fn test_labels_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.label, b.label);
            }
        }
    }
}

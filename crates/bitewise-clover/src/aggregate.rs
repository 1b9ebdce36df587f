//! Folds raw Clover categories and items into categories of sellable variations.
//!
//! Pure in-memory transform: no I/O, no state carried between calls.

use std::collections::HashMap;

use bitewise_core::{Category, Variation};

use crate::types::{CloverCategory, CloverItem};

/// Builds the category → variation tree for one merchant.
///
/// Output order follows `categories`. Every category is present even if no
/// item links to it. Each item contributes to every category it links to:
/// one variation per variant when it has variants, otherwise one variation
/// for the item itself. Links to category ids absent from `categories` are
/// ignored, and repeated links are not deduplicated.
#[must_use]
pub fn aggregate_categories(categories: &[CloverCategory], items: &[CloverItem]) -> Vec<Category> {
    let mut output: Vec<Category> = Vec::with_capacity(categories.len());
    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(categories.len());

    for category in categories {
        if let Some(&idx) = index_by_id.get(category.id.as_str()) {
            category.name.clone_into(&mut output[idx].name);
            continue;
        }
        index_by_id.insert(category.id.as_str(), output.len());
        output.push(Category::empty(category.id.clone(), category.name.clone()));
    }

    for item in items {
        if item.categories.is_empty() {
            continue;
        }

        let variations = item_variations(item);
        for link in &item.categories {
            match index_by_id.get(link.id.as_str()) {
                Some(&idx) => output[idx].variations.extend(variations.iter().cloned()),
                None => {
                    tracing::debug!(
                        item_id = %item.id,
                        category_id = %link.id,
                        "item links to unknown category; skipping"
                    );
                }
            }
        }
    }

    output
}

fn item_variations(item: &CloverItem) -> Vec<Variation> {
    if item.variants.is_empty() {
        return vec![Variation {
            id: item.id.clone(),
            name: item.name.clone(),
            price: cents_to_price(item.price.unwrap_or(0)),
        }];
    }

    item.variants
        .iter()
        .map(|variant| Variation {
            id: variant.id.clone(),
            name: format!("{} ({})", item.name, variant.name),
            price: cents_to_price(variant.price.unwrap_or(0)),
        })
        .collect()
}

// Catalog prices stay far below 2^53 cents, so the conversion is exact.
#[allow(clippy::cast_precision_loss)]
fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}

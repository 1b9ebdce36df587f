//! Clover REST API response types.
//!
//! Clover wraps collections as `{"elements": [...]}`. Expanded sub-resources
//! on an item (`variants`, `categories`) arrive either in that envelope or, for
//! some account types, as a bare array; both are accepted. Missing or
//! malformed category links deserialize as an empty list and bad link entries
//! are skipped. Variants are stricter: a variant entry that does not parse
//! fails the whole item, since an item with variants is never sold as itself.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

/// Top-level `{"elements": [...]}` envelope for list endpoints.
#[derive(Debug, Deserialize)]
pub struct ElementList<T> {
    #[serde(default = "Vec::new")]
    pub elements: Vec<T>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CloverCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A link from an item to a category, as returned with `expand=categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloverVariant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Integer cents.
    #[serde(default)]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloverItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Integer cents. Variable-price items omit it.
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "strict_elements")]
    pub variants: Vec<CloverVariant>,
    #[serde(default, deserialize_with = "lenient_elements")]
    pub categories: Vec<CategoryRef>,
}

// ---------------------------------------------------------------------------
// Modifier groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CloverModifier {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloverModifierGroup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "minRequired")]
    pub min_required: Option<i64>,
    #[serde(default, rename = "maxAllowed")]
    pub max_allowed: Option<i64>,
    #[serde(default, deserialize_with = "lenient_elements")]
    pub modifiers: Vec<CloverModifier>,
}

// ---------------------------------------------------------------------------
// Merchant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CloverMerchant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

/// Accepts `null`, a bare array, or an `{"elements": [...]}` envelope.
/// Anything else yields an empty list; entries that fail to parse are dropped.
fn lenient_elements<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<serde_json::Value>::deserialize(deserializer)?
        .and_then(element_entries)
        .unwrap_or_default();

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Same containers as [`lenient_elements`], but every entry must parse and a
/// scalar in place of the list is an error.
fn strict_elements<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    let entries = element_entries(value)
        .ok_or_else(|| D::Error::custom("expected a list or an elements envelope"))?;

    entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).map_err(D::Error::custom))
        .collect()
}

/// Unwraps a bare array or an envelope. An envelope without `elements` (an
/// unexpanded reference) is an empty list; any other shape is `None`.
fn element_entries(value: serde_json::Value) -> Option<Vec<serde_json::Value>> {
    match value {
        serde_json::Value::Array(entries) => Some(entries),
        serde_json::Value::Object(mut map) => match map.remove("elements") {
            Some(serde_json::Value::Array(entries)) => Some(entries),
            Some(serde_json::Value::Null) | None => Some(Vec::new()),
            Some(_) => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> CloverItem {
        serde_json::from_value(value).expect("item should deserialize")
    }

    #[test]
    fn item_reads_enveloped_categories_and_bare_variants() {
        let parsed = item(json!({
            "id": "i1",
            "name": "Latte",
            "price": 450,
            "variants": [{ "id": "v1", "name": "Small", "price": 300 }],
            "categories": { "elements": [{ "id": "c1" }, { "id": "c2" }] }
        }));

        assert_eq!(parsed.price, Some(450));
        assert_eq!(parsed.variants.len(), 1);
        assert_eq!(parsed.variants[0].name, "Small");
        let ids: Vec<&str> = parsed.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn item_reads_enveloped_variants() {
        let parsed = item(json!({
            "id": "i1",
            "name": "Latte",
            "variants": { "elements": [{ "id": "v1", "name": "Small", "price": 300 }] }
        }));
        assert_eq!(parsed.variants.len(), 1);
        assert!(parsed.price.is_none());
    }

    #[test]
    fn missing_or_malformed_links_become_empty() {
        let missing = item(json!({ "id": "i1", "name": "Tea" }));
        assert!(missing.categories.is_empty());
        assert!(missing.variants.is_empty());

        let null = item(json!({ "id": "i1", "name": "Tea", "categories": null }));
        assert!(null.categories.is_empty());

        let wrong_type = item(json!({ "id": "i1", "name": "Tea", "categories": "c1" }));
        assert!(wrong_type.categories.is_empty());

        let no_elements = item(json!({ "id": "i1", "name": "Tea", "categories": { "href": "x" } }));
        assert!(no_elements.categories.is_empty());
    }

    #[test]
    fn malformed_link_entries_are_skipped() {
        let parsed = item(json!({
            "id": "i1",
            "name": "Tea",
            "categories": { "elements": [{ "id": "c1" }, { "name": "no id" }, 7] }
        }));
        assert_eq!(parsed.categories.len(), 1);
        assert_eq!(parsed.categories[0].id, "c1");
    }

    #[test]
    fn malformed_variant_rejects_the_item() {
        let all_bad = serde_json::from_value::<CloverItem>(json!({
            "id": "i1",
            "name": "Latte",
            "price": 999,
            "variants": [
                { "name": "Small", "price": 300 },
                { "name": "Large", "price": 400 }
            ],
            "categories": { "elements": [{ "id": "c1" }] }
        }));
        assert!(all_bad.is_err());

        let one_bad = serde_json::from_value::<CloverItem>(json!({
            "id": "i1",
            "name": "Latte",
            "variants": { "elements": [{ "id": "v1", "name": "Small" }, 7] }
        }));
        assert!(one_bad.is_err());

        let scalar = serde_json::from_value::<CloverItem>(json!({
            "id": "i1",
            "name": "Latte",
            "variants": "v1"
        }));
        assert!(scalar.is_err());
    }

    #[test]
    fn absent_or_unexpanded_variants_are_empty() {
        let null = item(json!({ "id": "i1", "name": "Tea", "variants": null }));
        assert!(null.variants.is_empty());

        let unexpanded = item(json!({ "id": "i1", "name": "Tea", "variants": { "href": "x" } }));
        assert!(unexpanded.variants.is_empty());
    }

    #[test]
    fn element_list_defaults_to_empty() {
        let list: ElementList<CloverCategory> =
            serde_json::from_value(json!({ "href": "https://example" })).expect("deserialize");
        assert!(list.elements.is_empty());
    }

    #[test]
    fn modifier_group_reads_camel_case_limits() {
        let group: CloverModifierGroup = serde_json::from_value(json!({
            "id": "mg1",
            "name": "Milk",
            "minRequired": 0,
            "maxAllowed": 1,
            "modifiers": { "elements": [{ "id": "m1", "name": "Oat", "price": 75 }] }
        }))
        .expect("deserialize modifier group");
        assert_eq!(group.max_allowed, Some(1));
        assert_eq!(group.modifiers[0].price, Some(75));
    }
}

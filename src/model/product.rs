// src/model/product.rs

use std::collections::{BTreeMap, BTreeSet};

/// A row of the product master list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    pub sku: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub unit_cost: Option<f64>,
    pub moq: Option<f64>,
    pub lead_time_days: Option<f64>,
    /// User columns outside the known set, keyed by normalized header.
    pub extra: BTreeMap<String, String>,
}

/// Search criteria for [`ProductCatalog::filter`]. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against SKU and name.
    pub query: Option<String>,
    pub vendor: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(q) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let in_sku = product.sku.to_lowercase().contains(&q);
            let in_name = product
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&q));
            if !in_sku && !in_name {
                return false;
            }
        }

        if let Some(vendor) = &self.vendor {
            if product.vendor.as_ref() != Some(vendor) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if product.category.as_ref() != Some(category) {
                return false;
            }
        }

        true
    }
}

/// The product master list, keyed and ordered by SKU.
///
/// Lives for one invocation; callers own it and pass it around explicitly.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: BTreeMap<String, Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts products by SKU. Later rows replace earlier ones, both within
    /// `products` and against what the catalog already holds.
    pub fn merge<I>(&mut self, products: I) -> usize
    where
        I: IntoIterator<Item = Product>,
    {
        let mut merged = 0;
        for mut product in products {
            product.sku = product.sku.trim().to_string();
            if product.sku.is_empty() {
                continue;
            }
            self.products.insert(product.sku.clone(), product);
            merged += 1;
        }
        merged
    }

    pub fn get(&self, sku: &str) -> Option<&Product> {
        self.products.get(sku)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn filter<'a>(
        &'a self,
        filter: &'a ProductFilter,
    ) -> impl Iterator<Item = &'a Product> {
        self.products.values().filter(move |p| filter.matches(p))
    }

    /// Sorted distinct vendors.
    pub fn vendors(&self) -> Vec<String> {
        distinct(self.products.values().filter_map(|p| p.vendor.as_deref()))
    }

    /// Sorted distinct categories.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.products.values().filter_map(|p| p.category.as_deref()))
    }

    /// Sorted union of the extra column names across all products.
    pub fn extra_columns(&self) -> Vec<String> {
        distinct(self.products.values().flat_map(|p| p.extra.keys().map(String::as_str)))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, name: &str, vendor: &str, category: &str) -> Product {
        Product {
            sku: sku.to_string(),
            name: Some(name.to_string()),
            vendor: Some(vendor.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    fn sample_catalog() -> ProductCatalog {
        let mut catalog = ProductCatalog::new();
        catalog.merge(vec![
            product("MUG-01", "Ceramic Mug", "Acme", "Kitchen"),
            product("TEE-02", "Cotton Tee", "Threads", "Apparel"),
            product("CUP-03", "Paper Cup", "Acme", "Kitchen"),
        ]);
        catalog
    }

    #[test]
    fn merge_keeps_last_row_per_sku() {
        let mut catalog = sample_catalog();
        catalog.merge(vec![product(" MUG-01 ", "Big Mug", "Acme", "Kitchen")]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("MUG-01").unwrap().name.as_deref(), Some("Big Mug"));
    }

    #[test]
    fn merge_replaces_extra_columns_with_the_later_row() {
        let mut catalog = ProductCatalog::new();
        let mut first = product("A", "Anchor", "Acme", "Hardware");
        first.extra.insert("color".to_string(), "red".to_string());
        first.extra.insert("bin".to_string(), "B4".to_string());
        let mut second = product("A", "Anchor", "Acme", "Hardware");
        second.extra.insert("color".to_string(), "blue".to_string());

        catalog.merge(vec![first]);
        catalog.merge(vec![second]);

        let a = catalog.get("A").unwrap();
        assert_eq!(a.extra.get("color").map(String::as_str), Some("blue"));
        assert!(!a.extra.contains_key("bin"));
        assert_eq!(catalog.extra_columns(), vec!["color"]);
    }

    #[test]
    fn merge_skips_blank_skus() {
        let mut catalog = ProductCatalog::new();
        let merged = catalog.merge(vec![product("  ", "Ghost", "Acme", "Kitchen")]);
        assert_eq!(merged, 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn iterates_in_sku_order() {
        let catalog = sample_catalog();
        let skus: Vec<_> = catalog.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["CUP-03", "MUG-01", "TEE-02"]);
    }

    #[test]
    fn query_matches_sku_or_name_case_insensitively() {
        let catalog = sample_catalog();

        let filter = ProductFilter {
            query: Some("cup".to_string()),
            ..Default::default()
        };
        let hits: Vec<_> = catalog.filter(&filter).map(|p| p.sku.as_str()).collect();
        assert_eq!(hits, vec!["CUP-03"]);

        let filter = ProductFilter {
            query: Some("COTTON".to_string()),
            ..Default::default()
        };
        let hits: Vec<_> = catalog.filter(&filter).map(|p| p.sku.as_str()).collect();
        assert_eq!(hits, vec!["TEE-02"]);
    }

    #[test]
    fn vendor_and_category_filters_combine() {
        let catalog = sample_catalog();
        let filter = ProductFilter {
            query: Some("m".to_string()),
            vendor: Some("Acme".to_string()),
            category: Some("Kitchen".to_string()),
        };
        let hits: Vec<_> = catalog.filter(&filter).map(|p| p.sku.as_str()).collect();
        assert_eq!(hits, vec!["MUG-01"]);
    }

    #[test]
    fn distinct_vendors_and_categories_are_sorted() {
        let catalog = sample_catalog();
        assert_eq!(catalog.vendors(), vec!["Acme", "Threads"]);
        assert_eq!(catalog.categories(), vec!["Apparel", "Kitchen"]);
    }
}

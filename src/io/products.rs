// src/io/products.rs

use crate::error::{Error, Result};
use crate::model::product::Product;
use csv::StringRecord;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use tracing::info;

/// Known columns of the product master file, `sku` first and required.
/// Any other column is carried through as an extra.
pub const PRODUCT_COLUMNS: [&str; 7] = [
    "sku",
    "name",
    "category",
    "vendor",
    "unit_cost",
    "moq",
    "lead_time_days",
];

// Header positions resolved once per file
struct ColumnIndex {
    sku: usize,
    name: Option<usize>,
    category: Option<usize>,
    vendor: Option<usize>,
    unit_cost: Option<usize>,
    moq: Option<usize>,
    lead_time_days: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl ColumnIndex {
    fn new(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let sku = find("sku").ok_or_else(|| Error::MissingColumns(vec!["sku".to_string()]))?;

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty() && !PRODUCT_COLUMNS.contains(&h.as_str()))
            .map(|(i, h)| (i, h.clone()))
            .collect();

        Ok(Self {
            sku,
            name: find("name"),
            category: find("category"),
            vendor: find("vendor"),
            unit_cost: find("unit_cost"),
            moq: find("moq"),
            lead_time_days: find("lead_time_days"),
            extra,
        })
    }

    fn product(&self, row: &StringRecord) -> Option<Product> {
        let text = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let number = |idx: Option<usize>| {
            text(idx)?.parse::<f64>().ok().filter(|v| v.is_finite())
        };

        let sku = text(Some(self.sku))?;
        let extra: BTreeMap<String, String> = self
            .extra
            .iter()
            .filter_map(|(i, header)| {
                row.get(*i)
                    .filter(|v| !v.is_empty())
                    .map(|v| (header.clone(), v.to_string()))
            })
            .collect();

        Some(Product {
            sku,
            name: text(self.name),
            category: text(self.category),
            vendor: text(self.vendor),
            unit_cost: number(self.unit_cost),
            moq: number(self.moq),
            lead_time_days: number(self.lead_time_days),
            extra,
        })
    }
}

/// Reads a product master CSV.
///
/// Header names are trimmed and lowercased before matching; only `sku` is
/// required. Unparseable numbers are left unset and unknown columns are kept
/// in [`Product::extra`].
pub fn load_products<R: Read>(reader: R) -> Result<Vec<Product>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let columns = ColumnIndex::new(&headers)?;

    let mut products = Vec::new();
    for result in rdr.records() {
        if let Some(product) = columns.product(&result?) {
            products.push(product);
        }
    }

    info!(rows = products.len(), extra = columns.extra.len(), "loaded products");
    Ok(products)
}

pub fn load_products_file(path: impl AsRef<std::path::Path>) -> Result<Vec<Product>> {
    let file = std::fs::File::open(path)?;
    load_products(file)
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes products as CSV: [`PRODUCT_COLUMNS`], then the sorted union of
/// their extra columns.
pub fn write_products<'a, W, I>(writer: W, products: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Product>,
{
    let products: Vec<&Product> = products.into_iter().collect();
    let extra_columns: BTreeSet<&str> = products
        .iter()
        .flat_map(|p| p.extra.keys().map(String::as_str))
        .collect();

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(PRODUCT_COLUMNS.iter().chain(extra_columns.iter()))?;

    for p in products {
        let known = [
            p.sku.clone(),
            p.name.clone().unwrap_or_default(),
            p.category.clone().unwrap_or_default(),
            p.vendor.clone().unwrap_or_default(),
            format_number(p.unit_cost),
            format_number(p.moq),
            format_number(p.lead_time_days),
        ];
        let extra = extra_columns
            .iter()
            .map(|col| p.extra.get(*col).cloned().unwrap_or_default());
        wtr.write_record(known.into_iter().chain(extra))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes an empty product file containing only the header.
pub fn write_template<W: Write>(writer: W) -> Result<()> {
    write_products(writer, std::iter::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::ProductCatalog;

    #[test]
    fn normalizes_headers_and_parses_optionals() {
        let csv = " SKU ,Name,Vendor,Unit_Cost\nMUG-01,Mug,Acme,3.5\nTEE-02,,Threads,abc\n";
        let products = load_products(csv.as_bytes()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].sku, "MUG-01");
        assert_eq!(products[0].name.as_deref(), Some("Mug"));
        assert_eq!(products[0].unit_cost, Some(3.5));
        assert_eq!(products[0].category, None);
        assert_eq!(products[1].name, None);
        assert_eq!(products[1].unit_cost, None);
        assert!(products[0].extra.is_empty());
    }

    #[test]
    fn sku_column_is_required() {
        let csv = "name,vendor\nMug,Acme\n";
        assert!(matches!(
            load_products(csv.as_bytes()),
            Err(Error::MissingColumns(cols)) if cols == vec!["sku".to_string()]
        ));
    }

    #[test]
    fn rows_without_sku_are_dropped() {
        let csv = "sku,name\n,Ghost\nA,Real\n";
        let products = load_products(csv.as_bytes()).unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn unknown_columns_are_kept_as_extras() {
        let csv = "sku,name,Color,shelf\nA,Anchor,red,2.5\nB,Bolt,,7\n";
        let products = load_products(csv.as_bytes()).unwrap();

        assert_eq!(products[0].extra.get("color").map(String::as_str), Some("red"));
        assert_eq!(products[0].extra.get("shelf").map(String::as_str), Some("2.5"));
        assert!(!products[1].extra.contains_key("color"));
    }

    #[test]
    fn template_is_header_only() {
        let mut buf = Vec::new();
        write_template(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "sku,name,category,vendor,unit_cost,moq,lead_time_days\n"
        );
    }

    #[test]
    fn exported_catalog_loads_back() {
        let csv = "sku,name,category,vendor,unit_cost,moq,lead_time_days\n\
                   B,Bolt,Hardware,Acme,0.1,100,14\nA,Anchor,Hardware,Acme,,,\n";
        let mut catalog = ProductCatalog::new();
        catalog.merge(load_products(csv.as_bytes()).unwrap());

        let mut buf = Vec::new();
        write_products(&mut buf, catalog.iter()).unwrap();
        let reloaded = load_products(buf.as_slice()).unwrap();

        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].sku, "A");
        assert_eq!(reloaded[1].moq, Some(100.0));
        assert_eq!(reloaded[1].lead_time_days, Some(14.0));
    }

    #[test]
    fn merged_files_keep_extra_columns() {
        let first = "sku,name,color\nA,Anchor,red\nB,Bolt,grey\n";
        let second = "sku,name,bin\nB,Bolt,B4\n";

        let mut catalog = ProductCatalog::new();
        catalog.merge(load_products(first.as_bytes()).unwrap());
        catalog.merge(load_products(second.as_bytes()).unwrap());

        let mut buf = Vec::new();
        write_products(&mut buf, catalog.iter()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "sku,name,category,vendor,unit_cost,moq,lead_time_days,bin,color",
                "A,Anchor,,,,,,,red",
                "B,Bolt,,,,,,B4,",
            ]
        );
    }
}

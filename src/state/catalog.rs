use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::task;
use walkdir::WalkDir;

use super::data::Product;
use crate::error::{CatalogError, Result};

/// Dataset files are recognized by extension (case-insensitive)
const DATASET_EXTENSION: &str = "json";

/// The full, ordered product catalog.
///
/// Loaded once from a dataset directory and never mutated afterwards.
/// Quantities live outside the products, in a `QuantityMap`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Directory the catalog was read from (image references resolve against it)
    dir: PathBuf,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already parsed products.
    ///
    /// Later products whose id was already seen are dropped so ids stay unique.
    pub fn from_products(dir: impl Into<PathBuf>, products: Vec<Product>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(products.len());

        for product in products {
            if seen.insert(product.id.clone()) {
                unique.push(product);
            } else {
                warn!("Dropping duplicate product id {} ({})", product.id, product.name);
            }
        }

        Catalog {
            dir: dir.into(),
            products: unique,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct non-null categories, in order of first occurrence
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter_map(|product| product.category.as_ref())
            .filter(|category| seen.insert(category.as_str()))
            .cloned()
            .collect()
    }
}

/// Load every dataset record in `dir` into a catalog.
///
/// Only regular `.json` files directly inside `dir` are read, in file name
/// order. A file holds either one record or an array of records. Empty,
/// unparseable or malformed records are dropped.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    if !dir.exists() {
        return Err(CatalogError::MissingDirectory(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(CatalogError::NotADirectory(dir.to_path_buf()));
    }

    info!("Scanning dataset directory: {}", dir.display());

    let mut products = Vec::new();
    let mut dropped_count = 0;

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(CatalogError::Io {
                    path: dir.to_path_buf(),
                    message: err.to_string(),
                });
            }
            Err(err) => {
                warn!("Skipping unreadable dataset entry: {}", err);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_dataset_file(path) {
            continue;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                dropped_count += 1;
                continue;
            }
        };

        let value: Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(err) => {
                warn!("Skipping malformed dataset file {}: {}", path.display(), err);
                dropped_count += 1;
                continue;
            }
        };

        for record in flatten_records(value) {
            match parse_record(record) {
                Some(product) => products.push(product),
                None => dropped_count += 1,
            }
        }
    }

    let catalog = Catalog::from_products(dir, products);
    info!(
        "Loaded {} products from {} ({} records dropped)",
        catalog.len(),
        dir.display(),
        dropped_count
    );

    Ok(catalog)
}

/// Load the catalog on a blocking worker so the UI thread stays responsive
pub async fn load_catalog_async(dir: PathBuf) -> Result<Catalog> {
    task::spawn_blocking(move || load_catalog(&dir))
        .await
        .map_err(|e| CatalogError::Task(e.to_string()))?
}

fn is_dataset_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(DATASET_EXTENSION))
        .unwrap_or(false)
}

/// A dataset file holds a single record or an array of them
fn flatten_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Turn one JSON record into a product, or None if it should be dropped
fn parse_record(record: Value) -> Option<Product> {
    match &record {
        Value::Null => return None,
        Value::Object(fields) if fields.is_empty() => return None,
        _ => {}
    }

    match serde_json::from_value::<Product>(record) {
        Ok(product) => Some(product),
        Err(err) => {
            debug!("Dropping malformed record: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ProductId;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.products().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = load_catalog(&missing);

        assert_eq!(result, Err(CatalogError::MissingDirectory(missing)));
    }

    #[test]
    fn test_file_instead_of_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "single.json", "{}");
        let file = dir.path().join("single.json");

        assert_eq!(load_catalog(&file), Err(CatalogError::NotADirectory(file)));
    }

    #[test]
    fn test_loads_objects_and_arrays_in_file_name_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b_fruit.json", r#"[
            {"id": 2, "product": "Banana", "type": "Fruit"},
            {"id": 3, "product": "Cherry", "type": "Fruit"}
        ]"#);
        write(&dir, "a_bar.json", r#"{"id": 1, "product": "Oat Bar", "type": "Snack"}"#);

        let catalog = load_catalog(dir.path()).unwrap();

        assert_eq!(ids(&catalog), vec!["1", "2", "3"]);
        assert_eq!(catalog.dir(), dir.path());
    }

    #[test]
    fn test_drops_empty_null_and_malformed_records() {
        let dir = TempDir::new().unwrap();
        write(&dir, "empty.json", "{}");
        write(&dir, "broken.json", "{ not json");
        write(&dir, "blank.json", "");
        write(&dir, "mixed.json", r#"[
            {},
            null,
            {"product": "No id"},
            {"id": "kiwi", "product": "Kiwi"}
        ]"#);

        let catalog = load_catalog(dir.path()).unwrap();

        assert_eq!(ids(&catalog), vec!["kiwi"]);
    }

    #[test]
    fn test_ignores_non_dataset_files_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        write(&dir, "notes.txt", r#"{"id": 9, "product": "Text"}"#);
        write(&dir, "UPPER.JSON", r#"{"id": 1, "product": "Upper"}"#);
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested").join("deep.json"),
            r#"{"id": 5, "product": "Deep"}"#,
        )
        .unwrap();

        let catalog = load_catalog(dir.path()).unwrap();

        assert_eq!(ids(&catalog), vec!["1"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", r#"{"id": 1, "product": "First"}"#);
        write(&dir, "b.json", r#"{"id": "1", "product": "Second"}"#);

        let catalog = load_catalog(dir.path()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name, "First");
    }

    #[test]
    fn test_record_without_nutrients_is_kept() {
        let dir = TempDir::new().unwrap();
        write(&dir, "water.json", r#"{"id": "w", "product": "Water", "type": null}"#);

        let catalog = load_catalog(dir.path()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].nutrients, None);
        assert_eq!(catalog.products()[0].category, None);
    }

    #[test]
    fn test_record_with_null_nutrient_field_is_kept() {
        let dir = TempDir::new().unwrap();
        write(&dir, "milk.json", r#"{"id": 1, "product": "Milk", "nutrients": {"protein": 3.4, "fiber": null}}"#);

        let catalog = load_catalog(dir.path()).unwrap();

        assert_eq!(catalog.len(), 1);
        let nutrients = catalog.products()[0].nutrients.unwrap();
        assert_eq!(nutrients.protein, 3.4);
        assert_eq!(nutrients.fiber, 0.0);
    }

    #[test]
    fn test_categories_in_first_occurrence_order() {
        let products: Vec<Product> = serde_json::from_str(r#"[
            {"id": 1, "product": "Apple", "type": "Fruit"},
            {"id": 2, "product": "Milk", "type": "Dairy"},
            {"id": 3, "product": "Water"},
            {"id": 4, "product": "Pear", "type": "Fruit"}
        ]"#)
        .unwrap();

        let catalog = Catalog::from_products("data", products);

        assert_eq!(catalog.categories(), vec!["Fruit".to_string(), "Dairy".to_string()]);
        assert_eq!(catalog.products()[2].id, ProductId::new("3"));
    }

    #[tokio::test]
    async fn test_load_catalog_async() {
        let dir = TempDir::new().unwrap();
        write(&dir, "one.json", r#"{"id": 1, "product": "Egg"}"#);

        let catalog = load_catalog_async(dir.path().to_path_buf()).await.unwrap();
        assert_eq!(ids(&catalog), vec!["1"]);

        let missing = load_catalog_async(dir.path().join("missing")).await;
        assert!(matches!(missing, Err(CatalogError::MissingDirectory(_))));
    }
}

/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog loader, the aggregation engine and the UI layer.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Stable product identifier
///
/// Dataset records may carry either a JSON string or an integer id,
/// both are normalized to their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => ProductId(n.to_string()),
            RawId::Float(n) => ProductId(n.to_string()),
            RawId::Text(s) => ProductId(s),
        })
    }
}

/// Represents a single food product in the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Unique identifier across the catalog
    pub id: ProductId,
    /// Display name (the `product` field of a dataset record)
    #[serde(rename = "product")]
    pub name: String,
    /// Category, e.g. "Fruit" (None if the record has no type)
    #[serde(rename = "type", default)]
    pub category: Option<String>,
    /// Image reference: a path relative to the dataset directory, or a URL
    #[serde(default)]
    pub image: Option<String>,
    /// Per-unit nutrient values (None if the record has no profile)
    #[serde(default)]
    pub nutrients: Option<NutrientProfile>,
}

impl Product {
    /// Resolve the image reference to a local file.
    ///
    /// Remote references are never fetched, so URLs resolve to None.
    pub fn image_path(&self, dataset_dir: &Path) -> Option<PathBuf> {
        let reference = self.image.as_deref()?.trim();
        if reference.is_empty() || reference.contains("://") || reference.starts_with("data:") {
            return None;
        }

        let path = Path::new(reference);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(dataset_dir.join(path))
        }
    }
}

/// The six per-unit nutrient values of a product
///
/// Any field missing from a dataset record, or set to null, is zero.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct NutrientProfile {
    /// Protein in grams
    #[serde(deserialize_with = "zero_if_null")]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(deserialize_with = "zero_if_null")]
    pub carbs: f64,
    /// Fat in grams
    #[serde(deserialize_with = "zero_if_null")]
    pub fat: f64,
    /// Fiber in grams
    #[serde(deserialize_with = "zero_if_null")]
    pub fiber: f64,
    /// Sugars in grams
    #[serde(deserialize_with = "zero_if_null")]
    pub sugars: f64,
    /// Energy in kcal
    #[serde(deserialize_with = "zero_if_null")]
    pub calories: f64,
}

fn zero_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl NutrientProfile {
    /// Read a single nutrient value
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sugars => self.sugars,
            Nutrient::Calories => self.calories,
        }
    }
}

/// Quantity-weighted nutrient sums over a working set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutrientTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugars: f64,
    pub calories: f64,
}

impl NutrientTotals {
    /// Read a single total
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sugars => self.sugars,
            Nutrient::Calories => self.calories,
        }
    }

    /// Add `profile * quantity` to every field
    pub fn accumulate(&mut self, profile: &NutrientProfile, quantity: f64) {
        self.protein += profile.protein * quantity;
        self.carbs += profile.carbs * quantity;
        self.fat += profile.fat * quantity;
        self.fiber += profile.fiber * quantity;
        self.sugars += profile.sugars * quantity;
        self.calories += profile.calories * quantity;
    }
}

/// The tracked nutrients, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sugars,
    Calories,
}

impl Nutrient {
    pub const ALL: [Nutrient; 6] = [
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Fiber,
        Nutrient::Sugars,
        Nutrient::Calories,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein",
            Nutrient::Carbs => "Carbs",
            Nutrient::Fat => "Fat",
            Nutrient::Fiber => "Fiber",
            Nutrient::Sugars => "Sugars",
            Nutrient::Calories => "Calories",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Nutrient::Protein => "🍗",
            Nutrient::Carbs => "🍞",
            Nutrient::Fat => "🥑",
            Nutrient::Fiber => "🥦",
            Nutrient::Sugars => "🍬",
            Nutrient::Calories => "🔥",
        }
    }

    /// Format a product card line, e.g. "Fat: 5.00g" or "Calories: 95.00 kcal"
    pub fn format(self, value: f64) -> String {
        match self {
            Nutrient::Calories => format!("{}: {:.2} {}", self.label(), value, self.unit()),
            _ => format!("{}: {:.2}{}", self.label(), value, self.unit()),
        }
    }

    /// Format a totals line; the unit always follows the value directly
    pub fn format_total(self, value: f64) -> String {
        format!("{}: {:.2}{}", self.label(), value, self.unit())
    }
}

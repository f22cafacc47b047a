/// State management module
///
/// This module handles all application state, including:
/// - Product records and nutrient profiles (data.rs)
/// - Loading the catalog from a dataset directory (catalog.rs)
/// - Consumed quantities per product (quantity.rs)
/// - Type filter and name search (filter.rs)
/// - The carousel cursor (cursor.rs)
/// - Nutrient aggregation (aggregate.rs)
/// - The session that owns all of the above (session.rs)

pub mod aggregate;
pub mod catalog;
pub mod cursor;
pub mod data;
pub mod filter;
pub mod quantity;
pub mod session;

/// Widgets for the tracker window
///
/// - The product card shown in the carousel (card.rs)
/// - The nutrient totals overlay (totals.rs)

pub mod card;
pub mod totals;

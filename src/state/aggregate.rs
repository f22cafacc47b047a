use super::data::{NutrientTotals, Product};
use super::quantity::QuantityMap;

/// Sum quantity-weighted nutrients over a working set.
///
/// Each product adds `field * quantity` to every total. Products without a
/// nutrient profile or without a quantity contribute nothing.
pub fn aggregate<'a, I>(working_set: I, quantities: &QuantityMap) -> NutrientTotals
where
    I: IntoIterator<Item = &'a Product>,
{
    working_set
        .into_iter()
        .fold(NutrientTotals::default(), |mut totals, product| {
            if let Some(profile) = &product.nutrients {
                let quantity = f64::from(quantities.get(&product.id));
                totals.accumulate(profile, quantity);
            }
            totals
        })
}

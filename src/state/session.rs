use log::debug;

use super::aggregate::aggregate;
use super::catalog::Catalog;
use super::cursor::Cursor;
use super::data::{NutrientTotals, Product, ProductId};
use super::filter::{FilterState, FilteredView};
use super::quantity::QuantityMap;

/// All state behind the tracker window.
///
/// Owned by the application and changed only through the transition
/// methods below, one per user action.
#[derive(Debug, Clone, Default)]
pub struct Session {
    catalog: Catalog,
    categories: Vec<String>,
    quantities: QuantityMap,
    filters: FilterState,
    view: FilteredView,
    cursor: Cursor,
    totals: Option<NutrientTotals>,
    show_totals: bool,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        let categories = catalog.categories();
        let view = FilteredView::all(&catalog);

        Session {
            catalog,
            categories,
            view,
            ..Session::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Selectable categories, in order of first occurrence
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.quantities.get(id)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Products of the current view, in catalog order
    pub fn visible_products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.view.products(&self.catalog)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The product under the cursor, None if the view is empty
    pub fn current_product(&self) -> Option<&Product> {
        let position = self.cursor.position(self.view.len())?;
        self.view.get(&self.catalog, position)
    }

    /// Totals to display, if the overlay is open
    pub fn visible_totals(&self) -> Option<&NutrientTotals> {
        if self.show_totals {
            self.totals.as_ref()
        } else {
            None
        }
    }

    /// Set the quantity of `id` from raw user input
    pub fn change_quantity(&mut self, id: &ProductId, raw: &str) {
        self.quantities = self.quantities.with_raw(id, raw);
        debug!("Quantity of {} set to {}", id, self.quantities.get(id));
    }

    /// Restrict the view to one category; None or "" shows every category
    pub fn filter_by_type(&mut self, category: Option<String>) {
        self.filters.category = category.filter(|c| !c.is_empty());
        self.refresh_view();
    }

    /// Restrict the view to names containing `text`, ignoring case
    pub fn search_by_text(&mut self, text: impl Into<String>) {
        self.filters.search = text.into();
        self.refresh_view();
    }

    pub fn next(&mut self) {
        self.cursor = self.cursor.next(self.view.len());
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.previous(self.view.len());
    }

    /// Aggregate nutrients over the current view and open the totals overlay
    pub fn compute_total(&mut self) -> NutrientTotals {
        let totals = aggregate(self.visible_products(), &self.quantities);
        debug!("Computed totals over {} products: {:?}", self.view.len(), totals);

        self.totals = Some(totals);
        self.show_totals = true;
        totals
    }

    pub fn close_totals(&mut self) {
        self.show_totals = false;
    }

    /// Recompute the view from the full catalog and rewind the cursor
    fn refresh_view(&mut self) {
        self.view = FilteredView::derive(&self.catalog, &self.filters);
        self.cursor = Cursor::default();
        debug!(
            "Filter {:?} / search {:?} selects {} of {} products",
            self.filters.category,
            self.filters.search,
            self.view.len(),
            self.catalog.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"id": 1, "product": "Apple", "type": "Fruit",
                 "nutrients": {"protein": 0.5, "carbs": 25, "fat": 0.3, "fiber": 4, "sugars": 19, "calories": 95}},
                {"id": 2, "product": "Greek Yogurt", "type": "Dairy",
                 "nutrients": {"protein": 10, "carbs": 4, "fat": 5, "fiber": 0, "sugars": 4, "calories": 100}},
                {"id": 3, "product": "Pineapple", "type": "Fruit",
                 "nutrients": {"protein": 1, "carbs": 22, "fat": 0, "fiber": 2, "sugars": 16, "calories": 82}},
                {"id": 4, "product": "Water"}
            ]"#,
        )
        .unwrap();
        Session::new(Catalog::from_products("data", products))
    }

    fn visible_ids(session: &Session) -> Vec<&str> {
        session.visible_products().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_starts_with_full_catalog() {
        let session = session();

        assert_eq!(visible_ids(&session), vec!["1", "2", "3", "4"]);
        assert_eq!(session.categories(), &["Fruit".to_string(), "Dairy".to_string()]);
        assert_eq!(session.current_product().map(|p| p.name.as_str()), Some("Apple"));
        assert!(session.visible_totals().is_none());
    }

    #[test]
    fn test_filter_and_search_compose() {
        let mut session = session();

        session.filter_by_type(Some("Fruit".to_string()));
        assert_eq!(visible_ids(&session), vec!["1", "3"]);

        session.search_by_text("PINE");
        assert_eq!(visible_ids(&session), vec!["3"]);

        session.filter_by_type(None);
        assert_eq!(visible_ids(&session), vec!["3"]);

        session.search_by_text("");
        assert_eq!(visible_ids(&session), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_empty_category_means_all() {
        let mut session = session();
        session.filter_by_type(Some("Dairy".to_string()));
        session.filter_by_type(Some(String::new()));

        assert_eq!(session.filters().category, None);
        assert_eq!(visible_ids(&session), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_filter_and_search_reset_cursor() {
        let mut session = session();
        session.next();
        session.next();
        assert_eq!(session.cursor().index(), 2);

        session.search_by_text("a");
        assert_eq!(session.cursor().index(), 0);

        session.next();
        session.filter_by_type(Some("Fruit".to_string()));
        assert_eq!(session.cursor().index(), 0);
        assert_eq!(session.current_product().map(|p| p.name.as_str()), Some("Apple"));
    }

    #[test]
    fn test_navigation_wraps_and_empty_view_is_safe() {
        let mut session = session();
        session.previous();
        assert_eq!(session.current_product().map(|p| p.name.as_str()), Some("Water"));
        session.next();
        assert_eq!(session.current_product().map(|p| p.name.as_str()), Some("Apple"));

        session.search_by_text("no such food");
        session.next();
        session.previous();
        assert!(session.current_product().is_none());
    }

    #[test]
    fn test_quantities_survive_filtering() {
        let mut session = session();
        let apple = ProductId::new("1");

        session.change_quantity(&apple, "2");
        session.filter_by_type(Some("Dairy".to_string()));
        session.filter_by_type(None);

        assert_eq!(session.quantity(&apple), 2);
    }

    #[test]
    fn test_change_quantity_clamps() {
        let mut session = session();
        let apple = ProductId::new("1");

        session.change_quantity(&apple, "-5");
        assert_eq!(session.quantity(&apple), 0);

        session.change_quantity(&apple, "notanumber");
        assert_eq!(session.quantity(&apple), 0);
    }

    #[test]
    fn test_compute_total_uses_current_view() {
        let mut session = session();
        session.change_quantity(&ProductId::new("1"), "2");
        session.change_quantity(&ProductId::new("2"), "1");
        session.change_quantity(&ProductId::new("4"), "3");

        let all = session.compute_total();
        assert_eq!(all.calories, 290.0);
        assert_eq!(all.protein, 11.0);

        session.filter_by_type(Some("Dairy".to_string()));
        let dairy = session.compute_total();
        assert_eq!(dairy.calories, 100.0);
        assert_eq!(session.visible_totals(), Some(&dairy));
    }

    #[test]
    fn test_close_totals_hides_overlay() {
        let mut session = session();
        session.change_quantity(&ProductId::new("3"), "1");
        let totals = session.compute_total();

        session.close_totals();
        assert!(session.visible_totals().is_none());

        assert_eq!(session.compute_total(), totals);
        assert_eq!(session.visible_totals(), Some(&totals));
    }
}

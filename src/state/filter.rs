use super::catalog::Catalog;
use super::data::Product;

/// Keep products whose category equals `category` exactly.
///
/// An absent or empty category selects the whole catalog.
pub fn filter_by_type(catalog: &Catalog, category: Option<&str>) -> FilteredView {
    match category {
        None | Some("") => FilteredView::all(catalog),
        Some(wanted) => {
            FilteredView::matching(catalog, |product| product.category.as_deref() == Some(wanted))
        }
    }
}

/// Keep products whose name contains `text`, ignoring case.
///
/// Empty text selects the whole catalog.
pub fn search_by_text(catalog: &Catalog, text: &str) -> FilteredView {
    if text.is_empty() {
        return FilteredView::all(catalog);
    }

    let needle = text.to_lowercase();
    FilteredView::matching(catalog, |product| product.name.to_lowercase().contains(&needle))
}

/// Active type filter and search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<String>,
    pub search: String,
}

/// A subset of the catalog.
///
/// Stored as ascending positions into the catalog so it always preserves
/// catalog order and can be recomputed at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// Every product of the catalog
    pub fn all(catalog: &Catalog) -> Self {
        FilteredView {
            indices: (0..catalog.len()).collect(),
        }
    }

    /// Products matching both the category and the search text
    pub fn derive(catalog: &Catalog, filters: &FilterState) -> Self {
        filter_by_type(catalog, filters.category.as_deref())
            .intersect(&search_by_text(catalog, &filters.search))
    }

    fn matching<F>(catalog: &Catalog, predicate: F) -> Self
    where
        F: Fn(&Product) -> bool,
    {
        let indices = catalog
            .products()
            .iter()
            .enumerate()
            .filter(|(_, product)| predicate(*product))
            .map(|(index, _)| index)
            .collect();

        FilteredView { indices }
    }

    /// Products present in both views, still in catalog order
    pub fn intersect(&self, other: &FilteredView) -> Self {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|index| other.indices.binary_search(index).is_ok())
            .collect();

        FilteredView { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The `position`-th product of the view
    pub fn get<'a>(&self, catalog: &'a Catalog, position: usize) -> Option<&'a Product> {
        self.indices
            .get(position)
            .and_then(|&index| catalog.products().get(index))
    }

    /// Resolve the view against its catalog, in catalog order
    pub fn products<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Product> + 'a {
        self.indices
            .iter()
            .filter_map(move |&index| catalog.products().get(index))
    }
}

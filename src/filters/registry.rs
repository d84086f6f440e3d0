//! Filter registry for describing the available filters.

use crate::core::metadata::{Category, FilterMetadata};
use crate::core::params::{FilterKind, FilterParameters};
use indexmap::IndexMap;

/// Registry of filter metadata, keyed by filter id.
///
/// Entries keep their registration order, which for the built-ins is the
/// order the pipeline applies them in.
pub struct FilterRegistry {
    /// Filters indexed by their unique ID.
    filters: IndexMap<String, FilterMetadata>,
    /// Filters grouped by category.
    categories: IndexMap<Category, Vec<String>>,
}

impl FilterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            filters: IndexMap::new(),
            categories: IndexMap::new(),
        }
    }

    /// Create a registry pre-populated with built-in filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::filters::builtin::register_all(&mut registry);
        registry
    }

    /// Register filter metadata. A later registration for the same id replaces
    /// the earlier one.
    pub fn register(&mut self, metadata: FilterMetadata) {
        let id = metadata.id.clone();
        let category = metadata.category;

        if let Some(previous) = self.filters.insert(id.clone(), metadata) {
            if let Some(ids) = self.categories.get_mut(&previous.category) {
                ids.retain(|i| i != &id);
            }
        }

        self.categories.entry(category).or_default().push(id);
    }

    /// Get metadata by id.
    pub fn get_metadata(&self, id: &str) -> Option<&FilterMetadata> {
        self.filters.get(id)
    }

    /// Get metadata for a filter kind.
    pub fn get(&self, kind: FilterKind) -> Option<&FilterMetadata> {
        self.filters.get(kind.name())
    }

    /// Check if a filter is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    /// Get all registered filter IDs.
    pub fn filter_ids(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(|s| s.as_str())
    }

    /// Get all registered filters.
    pub fn filters(&self) -> impl Iterator<Item = &FilterMetadata> {
        self.filters.values()
    }

    /// Get filters by category.
    pub fn filters_by_category(&self, category: &Category) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|ids| ids.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    /// Search filters by id, name or description.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();

        self.filters
            .iter()
            .filter(|(_, metadata)| {
                metadata.id.contains(&query)
                    || metadata.name.to_lowercase().contains(&query)
                    || metadata.description.to_lowercase().contains(&query)
            })
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Filters that take part in the per-pixel pass, in composition order.
    pub fn composition_order(&self) -> Vec<&FilterMetadata> {
        let mut staged: Vec<_> = self.filters.values().filter(|m| m.stage.is_some()).collect();
        staged.sort_by_key(|m| m.stage);
        staged
    }

    /// Filters whose value lies outside the documented slider range.
    pub fn out_of_range(&self, params: &FilterParameters) -> Vec<(FilterKind, f64)> {
        params
            .iter()
            .filter_map(|(kind, setting)| {
                let metadata = self.get(kind)?;
                (!metadata.in_range(setting.value)).then_some((kind, setting.value))
            })
            .collect()
    }

    /// Get the total number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Get filters grouped by category for display.
    pub fn grouped_by_category(&self) -> IndexMap<Category, Vec<&FilterMetadata>> {
        let mut grouped: IndexMap<Category, Vec<&FilterMetadata>> = IndexMap::new();

        for category in Category::all() {
            let members: Vec<_> = self
                .filters_by_category(category)
                .into_iter()
                .filter_map(|id| self.filters.get(id))
                .collect();
            if !members.is_empty() {
                grouped.insert(*category, members);
            }
        }

        grouped
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

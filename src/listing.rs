//! Category filter, substring search and "load more" paging over a fully
//! fetched collection. Shared by blog posts, events and gallery images.

use serde::Serialize;

/// Category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "All";

/// Items visible before any "load more".
pub const INITIAL_VISIBLE: usize = 4;

/// Items revealed by each "load more".
pub const LOAD_MORE_STEP: usize = 4;

/// An item that can be searched and grouped by category.
pub trait Listable {
    fn title(&self) -> &str;
    /// Excerpt or description.
    fn summary(&self) -> &str;
    fn category(&self) -> &str;
}

/// `"All"` followed by the distinct categories of `items` in first-seen order.
pub fn derive_categories<T: Listable>(items: &[T]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !categories.iter().any(|c| c == item.category()) {
            categories.push(item.category().to_string());
        }
    }
    categories
}

pub fn matches<T: Listable>(item: &T, search: &str, category: &str) -> bool {
    let search = search.to_lowercase();
    let found = search.is_empty()
        || item.title().to_lowercase().contains(&search)
        || item.summary().to_lowercase().contains(&search);

    found && (category == ALL_CATEGORIES || item.category() == category)
}

/// Items matching `search` (case-insensitive substring of title or summary)
/// and `category` (exact, or `"All"`), in their original order.
pub fn filter<'a, T: Listable>(items: &'a [T], search: &str, category: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches(*item, search, category))
        .collect()
}

pub fn paginate<T>(items: &[T], visible: usize) -> &[T] {
    &items[..visible.min(items.len())]
}

/// Browsing state over one collection.
///
/// Changing the search term or the category resets the visible count to
/// [`INITIAL_VISIBLE`], so a filter change always starts from the first page.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    categories: Vec<String>,
    search: String,
    category: String,
    visible: usize,
}

impl<T: Listable> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            categories: derive_categories(&items),
            items,
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            visible: INITIAL_VISIBLE,
        }
    }

    /// Replace the collection after a refetch. Filters are kept; categories are
    /// derived again.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.categories = derive_categories(&items);
        self.items = items;
    }

    pub fn set_search(&mut self, search: &str) {
        if self.search != search {
            self.search = search.to_string();
            self.visible = INITIAL_VISIBLE;
        }
    }

    pub fn set_category(&mut self, category: &str) {
        if self.category != category {
            self.category = category.to_string();
            self.visible = INITIAL_VISIBLE;
        }
    }

    /// Reveal [`LOAD_MORE_STEP`] more items, never beyond the filtered count.
    /// Does nothing once every match is visible, so the count never drops
    /// below [`INITIAL_VISIBLE`].
    pub fn load_more(&mut self) {
        let total = self.total_matches();
        if self.visible < total {
            self.visible = (self.visible + LOAD_MORE_STEP).min(total);
        }
    }

    pub fn filtered(&self) -> Vec<&T> {
        filter(&self.items, &self.search, &self.category)
    }

    pub fn visible_items(&self) -> Vec<&T> {
        let filtered = self.filtered();
        paginate(&filtered, self.visible).to_vec()
    }

    pub fn total_matches(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches(*item, &self.search, &self.category))
            .count()
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.total_matches()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.min(self.total_matches())
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T: Listable + Clone> ListView<T> {
    pub fn page(&self) -> ListPage<T> {
        ListPage {
            items: self.visible_items().into_iter().cloned().collect(),
            categories: self.categories.clone(),
            category: self.category.clone(),
            search: self.search.clone(),
            visible_count: self.visible_count(),
            total_matches: self.total_matches(),
            has_more: self.has_more(),
        }
    }
}

/// Snapshot of a [`ListView`] as sent to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub categories: Vec<String>,
    pub category: String,
    pub search: String,
    pub visible_count: usize,
    pub total_matches: usize,
    pub has_more: bool,
}

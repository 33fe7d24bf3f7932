//! Ordered, keyed in-memory sequence.

/// An entity addressable by its business identifier.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Insertion-ordered list keyed by business identifier.
///
/// Uniqueness is not enforced here; callers reject duplicate identifiers
/// before appending.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed + Clone> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Replace everything, unless `items` is empty.
    ///
    /// An empty source means "no data yet", not "clear". Returns whether the
    /// contents were replaced.
    pub fn replace_all(&mut self, items: Vec<T>) -> bool {
        if items.is_empty() {
            return false;
        }
        self.items = items;
        true
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the first item with this key in place. Returns false if absent.
    pub fn replace_by_key(&mut self, key: &str, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.key() == key) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove every item with this key. Returns the number removed.
    pub fn remove_by_key(&mut self, key: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        before - self.items.len()
    }
}

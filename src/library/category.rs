use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::StoreError;

/// A named category a game can belong to.
///
/// Identity is the name: equality and ordering compare names and nothing
/// else. Instances come from `CategoryStore::get_or_create` so every
/// caller asking for one name shares one allocation.
#[derive(Debug, Eq)]
pub struct Category {
    name: String,
}

impl Category {
    fn new(name: &str) -> Self {
        Category {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Interning store for categories.
///
/// `get_or_create` is safe under concurrent creation: two callers racing
/// on the same new name both end up with the same `Arc`.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: RwLock<HashMap<String, Arc<Category>>>,
}

impl CategoryStore {
    pub fn new() -> Self {
        CategoryStore {
            categories: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_or_create(&self, name: &str) -> Result<Arc<Category>, StoreError> {
        {
            let categories = self
                .categories
                .read()
                .map_err(|_| StoreError::LockPoisoned("category read"))?;
            if let Some(category) = categories.get(name) {
                return Ok(Arc::clone(category));
            }
        }

        let mut categories = self
            .categories
            .write()
            .map_err(|_| StoreError::LockPoisoned("category write"))?;
        let category = categories
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Category::new(name)));
        Ok(Arc::clone(category))
    }

    pub fn get(&self, name: &str) -> Result<Option<Arc<Category>>, StoreError> {
        let categories = self
            .categories
            .read()
            .map_err(|_| StoreError::LockPoisoned("category read"))?;
        Ok(categories.get(name).map(Arc::clone))
    }

    /// All known category names, sorted.
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        let categories = self
            .categories
            .read()
            .map_err(|_| StoreError::LockPoisoned("category read"))?;
        let mut names: Vec<String> = categories.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let categories = self
            .categories
            .read()
            .map_err(|_| StoreError::LockPoisoned("category read"))?;
        Ok(categories.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

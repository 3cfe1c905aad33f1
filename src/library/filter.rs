use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::library::game::GameInfo;

/// A named predicate over category membership.
///
/// A game matches when it is in every `require` category and in none of
/// the `exclude` categories. Empty sets match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub require: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

impl Filter {
    pub fn new(name: &str) -> Self {
        Filter {
            name: name.to_string(),
            require: BTreeSet::new(),
            exclude: BTreeSet::new(),
        }
    }

    pub fn with_require(mut self, category: &str) -> Self {
        self.require.insert(category.to_string());
        self
    }

    pub fn with_exclude(mut self, category: &str) -> Self {
        self.exclude.insert(category.to_string());
        self
    }

    pub fn matches(&self, game: &GameInfo) -> bool {
        self.require.iter().all(|name| game.has_category(name))
            && !self.exclude.iter().any(|name| game.has_category(name))
    }
}

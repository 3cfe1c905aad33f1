use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Stable primary key for a game.
pub type GameId = u32;

/// A game in the user's library: identity plus category membership.
///
/// Membership is stored by category name. Strategies receive a cloned
/// snapshot; mutation goes through `GameList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: GameId,
    pub name: String,
    pub categories: BTreeSet<String>,
}

impl GameInfo {
    pub fn new(id: GameId, name: &str) -> Self {
        GameInfo {
            id,
            name: name.to_string(),
            categories: BTreeSet::new(),
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.contains(name)
    }
}
